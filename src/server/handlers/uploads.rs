//! Multipart upload handling.
//!
//! Uploaded bytes are written to a `NamedTempFile` under the uploads
//! directory; the file is removed when the guard drops, whichever way the
//! request ends.

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use super::super::error::ApiError;
use super::super::AppState;
use crate::services::ImageHostError;

/// Form field carrying the file.
const FILE_FIELD: &str = "file";

/// An uploaded file held on disk for the duration of a request.
pub struct UploadedFile {
    pub filename: String,
    pub temp: NamedTempFile,
}

/// Take the original filename and bytes of the `file` field.
pub async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(ApiError::BadRequest("no file received".to_string()))
}

/// Persist bytes to a temporary file in `dir`.
pub async fn stage_upload(
    dir: &Path,
    filename: String,
    bytes: Vec<u8>,
) -> Result<UploadedFile, ApiError> {
    let temp = tempfile::Builder::new()
        .prefix("upload-")
        .tempfile_in(dir)
        .map_err(|e| {
            tracing::error!("Failed to create temp file in {}: {}", dir.display(), e);
            ApiError::Internal
        })?;
    tokio::fs::write(temp.path(), &bytes).await.map_err(|e| {
        tracing::error!("Failed to write upload: {}", e);
        ApiError::Internal
    })?;

    debug!("Staged {} ({} bytes) at {}", filename, bytes.len(), temp.path().display());
    Ok(UploadedFile { filename, temp })
}

#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub ok: bool,
    pub url: String,
}

/// Forward an image to the configured host and return its public URL.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadImageResponse>, ApiError> {
    let (filename, bytes) = read_file_field(&mut multipart).await?;
    let host = state.image_host.clone().ok_or(ImageHostError::Unconfigured)?;

    let upload = stage_upload(&state.uploads_dir, filename, bytes).await?;
    let url = host.upload(upload.temp.path(), &upload.filename).await?;

    Ok(Json(UploadImageResponse { ok: true, url }))
}
