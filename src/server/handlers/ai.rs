//! Document reading and AI-assisted extraction endpoints.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::super::error::ApiError;
use super::super::AppState;
use super::uploads::{read_file_field, stage_upload};
use super::ListResponse;
use crate::llm::ExtractionOptions;
use crate::models::ExtractionHistoryRecord;
use crate::services::{read_document, DocumentKind, ExtractionRequest, SuggestedArtworks};

/// Minimum trimmed length for an API key to look plausible.
const MIN_PLAUSIBLE_KEY_LEN: usize = 20;

#[derive(Debug, Serialize)]
pub struct ReadDocResponse {
    pub ok: bool,
    pub text: String,
}

/// Return the plain text of an uploaded `.docx`.
pub async fn ai_read_doc(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReadDocResponse>, ApiError> {
    let (filename, bytes) = read_file_field(&mut multipart).await?;
    DocumentKind::from_filename(&filename)?;

    let upload = stage_upload(&state.uploads_dir, filename, bytes).await?;
    let text = tokio::task::spawn_blocking(move || {
        // The guard moves in here so the file is gone once decoding ends.
        read_document(upload.temp.path(), &upload.filename)
    })
    .await
    .map_err(|e| {
        error!("Document decode task failed: {}", e);
        ApiError::Internal
    })??;

    Ok(Json(ReadDocResponse { ok: true, text }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractBody {
    pub text: Option<String>,
    #[serde(flatten)]
    pub options: ExtractionOptions,
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub ok: bool,
    /// Always empty; only artworks are extracted.
    pub periods: Vec<serde_json::Value>,
    pub artworks: SuggestedArtworks,
}

/// Run local extraction with remote fallback.
pub async fn ai_extract(
    State(state): State<AppState>,
    Json(body): Json<ExtractBody>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let request = ExtractionRequest {
        text: body.text.unwrap_or_default(),
        options: body.options,
        filename: body.filename,
    };
    let artworks = state.extraction.extract(&request).await?;

    Ok(Json(ExtractResponse {
        ok: true,
        periods: Vec::new(),
        artworks,
    }))
}

/// Extraction runs, newest first.
pub async fn ai_history(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<ExtractionHistoryRecord>>, ApiError> {
    Ok(ListResponse::new(state.history.list(None).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestKeyBody {
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TestKeyResponse {
    pub ok: bool,
    pub message: &'static str,
}

/// Length-only plausibility check; never contacts the provider.
pub async fn ai_test_key(Json(body): Json<TestKeyBody>) -> Result<Json<TestKeyResponse>, ApiError> {
    let key = body
        .api_key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ApiError::BadRequest("missing apiKey".to_string()))?;

    let plausible = key.trim().len() > MIN_PLAUSIBLE_KEY_LEN;
    Ok(Json(TestKeyResponse {
        ok: plausible,
        message: if plausible {
            "API key format looks valid"
        } else {
            "API key may be invalid"
        },
    }))
}
