//! Image hosting for artwork and period pictures.
//!
//! Uploads go to a Cloudinary-compatible API using a signed request, so no
//! unsigned upload preset has to be configured on the account.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from the image host.
#[derive(Debug, Error)]
pub enum ImageHostError {
    #[error("image hosting is not configured")]
    Unconfigured,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload request failed: {0}")]
    Request(String),

    #[error("upload rejected: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A place uploaded images can be stored and served from.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload the file at `path` and return its public URL.
    async fn upload(&self, path: &Path, filename: &str) -> Result<String, ImageHostError>;
}

/// Credentials for a Cloudinary account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageHostConfig {
    pub cloud_name: String,
    pub api_key: String,
    #[serde(skip_serializing)]
    pub api_secret: String,
    #[serde(default = "default_folder")]
    pub folder: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_folder() -> String {
    "artpivot".to_string()
}

fn default_api_base() -> String {
    "https://api.cloudinary.com/v1_1".to_string()
}

impl ImageHostConfig {
    /// Read `CLOUDINARY_CLOUD_NAME`, `CLOUDINARY_API_KEY` and
    /// `CLOUDINARY_API_SECRET`; all three must be set.
    pub fn from_env() -> Option<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Some(Self {
            cloud_name: var("CLOUDINARY_CLOUD_NAME")?,
            api_key: var("CLOUDINARY_API_KEY")?,
            api_secret: var("CLOUDINARY_API_SECRET")?,
            folder: default_folder(),
            api_base: default_api_base(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

/// Signed uploads to Cloudinary.
pub struct CloudinaryHost {
    config: ImageHostConfig,
    client: reqwest::Client,
}

impl CloudinaryHost {
    pub fn new(config: ImageHostConfig) -> Result<Self, ImageHostError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ImageHostError::Request(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

/// Signature over the sorted upload parameters followed by the secret.
fn sign(params: &[(&str, &str)], secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");
    hex::encode(Sha256::digest(format!("{}{}", joined, secret).as_bytes()))
}

#[async_trait]
impl ImageHost for CloudinaryHost {
    async fn upload(&self, path: &Path, filename: &str) -> Result<String, ImageHostError> {
        let bytes = tokio::fs::read(path).await?;
        let mime = mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string();
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[
                ("folder", self.config.folder.as_str()),
                ("timestamp", timestamp.as_str()),
            ],
            &self.config.api_secret,
        );

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(&mime)
            .map_err(|e| ImageHostError::Request(e.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.config.folder.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        debug!("Uploading {} ({}) to image host", filename, mime);
        let resp = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ImageHostError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ImageHostError::Rejected { status, body });
        }

        let body: UploadResponse = resp
            .json()
            .await
            .map_err(|e| ImageHostError::Request(e.to_string()))?;
        let url = body
            .secure_url
            .or(body.url)
            .ok_or_else(|| ImageHostError::Request("response has no url".to_string()))?;

        info!("Uploaded {} to {}", filename, url);
        Ok(url)
    }
}
