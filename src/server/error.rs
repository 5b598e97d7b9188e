//! HTTP error mapping.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::models::ValidationError;
use crate::repository::DieselError;
use crate::services::{DocumentTextError, ExtractionError, ImageHostError};

/// Error returned by API handlers.
///
/// Upstream and internal failures carry only a client-safe message; the
/// detail is logged where the conversion happens.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    UnsupportedMediaType(String),
    NotFound,
    Upstream(&'static str),
    Internal,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.to_string()),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            ),
        };

        let body = Json(ErrorBody {
            ok: false,
            error: message,
        });
        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<DieselError> for ApiError {
    fn from(e: DieselError) -> Self {
        error!("Database error: {}", e);
        ApiError::Internal
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError::BadRequest(format!("invalid multipart body: {}", e))
    }
}

impl From<ExtractionError> for ApiError {
    fn from(e: ExtractionError) -> Self {
        match e {
            invalid @ (ExtractionError::MissingText | ExtractionError::MissingCredential) => {
                ApiError::BadRequest(invalid.to_string())
            }
            ExtractionError::Llm(inner) => {
                error!("AI extraction failed: {}", inner);
                ApiError::Upstream("AI extraction failed")
            }
        }
    }
}

impl From<DocumentTextError> for ApiError {
    fn from(e: DocumentTextError) -> Self {
        match e {
            DocumentTextError::Unsupported(_) => {
                ApiError::UnsupportedMediaType("only .docx files are supported".to_string())
            }
            other => {
                error!("Document decode failed: {}", other);
                ApiError::Upstream("failed to read document")
            }
        }
    }
}

impl From<ImageHostError> for ApiError {
    fn from(e: ImageHostError) -> Self {
        match e {
            ImageHostError::Unconfigured => ApiError::Upstream("image hosting is not configured"),
            other => {
                error!("Image upload failed: {}", other);
                ApiError::Upstream("image upload failed")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(ValidationError::Missing("name")), 400),
            (ApiError::from(ExtractionError::MissingCredential), 400),
            (
                ApiError::from(DocumentTextError::Unsupported(".doc".to_string())),
                415,
            ),
            (ApiError::NotFound, 404),
            (
                ApiError::from(ExtractionError::Llm(LlmError::Connection(
                    "timed out".to_string(),
                ))),
                500,
            ),
            (ApiError::from(ImageHostError::Unconfigured), 500),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status().as_u16(), status);
        }
    }

    #[tokio::test]
    async fn test_upstream_detail_not_exposed() {
        let response = ApiError::from(ExtractionError::Llm(LlmError::Api {
            status: 401,
            body: "invalid key sk-abc".to_string(),
        }))
        .into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "AI extraction failed");
    }
}
