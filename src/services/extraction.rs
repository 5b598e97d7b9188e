//! Extraction orchestration.
//!
//! Runs the local heuristic pipeline first and only falls back to the remote
//! model when it yields nothing usable. Every successful run appends one
//! history record; failed runs append none.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extraction::{parse_local, KeywordTables};
use crate::llm::{ExtractionOptions, LlmClient, LlmConfig, LlmError};
use crate::models::ArtworkSuggestion;
use crate::repository::DieselHistoryRepository;

/// Errors that end an extraction run.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("missing document text")]
    MissingText,
    /// The local pipeline found nothing and no API key is available.
    #[error("missing apiKey (required for AI fallback)")]
    MissingCredential,
    #[error("AI extraction failed: {0}")]
    Llm(#[from] LlmError),
}

/// One extraction call.
#[derive(Debug, Clone, Default)]
pub struct ExtractionRequest {
    pub text: String,
    pub options: ExtractionOptions,
    /// Source document name, recorded in the history log.
    pub filename: Option<String>,
}

/// Why the local pipeline handed over to the remote model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoImagesSection,
    NoUsableEntries,
}

/// Terminal state of the local pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOutcome {
    Parsed(Vec<ArtworkSuggestion>),
    NeedsAi(FallbackReason),
}

/// Artworks suggested by a successful run.
///
/// Remote items are kept exactly as the model produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SuggestedArtworks {
    Local(Vec<ArtworkSuggestion>),
    Remote(Vec<Value>),
}

impl SuggestedArtworks {
    pub fn len(&self) -> usize {
        match self {
            Self::Local(items) => items.len(),
            Self::Remote(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

/// Run the local pipeline, defaulting undeterminable years to 0.
pub fn run_local(text: &str, tables: &KeywordTables) -> LocalOutcome {
    let Some(entries) = parse_local(text, tables) else {
        return LocalOutcome::NeedsAi(FallbackReason::NoImagesSection);
    };
    if entries.is_empty() {
        return LocalOutcome::NeedsAi(FallbackReason::NoUsableEntries);
    }

    LocalOutcome::Parsed(
        entries
            .into_iter()
            .map(|entry| ArtworkSuggestion {
                title: entry.title,
                artist: entry.artist,
                year: entry.year.unwrap_or(0),
                image_url: String::new(),
                description: entry.description,
            })
            .collect(),
    )
}

/// Extraction service shared by the CLI and the HTTP API.
#[derive(Clone)]
pub struct ExtractionService {
    tables: KeywordTables,
    llm: LlmConfig,
    history: DieselHistoryRepository,
}

impl ExtractionService {
    pub fn new(tables: KeywordTables, llm: LlmConfig, history: DieselHistoryRepository) -> Self {
        Self {
            tables,
            llm,
            history,
        }
    }

    /// Keyword tables driving the classifier.
    pub fn tables(&self) -> &KeywordTables {
        &self.tables
    }

    /// Extract artwork suggestions from a document.
    pub async fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> Result<SuggestedArtworks, ExtractionError> {
        if request.text.trim().is_empty() {
            return Err(ExtractionError::MissingText);
        }
        debug!(
            "Extracting from document {} ({} bytes)",
            &hex::encode(Sha256::digest(request.text.as_bytes()))[..12],
            request.text.len()
        );

        let artworks = match run_local(&request.text, &self.tables) {
            LocalOutcome::Parsed(items) => {
                info!("Local parser found {} artworks", items.len());
                SuggestedArtworks::Local(items)
            }
            LocalOutcome::NeedsAi(reason) => {
                debug!("Falling back to remote model: {:?}", reason);
                let resolved = self.llm.resolve(&request.options);
                if resolved.api_key.is_none() {
                    return Err(ExtractionError::MissingCredential);
                }
                let client = LlmClient::new(resolved)?;
                let items = client.extract_artworks(&request.text).await?;
                info!(
                    "Remote model {} returned {} artworks",
                    client.model(),
                    items.len()
                );
                SuggestedArtworks::Remote(items)
            }
        };

        self.record_history(request.filename.as_deref()).await;
        Ok(artworks)
    }

    /// Append a history entry; failures are logged and swallowed.
    async fn record_history(&self, filename: Option<&str>) {
        if let Err(e) = self.history.append(filename).await {
            warn!("Failed to record extraction history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::DieselDbContext;
    use tempfile::tempdir;

    const LECTURE: &str = "IMAGES:\n\
        1. Anonymous, Kouros statue, c.530 B.C.\n\
        - marble\n\
        2. Exekias, Achilles and Ajax playing dice\n";

    async fn service() -> (ExtractionService, DieselDbContext, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let ctx = DieselDbContext::new(&dir.path().join("test.db"));
        ctx.init_schema().await.unwrap();
        let service = ExtractionService::new(
            KeywordTables::default(),
            LlmConfig::default(),
            ctx.history(),
        );
        (service, ctx, dir)
    }

    #[test]
    fn test_run_local_defaults_year() {
        let LocalOutcome::Parsed(items) = run_local(LECTURE, &KeywordTables::default()) else {
            panic!("expected local parse");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].artist, "anonymous");
        assert_eq!(items[0].year, -530);
        assert_eq!(items[0].description, "marble");
        assert_eq!(items[1].year, 0);
        assert_eq!(items[1].image_url, "");
    }

    #[test]
    fn test_run_local_fallback_reasons() {
        let tables = KeywordTables::default();
        assert_eq!(
            run_local("Lecture notes without a list", &tables),
            LocalOutcome::NeedsAi(FallbackReason::NoImagesSection)
        );
        assert_eq!(
            run_local("IMAGES:\nsee slides\nREADINGS:\n1. Pollitt", &tables),
            LocalOutcome::NeedsAi(FallbackReason::NoUsableEntries)
        );
    }

    #[tokio::test]
    async fn test_local_success_records_history() {
        let (service, ctx, _dir) = service().await;
        let result = service
            .extract(&ExtractionRequest {
                text: LECTURE.to_string(),
                filename: Some("week-3.docx".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(result.is_local());
        assert_eq!(result.len(), 2);
        let history = ctx.history().list(None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].filename, "week-3.docx");
    }

    #[tokio::test]
    async fn test_missing_text_and_credential() {
        let (service, ctx, _dir) = service().await;

        let err = service
            .extract(&ExtractionRequest {
                text: "   ".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::MissingText));

        let err = service
            .extract(&ExtractionRequest {
                text: "no images here".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::MissingCredential));

        assert!(ctx.history().list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_does_not_fail_extraction() {
        let dir = tempdir().unwrap();
        // Schema never created, so every history insert fails.
        let ctx = DieselDbContext::new(&dir.path().join("empty.db"));
        let service =
            ExtractionService::new(KeywordTables::default(), LlmConfig::default(), ctx.history());

        let result = service
            .extract(&ExtractionRequest {
                text: LECTURE.to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
    }
}
