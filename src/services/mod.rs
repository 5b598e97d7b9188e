//! Service layer for catalogue business logic.
//!
//! Services are shared by the CLI and the web server.

pub mod document_text;
pub mod extraction;
pub mod image_host;
pub mod seed;

pub use document_text::{read_document, DocumentKind, DocumentTextError};
pub use extraction::{
    run_local, ExtractionError, ExtractionRequest, ExtractionService, FallbackReason,
    LocalOutcome, SuggestedArtworks,
};
pub use image_host::{CloudinaryHost, ImageHost, ImageHostConfig, ImageHostError};
pub use seed::{seed_demo_data, SeedSummary};
