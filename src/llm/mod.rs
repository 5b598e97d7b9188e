//! Remote text-generation fallback for artwork extraction.

mod client;
mod config;
mod prompts;

pub use client::{parse_artworks, LlmClient, LlmError};
pub use config::{ExtractionOptions, LlmConfig, ResolvedLlm};
pub use prompts::EXTRACTION_SYSTEM_PROMPT;
