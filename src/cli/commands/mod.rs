//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod extract;
mod helpers;
mod history;
mod init;
mod seed;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings, LoadOptions};

#[derive(Parser)]
#[command(name = "artpivot")]
#[command(about = "Art history catalogue and lecture-note extraction service")]
#[command(version)]
pub struct Cli {
    /// Data directory (holds the database, uploads and artpivot.toml)
    #[arg(long, global = true, env = "ARTPIVOT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Start the web server
    Serve {
        /// Address to bind: a port ("5001") or host:port ("0.0.0.0:5001")
        bind: Option<String>,
    },

    /// Extract artwork suggestions from a lecture document
    Extract {
        /// A .docx file or a plain-text file
        file: PathBuf,
        /// API key for the AI fallback
        #[arg(long)]
        api_key: Option<String>,
        /// Model name for the AI fallback
        #[arg(long)]
        model: Option<String>,
        /// Base URL of an OpenAI-compatible API
        #[arg(long)]
        base_url: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Insert the demo periods and artworks
    Seed,

    /// Show the extraction history
    History {
        /// Maximum number of entries to show (newest first)
        #[arg(short, long)]
        limit: Option<i64>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        data_dir: cli.data_dir,
    };
    let settings = load_settings(&options)?;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Extract {
            file,
            api_key,
            model,
            base_url,
            json,
        } => {
            let options = crate::llm::ExtractionOptions {
                api_key,
                model,
                base_url,
            };
            extract::cmd_extract(&settings, &file, options, json).await
        }
        Commands::Seed => seed::cmd_seed(&settings).await,
        Commands::History { limit } => history::cmd_history(&settings, limit).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_flags() {
        let cli = Cli::try_parse_from([
            "artpivot",
            "extract",
            "notes.docx",
            "--api-key",
            "sk-test",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Extract {
                file, api_key, json, ..
            } => {
                assert_eq!(file, PathBuf::from("notes.docx"));
                assert_eq!(api_key.as_deref(), Some("sk-test"));
                assert!(json);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["artpivot", "history", "--limit", "5", "--data-dir", "/tmp/ap"])
                .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/ap")));
        assert!(matches!(cli.command, Commands::History { limit: Some(5) }));
    }

    #[test]
    fn test_serve_bind_optional() {
        let cli = Cli::try_parse_from(["artpivot", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { bind: None }));
    }
}
