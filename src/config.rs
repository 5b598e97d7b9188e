//! Configuration management.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables, then command-line flags.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::KeywordTables;
use crate::llm::LlmConfig;
use crate::repository::DieselDbContext;
use crate::services::ImageHostConfig;

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "artpivot.db";

/// Config file looked up inside the data directory.
pub const CONFIG_FILENAME: &str = "artpivot.toml";

/// Subdirectory for temporary uploads.
pub const UPLOADS_SUBDIR: &str = "uploads";

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5001";

/// Resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    pub database_url: Option<String>,
    /// Directory for temporary uploaded files.
    pub uploads_dir: PathBuf,
    /// Built SPA served at `/`.
    pub static_dir: Option<PathBuf>,
    /// Listen address for `serve`.
    pub bind: SocketAddr,
    pub llm: LlmConfig,
    /// `None` disables image uploads.
    pub image_host: Option<ImageHostConfig>,
    pub keywords: KeywordTables,
}

/// Platform data dir, falling back to home, then the current directory.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("artpivot")
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5001))
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_data_dir(default_data_dir())
    }
}

impl Settings {
    /// Create settings with a custom data directory and no env overrides.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            uploads_dir: data_dir.join(UPLOADS_SUBDIR),
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            static_dir: None,
            bind: default_bind(),
            llm: LlmConfig::default(),
            image_host: None,
            keywords: KeywordTables::default(),
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        match self.database_url {
            Some(ref url) => url.clone(),
            None => format!("sqlite:{}", self.database_path().display()),
        }
    }

    /// Full path of the SQLite file under the data directory.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure the data and upload directories exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for (label, dir) in [("data", &self.data_dir), ("uploads", &self.uploads_dir)] {
            fs::create_dir_all(dir).map_err(|e| {
                std::io::Error::new(
                    e.kind(),
                    format!("Failed to create {} directory '{}': {}", label, dir.display(), e),
                )
            })?;
        }
        Ok(())
    }

    /// Create a database context using the configured URL or path.
    pub fn create_db_context(&self) -> DieselDbContext {
        DieselDbContext::from_url(&self.database_url())
    }
}

/// On-disk configuration; every field optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<String>,
    pub database: Option<String>,
    pub database_url: Option<String>,
    pub uploads_dir: Option<String>,
    pub static_dir: Option<String>,
    pub bind: Option<String>,
    pub llm: LlmConfig,
    pub image_host: Option<ImageHostConfig>,
    pub keywords: KeywordTables,
    /// Path the config was loaded from.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML config {}", path.display()))?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Directory relative paths in the file are resolved against.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(Path::to_path_buf))
    }

    /// Expand `~` and resolve relative paths against `base_dir`.
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply file values on top of `settings`.
    pub fn apply_to_settings(&self, settings: &mut Settings) -> anyhow::Result<()> {
        let base_dir = self.base_dir().unwrap_or_else(|| PathBuf::from("."));

        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, &base_dir);
            settings.uploads_dir = settings.data_dir.join(UPLOADS_SUBDIR);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref url) = self.database_url {
            settings.database_url = Some(url.clone());
        }
        if let Some(ref uploads) = self.uploads_dir {
            settings.uploads_dir = self.resolve_path(uploads, &base_dir);
        }
        if let Some(ref static_dir) = self.static_dir {
            settings.static_dir = Some(self.resolve_path(static_dir, &base_dir));
        }
        if let Some(ref bind) = self.bind {
            settings.bind = parse_bind_address(bind)?;
        }
        settings.llm = self.llm.clone();
        if self.image_host.is_some() {
            settings.image_host = self.image_host.clone();
        }
        settings.keywords = self.keywords.clone();
        Ok(())
    }
}

/// Parse `port`, `host:port` or `[v6]:port`.
pub fn parse_bind_address(bind: &str) -> anyhow::Result<SocketAddr> {
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(SocketAddr::from(([127, 0, 0, 1], port)));
    }
    bind.parse::<SocketAddr>()
        .with_context(|| format!("Invalid bind address '{}'", bind))
}

/// Where to look for configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file (`--config`).
    pub config_path: Option<PathBuf>,
    /// Data directory override (`--data-dir`).
    pub data_dir: Option<PathBuf>,
}

/// Resolve settings from defaults, config file, environment and CLI overrides.
pub fn load_settings(options: &LoadOptions) -> anyhow::Result<Settings> {
    let mut settings = match options.data_dir {
        Some(ref dir) => Settings::with_data_dir(expand(dir)),
        None => Settings::default(),
    };

    let config_path = options
        .config_path
        .clone()
        .or_else(|| Some(settings.data_dir.join(CONFIG_FILENAME)).filter(|p| p.exists()));

    if let Some(path) = config_path {
        debug!("Loading config from {}", path.display());
        let config = Config::load_from_path(&path)?;
        config.apply_to_settings(&mut settings)?;

        // An explicit --data-dir beats the file.
        if let Some(ref dir) = options.data_dir {
            settings.data_dir = expand(dir);
            if config.uploads_dir.is_none() {
                settings.uploads_dir = settings.data_dir.join(UPLOADS_SUBDIR);
            }
        }
    }

    apply_env_overrides(&mut settings);
    Ok(settings)
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).as_ref())
}

/// Environment variables win over the config file.
fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = Some(url);
    }
    settings.llm = settings.llm.clone().with_env_overrides();
    if let Some(host) = ImageHostConfig::from_env() {
        settings.image_host = Some(host);
    }
}
