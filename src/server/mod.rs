//! HTTP API for the catalogue, extraction and uploads.

mod error;
mod handlers;
mod routes;

pub use error::ApiError;
pub use routes::create_router;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Settings;
use crate::repository::{
    DieselArtworkRepository, DieselDbContext, DieselHistoryRepository, DieselPeriodRepository,
};
use crate::services::{CloudinaryHost, ExtractionService, ImageHost};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub db: DieselDbContext,
    pub periods: Arc<DieselPeriodRepository>,
    pub artworks: Arc<DieselArtworkRepository>,
    pub history: Arc<DieselHistoryRepository>,
    pub extraction: Arc<ExtractionService>,
    /// `None` when no image host credentials are configured.
    pub image_host: Option<Arc<dyn ImageHost>>,
    pub uploads_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Build state around a database context.
    pub fn with_context(db: DieselDbContext, settings: &Settings) -> anyhow::Result<Self> {
        let image_host: Option<Arc<dyn ImageHost>> = match settings.image_host.clone() {
            Some(config) => Some(Arc::new(CloudinaryHost::new(config)?)),
            None => {
                warn!("Image hosting is not configured; /api/upload/image will fail");
                None
            }
        };

        Ok(Self {
            periods: Arc::new(db.periods()),
            artworks: Arc::new(db.artworks()),
            history: Arc::new(db.history()),
            extraction: Arc::new(ExtractionService::new(
                settings.keywords.clone(),
                settings.llm.clone(),
                db.history(),
            )),
            image_host,
            uploads_dir: settings.uploads_dir.clone(),
            static_dir: settings.static_dir.clone(),
            db,
        })
    }

    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let db = settings.create_db_context();
        db.init_schema().await?;
        settings.ensure_directories()?;
        Self::with_context(db, settings)
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, addr: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(settings).await?;
    let app = create_router(state);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
