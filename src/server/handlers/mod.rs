//! HTTP request handlers for the API.

mod ai;
mod artworks;
mod periods;
mod seed;
mod timeline;
mod uploads;

use axum::Json;
use serde::Serialize;

pub use ai::{ai_extract, ai_history, ai_read_doc, ai_test_key};
pub use artworks::{create_artwork, delete_artwork, get_artwork, list_artworks, update_artwork};
pub use periods::{create_period, delete_period, get_period, list_periods, update_period};
pub use seed::seed;
pub use timeline::timeline;
pub use uploads::upload_image;

/// `{ ok, list }` envelope.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub ok: bool,
    pub list: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(list: Vec<T>) -> Json<Self> {
        Json(Self { ok: true, list })
    }
}

/// `{ ok, item }` envelope.
#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    pub ok: bool,
    pub item: T,
}

impl<T> ItemResponse<T> {
    pub fn new(item: T) -> Json<Self> {
        Json(Self { ok: true, item })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: &'static str,
}

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}
