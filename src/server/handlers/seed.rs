//! Demo data endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use super::super::error::ApiError;
use super::super::AppState;
use crate::services::{seed_demo_data, SeedSummary};

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub summary: SeedSummary,
}

pub async fn seed(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    let summary = seed_demo_data(&state.db).await?;
    Ok(Json(SeedResponse { ok: true, summary }))
}
