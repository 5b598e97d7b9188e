//! Period CRUD endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use super::super::error::ApiError;
use super::super::AppState;
use super::{ItemResponse, ListResponse};
use crate::models::{ArtPeriod, PeriodDraft, PeriodInput, PeriodPatch};

pub async fn list_periods(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<ArtPeriod>>, ApiError> {
    Ok(ListResponse::new(state.periods.list().await?))
}

pub async fn get_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse<ArtPeriod>>, ApiError> {
    let period = state.periods.get(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(ItemResponse::new(period))
}

pub async fn create_period(
    State(state): State<AppState>,
    Json(input): Json<PeriodInput>,
) -> Result<Json<ItemResponse<ArtPeriod>>, ApiError> {
    let period = ArtPeriod::new(PeriodDraft::try_from(input)?);
    state.periods.create(&period).await?;
    info!("Created period {} ({})", period.name, period.id);
    Ok(ItemResponse::new(period))
}

pub async fn update_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<PeriodInput>,
) -> Result<Json<ItemResponse<ArtPeriod>>, ApiError> {
    let patch = PeriodPatch::try_from(input)?;
    let period = state
        .periods
        .update(&id, &patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(ItemResponse::new(period))
}

#[derive(Debug, Serialize)]
pub struct DeletePeriodResponse {
    pub ok: bool,
    /// Artworks whose period reference was cleared.
    pub detached: usize,
}

pub async fn delete_period(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletePeriodResponse>, ApiError> {
    let detached = state.periods.delete(&id).await?.ok_or(ApiError::NotFound)?;
    info!("Deleted period {}, detached {} artworks", id, detached);
    Ok(Json(DeletePeriodResponse { ok: true, detached }))
}
