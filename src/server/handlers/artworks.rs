//! Artwork CRUD endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::super::error::ApiError;
use super::super::AppState;
use super::{ItemResponse, ListResponse};
use crate::models::{Artwork, ArtworkDraft, ArtworkInput, ArtworkPatch};

pub async fn list_artworks(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Artwork>>, ApiError> {
    Ok(ListResponse::new(state.artworks.list().await?))
}

pub async fn get_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse<Artwork>>, ApiError> {
    let artwork = state.artworks.get(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(ItemResponse::new(artwork))
}

pub async fn create_artwork(
    State(state): State<AppState>,
    Json(input): Json<ArtworkInput>,
) -> Result<Json<ItemResponse<Artwork>>, ApiError> {
    let artwork = Artwork::new(ArtworkDraft::try_from(input)?);
    state.artworks.create(&artwork).await?;
    Ok(ItemResponse::new(artwork))
}

pub async fn update_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ArtworkInput>,
) -> Result<Json<ItemResponse<Artwork>>, ApiError> {
    let patch = ArtworkPatch::try_from(input)?;
    let artwork = state
        .artworks
        .update(&id, &patch)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(ItemResponse::new(artwork))
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

pub async fn delete_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    if !state.artworks.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    Ok(Json(OkResponse { ok: true }))
}
