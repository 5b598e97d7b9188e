//! Timeline layout endpoint.

use axum::{extract::State, Json};
use serde::Serialize;

use super::super::error::ApiError;
use super::super::AppState;
use crate::timeline::TimelineLayout;

#[derive(Debug, Serialize)]
pub struct TimelineResponse {
    pub ok: bool,
    /// Absent when the catalogue is empty.
    #[serde(flatten)]
    pub layout: Option<TimelineLayout>,
}

/// Lay out every period and artwork on the vertical track.
pub async fn timeline(State(state): State<AppState>) -> Result<Json<TimelineResponse>, ApiError> {
    let periods = state.periods.list().await?;
    let artworks = state.artworks.list().await?;

    Ok(Json(TimelineResponse {
        ok: true,
        layout: TimelineLayout::build(&periods, &artworks),
    }))
}
