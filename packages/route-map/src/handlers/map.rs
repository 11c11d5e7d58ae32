use axum::{extract::State, Json};

use super::RouterState;
use crate::models::MapViewResponse;

/// Initial view and base layer settings for the map surface.
pub async fn get_map_view(State((config, _)): State<RouterState>) -> Json<MapViewResponse> {
    Json(MapViewResponse::from_config(&config))
}
