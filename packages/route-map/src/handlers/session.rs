use axum::{extract::State, Json};
use geo::Point;
use tracing::debug;

use super::{ApiError, RouterState};
use crate::{
    models::{ClickRequest, Coordinate, SearchResponse, SessionResponse},
    services::point_selection::Slot,
};

pub async fn get_session(State((_, session)): State<RouterState>) -> Json<SessionResponse> {
    let controller = session.read().await;
    Json(SessionResponse::from_controller(&controller))
}

/// Map click: becomes the pending coordinate and opens the popup.
pub async fn click(
    State((_, session)): State<RouterState>,
    Json(request): Json<ClickRequest>,
) -> Json<SessionResponse> {
    let mut controller = session.write().await;

    match request {
        ClickRequest::Geographic {
            latitude,
            longitude,
        } => controller.set_pending(Coordinate::new(latitude, longitude)),
        ClickRequest::Projected { x, y } => {
            let coordinate = controller.set_pending_projected(Point::new(x, y));
            debug!("Projected click ({}, {}) -> {}", x, y, coordinate);
        }
    }

    Json(SessionResponse::from_controller(&controller))
}

pub async fn dismiss_popup(State((_, session)): State<RouterState>) -> Json<SessionResponse> {
    let mut controller = session.write().await;
    controller.dismiss_popup();
    Json(SessionResponse::from_controller(&controller))
}

pub async fn commit_start(State((_, session)): State<RouterState>) -> Json<SessionResponse> {
    let mut controller = session.write().await;
    controller.commit(Slot::Start);
    Json(SessionResponse::from_controller(&controller))
}

pub async fn commit_goal(State((_, session)): State<RouterState>) -> Json<SessionResponse> {
    let mut controller = session.write().await;
    controller.commit(Slot::Goal);
    Json(SessionResponse::from_controller(&controller))
}

/// Compute distance and time between the committed points and redraw the route.
pub async fn search(
    State((_, session)): State<RouterState>,
) -> Result<Json<SearchResponse>, ApiError> {
    let mut controller = session.write().await;
    let summary = controller.search()?;
    Ok(Json(summary.into()))
}
