mod map;
mod session;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::Config,
    services::{
        layers::LayerRegistry,
        point_selection::{PointSelectionController, SearchError},
    },
};

pub use map::get_map_view;
pub use session::{click, commit_goal, commit_start, dismiss_popup, get_session, search};

/// One page session shared by all requests. Handlers hold the lock for their whole
/// body so events are applied one at a time.
pub type SharedSession = Arc<RwLock<PointSelectionController>>;

pub type RouterState = (Config, SharedSession);

pub fn new_session(config: &Config) -> SharedSession {
    Arc::new(RwLock::new(PointSelectionController::with_surface(
        LayerRegistry::new(),
        config.speed_meters_per_second,
    )))
}

/// Build the HTTP router for a fresh session.
pub fn router(config: Config) -> Router {
    let session = new_session(&config);

    Router::new()
        .route("/health", get(health))
        .route("/api/health", get(health))
        .route("/api/map", get(get_map_view))
        .route("/api/session", get(get_session))
        .route("/api/click", post(click))
        .route("/api/popup/dismiss", post(dismiss_popup))
        .route("/api/points/start", post(commit_start))
        .route("/api/points/goal", post(commit_goal))
        .route("/api/search", post(search))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state((config, session))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "route-map",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, slot) = match &self {
            ApiError::Search(e) => (StatusCode::BAD_REQUEST, e.slot()),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
            "slot": slot,
        }));

        (status, body).into_response()
    }
}
