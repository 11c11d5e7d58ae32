use serde::{Deserialize, Serialize};

use super::coordinate::Coordinate;
use super::layer::Layer;
use crate::config::Config;
use crate::libraries::projection::to_web_mercator;
use crate::services::layers::Popup;
use crate::services::point_selection::{
    DisplayField, PointSelectionController, RouteSummary, Slot,
};

/// A map click, either in degrees or as a raw Web Mercator position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClickRequest {
    Geographic { latitude: f64, longitude: f64 },
    Projected { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub is_set: bool,
}

impl SlotState {
    fn from_text(text: Option<&str>) -> Self {
        Self {
            text: text.map(str::to_string),
            is_set: text.is_some(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub pending: Option<String>,
    pub start: SlotState,
    pub goal: SlotState,
    pub distance: DisplayField,
    pub time: DisplayField,
    pub popup: Popup,
    pub layers: Vec<Layer>,
}

impl SessionResponse {
    pub fn from_controller(controller: &PointSelectionController) -> Self {
        let state = controller.state();
        Self {
            pending: state.pending().map(str::to_string),
            start: SlotState::from_text(state.slot(Slot::Start)),
            goal: SlotState::from_text(state.slot(Slot::Goal)),
            distance: state.distance().clone(),
            time: state.time().clone(),
            popup: controller.surface().popup().clone(),
            layers: controller.surface().layers().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub start: Coordinate,
    pub goal: Coordinate,
    pub distance_meters: f64,
    pub time: f64,
    pub distance_text: String,
    pub time_text: String,
}

impl From<RouteSummary> for SearchResponse {
    fn from(summary: RouteSummary) -> Self {
        Self {
            distance_text: summary.distance_text(),
            time_text: summary.time_text(),
            start: summary.start,
            goal: summary.goal,
            distance_meters: summary.distance_meters,
            time: summary.time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapViewResponse {
    pub center: Coordinate,
    /// `center` projected to Web Mercator, as [x, y].
    pub center_projected: [f64; 2],
    pub zoom: u8,
    pub projection: String,
    pub tile_url: String,
    pub attribution_collapsible: bool,
    pub popup_auto_pan: bool,
    pub popup_auto_pan_duration_ms: u64,
}

impl MapViewResponse {
    pub fn from_config(config: &Config) -> Self {
        let center = Coordinate::new(config.map_center_latitude, config.map_center_longitude);
        let projected = to_web_mercator(&center);

        Self {
            center,
            center_projected: [projected.x(), projected.y()],
            zoom: config.map_zoom,
            projection: "EPSG:3857".to_string(),
            tile_url: config.tile_url.clone(),
            attribution_collapsible: false,
            popup_auto_pan: true,
            popup_auto_pan_duration_ms: config.popup_auto_pan_duration_ms,
        }
    }
}
