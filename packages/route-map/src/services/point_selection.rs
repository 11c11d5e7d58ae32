use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

use crate::libraries::geo_distance::{
    great_circle_distance, travel_time, DEFAULT_SPEED_METERS_PER_SECOND,
};
use crate::libraries::projection::{from_web_mercator, to_web_mercator};
use crate::models::layer::{GOAL_LAYER_NAME, START_LAYER_NAME};
use crate::models::{Coordinate, Layer};
use crate::services::layers::{LayerRegistry, MapSurface};

/// Which point a committed click should fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Start,
    Goal,
}

impl Slot {
    pub fn layer_name(self) -> &'static str {
        match self {
            Slot::Start => START_LAYER_NAME,
            Slot::Goal => GOAL_LAYER_NAME,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Start => write!(f, "start"),
            Slot::Goal => write!(f, "goal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Not specified the start loc.")]
    MissingStart,

    #[error("Not specified the goal loc.")]
    MissingGoal,
}

impl SearchError {
    pub fn slot(&self) -> Slot {
        match self {
            SearchError::MissingStart => Slot::Start,
            SearchError::MissingGoal => Slot::Goal,
        }
    }
}

/// A text field on the page that stays hidden until first written.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayField {
    pub text: String,
    pub visible: bool,
}

impl DisplayField {
    fn publish(&mut self, text: String) {
        self.text = text;
        self.visible = true;
    }
}

/// Everything the page keeps between events.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pending: Option<String>,
    start: Option<String>,
    goal: Option<String>,
    distance: DisplayField,
    time: DisplayField,
}

impl AppState {
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn set_pending(&mut self, text: String) {
        self.pending = Some(text);
    }

    pub fn slot(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Start => self.start.as_deref(),
            Slot::Goal => self.goal.as_deref(),
        }
    }

    pub fn set_slot(&mut self, slot: Slot, text: String) {
        match slot {
            Slot::Start => self.start = Some(text),
            Slot::Goal => self.goal = Some(text),
        }
    }

    pub fn distance(&self) -> &DisplayField {
        &self.distance
    }

    pub fn time(&self) -> &DisplayField {
        &self.time
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub start: Coordinate,
    pub goal: Coordinate,
    pub distance_meters: f64,
    /// Distance divided by speed. Labelled "min." on the page although it is seconds.
    pub time: f64,
}

impl RouteSummary {
    pub fn distance_text(&self) -> String {
        format!("{} m,", self.distance_meters)
    }

    pub fn time_text(&self) -> String {
        format!("{} min.", self.time)
    }
}

/// Handles map clicks, "set as start/goal" and "search" for one page session.
pub struct PointSelectionController<S: MapSurface = LayerRegistry> {
    state: AppState,
    surface: S,
    speed_meters_per_second: f64,
}

impl PointSelectionController<LayerRegistry> {
    pub fn new() -> Self {
        Self::with_surface(LayerRegistry::new(), DEFAULT_SPEED_METERS_PER_SECOND)
    }
}

impl Default for PointSelectionController<LayerRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MapSurface> PointSelectionController<S> {
    pub fn with_surface(surface: S, speed_meters_per_second: f64) -> Self {
        Self {
            state: AppState::default(),
            surface,
            speed_meters_per_second,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Record a map click as the pending coordinate and open the popup over it.
    pub fn set_pending(&mut self, coordinate: Coordinate) {
        let text = coordinate.to_display_text();
        debug!("Pending coordinate set to {}", text);

        self.surface
            .show_popup(to_web_mercator(&coordinate), format!("You clicked here: {}", text));
        self.state.set_pending(text);
    }

    /// Same as [`set_pending`](Self::set_pending) for a click reported in Web Mercator meters.
    pub fn set_pending_projected(&mut self, position: Point<f64>) -> Coordinate {
        let coordinate = from_web_mercator(&position);
        self.set_pending(coordinate);
        coordinate
    }

    /// Copy the pending coordinate into `slot`.
    ///
    /// Does nothing when there is no pending value or it is malformed. Returns the
    /// committed coordinate otherwise.
    pub fn commit(&mut self, slot: Slot) -> Option<Coordinate> {
        let Some(text) = self.state.pending().map(str::to_string) else {
            debug!("Ignoring {} commit: no pending coordinate", slot);
            return None;
        };

        let coordinate = match Coordinate::parse(&text) {
            Ok(coordinate) => coordinate,
            Err(e) => {
                debug!("Ignoring {} commit: {}", slot, e);
                return None;
            }
        };

        self.state.set_slot(slot, text);
        self.surface
            .replace_layer(Layer::point_marker(slot.layer_name(), &coordinate));

        info!("Set {} point to {}", slot, coordinate);
        Some(coordinate)
    }

    /// Compute the route between the committed start and goal and redraw it.
    ///
    /// An uncommitted pending click does not take part. On error nothing is changed.
    pub fn search(&mut self) -> Result<RouteSummary, SearchError> {
        let start = self.slot_coordinate(Slot::Start).ok_or_else(|| {
            warn!("Search rejected: start point not set");
            SearchError::MissingStart
        })?;
        let goal = self.slot_coordinate(Slot::Goal).ok_or_else(|| {
            warn!("Search rejected: goal point not set");
            SearchError::MissingGoal
        })?;

        let distance_meters = great_circle_distance(&start, &goal);
        let summary = RouteSummary {
            start,
            goal,
            distance_meters,
            time: travel_time(distance_meters, self.speed_meters_per_second),
        };

        self.state.distance.publish(summary.distance_text());
        self.state.time.publish(summary.time_text());
        self.surface.replace_layer(Layer::route_line(&start, &goal));

        info!(
            "Route {} -> {}: {:.1}m, {:.1}",
            start, goal, summary.distance_meters, summary.time
        );
        Ok(summary)
    }

    /// Close the click-info popup. The pending coordinate is kept.
    pub fn dismiss_popup(&mut self) {
        debug!("Popup dismissed");
        self.surface.hide_popup();
    }

    fn slot_coordinate(&self, slot: Slot) -> Option<Coordinate> {
        self.state
            .slot(slot)
            .and_then(|text| Coordinate::parse(text).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layer::ROUTE_LAYER_NAME;

    fn tokyo() -> Coordinate {
        Coordinate::new(35.6812, 139.7671)
    }

    fn osaka() -> Coordinate {
        Coordinate::new(34.6937, 135.5023)
    }

    /// Surface that records calls so the remove-then-add order can be checked.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl MapSurface for RecordingSurface {
        fn remove_layers_named(&mut self, name: &str) {
            self.calls.push(format!("remove {}", name));
        }

        fn add_layer(&mut self, layer: Layer) {
            self.calls.push(format!("add {}", layer.name));
        }

        fn show_popup(&mut self, _position: Point<f64>, content: String) {
            self.calls.push(format!("popup {}", content));
        }

        fn hide_popup(&mut self) {
            self.calls.push("hide popup".to_string());
        }
    }

    #[test]
    fn test_commit_without_pending_is_noop() {
        let mut controller = PointSelectionController::new();

        assert_eq!(controller.commit(Slot::Start), None);
        assert_eq!(controller.state().slot(Slot::Start), None);
        assert!(controller.surface().layers().is_empty());
    }

    #[test]
    fn test_commit_malformed_pending_keeps_prior_value() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(tokyo());
        controller.commit(Slot::Start);

        controller.state.set_pending("foo,bar".to_string());
        assert_eq!(controller.commit(Slot::Start), None);

        assert_eq!(controller.state().slot(Slot::Start), Some("35.6812,139.7671"));
    }

    #[test]
    fn test_commit_overwrites_slot_and_marker() {
        let mut controller = PointSelectionController::new();

        controller.set_pending(tokyo());
        controller.commit(Slot::Goal);
        controller.set_pending(osaka());
        assert_eq!(controller.commit(Slot::Goal), Some(osaka()));

        assert_eq!(controller.state().slot(Slot::Goal), Some("34.6937,135.5023"));
        assert_eq!(controller.surface().count_named(GOAL_LAYER_NAME), 1);
        assert_eq!(
            controller.surface().get(GOAL_LAYER_NAME),
            Some(&Layer::point_marker(GOAL_LAYER_NAME, &osaka()))
        );
    }

    #[test]
    fn test_set_pending_opens_popup() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(tokyo());

        let popup = controller.surface().popup();
        assert!(popup.is_visible());
        assert_eq!(popup.content, "You clicked here: 35.6812,139.7671");
        assert_eq!(controller.state().pending(), Some("35.6812,139.7671"));
    }

    #[test]
    fn test_set_pending_projected() {
        let mut controller = PointSelectionController::new();
        let projected = to_web_mercator(&Coordinate::new(35.0, 135.0));

        let coordinate = controller.set_pending_projected(projected);

        assert!((coordinate.latitude - 35.0).abs() < 1e-9);
        assert!((coordinate.longitude - 135.0).abs() < 1e-9);
        assert!(controller.state().pending().is_some());
    }

    #[test]
    fn test_commit_signed_coordinate_is_noop() {
        let mut controller = PointSelectionController::new();

        // Sydney: the click text carries a minus sign
        controller.set_pending(Coordinate::new(-33.8688, 151.2093));
        assert_eq!(controller.commit(Slot::Start), None);
        assert_eq!(controller.state().slot(Slot::Start), None);

        controller.set_pending(Coordinate::new(51.5074, -0.1278));
        assert_eq!(controller.commit(Slot::Goal), None);
        assert_eq!(controller.state().slot(Slot::Goal), None);

        assert!(controller.surface().layers().is_empty());
        assert_eq!(controller.search(), Err(SearchError::MissingStart));
    }

    #[test]
    fn test_dismiss_popup_keeps_pending() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(tokyo());
        controller.dismiss_popup();

        assert!(!controller.surface().popup().is_visible());
        assert_eq!(controller.commit(Slot::Start), Some(tokyo()));
    }

    #[test]
    fn test_search_missing_start() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(osaka());
        controller.commit(Slot::Goal);

        let err = controller.search().unwrap_err();
        assert_eq!(err, SearchError::MissingStart);
        assert_eq!(err.slot(), Slot::Start);
        assert_eq!(err.to_string(), "Not specified the start loc.");
        assert_eq!(controller.state().distance(), &DisplayField::default());
        assert_eq!(controller.state().time(), &DisplayField::default());
        assert_eq!(controller.surface().count_named(ROUTE_LAYER_NAME), 0);
    }

    #[test]
    fn test_search_missing_goal() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(tokyo());
        controller.commit(Slot::Start);

        let err = controller.search().unwrap_err();
        assert_eq!(err, SearchError::MissingGoal);
        assert_eq!(err.to_string(), "Not specified the goal loc.");
        assert!(!controller.state().distance().visible);
    }

    #[test]
    fn test_search_start_reported_first() {
        let mut controller = PointSelectionController::new();
        assert_eq!(controller.search(), Err(SearchError::MissingStart));
    }

    #[test]
    fn test_failed_search_keeps_previous_result() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(tokyo());
        controller.commit(Slot::Start);
        controller.set_pending(osaka());
        controller.commit(Slot::Goal);
        controller.search().unwrap();
        let distance = controller.state().distance().clone();

        controller.state.set_slot(Slot::Goal, "foo,bar".to_string());
        assert_eq!(controller.search(), Err(SearchError::MissingGoal));
        assert_eq!(controller.state().distance(), &distance);
    }

    #[test]
    fn test_search_tokyo_to_osaka() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(tokyo());
        controller.commit(Slot::Start);
        controller.set_pending(osaka());
        controller.commit(Slot::Goal);

        let summary = controller.search().unwrap();

        assert!((summary.distance_meters - 402_336.0).abs() < 2_000.0);
        assert_eq!(summary.time, summary.distance_meters / 10.0);
        assert_eq!(
            controller.state().distance().text,
            format!("{} m,", summary.distance_meters)
        );
        assert_eq!(
            controller.state().time().text,
            format!("{} min.", summary.time)
        );
        assert!(controller.state().distance().visible);
        assert!(controller.state().time().visible);
        assert_eq!(
            controller.surface().get(ROUTE_LAYER_NAME),
            Some(&Layer::route_line(&tokyo(), &osaka()))
        );
    }

    #[test]
    fn test_search_ignores_uncommitted_click() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(tokyo());
        controller.commit(Slot::Start);
        controller.set_pending(osaka());
        controller.commit(Slot::Goal);
        controller.set_pending(Coordinate::new(43.0686, 141.3508));

        let summary = controller.search().unwrap();
        assert_eq!(summary.goal, osaka());
    }

    #[test]
    fn test_same_point_search_is_zero() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(Coordinate::new(35.0, 135.0));
        controller.commit(Slot::Start);
        controller.commit(Slot::Goal);

        let summary = controller.search().unwrap();
        assert_eq!(summary.distance_meters, 0.0);
        assert_eq!(summary.time, 0.0);
        assert_eq!(controller.state().distance().text, "0 m,");
        assert_eq!(controller.state().time().text, "0 min.");
    }

    #[test]
    fn test_repeated_search_keeps_single_route_layer() {
        let mut controller = PointSelectionController::new();
        controller.set_pending(tokyo());
        controller.commit(Slot::Start);
        controller.set_pending(osaka());
        controller.commit(Slot::Goal);

        controller.search().unwrap();
        controller.search().unwrap();

        assert_eq!(controller.surface().count_named(ROUTE_LAYER_NAME), 1);
    }

    #[test]
    fn test_custom_speed() {
        let mut controller = PointSelectionController::with_surface(LayerRegistry::new(), 20.0);
        controller.set_pending(tokyo());
        controller.commit(Slot::Start);
        controller.set_pending(osaka());
        controller.commit(Slot::Goal);

        let summary = controller.search().unwrap();
        assert_eq!(summary.time, summary.distance_meters / 20.0);
    }

    #[test]
    fn test_redraws_remove_before_add() {
        let mut controller =
            PointSelectionController::with_surface(RecordingSurface::default(), 10.0);
        controller.set_pending(tokyo());
        controller.commit(Slot::Start);
        controller.commit(Slot::Goal);
        controller.search().unwrap();

        assert_eq!(
            controller.surface().calls,
            vec![
                "popup You clicked here: 35.6812,139.7671".to_string(),
                format!("remove {}", START_LAYER_NAME),
                format!("add {}", START_LAYER_NAME),
                format!("remove {}", GOAL_LAYER_NAME),
                format!("add {}", GOAL_LAYER_NAME),
                format!("remove {}", ROUTE_LAYER_NAME),
                format!("add {}", ROUTE_LAYER_NAME),
            ]
        );
    }
}
