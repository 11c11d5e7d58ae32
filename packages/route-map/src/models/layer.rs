use geo::{Geometry, LineString};
use serde::Serialize;

use crate::libraries::projection::to_web_mercator;
use crate::models::Coordinate;

pub const START_LAYER_NAME: &str = "Start Point Layer";
pub const GOAL_LAYER_NAME: &str = "Goal Point Layer";
pub const ROUTE_LAYER_NAME: &str = "Route Layer";
pub const ROUTE_FEATURE_NAME: &str = "Route Line String";

const MARKER_RADIUS: f64 = 5.0;
const MARKER_FILL: &str = "#ff0000";
const ROUTE_STROKE_COLOR: &str = "#ffcc33";
const ROUTE_STROKE_WIDTH: f64 = 5.0;

/// A named vector layer. Geometries are in Web Mercator meters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub features: Vec<Feature>,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub geometry: Geometry<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Style {
    Circle { radius: f64, fill: String },
    Stroke { color: String, width: f64 },
}

impl Layer {
    /// Single red dot marking a selected point.
    pub fn point_marker(name: &str, coordinate: &Coordinate) -> Self {
        Self {
            name: name.to_string(),
            features: vec![Feature {
                name: None,
                geometry: Geometry::Point(to_web_mercator(coordinate)),
            }],
            style: Style::Circle {
                radius: MARKER_RADIUS,
                fill: MARKER_FILL.to_string(),
            },
        }
    }

    /// Straight segment between the two route endpoints.
    pub fn route_line(start: &Coordinate, goal: &Coordinate) -> Self {
        let line = LineString::from(vec![to_web_mercator(start), to_web_mercator(goal)]);

        Self {
            name: ROUTE_LAYER_NAME.to_string(),
            features: vec![Feature {
                name: Some(ROUTE_FEATURE_NAME.to_string()),
                geometry: Geometry::LineString(line),
            }],
            style: Style::Stroke {
                color: ROUTE_STROKE_COLOR.to_string(),
                width: ROUTE_STROKE_WIDTH,
            },
        }
    }
}
