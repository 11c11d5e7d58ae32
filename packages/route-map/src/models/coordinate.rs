use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Two numeric tokens separated by a comma, e.g. `35.6812,139.7671`.
const COORDINATE_PATTERN: &str = r"^[0-9.]+,[0-9.]+$";

fn coordinate_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(COORDINATE_PATTERN).expect("coordinate pattern compiles"))
}

/// A WGS84 position in decimal degrees.
///
/// No range check is applied; out-of-range values are carried through as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse the `"<lat>,<lon>"` display text used by the point slots.
    pub fn parse(text: &str) -> Result<Self, CoordinateParseError> {
        if !coordinate_regex().is_match(text) {
            return Err(CoordinateParseError::Pattern(text.to_string()));
        }

        let (lat, lon) = text
            .split_once(',')
            .ok_or_else(|| CoordinateParseError::Pattern(text.to_string()))?;

        Ok(Self {
            latitude: parse_token(lat)?,
            longitude: parse_token(lon)?,
        })
    }

    /// Check whether `text` would be accepted by [`Coordinate::parse`].
    pub fn is_well_formed(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// Render as the `"<lat>,<lon>"` display text.
    pub fn to_display_text(&self) -> String {
        self.to_string()
    }
}

fn parse_token(token: &str) -> Result<f64, CoordinateParseError> {
    let token = token.trim();
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoordinateParseError::Number(token.to_string())),
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

// geo works in (x, y) = (lon, lat)
impl From<Coordinate> for geo::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo::Point::new(coordinate.longitude, coordinate.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateParseError {
    #[error("expected '<lat>,<lon>', got '{0}'")]
    Pattern(String),

    #[error("invalid number '{0}'")]
    Number(String),
}
