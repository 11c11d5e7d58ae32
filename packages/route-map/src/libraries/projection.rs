//! Conversions between geographic coordinates (EPSG:4326) and the Web Mercator
//! plane (EPSG:3857, also published as EPSG:900913) the map surface draws in.

use geo::Point;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::models::Coordinate;

/// Spherical Mercator radius in meters.
pub const WEB_MERCATOR_RADIUS: f64 = 6_378_137.0;

/// Project a WGS84 coordinate onto the Web Mercator plane. Output is (x, y) in meters.
pub fn to_web_mercator(coordinate: &Coordinate) -> Point<f64> {
    let x = WEB_MERCATOR_RADIUS * coordinate.longitude.to_radians();
    let y = WEB_MERCATOR_RADIUS * (FRAC_PI_4 + coordinate.latitude.to_radians() / 2.0).tan().ln();
    Point::new(x, y)
}

/// Inverse of [`to_web_mercator`].
pub fn from_web_mercator(point: &Point<f64>) -> Coordinate {
    let longitude = (point.x() / WEB_MERCATOR_RADIUS).to_degrees();
    let latitude = (2.0 * (point.y() / WEB_MERCATOR_RADIUS).exp().atan() - FRAC_PI_2).to_degrees();
    Coordinate::new(latitude, longitude)
}
