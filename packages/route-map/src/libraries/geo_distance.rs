use crate::models::Coordinate;

/// Mean Earth radius used for surface distances, in meters (6378.137 km).
pub const EARTH_RADIUS_METERS: f64 = 6_378_137.0;

/// Default travel speed for time estimates, in meters per second.
pub const DEFAULT_SPEED_METERS_PER_SECOND: f64 = 10.0;

/// Great-circle distance between two WGS84 coordinates in meters.
///
/// Both points are mapped to unit vectors on a sphere and the central angle is taken
/// from their dot product (spherical law of cosines).
pub fn great_circle_distance(start: &Coordinate, goal: &Coordinate) -> f64 {
    if start == goal {
        return 0.0;
    }

    let dot = dot(unit_vector(start), unit_vector(goal));

    central_angle(dot) * EARTH_RADIUS_METERS
}

/// Same as [`great_circle_distance`] with raw degree values.
pub fn calculate_distance(start_lat: f64, start_lon: f64, goal_lat: f64, goal_lon: f64) -> f64 {
    great_circle_distance(
        &Coordinate::new(start_lat, start_lon),
        &Coordinate::new(goal_lat, goal_lon),
    )
}

/// Angle in radians between two unit vectors given their dot product.
///
/// Rounding can push the dot product of nearly identical vectors just past 1.0, which
/// would make `acos` return NaN, so it is clamped to [-1, 1] first.
pub fn central_angle(dot: f64) -> f64 {
    dot.clamp(-1.0, 1.0).acos()
}

/// Naive travel time for `distance_meters` at a constant `speed`.
///
/// The result is in seconds for a speed in m/s.
pub fn travel_time(distance_meters: f64, speed_meters_per_second: f64) -> f64 {
    distance_meters / speed_meters_per_second
}

fn unit_vector(coordinate: &Coordinate) -> [f64; 3] {
    let lat = coordinate.latitude.to_radians();
    let lon = coordinate.longitude.to_radians();

    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
