pub mod geo_distance;
pub mod projection;
