use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    // Constant travel speed used for the time estimate
    #[serde(default = "default_speed")]
    pub speed_meters_per_second: f64,

    #[serde(default = "default_center_longitude")]
    pub map_center_longitude: f64,

    #[serde(default = "default_center_latitude")]
    pub map_center_latitude: f64,

    #[serde(default = "default_zoom")]
    pub map_zoom: u8,

    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    #[serde(default = "default_auto_pan_duration")]
    pub popup_auto_pan_duration_ms: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Config>()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            speed_meters_per_second: default_speed(),
            map_center_longitude: default_center_longitude(),
            map_center_latitude: default_center_latitude(),
            map_zoom: default_zoom(),
            tile_url: default_tile_url(),
            popup_auto_pan_duration_ms: default_auto_pan_duration(),
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_speed() -> f64 {
    crate::libraries::geo_distance::DEFAULT_SPEED_METERS_PER_SECOND
}

fn default_center_longitude() -> f64 {
    135.0
}

fn default_center_latitude() -> f64 {
    35.0
}

fn default_zoom() -> u8 {
    6
}

fn default_tile_url() -> String {
    "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_auto_pan_duration() -> u64 {
    250
}
