//! Named-layer registry standing in for the map surface.
//!
//! Redraws never mutate a layer in place: every update removes all layers carrying a
//! name and adds one fresh layer with that name.

use geo::Point;
use serde::Serialize;
use tracing::debug;

use crate::models::Layer;

/// The parts of a map surface the point selection logic drives.
pub trait MapSurface {
    /// Remove every layer whose name is `name`.
    fn remove_layers_named(&mut self, name: &str);

    fn add_layer(&mut self, layer: Layer);

    /// Show the click-info popup at `position` (Web Mercator meters).
    fn show_popup(&mut self, position: Point<f64>, content: String);

    fn hide_popup(&mut self);

    /// Upsert by name: drop any existing layers with the same name, then add `layer`.
    fn replace_layer(&mut self, layer: Layer) {
        self.remove_layers_named(&layer.name);
        self.add_layer(layer);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Popup {
    /// `None` when the popup is dismissed.
    pub position: Option<Point<f64>>,
    pub content: String,
}

impl Popup {
    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }
}

/// In-memory [`MapSurface`] keeping layers in draw order.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    layers: Vec<Layer>,
    popup: Popup,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    pub fn count_named(&self, name: &str) -> usize {
        self.layers.iter().filter(|layer| layer.name == name).count()
    }

    pub fn popup(&self) -> &Popup {
        &self.popup
    }
}

impl MapSurface for LayerRegistry {
    fn remove_layers_named(&mut self, name: &str) {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.name != name);
        debug!("Removed {} layer(s) named '{}'", before - self.layers.len(), name);
    }

    fn add_layer(&mut self, layer: Layer) {
        debug!("Added layer '{}'", layer.name);
        self.layers.push(layer);
    }

    fn show_popup(&mut self, position: Point<f64>, content: String) {
        self.popup = Popup {
            position: Some(position),
            content,
        };
    }

    fn hide_popup(&mut self) {
        self.popup.position = None;
    }
}
