pub mod coordinate;
pub mod layer;
pub mod requests;

// Re-export commonly used types
pub use coordinate::{Coordinate, CoordinateParseError};
pub use layer::{Feature, Layer, Style};
pub use requests::{
    ClickRequest, MapViewResponse, SearchResponse, SessionResponse, SlotState,
};
