pub mod layers;
pub mod point_selection;
