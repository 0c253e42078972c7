//! Helpers shared between the connectivity and ranging tools.

pub mod geometry;
pub mod numeric;
pub mod ordered_map;

pub use geometry::Point;
pub use ordered_map::OrderedMap;
