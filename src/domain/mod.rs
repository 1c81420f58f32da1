pub mod feature;
pub mod point;

pub use feature::{Feature, FeatureSet, Geometry, HighlightSet, Ring};
pub use point::{GeoPoint, PlanePoint};
