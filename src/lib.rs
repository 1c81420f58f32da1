//! visitmap - Pan/zoomable world map of visited countries

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod loader;
pub mod render;
pub mod viewport;

pub use domain::{Feature, FeatureSet, GeoPoint, Geometry, HighlightSet, PlanePoint, Ring};
pub use error::MapError;
pub use geometry::Projector;
pub use gesture::{GestureController, InputEvent, MapEvent};
pub use render::{HitTester, Path, anchor_point, build_path};
pub use viewport::ViewportTransform;
