pub mod geojson;
pub mod highlight;

pub use geojson::{load_features, parse_features};
pub use highlight::{load_highlights, parse_highlights};
