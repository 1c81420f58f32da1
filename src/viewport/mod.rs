pub mod transform;

pub use transform::{MAX_SCALE, MIN_SCALE, ViewportTransform};
