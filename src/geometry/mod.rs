pub mod projection;

pub use projection::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Projector};
