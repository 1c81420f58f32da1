//! Pointer, wheel and touch handling for the map viewport
//!
//! The [`GestureController`] consumes a typed stream of [`InputEvent`]s and
//! owns the only mutable [`ViewportTransform`](crate::viewport::ViewportTransform).
//! Each event produces the next gesture state and transform, plus any
//! [`MapEvent`]s for the host to act on.

pub mod controller;
pub mod event;
pub mod script;
pub mod state;

pub use controller::GestureController;
pub use event::{InputEvent, MapEvent, MapListener, ScreenPoint, SurfaceRect};
pub use script::{load_script, parse_script, replay};
pub use state::{GestureState, Phase, PinchBaseline};
