use log::{debug, trace};

use super::{GestureState, InputEvent, MapEvent, Phase, PinchBaseline, ScreenPoint, SurfaceRect};
use crate::config::{CanvasConfig, GestureConfig};
use crate::domain::PlanePoint;
use crate::viewport::{MAX_SCALE, MIN_SCALE, ViewportTransform};

/// Pinch baselines shorter than this (in pixels) are ignored
const MIN_PINCH_DISTANCE: f64 = 1e-6;

/// Result of applying one input event
#[derive(Debug, Clone, PartialEq)]
struct Transition {
    state: GestureState,
    transform: ViewportTransform,
    clicked: Option<String>,
}

/// Turns input events into viewport changes and click decisions
///
/// Owns the viewport transform; every change goes through
/// [`ViewportTransform::zoom_by`] or [`ViewportTransform::pan_by`].
#[derive(Debug, Clone)]
pub struct GestureController {
    config: GestureConfig,
    canvas: CanvasConfig,
    surface: SurfaceRect,
    state: GestureState,
    transform: ViewportTransform,
}

impl GestureController {
    /// Create a controller whose surface initially matches the canvas 1:1
    pub fn new(config: GestureConfig, canvas: CanvasConfig) -> Self {
        Self {
            config,
            canvas,
            surface: SurfaceRect::new(0.0, 0.0, canvas.width, canvas.height),
            state: GestureState::default(),
            transform: ViewportTransform::default(),
        }
    }

    pub fn with_surface(mut self, surface: SurfaceRect) -> Self {
        self.surface = surface;
        self
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn surface(&self) -> SurfaceRect {
        self.surface
    }

    /// Plane units per screen pixel
    ///
    /// Falls back to 1 when the surface has no usable width (e.g. while
    /// collapsed to zero during a resize).
    pub fn pixel_ratio(&self) -> f64 {
        let width = self.surface.width;
        if width.is_finite() && width > 0.0 {
            self.canvas.width / width
        } else {
            1.0
        }
    }

    /// Convert a screen position to a canvas position
    pub fn to_canvas(&self, point: ScreenPoint) -> PlanePoint {
        let ratio = self.pixel_ratio();
        PlanePoint::new(
            (point.x - self.surface.left) * ratio,
            (point.y - self.surface.top) * ratio,
        )
    }

    fn canvas_center(&self) -> PlanePoint {
        PlanePoint::new(self.canvas.width / 2.0, self.canvas.height / 2.0)
    }

    /// Process one event, returning the resulting map events
    ///
    /// A transform change is reported before a click produced by the same
    /// event.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<MapEvent> {
        if let InputEvent::Resize {
            left,
            top,
            width,
            height,
        } = event
        {
            self.surface = SurfaceRect::new(*left, *top, *width, *height);
            debug!("Surface resized to {}x{}", width, height);
            return Vec::new();
        }

        let Transition {
            state,
            transform,
            clicked,
        } = self.transition(event);

        let mut events = Vec::new();
        if transform != self.transform {
            trace!("Transform {:?} -> {:?}", self.transform, transform);
            events.push(MapEvent::TransformChanged { transform });
        }
        if let Some(id) = clicked {
            debug!("Click resolved on {}", id);
            events.push(MapEvent::FeatureClicked { id });
        }

        self.state = state;
        self.transform = transform;
        events
    }

    /// Compute the next state and transform without touching `self`
    fn transition(&self, event: &InputEvent) -> Transition {
        let mut state = self.state.clone();
        let mut transform = self.transform;
        let mut clicked = None;

        match event {
            InputEvent::PointerDown { x, y } => {
                state = GestureState::pressed(ScreenPoint::new(*x, *y));
            }
            InputEvent::PointerMove { x, y } => {
                transform = self.drag_to(&mut state, transform, ScreenPoint::new(*x, *y));
            }
            InputEvent::PointerUp { target, .. } => {
                if state.release() {
                    clicked = target.clone();
                }
            }
            InputEvent::PointerLeave | InputEvent::TouchCancel => {
                state.release();
            }
            InputEvent::Wheel { x, y, delta_y } => {
                if let Some(factor) = self.wheel_factor(*delta_y) {
                    let focal = self.to_canvas(ScreenPoint::new(*x, *y));
                    transform = transform.zoom_by(factor, focal);
                }
            }
            InputEvent::TouchStart { touches } => match touches.as_slice() {
                [] => {}
                [only] => {
                    if state.phase == Phase::Idle {
                        state = GestureState::pressed(*only);
                    }
                }
                [a, b, ..] => state.begin_pinch(a.distance(b), transform.k()),
            },
            InputEvent::TouchMove { touches } => match touches.as_slice() {
                [] => {}
                [only] => transform = self.drag_to(&mut state, transform, *only),
                [a, b, ..] => {
                    if let Some(pinch) = state.pinch {
                        let distance = a.distance(b);
                        if pinch.distance >= MIN_PINCH_DISTANCE {
                            transform = self.pinch_to(pinch, transform, a, b);
                        } else if distance >= MIN_PINCH_DISTANCE {
                            // Fingers landed on one spot; measure from here instead
                            state.begin_pinch(distance, transform.k());
                        }
                    }
                }
            },
            InputEvent::TouchEnd { touches, target } => match touches.as_slice() {
                [] => {
                    if state.release() {
                        clicked = target.clone();
                    }
                }
                [only] => {
                    if state.phase == Phase::Pinching {
                        state.end_pinch(*only);
                    }
                }
                [a, b, ..] => {
                    // A third finger lifted: re-baseline on the remaining pair
                    if state.pinch.is_some() {
                        state.begin_pinch(a.distance(b), transform.k());
                    }
                }
            },
            InputEvent::ZoomIn => {
                transform = transform.zoom_by(self.config.button_zoom_factor, self.canvas_center());
            }
            InputEvent::ZoomOut => {
                transform =
                    transform.zoom_by(1.0 / self.config.button_zoom_factor, self.canvas_center());
            }
            InputEvent::Reset => transform = transform.reset(),
            InputEvent::Resize { .. } => {}
        }

        Transition {
            state,
            transform,
            clicked,
        }
    }

    /// Pan by the movement since the previous position
    fn drag_to(
        &self,
        state: &mut GestureState,
        transform: ViewportTransform,
        to: ScreenPoint,
    ) -> ViewportTransform {
        if !state.is_tracking() {
            return transform;
        }
        let Some(last) = state.last else {
            return transform;
        };

        let ratio = self.pixel_ratio();
        let next = transform.pan_by((to.x - last.x) * ratio, (to.y - last.y) * ratio);
        state.last = Some(to);

        if let Some(origin) = state.origin {
            let threshold = self.config.drag_threshold;
            if (to.x - origin.x).abs() > threshold || (to.y - origin.y).abs() > threshold {
                state.dragged = true;
                state.phase = Phase::Dragging;
            }
        }

        next
    }

    /// Zoom relative to the pinch baseline, anchored at the touch midpoint
    ///
    /// `pinch.distance` must be at least `MIN_PINCH_DISTANCE`.
    fn pinch_to(
        &self,
        pinch: PinchBaseline,
        transform: ViewportTransform,
        a: &ScreenPoint,
        b: &ScreenPoint,
    ) -> ViewportTransform {
        let desired = (pinch.scale * (a.distance(b) / pinch.distance)).clamp(MIN_SCALE, MAX_SCALE);
        let focal = self.to_canvas(a.midpoint(b));
        transform.zoom_by(desired / transform.k(), focal)
    }

    fn wheel_factor(&self, delta_y: f64) -> Option<f64> {
        if delta_y < 0.0 {
            Some(self.config.wheel_zoom_in)
        } else if delta_y > 0.0 {
            Some(self.config.wheel_zoom_out)
        } else {
            None
        }
    }
}
