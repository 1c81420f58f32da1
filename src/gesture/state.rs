use super::ScreenPoint;

/// Where the current interaction session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Pointer (or one finger) down, still eligible to resolve as a click
    Pressed,
    /// Moved past the drag threshold; release will not click
    Dragging,
    /// Two or more fingers down
    Pinching,
}

/// Distance and scale captured when the second finger lands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchBaseline {
    pub distance: f64,
    pub scale: f64,
}

/// Per-session gesture bookkeeping
///
/// `dragged` is sticky: it is set when movement crosses the drag threshold
/// and only cleared by the next press, so the release that ends a drag
/// never fires a click.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureState {
    pub phase: Phase,
    /// Position of the press that started the session (or segment)
    pub origin: Option<ScreenPoint>,
    /// Position of the previous move
    pub last: Option<ScreenPoint>,
    pub dragged: bool,
    pub pinch: Option<PinchBaseline>,
    /// The session involved a pinch; it can no longer resolve as a click
    pub pinched: bool,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            origin: None,
            last: None,
            dragged: false,
            pinch: None,
            pinched: false,
        }
    }
}

impl GestureState {
    /// Fresh session started by a press
    pub fn pressed(at: ScreenPoint) -> Self {
        Self {
            phase: Phase::Pressed,
            origin: Some(at),
            last: Some(at),
            ..Self::default()
        }
    }

    /// Pointer is down and panning
    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, Phase::Pressed | Phase::Dragging)
    }

    /// Capture a pinch baseline, suspending any pan or drag in progress
    pub fn begin_pinch(&mut self, distance: f64, scale: f64) {
        self.phase = Phase::Pinching;
        self.pinch = Some(PinchBaseline { distance, scale });
        self.dragged = false;
        self.pinched = true;
        self.last = None;
    }

    /// Drop back to single-finger panning from `remaining`
    pub fn end_pinch(&mut self, remaining: ScreenPoint) {
        self.phase = Phase::Pressed;
        self.pinch = None;
        self.origin = Some(remaining);
        self.last = Some(remaining);
    }

    /// Close the session, returning whether it resolves as a click
    pub fn release(&mut self) -> bool {
        let click = self.is_tracking() && !self.dragged && !self.pinched;
        self.phase = Phase::Idle;
        self.pinch = None;
        self.last = None;
        click
    }
}
