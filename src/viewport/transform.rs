use serde::Serialize;

use crate::domain::PlanePoint;

/// Smallest allowed zoom scale (whole map visible)
pub const MIN_SCALE: f64 = 1.0;
/// Largest allowed zoom scale
pub const MAX_SCALE: f64 = 8.0;

/// Pan/zoom state applied on top of the projected map
///
/// A plane point `p` is shown at canvas position `p * k + (x, y)`.
/// Values are immutable: every operation returns a new transform, and `k`
/// stays within [`MIN_SCALE`, `MAX_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportTransform {
    k: f64,
    x: f64,
    y: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            k: MIN_SCALE,
            x: 0.0,
            y: 0.0,
        }
    }
}

impl ViewportTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn k(&self) -> f64 {
        self.k
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Zoom by `factor` keeping the content under `focal` in place
    ///
    /// `focal` is a canvas position. The resulting scale is clamped, so the
    /// effective ratio may be smaller than `factor`. Non-positive or
    /// non-finite factors leave the transform unchanged.
    pub fn zoom_by(&self, factor: f64, focal: PlanePoint) -> Self {
        if !factor.is_finite() || factor <= 0.0 || !focal.is_finite() {
            return *self;
        }

        let k = (self.k * factor).clamp(MIN_SCALE, MAX_SCALE);
        let ratio = k / self.k;

        Self {
            k,
            x: focal.x - (focal.x - self.x) * ratio,
            y: focal.y - (focal.y - self.y) * ratio,
        }
    }

    /// Translate by a delta in canvas units. Translation is never clamped.
    pub fn pan_by(&self, dx: f64, dy: f64) -> Self {
        if !dx.is_finite() || !dy.is_finite() {
            return *self;
        }
        Self {
            k: self.k,
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// Map a plane point to its canvas position
    pub fn apply(&self, point: PlanePoint) -> PlanePoint {
        PlanePoint::new(point.x * self.k + self.x, point.y * self.k + self.y)
    }

    /// Map a canvas position back to the plane point displayed there
    pub fn invert(&self, point: PlanePoint) -> PlanePoint {
        PlanePoint::new((point.x - self.x) / self.k, (point.y - self.y) / self.k)
    }

    /// Size in plane units that renders as `value` canvas units at this zoom
    ///
    /// Used for stroke widths and label font sizes so they stay constant on
    /// screen.
    pub fn scaled(&self, value: f64) -> f64 {
        value / self.k
    }

    /// SVG `transform` attribute value
    pub fn to_svg(&self) -> String {
        format!(
            "translate({:.3} {:.3}) scale({:.4})",
            self.x, self.y, self.k
        )
    }
}
