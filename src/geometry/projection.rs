use crate::domain::{GeoPoint, PlanePoint, Ring};

/// Default logical canvas width in plane units
pub const DEFAULT_WIDTH: f64 = 1000.0;
/// Default logical canvas height in plane units
pub const DEFAULT_HEIGHT: f64 = 500.0;

/// Equirectangular projection from WGS84 degrees to the logical canvas
///
/// Uses a plain linear remap:
/// - x = (lon + 180) * (width / 360)
/// - y = (90 - lat) * (height / 180)
///
/// No polar correction is applied. The canvas is never used to measure
/// real-world distance, so keeping the mapping linear keeps every
/// downstream scale computation trivial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    width: f64,
    height: f64,
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Projector {
    /// Create a projector for a canvas of the given size in plane units
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Project a lon/lat pair to the plane
    ///
    /// Total over all inputs: out-of-range values extrapolate linearly and
    /// non-finite input yields non-finite output.
    pub fn project(&self, lon: f64, lat: f64) -> PlanePoint {
        let x = (lon + 180.0) * (self.width / 360.0);
        let y = (-lat + 90.0) * (self.height / 180.0);
        PlanePoint::new(x, y)
    }

    pub fn project_point(&self, point: GeoPoint) -> PlanePoint {
        self.project(point.lon, point.lat)
    }

    /// Project the valid points of a ring, dropping any non-finite result
    pub fn project_ring(&self, ring: &Ring) -> Vec<PlanePoint> {
        ring.points()
            .map(|p| self.project_point(p))
            .filter(PlanePoint::is_finite)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(p: PlanePoint, x: f64, y: f64) {
        assert!((p.x - x).abs() < 1e-9, "x: {} != {}", p.x, x);
        assert!((p.y - y).abs() < 1e-9, "y: {} != {}", p.y, y);
    }

    #[test]
    fn test_projector_corners() {
        let proj = Projector::default();
        assert_close(proj.project(-180.0, 90.0), 0.0, 0.0);
        assert_close(proj.project(180.0, -90.0), 1000.0, 500.0);
        assert_close(proj.project(0.0, 0.0), 500.0, 250.0);
    }

    #[test]
    fn test_projector_deterministic() {
        let proj = Projector::default();
        let a = proj.project(2.35, 48.86);
        let b = proj.project(2.35, 48.86);
        assert_eq!(a, b);
    }

    #[test]
    fn test_projector_custom_canvas() {
        let proj = Projector::new(360.0, 180.0);
        assert_close(proj.project(10.0, 20.0), 190.0, 70.0);
    }

    #[test]
    fn test_projector_non_finite_passthrough() {
        let proj = Projector::default();
        assert!(!proj.project(f64::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_project_ring_drops_non_finite() {
        let proj = Projector::default();
        let ring = Ring::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(f64::INFINITY, 0.0),
            GeoPoint::new(10.0, 10.0),
        ]);
        assert_eq!(proj.project_ring(&ring).len(), 2);
    }
}
