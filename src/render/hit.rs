use geo::{Contains, Coord, LineString, MultiPolygon, Point, Polygon};

use crate::domain::{Feature, FeatureSet, Geometry, PlanePoint, Ring};
use crate::geometry::Projector;
use crate::viewport::ViewportTransform;

/// Point-in-shape lookup over projected features
///
/// Stands in for a rendering surface's own hit testing when the host has
/// none (e.g. replaying recorded gestures). Holes are excluded, matching the
/// even-odd fill used when drawing.
#[derive(Debug, Clone, Default)]
pub struct HitTester {
    shapes: Vec<(String, MultiPolygon<f64>)>,
}

impl HitTester {
    pub fn new(features: &FeatureSet, projector: &Projector) -> Self {
        let shapes = features
            .iter()
            .filter_map(|f| project_feature(f, projector).map(|shape| (f.id.clone(), shape)))
            .collect();
        Self { shapes }
    }

    /// Id of the feature drawn at `canvas` under the given transform
    ///
    /// Features later in draw order sit on top and win.
    pub fn hit_test(&self, canvas: PlanePoint, transform: &ViewportTransform) -> Option<&str> {
        let plane = transform.invert(canvas);
        if !plane.is_finite() {
            return None;
        }
        let point = Point::new(plane.x, plane.y);

        self.shapes
            .iter()
            .rev()
            .find(|(_, shape)| shape.contains(&point))
            .map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

fn project_feature(feature: &Feature, projector: &Projector) -> Option<MultiPolygon<f64>> {
    let polygons: Vec<Polygon<f64>> = match feature.geometry.as_ref()? {
        Geometry::Polygon(rings) => project_polygon(rings, projector).into_iter().collect(),
        Geometry::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| project_polygon(rings, projector))
            .collect(),
    };

    if polygons.is_empty() {
        None
    } else {
        Some(MultiPolygon::new(polygons))
    }
}

fn project_polygon(rings: &[Ring], projector: &Projector) -> Option<Polygon<f64>> {
    let (outer, holes) = rings.split_first()?;
    let exterior = project_line(outer, projector)?;
    let interiors = holes
        .iter()
        .filter_map(|ring| project_line(ring, projector))
        .collect();
    Some(Polygon::new(exterior, interiors))
}

fn project_line(ring: &Ring, projector: &Projector) -> Option<LineString<f64>> {
    let points = projector.project_ring(ring);
    if points.len() < crate::domain::feature::MIN_RING_POINTS {
        return None;
    }
    Some(LineString::from(
        points
            .into_iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect::<Vec<_>>(),
    ))
}
