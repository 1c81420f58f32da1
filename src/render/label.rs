use geo::{BoundingRect, Coord, LineString};

use crate::domain::{Feature, Geometry, PlanePoint, Ring};
use crate::geometry::Projector;

/// Pick a point for the feature's label
///
/// The label goes at the bounding-box centre of the dominant ring: the
/// outer ring of a polygon, or for a multipolygon the outer ring with the
/// most vertices (the first one wins ties). Vertex count stands in for land
/// area. Concave or multi-lobed shapes can get an anchor outside the shape.
///
/// Returns `None` when no outer ring has at least three valid points.
pub fn anchor_point(feature: &Feature, projector: &Projector) -> Option<PlanePoint> {
    let ring = dominant_ring(feature.geometry.as_ref()?)?;

    let coords: Vec<Coord<f64>> = projector
        .project_ring(ring)
        .into_iter()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect();

    let center = LineString::from(coords).bounding_rect()?.center();
    Some(PlanePoint::new(center.x, center.y))
}

fn dominant_ring(geometry: &Geometry) -> Option<&Ring> {
    match geometry {
        Geometry::Polygon(rings) => rings.first().filter(|r| !r.is_degenerate()),
        Geometry::MultiPolygon(_) => geometry
            .outer_rings()
            .into_iter()
            .filter(|r| !r.is_degenerate())
            .fold(None, |best: Option<&Ring>, ring| match best {
                Some(b) if b.valid_len() >= ring.valid_len() => Some(b),
                _ => Some(ring),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;

    fn rect_ring(lon0: f64, lat0: f64, lon1: f64, lat1: f64, extra: usize) -> Ring {
        let mut points = vec![
            GeoPoint::new(lon0, lat0),
            GeoPoint::new(lon1, lat0),
            GeoPoint::new(lon1, lat1),
            GeoPoint::new(lon0, lat1),
        ];
        // Extra vertices on the first edge raise the count without moving the bbox
        for i in 0..extra {
            let t = (i + 1) as f64 / (extra + 1) as f64;
            points.push(GeoPoint::new(lon0 + (lon1 - lon0) * t, lat0));
        }
        Ring::new(points)
    }

    #[test]
    fn test_polygon_anchor_is_bbox_center() {
        let projector = Projector::new(360.0, 180.0);
        let feature = Feature::new(
            "SQ",
            "Square",
            Geometry::Polygon(vec![rect_ring(0.0, 0.0, 10.0, 20.0, 0)]),
        );
        let anchor = anchor_point(&feature, &projector).unwrap();
        assert!((anchor.x - 185.0).abs() < 1e-9);
        assert!((anchor.y - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_hole_does_not_move_anchor() {
        let projector = Projector::new(360.0, 180.0);
        let feature = Feature::new(
            "SQ",
            "Square",
            Geometry::Polygon(vec![
                rect_ring(0.0, 0.0, 10.0, 20.0, 0),
                rect_ring(100.0, 50.0, 110.0, 60.0, 0),
            ]),
        );
        let anchor = anchor_point(&feature, &projector).unwrap();
        assert!((anchor.x - 185.0).abs() < 1e-9);
    }

    #[test]
    fn test_multipolygon_picks_largest_first_ring() {
        let projector = Projector::new(360.0, 180.0);
        let feature = Feature::new(
            "MP",
            "Archipelago",
            Geometry::MultiPolygon(vec![
                // Listed first but with fewer vertices
                vec![rect_ring(-100.0, -10.0, -90.0, 0.0, 0)],
                vec![rect_ring(40.0, 10.0, 60.0, 30.0, 3)],
                // A hole with many vertices must not count
                vec![
                    rect_ring(-50.0, -50.0, -40.0, -40.0, 0),
                    rect_ring(-49.0, -49.0, -41.0, -41.0, 20),
                ],
            ]),
        );
        let anchor = anchor_point(&feature, &projector).unwrap();
        assert!((anchor.x - 230.0).abs() < 1e-9);
        assert!((anchor.y - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_multipolygon_tie_keeps_first() {
        let projector = Projector::new(360.0, 180.0);
        let feature = Feature::new(
            "MP",
            "Twins",
            Geometry::MultiPolygon(vec![
                vec![rect_ring(0.0, 0.0, 10.0, 10.0, 1)],
                vec![rect_ring(50.0, 0.0, 60.0, 10.0, 1)],
            ]),
        );
        let anchor = anchor_point(&feature, &projector).unwrap();
        assert!((anchor.x - 185.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_usable_ring() {
        let projector = Projector::default();
        let empty = Feature::new("E", "Empty", Geometry::Polygon(vec![]));
        assert!(anchor_point(&empty, &projector).is_none());

        let degenerate = Feature::new(
            "D",
            "Degenerate",
            Geometry::MultiPolygon(vec![vec![Ring::new(vec![GeoPoint::new(1.0, 1.0)])]]),
        );
        assert!(anchor_point(&degenerate, &projector).is_none());

        let missing = Feature {
            id: "N".to_string(),
            name: "None".to_string(),
            geometry: None,
        };
        assert!(anchor_point(&missing, &projector).is_none());
    }
}
