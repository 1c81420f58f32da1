use std::collections::{HashMap, HashSet};

use log::warn;

use super::GeoPoint;

/// Minimum number of valid points for a ring to enclose anything
pub const MIN_RING_POINTS: usize = 3;

/// One closed boundary loop of a polygon (outer edge or hole)
///
/// Positions that lacked two numeric coordinates in the source data are kept
/// as `None` slots so consumers can skip them without losing the rest of the
/// ring. The ring is implicitly closed; a repeated first point is harmless.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ring {
    positions: Vec<Option<GeoPoint>>,
}

impl Ring {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self {
            positions: points.into_iter().map(Some).collect(),
        }
    }

    /// Create a ring that may contain malformed positions
    pub fn from_positions(positions: Vec<Option<GeoPoint>>) -> Self {
        Self { positions }
    }

    /// Iterate the well-formed points in order
    pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.positions.iter().flatten().copied()
    }

    pub fn valid_len(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    pub fn is_degenerate(&self) -> bool {
        self.valid_len() < MIN_RING_POINTS
    }
}

/// Feature geometry. Polygons list their outer ring first, holes after.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// All rings in drawing order: polygon by polygon, outer ring first
    pub fn rings(&self) -> Box<dyn Iterator<Item = &Ring> + '_> {
        match self {
            Geometry::Polygon(rings) => Box::new(rings.iter()),
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter().flatten()),
        }
    }

    /// The outer ring of each constituent polygon
    pub fn outer_rings(&self) -> Vec<&Ring> {
        match self {
            Geometry::Polygon(rings) => rings.first().into_iter().collect(),
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().filter_map(|rings| rings.first()).collect()
            }
        }
    }
}

/// A named country shape
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub geometry: Option<Geometry>,
}

impl Feature {
    pub fn new(id: impl Into<String>, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry: Some(geometry),
        }
    }
}

/// Ordered features with lookup by id
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    features: Vec<Feature>,
    index: HashMap<String, usize>,
}

impl FeatureSet {
    /// Build a set, keeping the first feature for any repeated id
    pub fn new(features: Vec<Feature>) -> Self {
        let mut set = Self::default();
        for feature in features {
            if set.index.contains_key(&feature.id) {
                warn!("Dropping feature with duplicate id {:?}", feature.id);
                continue;
            }
            set.index.insert(feature.id.clone(), set.features.len());
            set.features.push(feature);
        }
        set
    }

    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.index.get(id).map(|&i| &self.features[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Ids of features marked as visited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet {
    ids: HashSet<String>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Flip membership, returning whether the id is now highlighted
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for HighlightSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 1.0),
        ])
    }

    #[test]
    fn test_ring_skips_malformed_positions() {
        let ring = Ring::from_positions(vec![
            Some(GeoPoint::new(0.0, 0.0)),
            None,
            Some(GeoPoint::new(1.0, 0.0)),
            Some(GeoPoint::new(1.0, 1.0)),
        ]);
        assert_eq!(ring.valid_len(), 3);
        assert!(!ring.is_degenerate());
        assert_eq!(ring.points().count(), 3);
    }

    #[test]
    fn test_degenerate_ring() {
        let ring = Ring::from_positions(vec![
            Some(GeoPoint::new(0.0, 0.0)),
            None,
            Some(GeoPoint::new(1.0, 1.0)),
        ]);
        assert!(ring.is_degenerate());
    }

    #[test]
    fn test_geometry_ring_order() {
        let geometry = Geometry::MultiPolygon(vec![
            vec![square(), Ring::default()],
            vec![Ring::new(vec![GeoPoint::new(5.0, 5.0)])],
        ]);
        assert_eq!(geometry.rings().count(), 3);
        let outer = geometry.outer_rings();
        assert_eq!(outer.len(), 2);
        assert_eq!(outer[0].valid_len(), 4);
        assert_eq!(outer[1].valid_len(), 1);
    }

    #[test]
    fn test_feature_set_lookup() {
        let set = FeatureSet::new(vec![
            Feature::new("FRA", "France", Geometry::Polygon(vec![square()])),
            Feature::new("ITA", "Italy", Geometry::Polygon(vec![square()])),
            Feature::new("FRA", "Duplicate", Geometry::Polygon(vec![])),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("ITA").map(|f| f.name.as_str()), Some("Italy"));
        assert_eq!(set.get("FRA").map(|f| f.name.as_str()), Some("France"));
        assert!(set.get("ESP").is_none());
    }

    #[test]
    fn test_highlight_toggle() {
        let mut visited: HighlightSet = ["FRA"].into_iter().collect();
        assert!(visited.contains("FRA"));
        assert!(!visited.toggle("FRA"));
        assert!(visited.toggle("JPN"));
        assert_eq!(visited.len(), 1);
        assert!(visited.contains("JPN"));
    }
}
