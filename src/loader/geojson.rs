use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

use crate::config::LoaderConfig;
use crate::domain::{Feature, FeatureSet, GeoPoint, Geometry, Ring};
use crate::error::{MapError, Result};

/// Raw GeoJSON feature collection
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

/// Coordinates stay untyped so one bad position cannot reject the file
#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    type_: String,
    #[serde(default)]
    coordinates: Value,
}

/// Fallback property names tried after the configured one
const NAME_FALLBACKS: [&str; 4] = ["name", "NAME", "ADMIN", "admin"];

/// Load country features from a GeoJSON file
pub fn load_features(path: &Path, config: &LoaderConfig) -> Result<FeatureSet> {
    let contents = std::fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
    parse_features(&contents, config)
}

/// Parse a GeoJSON `FeatureCollection` into a sanitised feature set
///
/// # Algorithm
/// 1. Read id (top-level `id`, else the configured property, else the name)
///    and name (configured property, then common fallbacks)
/// 2. Convert Polygon/MultiPolygon coordinates, keeping malformed positions
///    as skipped slots
/// 3. Drop features without id, name or usable geometry
/// 4. Apply configured renames, then make names and ids unique
pub fn parse_features(json: &str, config: &LoaderConfig) -> Result<FeatureSet> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    if collection.type_ != "FeatureCollection" {
        return Err(MapError::InvalidGeoJson(format!(
            "expected a FeatureCollection, found {}",
            collection.type_
        )));
    }

    let total = collection.features.len();
    let mut features = Vec::with_capacity(total);
    let mut taken_names: HashSet<String> = HashSet::new();
    let mut taken_ids: HashSet<String> = HashSet::new();

    for (index, raw) in collection.features.into_iter().enumerate() {
        let Some(name) = read_name(&raw, config) else {
            debug!("Skipping feature #{}: no name", index);
            continue;
        };
        let name = config.renames.get(&name).cloned().unwrap_or(name);

        let Some(geometry) = raw.geometry.as_ref().and_then(convert_geometry) else {
            debug!("Skipping feature {:?}: missing or unsupported geometry", name);
            continue;
        };

        let id = read_id(&raw, config).unwrap_or_else(|| name.clone());
        let id = unique(id, &mut taken_ids, "-");
        let name = unique(name, &mut taken_names, " ");

        features.push(Feature::new(id, name, geometry));
    }

    if features.len() < total {
        warn!(
            "Loaded {} of {} features ({} dropped)",
            features.len(),
            total,
            total - features.len()
        );
    }

    Ok(FeatureSet::new(features))
}

fn read_name(raw: &RawFeature, config: &LoaderConfig) -> Option<String> {
    let properties = raw.properties.as_ref()?;
    std::iter::once(config.name_property.as_str())
        .chain(NAME_FALLBACKS)
        .filter_map(|key| properties.get(key))
        .find_map(non_empty_string)
}

fn read_id(raw: &RawFeature, config: &LoaderConfig) -> Option<String> {
    raw.id.as_ref().and_then(non_empty_string).or_else(|| {
        let key = config.id_property.as_deref()?;
        raw.properties.as_ref()?.get(key).and_then(non_empty_string)
    })
}

fn non_empty_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    // Natural Earth marks missing ISO codes with "-99"
    if s.is_empty() || s == "-99" { None } else { Some(s) }
}

/// Suffix repeated values: "Congo", "Congo 2", ...
///
/// The suffix is raised until the result is not already taken, including by
/// a value that appeared verbatim in the data.
fn unique(value: String, taken: &mut HashSet<String>, separator: &str) -> String {
    if taken.insert(value.clone()) {
        return value;
    }

    let mut n = 2;
    loop {
        let renamed = format!("{}{}{}", value, separator, n);
        if taken.insert(renamed.clone()) {
            debug!("Renamed duplicate {:?} to {:?}", value, renamed);
            return renamed;
        }
        n += 1;
    }
}

fn convert_geometry(geometry: &RawGeometry) -> Option<Geometry> {
    match geometry.type_.as_str() {
        "Polygon" => convert_polygon(&geometry.coordinates).map(Geometry::Polygon),
        "MultiPolygon" => {
            let polygons: Vec<Vec<Ring>> = geometry
                .coordinates
                .as_array()?
                .iter()
                .filter_map(convert_polygon)
                .collect();
            Some(Geometry::MultiPolygon(polygons))
        }
        other => {
            debug!("Unsupported geometry type {}", other);
            None
        }
    }
}

fn convert_polygon(value: &Value) -> Option<Vec<Ring>> {
    Some(value.as_array()?.iter().filter_map(convert_ring).collect())
}

fn convert_ring(value: &Value) -> Option<Ring> {
    let positions = value
        .as_array()?
        .iter()
        .map(convert_position)
        .collect();
    Some(Ring::from_positions(positions))
}

fn convert_position(value: &Value) -> Option<GeoPoint> {
    let numbers: Vec<f64> = value.as_array()?.iter().map_while(Value::as_f64).collect();
    GeoPoint::from_position(&numbers)
}
