//! Feature loader: GeoJSON file → [`FeatureCollection`].
//!
//! Only Polygon and MultiPolygon geometry is carried through; features with
//! other geometry types still load (they count in the aggregation) but have
//! nothing to draw. Attribute extraction is by property name; a field
//! absent from every feature is a configuration error, while per-feature
//! missing or null values load as `None`.

use std::fs;
use std::path::Path;

use geojson::{GeoJson, Value as GeoValue};
use serde_json::Value as JsonValue;

use crate::error::PipelineError;
use crate::feature::{Feature, FeatureCollection, Geometry, Ring};

/// Read and parse a GeoJSON file, extracting geometry and the named
/// categorical attribute.
pub fn load_features(path: &Path, field: &str) -> Result<FeatureCollection, PipelineError> {
    let text = fs::read_to_string(path).map_err(|e| PipelineError::load(path, e))?;
    let geojson: GeoJson = text.parse().map_err(|e| PipelineError::load(path, e))?;
    features_from_geojson(geojson, field)
}

/// Convert a parsed GeoJSON document. Split from file I/O so tests can feed
/// inline documents.
pub fn features_from_geojson(
    geojson: GeoJson,
    field: &str,
) -> Result<FeatureCollection, PipelineError> {
    let raw_features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(g) => vec![geojson::Feature {
            bbox: None,
            geometry: Some(g),
            id: None,
            properties: None,
            foreign_members: None,
        }],
    };

    let field_exists = raw_features
        .iter()
        .any(|f| f.properties.as_ref().is_some_and(|p| p.contains_key(field)));
    if !raw_features.is_empty() && !field_exists {
        return Err(PipelineError::InvalidArgument(format!(
            "attribute field {field:?} not present in any feature"
        )));
    }

    let features = raw_features
        .into_iter()
        .map(|f| {
            let raw = f
                .properties
                .as_ref()
                .and_then(|p| p.get(field))
                .and_then(property_as_string);
            let geometry = f.geometry.map(convert_geometry).unwrap_or_default();
            Feature::new(geometry, raw)
        })
        .collect();

    Ok(FeatureCollection { features })
}

/// Null → None; strings pass through; other JSON scalars are rendered as
/// their JSON text so numeric category codes still classify.
fn property_as_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn convert_geometry(geometry: geojson::Geometry) -> Geometry {
    match geometry.value {
        GeoValue::Polygon(rings) => Geometry { polygons: vec![convert_rings(rings)] },
        GeoValue::MultiPolygon(polys) => Geometry {
            polygons: polys.into_iter().map(convert_rings).collect(),
        },
        _ => Geometry::default(),
    }
}

fn convert_rings(rings: Vec<Vec<Vec<f64>>>) -> Vec<Ring> {
    rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| (pos[0], pos[1]))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, field: &str) -> Result<FeatureCollection, PipelineError> {
        features_from_geojson(text.parse().unwrap(), field)
    }

    const TWO_REGIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "lang": "EN", "pop": 120 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "lang": null },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]],
                        [[[4.0, 4.0], [5.0, 4.0], [5.0, 5.0], [4.0, 4.0]]]
                    ]
                }
            }
        ]
    }"#;

    #[test]
    fn loads_geometry_and_attribute() {
        let fc = parse(TWO_REGIONS, "lang").unwrap();
        assert_eq!(fc.len(), 2);
        assert_eq!(fc.features[0].category_raw.as_deref(), Some("EN"));
        assert_eq!(fc.features[0].geometry.polygons.len(), 1);
        assert_eq!(fc.features[1].geometry.polygons.len(), 2);
    }

    #[test]
    fn null_attribute_loads_as_none() {
        let fc = parse(TWO_REGIONS, "lang").unwrap();
        assert!(fc.features[1].category_raw.is_none());
    }

    #[test]
    fn numeric_attribute_is_stringified() {
        let fc = parse(TWO_REGIONS, "pop").unwrap();
        assert_eq!(fc.features[0].category_raw.as_deref(), Some("120"));
    }

    #[test]
    fn missing_field_everywhere_is_invalid() {
        let err = parse(TWO_REGIONS, "nope").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArgument(_)));
    }

    #[test]
    fn empty_collection_loads_empty() {
        let fc = parse(r#"{"type": "FeatureCollection", "features": []}"#, "lang").unwrap();
        assert!(fc.is_empty());
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_features(Path::new("/no/such/file.geojson"), "lang").unwrap_err();
        assert!(matches!(err, PipelineError::Load { .. }));
    }
}
