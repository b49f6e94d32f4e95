use anyhow::{Context, Result};
use geo::coord;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::diagnostics::{CoordinatePolicy, Diagnostics, FeatureIssue, GeometryIssue};
use crate::domain::{Position, RegionFeature, Ring, Rings, Shape};

/// Raw GeoJSON feature collection
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

/// Geometry object; coordinates stay untyped until the shape kind is known
#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// Name used for features without a display name
pub const UNNAMED_FEATURE: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Property holding the display name
    pub name_property: String,
    /// Property holding the short code
    pub code_property: String,
    pub policy: CoordinatePolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            name_property: "name".to_string(),
            code_property: "abbrev".to_string(),
            policy: CoordinatePolicy::BestEffort,
        }
    }
}

/// Read and parse a GeoJSON file
pub fn read_collection(
    path: &Path,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<RegionFeature>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    parse_collection(&contents, options, diagnostics)
        .with_context(|| format!("Failed to load features from {}", path.display()))
}

/// Parse a GeoJSON feature collection into region features
///
/// # Algorithm
/// 1. Deserialize the collection; invalid JSON is always an error
/// 2. For each feature, read the name and code properties
/// 3. Decide the shape kind from the geometry type, then walk the
///    coordinate arrays, resolving each entry to a position
///
/// Malformed entries are handled according to `options.policy`.
pub fn parse_collection(
    json: &str,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<RegionFeature>> {
    let collection: FeatureCollection =
        serde_json::from_str(json).context("Failed to parse GeoJSON feature collection")?;

    let mut features = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        features.push(parse_feature(feature, options, diagnostics)?);
    }
    Ok(features)
}

/// Convert one raw feature
pub fn parse_feature(
    feature: &Feature,
    options: &ParseOptions,
    diagnostics: &mut Diagnostics,
) -> Result<RegionFeature, FeatureIssue> {
    let props = feature.properties.as_ref();
    let name = props
        .and_then(|p| property_text(p, &options.name_property))
        .unwrap_or_else(|| UNNAMED_FEATURE.to_string());
    let abbrev = props
        .and_then(|p| property_text(p, &options.code_property))
        .unwrap_or_default();

    let mut reader = ShapeReader {
        feature: &name,
        policy: options.policy,
        diagnostics,
    };
    let shape = match &feature.geometry {
        Some(geometry) => reader.geometry(geometry)?,
        None => {
            reader.issue(GeometryIssue::MissingGeometry)?;
            Shape::empty()
        }
    };

    Ok(RegionFeature::new(name, abbrev, shape))
}

fn property_text(props: &Map<String, Value>, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A JSON array whose first two entries are numbers; extra entries
/// (altitude) are ignored
fn position(value: &Value) -> Position {
    let entries = value.as_array()?;
    if entries.len() < 2 {
        return None;
    }
    Some(coord! { x: entries[0].as_f64()?, y: entries[1].as_f64()? })
}

struct ShapeReader<'a> {
    feature: &'a str,
    policy: CoordinatePolicy,
    diagnostics: &'a mut Diagnostics,
}

impl ShapeReader<'_> {
    fn issue(&mut self, issue: GeometryIssue) -> Result<(), FeatureIssue> {
        self.diagnostics.record(self.policy, self.feature, issue)
    }

    fn geometry(&mut self, geometry: &Geometry) -> Result<Shape<Position>, FeatureIssue> {
        match geometry.type_.as_str() {
            "Polygon" => Ok(Shape::Polygon(self.polygon(&geometry.coordinates, 0, "")?)),
            "MultiPolygon" => {
                let polygons = self.array(&geometry.coordinates, "")?;
                let mut out = Vec::with_capacity(polygons.len());
                for (i, polygon) in polygons.iter().enumerate() {
                    out.push(self.polygon(polygon, i, &format!("[{}]", i))?);
                }
                Ok(Shape::MultiPolygon(out))
            }
            other => {
                self.issue(GeometryIssue::UnsupportedGeometry(other.to_string()))?;
                Ok(Shape::empty())
            }
        }
    }

    /// The array at `location`, or nothing if it is not one
    fn array<'v>(&mut self, value: &'v Value, location: &str) -> Result<&'v [Value], FeatureIssue> {
        match value.as_array() {
            Some(entries) => Ok(entries.as_slice()),
            None => {
                self.issue(GeometryIssue::MalformedStructure {
                    location: location.to_string(),
                })?;
                Ok(&[])
            }
        }
    }

    fn polygon(
        &mut self,
        value: &Value,
        polygon: usize,
        location: &str,
    ) -> Result<Rings<Position>, FeatureIssue> {
        let rings = self.array(value, location)?;
        let mut out = Vec::with_capacity(rings.len());
        for (i, ring) in rings.iter().enumerate() {
            out.push(self.ring(ring, polygon, i, &format!("{}[{}]", location, i))?);
        }
        Ok(out)
    }

    fn ring(
        &mut self,
        value: &Value,
        polygon: usize,
        ring: usize,
        location: &str,
    ) -> Result<Ring<Position>, FeatureIssue> {
        let entries = self.array(value, location)?;
        let mut out = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let p = position(entry);
            if p.is_none() {
                self.issue(GeometryIssue::MalformedPosition {
                    polygon,
                    ring,
                    index,
                })?;
            }
            out.push(p);
        }
        Ok(out)
    }
}
