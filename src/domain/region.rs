use serde::Serialize;

use super::shape::{Position, Shape};

/// One input record: a named area with its geographic boundary
#[derive(Debug, Clone)]
pub struct RegionFeature {
    pub name: String,
    /// Short code, empty when the input has none
    pub abbrev: String,
    pub shape: Shape<Position>,
}

impl RegionFeature {
    pub fn new(name: impl Into<String>, abbrev: impl Into<String>, shape: Shape<Position>) -> Self {
        Self {
            name: name.into(),
            abbrev: abbrev.into(),
            shape,
        }
    }

    /// Identifier derived from the display name: lowercased, spaces become
    /// `-`, periods are removed
    pub fn id(&self) -> String {
        region_id(&self.name)
    }
}

pub fn region_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "-").replace('.', "")
}

/// One output record with precomputed path strings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionShape {
    pub id: String,
    pub name: String,
    pub abbrev: String,
    /// Simplified path for the overview map
    pub path: String,
    /// Lower-tolerance path, absent when it serializes to nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_detailed: Option<String>,
    pub center: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Outer-ring entries in the input geometry
    #[serde(skip)]
    pub original_points: usize,
}
