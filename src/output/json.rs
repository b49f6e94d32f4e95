use anyhow::{Context, Result};
use serde::Serialize;

use super::OutputDocument;
use crate::config::RegionTable;
use crate::domain::RegionShape;

#[derive(Serialize)]
struct JsonDocument<'a> {
    source: &'a str,
    regions: &'a RegionTable,
    shapes: &'a [RegionShape],
}

/// Pretty-printed JSON with camelCase record keys
pub fn render_json(doc: &OutputDocument<'_>) -> Result<String> {
    let body = JsonDocument {
        source: doc.source,
        regions: doc.regions,
        shapes: doc.shapes,
    };
    let mut json = serde_json::to_string_pretty(&body).context("Failed to serialize shapes")?;
    json.push('\n');
    Ok(json)
}
