//! Generated artifact writers

pub mod json;
pub mod typescript;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::config::RegionTable;
use crate::domain::RegionShape;

pub use json::render_json;
pub use typescript::{TypescriptNames, render_typescript};

/// Output artifact flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// TypeScript module exporting a typed array
    #[default]
    Typescript,
    /// Plain JSON document
    Json,
}

impl OutputFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" | "tsx" => Some(OutputFormat::Typescript),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Everything that ends up in the generated artifact
#[derive(Debug, Clone, Copy)]
pub struct OutputDocument<'a> {
    /// Name of the input the shapes were generated from
    pub source: &'a str,
    pub shapes: &'a [RegionShape],
    pub regions: &'a RegionTable,
}

/// Render the whole document in memory
pub fn render(
    doc: &OutputDocument<'_>,
    format: OutputFormat,
    names: &TypescriptNames,
) -> Result<String> {
    match format {
        OutputFormat::Typescript => Ok(render_typescript(doc, names)),
        OutputFormat::Json => render_json(doc),
    }
}

/// Write a rendered document to `path`
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    write_with(path, |writer| Ok(writer.write_all(contents.as_bytes())?))
}

/// Fill a temporary file next to `path`, then move it into place
///
/// The temporary file is removed if `fill` or the flush fails, so an
/// existing file at `path` is either replaced whole or left untouched.
fn write_with<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create output file in {}", dir.display()))?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        fill(&mut writer)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    }

    tmp.persist(path)
        .with_context(|| format!("Failed to replace output file: {}", path.display()))?;

    Ok(())
}
