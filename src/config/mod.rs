pub mod regions;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::geometry::ReferenceExtent;
use crate::output::{OutputFormat, TypescriptNames};

pub use regions::{RegionTable, UNKNOWN_REGION};

pub const DEFAULT_INPUT: &str = "california_counties.geojson";
pub const DEFAULT_OUTPUT: &str = "src/data/californiaCountyBoundaries.ts";

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}
fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}
fn default_width() -> f64 {
    800.0
}
fn default_height() -> f64 {
    1000.0
}
fn default_padding() -> f64 {
    0.1
}
fn default_detailed_tolerance() -> f64 {
    0.2
}
fn default_simplified_tolerance() -> f64 {
    0.5
}
fn default_name_property() -> String {
    "name".to_string()
}
fn default_code_property() -> String {
    "abbrev".to_string()
}

/// Settings read from `regionpaths.toml`
///
/// Every key is optional; command-line flags take precedence over the file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Output format; guessed from the output extension when absent
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default = "default_detailed_tolerance")]
    pub detailed_tolerance: f64,
    #[serde(default = "default_simplified_tolerance")]
    pub simplified_tolerance: f64,
    /// Fail on malformed coordinates instead of degrading them
    #[serde(default)]
    pub strict: bool,
    /// Derive the reference extent from the input instead of `extent`
    #[serde(default)]
    pub fit_extent: bool,
    #[serde(default)]
    pub extent: ReferenceExtent,
    #[serde(default = "default_name_property")]
    pub name_property: String,
    #[serde(default = "default_code_property")]
    pub code_property: String,
    /// Display name to region; the California table when absent
    #[serde(default)]
    pub regions: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub typescript: TypescriptNames,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            format: None,
            width: default_width(),
            height: default_height(),
            padding: default_padding(),
            detailed_tolerance: default_detailed_tolerance(),
            simplified_tolerance: default_simplified_tolerance(),
            strict: false,
            fit_extent: false,
            extent: ReferenceExtent::default(),
            name_property: default_name_property(),
            code_property: default_code_property(),
            regions: None,
            typescript: TypescriptNames::default(),
            verbose: false,
        }
    }
}

impl FileConfig {
    /// Search the usual locations; the first file that parses wins
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        warn!("Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    /// Load an explicitly requested config file; a missing or invalid file
    /// is an error
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// The region table to inject into the build
    pub fn region_table(&self) -> RegionTable {
        match &self.regions {
            Some(regions) => RegionTable::new(regions.clone()),
            None => RegionTable::california(),
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("regionpaths.toml"));
    paths.push(PathBuf::from(".regionpaths.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("regionpaths").join("config.toml"));
        paths.push(config_dir.join("regionpaths.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".regionpaths.toml"));
    }

    paths
}
