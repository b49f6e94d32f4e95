//! regionpaths - Generate precomputed SVG path data for region boundaries from GeoJSON

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod geometry;
pub mod input;
pub mod output;
pub mod path;
pub mod pipeline;

pub use diagnostics::{CoordinatePolicy, Diagnostics};
pub use geometry::{Bounds, Projector, ReferenceExtent};
pub use pipeline::{BuildSettings, ExtentSource, build_region_shapes};
