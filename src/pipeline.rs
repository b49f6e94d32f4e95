//! Per-record build: project, simplify, serialize, locate

use tracing::debug;

use crate::config::{RegionTable, UNKNOWN_REGION};
use crate::diagnostics::{Diagnostics, GeometryIssue};
use crate::domain::{RegionFeature, RegionShape};
use crate::geometry::{Bounds, Projector, ReferenceExtent};
use crate::path::shape_path;

/// Where the geographic box mapped onto the viewbox comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtentSource {
    /// A known extent shared by every record
    Fixed(ReferenceExtent),
    /// The bounds of the whole input collection
    FitInput,
}

#[derive(Debug, Clone)]
pub struct BuildSettings {
    /// Viewbox width
    pub width: f64,
    /// Viewbox height
    pub height: f64,
    /// Fraction the fitted scale is reduced by
    pub padding: f64,
    pub extent: ExtentSource,
    /// Tolerance for `path_detailed`
    pub detailed_tolerance: f64,
    /// Tolerance for `path`
    pub simplified_tolerance: f64,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 1000.0,
            padding: 0.1,
            extent: ExtentSource::Fixed(ReferenceExtent::CALIFORNIA),
            detailed_tolerance: 0.2,
            simplified_tolerance: 0.5,
        }
    }
}

impl BuildSettings {
    /// The extent to project with for this set of features
    pub fn resolve_extent(&self, features: &[RegionFeature]) -> ReferenceExtent {
        match self.extent {
            ExtentSource::Fixed(extent) => extent,
            ExtentSource::FitInput => Bounds::of_shapes(features.iter().map(|f| &f.shape))
                .map(|b| ReferenceExtent::from_bounds(&b))
                .unwrap_or_default(),
        }
    }

    pub fn projector(&self, features: &[RegionFeature]) -> Projector {
        Projector::new(
            self.resolve_extent(features),
            self.width,
            self.height,
            self.padding,
        )
    }
}

/// Build one output record per feature, sorted by display name
///
/// Features without any usable point and names missing from a non-empty
/// region table are reported to `diagnostics`; neither stops the build.
/// With an empty table no region is attached.
pub fn build_region_shapes(
    features: &[RegionFeature],
    settings: &BuildSettings,
    regions: &RegionTable,
    diagnostics: &mut Diagnostics,
) -> Vec<RegionShape> {
    let projector = settings.projector(features);
    debug!(
        "Projecting {} features at scale {:.3}",
        features.len(),
        projector.scale_factor()
    );

    let mut shapes: Vec<RegionShape> = features
        .iter()
        .map(|feature| build_region_shape(feature, &projector, settings, regions, diagnostics))
        .collect();

    shapes.sort_by(|a, b| a.name.cmp(&b.name));
    shapes
}

fn build_region_shape(
    feature: &RegionFeature,
    projector: &Projector,
    settings: &BuildSettings,
    regions: &RegionTable,
    diagnostics: &mut Diagnostics,
) -> RegionShape {
    if !feature.shape.points().any(Option::is_some) {
        diagnostics.warn(&feature.name, GeometryIssue::EmptyGeometry);
    }

    let projected = projector.project_shape(&feature.shape);
    let path_detailed = shape_path(&projected, settings.detailed_tolerance);
    let path = shape_path(&projected, settings.simplified_tolerance);
    let center = Bounds::of_shape(&projected).center();

    let region = if regions.is_empty() {
        None
    } else {
        let region = regions.lookup(&feature.name).unwrap_or_else(|| {
            diagnostics.warn(
                &feature.name,
                GeometryIssue::UnknownRegion(UNKNOWN_REGION.to_string()),
            );
            UNKNOWN_REGION
        });
        Some(region.to_string())
    };

    debug!(
        "{}: {} points, path {} bytes, detailed {} bytes",
        feature.name,
        feature.shape.point_count(),
        path.len(),
        path_detailed.len()
    );

    RegionShape {
        id: feature.id(),
        name: feature.name.clone(),
        abbrev: feature.abbrev.clone(),
        path,
        path_detailed: (!path_detailed.is_empty()).then_some(path_detailed),
        center: [round_tenth(center.x), round_tenth(center.y)],
        region,
        original_points: feature.shape.outer_point_count(),
    }
}

/// Round to one decimal, halves to even; negative zero becomes zero
///
/// A half is decided on the exact binary value, so `0.35` (stored just
/// below) rounds down while `45.25` (stored exactly) rounds to even.
fn round_tenth(v: f64) -> f64 {
    let scaled = v * 10.0;
    // Exact error of the multiplication
    let residual = v.mul_add(10.0, -scaled);
    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        if residual > 0.0 {
            scaled.ceil()
        } else if residual < 0.0 {
            scaled.floor()
        } else {
            scaled.round_ties_even()
        }
    } else {
        scaled.round()
    };
    rounded / 10.0 + 0.0
}

/// Figures reported at the end of a run
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub records: usize,
    /// Mean outer-ring input points per record
    pub average_original_points: f64,
    /// Length of the first record's simplified path
    pub sample_path_len: usize,
}

impl BuildSummary {
    pub fn from_shapes(shapes: &[RegionShape]) -> Self {
        let total: usize = shapes.iter().map(|s| s.original_points).sum();
        let average_original_points = if shapes.is_empty() {
            0.0
        } else {
            total as f64 / shapes.len() as f64
        };

        Self {
            records: shapes.len(),
            average_original_points,
            sample_path_len: shapes.first().map(|s| s.path.len()).unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Position, Shape};
    use geo::coord;

    fn ring(raw: &[(f64, f64)]) -> Vec<Position> {
        raw.iter().map(|&(x, y)| Some(coord! { x: x, y: y })).collect()
    }

    fn square_settings() -> BuildSettings {
        BuildSettings {
            width: 100.0,
            height: 100.0,
            padding: 0.1,
            extent: ExtentSource::Fixed(ReferenceExtent {
                min_lon: 0.0,
                max_lon: 10.0,
                min_lat: 0.0,
                max_lat: 10.0,
            }),
            detailed_tolerance: 0.1,
            simplified_tolerance: 1000.0,
        }
    }

    fn square_feature(name: &str) -> RegionFeature {
        let square = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
        RegionFeature::new(name, "SQ", Shape::Polygon(vec![square]))
    }

    #[test]
    fn test_square_end_to_end() {
        let mut diag = Diagnostics::new();
        let shapes = build_region_shapes(
            &[square_feature("Square")],
            &square_settings(),
            &RegionTable::default(),
            &mut diag,
        );

        assert!(diag.is_empty());
        let shape = &shapes[0];
        assert_eq!(shape.id, "square");
        assert_eq!(
            shape.path_detailed.as_deref(),
            Some("M 0.00,90.00 L 0.00,0.00 L 90.00,0.00 L 90.00,90.00 L 0.00,90.00 Z")
        );
        // Collapses to the two coincident endpoints
        assert_eq!(shape.path, "");
        assert_eq!(shape.center, [45.0, 45.0]);
        assert_eq!(shape.region, None);
        assert_eq!(shape.original_points, 5);
    }

    #[test]
    fn test_output_sorted_by_name() {
        let features = vec![
            square_feature("Yolo"),
            square_feature("Alameda"),
            square_feature("Kern"),
            square_feature("San Diego"),
        ];
        let mut diag = Diagnostics::new();
        let shapes = build_region_shapes(
            &features,
            &square_settings(),
            &RegionTable::california(),
            &mut diag,
        );

        let names: Vec<&str> = shapes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alameda", "Kern", "San Diego", "Yolo"]);
        assert_eq!(shapes.len(), features.len());
        assert_eq!(shapes[0].region.as_deref(), Some("Bay Area"));
        assert_eq!(shapes[2].id, "san-diego");
    }

    #[test]
    fn test_sort_is_ordinal() {
        let features = vec![square_feature("alpha"), square_feature("Zeta")];
        let mut diag = Diagnostics::new();
        let shapes = build_region_shapes(
            &features,
            &square_settings(),
            &RegionTable::default(),
            &mut diag,
        );
        // Uppercase sorts before lowercase
        assert_eq!(shapes[0].name, "Zeta");
    }

    #[test]
    fn test_empty_geometry() {
        let features = vec![RegionFeature::new("Nowhere", "", Shape::empty())];
        let mut diag = Diagnostics::new();
        let shapes = build_region_shapes(
            &features,
            &BuildSettings::default(),
            &RegionTable::default(),
            &mut diag,
        );

        assert_eq!(shapes[0].center, [0.0, 0.0]);
        assert_eq!(shapes[0].path, "");
        assert_eq!(shapes[0].path_detailed, None);
        assert_eq!(diag.counts().get("empty geometry"), Some(&1));
    }

    #[test]
    fn test_unknown_region_warns() {
        let features = vec![square_feature("Atlantis")];
        let mut diag = Diagnostics::new();
        let shapes = build_region_shapes(
            &features,
            &square_settings(),
            &RegionTable::california(),
            &mut diag,
        );

        assert_eq!(shapes[0].region.as_deref(), Some(UNKNOWN_REGION));
        assert_eq!(diag.counts().get("unknown region"), Some(&1));
    }

    #[test]
    fn test_malformed_positions_project_to_origin() {
        let mut square = ring(&[(1.0, 1.0), (1.0, 9.0), (9.0, 9.0), (9.0, 1.0)]);
        square.insert(2, None);
        let features = vec![RegionFeature::new("Bent", "", Shape::Polygon(vec![square]))];
        let mut diag = Diagnostics::new();
        let shapes = build_region_shapes(
            &features,
            &square_settings(),
            &RegionTable::default(),
            &mut diag,
        );

        let detailed = shapes[0].path_detailed.as_deref().unwrap();
        assert!(detailed.contains("L 0.00,0.00"));
    }

    #[test]
    fn test_fit_input_extent() {
        let small = ring(&[(-120.0, 36.0), (-120.0, 37.0), (-119.0, 37.0), (-119.0, 36.0)]);
        let features = vec![RegionFeature::new("Small", "", Shape::Polygon(vec![small]))];
        let settings = BuildSettings {
            width: 100.0,
            height: 100.0,
            extent: ExtentSource::FitInput,
            ..Default::default()
        };

        let extent = settings.resolve_extent(&features);
        assert_eq!(extent.min_lon, -120.0);
        assert_eq!(extent.max_lat, 37.0);

        let mut diag = Diagnostics::new();
        let shapes = build_region_shapes(&features, &settings, &RegionTable::default(), &mut diag);
        assert_eq!(shapes[0].center, [45.0, 45.0]);
    }

    #[test]
    fn test_fit_input_without_points_uses_default_extent() {
        let settings = BuildSettings {
            extent: ExtentSource::FitInput,
            ..Default::default()
        };
        assert_eq!(settings.resolve_extent(&[]), ReferenceExtent::CALIFORNIA);
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(12.34), 12.3);
        assert_eq!(round_tenth(12.36), 12.4);
        assert!(round_tenth(-0.01).is_sign_positive());
    }

    #[test]
    fn test_round_tenth_halves_to_even() {
        assert_eq!(round_tenth(45.25), 45.2);
        assert_eq!(round_tenth(0.25), 0.2);
        assert_eq!(round_tenth(-45.25), -45.2);
        assert_eq!(round_tenth(45.75), 45.8);
        // Not exact halves once stored as binary
        assert_eq!(round_tenth(45.35), 45.4);
        assert_eq!(round_tenth(0.35), 0.3);
    }

    #[test]
    fn test_build_summary() {
        let mut diag = Diagnostics::new();
        let shapes = build_region_shapes(
            &[square_feature("A"), RegionFeature::new("B", "", Shape::empty())],
            &square_settings(),
            &RegionTable::default(),
            &mut diag,
        );

        let summary = BuildSummary::from_shapes(&shapes);
        assert_eq!(summary.records, 2);
        assert_eq!(summary.average_original_points, 2.5);
        assert_eq!(summary.sample_path_len, 0);
        assert_eq!(BuildSummary::from_shapes(&[]).average_original_points, 0.0);
    }
}
