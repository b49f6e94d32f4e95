use geo::{Coord, coord};
use serde::Deserialize;

use super::bounds::Bounds;
use crate::domain::{Position, Shape};

/// Geographic box (degrees) that is mapped onto the viewbox
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ReferenceExtent {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl ReferenceExtent {
    /// Fixed extent of the California counties dataset
    pub const CALIFORNIA: ReferenceExtent = ReferenceExtent {
        min_lon: -124.5,
        max_lon: -114.1,
        min_lat: 32.5,
        max_lat: 42.0,
    };

    /// Extent covering `bounds`, with x as longitude and y as latitude
    pub fn from_bounds(bounds: &Bounds) -> Self {
        Self {
            min_lon: bounds.min_x,
            max_lon: bounds.max_x,
            min_lat: bounds.min_y,
            max_lat: bounds.max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

impl Default for ReferenceExtent {
    fn default() -> Self {
        Self::CALIFORNIA
    }
}

/// Affine lon/lat to viewbox transform
///
/// A single uniform scale fits the reference extent inside the target size,
/// shrunk by `padding` so the result never touches the far edges:
/// - x = (lon - min_lon) * scale
/// - y = (max_lat - lat) * scale
///
/// The y axis is flipped so north is at the top of the drawing.
#[derive(Debug, Clone)]
pub struct Projector {
    extent: ReferenceExtent,
    scale: f64,
}

impl Projector {
    /// # Arguments
    /// * `extent` - geographic box mapped onto the viewbox
    /// * `width`, `height` - viewbox size
    /// * `padding` - fraction the uniform scale is reduced by (0.1 = 10%)
    pub fn new(extent: ReferenceExtent, width: f64, height: f64, padding: f64) -> Self {
        let scale = (width / extent.width()).min(height / extent.height()) * (1.0 - padding);
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };

        Self { extent, scale }
    }

    /// Project a lon/lat point into the viewbox
    pub fn project(&self, lon: f64, lat: f64) -> Coord<f64> {
        coord! {
            x: (lon - self.extent.min_lon) * self.scale,
            y: (self.extent.max_lat - lat) * self.scale,
        }
    }

    /// Project an input entry; malformed entries land on the origin
    pub fn project_position(&self, position: &Position) -> Coord<f64> {
        match position {
            Some(c) => self.project(c.x, c.y),
            None => coord! { x: 0.0, y: 0.0 },
        }
    }

    /// Project every entry of a shape, keeping its nesting
    pub fn project_shape(&self, shape: &Shape<Position>) -> Shape<Coord<f64>> {
        shape.map(|p| self.project_position(p))
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale
    }

    /// Size of the reference extent once projected
    pub fn scaled_size(&self) -> (f64, f64) {
        (
            self.extent.width() * self.scale,
            self.extent.height() * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_california_scale() {
        let proj = Projector::new(ReferenceExtent::CALIFORNIA, 800.0, 1000.0, 0.1);
        // 800 / 10.4 is smaller than 1000 / 9.5
        let expected = 800.0 / 10.4 * 0.9;
        assert!((proj.scale_factor() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_northwest_corner_is_origin() {
        let proj = Projector::new(ReferenceExtent::CALIFORNIA, 800.0, 1000.0, 0.1);
        let p = proj.project(-124.5, 42.0);
        assert!(p.x.abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn test_southeast_corner_is_scaled_size() {
        let proj = Projector::new(ReferenceExtent::CALIFORNIA, 800.0, 1000.0, 0.1);
        let (w, h) = proj.scaled_size();
        let p = proj.project(-114.1, 32.5);
        assert!((p.x - w).abs() < 1e-9);
        assert!((p.y - h).abs() < 1e-9);
        assert!(w <= 800.0 && h <= 1000.0);
    }

    #[test]
    fn test_y_axis_flipped() {
        let proj = Projector::new(ReferenceExtent::CALIFORNIA, 800.0, 1000.0, 0.1);
        let north = proj.project(-120.0, 40.0);
        let south = proj.project(-120.0, 35.0);
        assert!(north.y < south.y);
        assert_eq!(north.x, south.x);
    }

    #[test]
    fn test_malformed_position_maps_to_origin() {
        let proj = Projector::new(ReferenceExtent::CALIFORNIA, 800.0, 1000.0, 0.1);
        assert_eq!(proj.project_position(&None), coord! { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_project_shape_keeps_nesting() {
        let extent = ReferenceExtent {
            min_lon: 0.0,
            max_lon: 10.0,
            min_lat: 0.0,
            max_lat: 10.0,
        };
        let proj = Projector::new(extent, 100.0, 100.0, 0.1);
        let shape = Shape::MultiPolygon(vec![
            vec![vec![Some(coord! { x: 0.0, y: 10.0 }), None]],
            vec![vec![Some(coord! { x: 10.0, y: 0.0 })]],
        ]);

        let projected = proj.project_shape(&shape);
        assert_eq!(
            projected,
            Shape::MultiPolygon(vec![
                vec![vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 0.0 }]],
                vec![vec![coord! { x: 90.0, y: 90.0 }]],
            ])
        );
    }

    #[test]
    fn test_degenerate_extent_falls_back_to_unit_scale() {
        let extent = ReferenceExtent {
            min_lon: 5.0,
            max_lon: 5.0,
            min_lat: 1.0,
            max_lat: 1.0,
        };
        let proj = Projector::new(extent, 100.0, 100.0, 0.1);
        assert_eq!(proj.scale_factor(), 1.0);
    }

    #[test]
    fn test_extent_from_bounds() {
        let bounds = Bounds {
            min_x: -1.0,
            max_x: 2.0,
            min_y: 3.0,
            max_y: 7.0,
        };
        let extent = ReferenceExtent::from_bounds(&bounds);
        assert_eq!(extent.width(), 3.0);
        assert_eq!(extent.height(), 4.0);
    }
}
