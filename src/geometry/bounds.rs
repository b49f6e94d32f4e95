use geo::{Coord, coord};

use crate::domain::{Position, Shape};

/// Anything that may resolve to a coordinate
pub trait AsCoord {
    fn as_coord(&self) -> Option<Coord<f64>>;
}

impl AsCoord for Coord<f64> {
    fn as_coord(&self) -> Option<Coord<f64>> {
        Some(*self)
    }
}

impl AsCoord for Position {
    fn as_coord(&self) -> Option<Coord<f64>> {
        *self
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Sentinel for geometry without any usable point
    pub fn zero() -> Self {
        Self {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
        }
    }

    /// Create bounds from a set of points
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Coord<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in points {
            bounds.include(*p);
        }
        Some(bounds)
    }

    /// Bounds of every ring in `shape`, skipping malformed entries
    ///
    /// Returns [`Bounds::zero`] when nothing is left.
    pub fn of_shape<P: AsCoord>(shape: &Shape<P>) -> Self {
        let coords: Vec<Coord<f64>> = shape.points().filter_map(AsCoord::as_coord).collect();
        Self::from_points(&coords).unwrap_or_else(Self::zero)
    }

    /// Bounds covering several shapes, `None` if none has a usable point
    pub fn of_shapes<'a, P: AsCoord + 'a>(
        shapes: impl IntoIterator<Item = &'a Shape<P>>,
    ) -> Option<Self> {
        let coords: Vec<Coord<f64>> = shapes
            .into_iter()
            .flat_map(|s| s.points().filter_map(AsCoord::as_coord))
            .collect();
        Self::from_points(&coords)
    }

    /// Expand bounds to include a point
    pub fn include(&mut self, p: Coord<f64>) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn center(&self) -> Coord<f64> {
        coord! {
            x: (self.min_x + self.max_x) / 2.0,
            y: (self.min_y + self.max_y) / 2.0,
        }
    }
}
