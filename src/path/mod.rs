//! SVG path strings for projected shapes

use geo::Coord;
use std::fmt::Write;

use crate::domain::Shape;
use crate::geometry::simplify;

/// Simplify a ring and encode it as a closed `M .. L .. Z` path
///
/// Coordinates are written with two fractional digits. A ring that
/// simplifies to fewer than 3 points encloses nothing and yields `""`.
pub fn ring_path(points: &[Coord<f64>], tolerance: f64) -> String {
    let simplified = simplify(points, tolerance);
    if simplified.len() < 3 {
        return String::new();
    }

    let mut path = String::with_capacity(simplified.len() * 16);
    let first = simplified[0];
    let _ = write!(path, "M {:.2},{:.2}", first.x, first.y);
    for p in &simplified[1..] {
        let _ = write!(path, " L {:.2},{:.2}", p.x, p.y);
    }
    path.push_str(" Z");
    path
}

/// Encode the outer ring of every polygon in `shape`
///
/// Holes are not serialized. Fragments are joined by a single space, so a
/// multipolygon becomes one path with several closed subpaths.
pub fn shape_path(shape: &Shape<Coord<f64>>, tolerance: f64) -> String {
    shape
        .outer_rings()
        .map(|ring| ring_path(ring, tolerance))
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
