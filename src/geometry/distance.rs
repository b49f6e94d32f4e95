use geo::Coord;

/// Distance from `p` to the infinite line through `a` and `b`
///
/// This is the distance to the line, not to the segment. When `a` and `b`
/// coincide there is no line, so the Euclidean distance from `p` to `a` is
/// returned instead.
pub fn perpendicular_distance(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;

    if dx == 0.0 && dy == 0.0 {
        return (p.x - a.x).hypot(p.y - a.y);
    }

    (dy * p.x - dx * p.y + b.x * a.y - b.y * a.x).abs() / dx.hypot(dy)
}
