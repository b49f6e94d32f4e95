use geo::Coord;

use super::distance::perpendicular_distance;

/// Simplify an ordered point sequence with Douglas-Peucker
///
/// # Algorithm
/// 1. The interior point farthest from the chord between the range ends is
///    found (the lowest index wins ties)
/// 2. If its distance exceeds `tolerance` the range is split there and both
///    halves are processed; otherwise every interior point is dropped
///
/// Ranges are processed from an explicit stack rather than by recursion.
/// The result is an in-order subsequence of `points` that always keeps the
/// first and last point. Sequences of two or fewer points are returned as-is.
pub fn simplify(points: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let tolerance = tolerance.max(0.0);
    let last = points.len() - 1;

    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[last] = true;

    let mut ranges = vec![(0, last)];
    while let Some((start, end)) = ranges.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_dist = 0.0;
        let mut max_idx = start;
        for i in (start + 1)..end {
            let d = perpendicular_distance(points[i], points[start], points[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }

        if max_dist > tolerance {
            kept[max_idx] = true;
            ranges.push((max_idx, end));
            ranges.push((start, max_idx));
        }
    }

    points
        .iter()
        .zip(&kept)
        .filter(|&(_, &k)| k)
        .map(|(&p, _)| p)
        .collect()
}
