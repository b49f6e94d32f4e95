use geo::Coord;

/// An input coordinate entry; `None` marks an entry that was not a
/// numeric pair and was kept under the best-effort policy
pub type Position = Option<Coord<f64>>;

/// Ordered point loop; the first and last points are implicitly connected
pub type Ring<P> = Vec<P>;

/// Rings of one polygon, outer boundary first, holes after
pub type Rings<P> = Vec<Ring<P>>;

/// Polygon or MultiPolygon geometry, decided once when the input is parsed
///
/// `P` is `Position` for geographic input and `Coord<f64>` once projected.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape<P> {
    Polygon(Rings<P>),
    MultiPolygon(Vec<Rings<P>>),
}

impl<P> Shape<P> {
    /// An empty polygon, used when a feature has no usable geometry
    pub fn empty() -> Self {
        Shape::Polygon(Vec::new())
    }

    /// Iterate the polygons; a `Polygon` yields itself once
    pub fn polygons(&self) -> std::slice::Iter<'_, Rings<P>> {
        match self {
            Shape::Polygon(rings) => std::slice::from_ref(rings).iter(),
            Shape::MultiPolygon(polygons) => polygons.iter(),
        }
    }

    /// Outer ring of every polygon that has one
    pub fn outer_rings(&self) -> impl Iterator<Item = &Ring<P>> {
        self.polygons().filter_map(|rings| rings.first())
    }

    /// Every entry of every ring, holes included
    pub fn points(&self) -> impl Iterator<Item = &P> {
        self.polygons().flatten().flatten()
    }

    pub fn point_count(&self) -> usize {
        self.polygons().flatten().map(Vec::len).sum()
    }

    /// Number of entries across all outer rings
    pub fn outer_point_count(&self) -> usize {
        self.outer_rings().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Apply `f` to every entry, preserving the nesting
    pub fn map<Q>(&self, mut f: impl FnMut(&P) -> Q) -> Shape<Q> {
        match self {
            Shape::Polygon(rings) => Shape::Polygon(map_rings(rings, &mut f)),
            Shape::MultiPolygon(polygons) => Shape::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| map_rings(rings, &mut f))
                    .collect(),
            ),
        }
    }
}

fn map_rings<P, Q>(rings: &[Ring<P>], f: &mut impl FnMut(&P) -> Q) -> Rings<Q> {
    rings
        .iter()
        .map(|ring| ring.iter().map(&mut *f).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi() -> Shape<u32> {
        Shape::MultiPolygon(vec![
            vec![vec![1, 2, 3, 1], vec![7, 8, 9]],
            vec![vec![4, 5, 6, 4]],
            vec![],
        ])
    }

    #[test]
    fn test_polygon_yields_itself() {
        let shape = Shape::Polygon(vec![vec![1, 2, 3], vec![4]]);
        assert_eq!(shape.polygons().count(), 1);
        assert_eq!(shape.point_count(), 4);
        assert_eq!(shape.outer_point_count(), 3);
    }

    #[test]
    fn test_multipolygon_counts() {
        let shape = multi();
        assert_eq!(shape.polygons().count(), 3);
        assert_eq!(shape.outer_rings().count(), 2);
        assert_eq!(shape.point_count(), 11);
        assert_eq!(shape.outer_point_count(), 8);
    }

    #[test]
    fn test_map_preserves_nesting() {
        let doubled = multi().map(|v| v * 2);
        assert_eq!(
            doubled,
            Shape::MultiPolygon(vec![
                vec![vec![2, 4, 6, 2], vec![14, 16, 18]],
                vec![vec![8, 10, 12, 8]],
                vec![],
            ])
        );
    }

    #[test]
    fn test_empty() {
        let shape: Shape<u32> = Shape::empty();
        assert!(shape.is_empty());
        assert_eq!(shape.outer_rings().count(), 0);
    }
}
