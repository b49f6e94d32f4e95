pub mod bounds;
pub mod distance;
pub mod projection;
pub mod simplify;

pub use bounds::{AsCoord, Bounds};
pub use distance::perpendicular_distance;
pub use projection::{Projector, ReferenceExtent};
pub use simplify::simplify;
