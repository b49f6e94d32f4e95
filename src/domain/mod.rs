pub mod region;
pub mod shape;

pub use region::{RegionFeature, RegionShape, region_id};
pub use shape::{Position, Ring, Rings, Shape};
