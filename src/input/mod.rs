pub mod parser;

pub use parser::{ParseOptions, parse_collection, read_collection};
