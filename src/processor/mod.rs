pub mod normalizer;
pub mod price_parser;
pub mod transformer;

pub use normalizer::*;
pub use price_parser::*;
pub use transformer::*;
