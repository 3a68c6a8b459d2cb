pub mod bezier_extraction;
pub mod extraction_operator;
pub use bezier_extraction::*;
pub use extraction_operator::*;
