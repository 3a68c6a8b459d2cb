pub mod floating_point;
pub mod grid;

pub use floating_point::*;
pub use grid::*;
