pub mod spline_curve;
pub use spline_curve::*;
