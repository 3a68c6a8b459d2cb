#![allow(clippy::needless_range_loop)]

mod basis;
mod curve;
mod decompose;
mod extraction;
mod integration;
mod knot;
mod misc;
mod surface;

pub mod prelude {
    pub use crate::basis::*;
    pub use crate::curve::*;
    pub use crate::decompose::*;
    pub use crate::extraction::*;
    pub use crate::integration::*;
    pub use crate::knot::*;
    pub use crate::misc::*;
    pub use crate::surface::*;
}
