pub mod decompose_spline_curve;
pub mod decompose_tensor_surface;

use crate::{
    basis::Basis,
    extraction::{extract_elements, try_extract, BezierElement, ExtractionOperator},
    knot::KnotSpan,
    misc::FloatingPoint,
};

/// Decompose a curve or surface into a set of Bezier curves or surfaces
pub trait Decompose {
    type Output;
    fn try_decompose(&self) -> anyhow::Result<Self::Output>;
}

/// Bezier elements of one parametric direction
/// A Bernstein basis is a single element with the identity operator
fn direction_elements<T: FloatingPoint>(basis: &Basis<T>) -> anyhow::Result<Vec<BezierElement<T>>> {
    match basis {
        Basis::Bernstein { degree } => Ok(vec![BezierElement::new(
            KnotSpan::new(*degree, T::zero(), T::one()),
            *degree,
            ExtractionOperator::identity(*degree),
        )]),
        Basis::CoxDeBoor { knots, degree } => {
            let validated = try_extract(knots)?.degree();
            anyhow::ensure!(
                validated == *degree,
                "Knot vector degree {} differs from basis degree {}",
                validated,
                degree
            );
            Ok(extract_elements(knots, *degree).collect())
        }
    }
}
