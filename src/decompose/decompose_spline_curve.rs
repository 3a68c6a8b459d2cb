use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use crate::{
    basis::Basis,
    curve::SplineCurve,
    extraction::ExtractionOperator,
    misc::FloatingPoint,
    prelude::Decompose,
};

use super::direction_elements;

impl<T: FloatingPoint, D: DimName> Decompose for SplineCurve<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    type Output = Vec<SplineCurve<T, D>>;

    /// Decompose the curve into Bezier segments of the same degree, one per knot span
    /// Each segment is parameterized over `[0, 1]` of its span
    fn try_decompose(&self) -> anyhow::Result<Self::Output> {
        if let Basis::Bernstein { .. } = self.basis() {
            return Ok(vec![self.clone()]);
        }

        anyhow::ensure!(
            self.control_points().len() == self.basis().len(),
            "Invalid number of control points, got {}, expected {}",
            self.control_points().len(),
            self.basis().len()
        );
        if let Some(weights) = self.weights() {
            anyhow::ensure!(
                weights.len() == self.control_points().len(),
                "Invalid number of weights, got {}, expected {}",
                weights.len(),
                self.control_points().len()
            );
        }

        let degree = self.degree();
        let segments = direction_elements(self.basis())?
            .into_iter()
            .map(|element| {
                let range = element.basis_indices();
                let points = &self.control_points()[range.clone()];
                let weights = self.weights().map(|w| &w[range]);
                let (points, weights) = extract_segment(element.operator(), points, weights);
                SplineCurve::new(Basis::bernstein(degree), points, weights)
            })
            .collect();
        Ok(segments)
    }
}

/// Bezier control points (and weights) of one element
/// Rational control points are extracted in homogeneous form and projected back
fn extract_segment<T: FloatingPoint, D: DimName>(
    operator: &ExtractionOperator<T>,
    points: &[OPoint<T, D>],
    weights: Option<&[T]>,
) -> (Vec<OPoint<T, D>>, Option<Vec<T>>)
where
    DefaultAllocator: Allocator<D>,
{
    match weights {
        None => (operator.bezier_control_points(points), None),
        Some(weights) => {
            let weighted: Vec<_> = points
                .iter()
                .zip(weights.iter())
                .map(|(p, w)| OPoint::from(&p.coords * *w))
                .collect();
            let bezier_weights = operator.bezier_weights(weights);
            let bezier_points = operator
                .bezier_control_points(&weighted)
                .into_iter()
                .zip(bezier_weights.iter())
                .map(|(p, w)| OPoint::from(p.coords / *w))
                .collect();
            (bezier_points, Some(bezier_weights))
        }
    }
}
