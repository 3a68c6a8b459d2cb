use std::ops::Index;

use nalgebra::{allocator::Allocator, DMatrix, DefaultAllocator, DimName, OPoint};

use crate::{basis::bernstein_values, misc::FloatingPoint};

/// Bezier extraction operator of one element
/// Row `r` expresses the `r`-th B-spline basis function supported on the element
/// as a combination of the element's Bernstein polynomials, `N = C B`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionOperator<T: FloatingPoint>(DMatrix<T>);

impl<T: FloatingPoint> ExtractionOperator<T> {
    pub fn new(matrix: DMatrix<T>) -> Self {
        Self(matrix)
    }

    /// Identity operator of the given degree, the operator of an element that already is a Bezier segment
    pub fn identity(degree: usize) -> Self {
        Self(DMatrix::identity(degree + 1, degree + 1))
    }

    pub fn matrix(&self) -> &DMatrix<T> {
        &self.0
    }

    pub fn into_matrix(self) -> DMatrix<T> {
        self.0
    }

    pub fn degree(&self) -> usize {
        self.0.nrows().saturating_sub(1)
    }

    pub fn is_identity(&self) -> bool {
        self.0 == DMatrix::identity(self.0.nrows(), self.0.ncols())
    }

    /// Apply the operator to Bernstein values, giving the B-spline values supported on the element
    pub fn bspline_basis(&self, bernstein: &[T]) -> Vec<T> {
        (0..self.0.nrows())
            .map(|r| {
                self.0
                    .row(r)
                    .iter()
                    .zip(bernstein.iter())
                    .fold(T::zero(), |acc, (c, b)| acc + *c * *b)
            })
            .collect()
    }

    /// B-spline values supported on the element at the local parameter `t` in `[0, 1]`
    pub fn bspline_basis_at(&self, t: T) -> Vec<T> {
        self.bspline_basis(&bernstein_values(self.degree(), t))
    }

    /// Bezier control points of the element from the B-spline control points supported on it, `Cᵀ P`
    pub fn bezier_control_points<D: DimName>(
        &self,
        control_points: &[OPoint<T, D>],
    ) -> Vec<OPoint<T, D>>
    where
        DefaultAllocator: Allocator<D>,
    {
        (0..self.0.ncols())
            .map(|c| {
                let mut point = OPoint::<T, D>::origin();
                for (r, p) in control_points.iter().enumerate().take(self.0.nrows()) {
                    point.coords += &p.coords * self.0[(r, c)];
                }
                point
            })
            .collect()
    }

    /// Bezier weights of the element from the B-spline weights supported on it, `Cᵀ w`
    pub fn bezier_weights(&self, weights: &[T]) -> Vec<T> {
        (0..self.0.ncols())
            .map(|c| {
                weights
                    .iter()
                    .enumerate()
                    .take(self.0.nrows())
                    .fold(T::zero(), |acc, (r, w)| acc + self.0[(r, c)] * *w)
            })
            .collect()
    }

    /// Tensor-product operator of a bivariate element
    /// `self` is the `v` operator and `other` the `u` operator, matching a control net flattened row by row
    pub fn kronecker(&self, other: &Self) -> Self {
        Self(self.0.kronecker(&other.0))
    }
}

impl<T: FloatingPoint> Index<(usize, usize)> for ExtractionOperator<T> {
    type Output = T;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.0[index]
    }
}

impl<T: FloatingPoint> From<ExtractionOperator<T>> for DMatrix<T> {
    fn from(operator: ExtractionOperator<T>) -> Self {
        operator.0
    }
}
