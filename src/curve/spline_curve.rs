use nalgebra::{allocator::Allocator, Const, DefaultAllocator, DimName, OPoint};

use crate::{basis::Basis, knot::KnotVector, misc::FloatingPoint};

/// Univariate spline curve: Bezier, B-spline or NURBS depending on its basis and weights
/// by generics, it can be used for 2D or 3D control points with f32 or f64 scalar types
#[derive(Clone, Debug)]
pub struct SplineCurve<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    control_points: Vec<OPoint<T, D>>,
    basis: Basis<T>,
    /// one weight per control point, present for NURBS curves only
    weights: Option<Vec<T>>,
}

/// Curve with 2D control points
pub type SplineCurve2D<T> = SplineCurve<T, Const<2>>;
/// Curve with 3D control points
pub type SplineCurve3D<T> = SplineCurve<T, Const<3>>;

impl<T: FloatingPoint, D: DimName> SplineCurve<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    pub fn new(basis: Basis<T>, control_points: Vec<OPoint<T, D>>, weights: Option<Vec<T>>) -> Self {
        Self {
            control_points,
            basis,
            weights,
        }
    }

    pub fn bezier(degree: usize, control_points: Vec<OPoint<T, D>>) -> Self {
        Self::new(Basis::bernstein(degree), control_points, None)
    }

    pub fn try_bezier(degree: usize, control_points: Vec<OPoint<T, D>>) -> anyhow::Result<Self> {
        anyhow::ensure!(
            control_points.len() == degree + 1,
            "Invalid number of control points, got {}, expected {}",
            control_points.len(),
            degree + 1
        );
        Ok(Self::bezier(degree, control_points))
    }

    /// Create a B-spline curve, the degree is derived from the open knot vector
    pub fn bspline(knots: impl Into<KnotVector<T>>, control_points: Vec<OPoint<T, D>>) -> Self {
        Self::new(Basis::cox_de_boor(knots), control_points, None)
    }

    /// Create a B-spline curve after validating the knot vector
    /// # Failures
    /// - if the knot vector is not open or not non-decreasing
    /// - if the number of control points differs from the number of basis functions
    pub fn try_bspline(
        knots: impl Into<KnotVector<T>>,
        control_points: Vec<OPoint<T, D>>,
    ) -> anyhow::Result<Self> {
        let basis = Basis::try_cox_de_boor(knots)?;
        check_count(control_points.len(), &basis)?;
        Ok(Self::new(basis, control_points, None))
    }

    pub fn nurbs(
        knots: impl Into<KnotVector<T>>,
        control_points: Vec<OPoint<T, D>>,
        weights: Vec<T>,
    ) -> Self {
        Self::new(Basis::cox_de_boor(knots), control_points, Some(weights))
    }

    /// Create a NURBS curve after validating the knot vector and the weights
    /// # Example
    /// ```
    /// use isospline::prelude::*;
    /// use nalgebra::Point2;
    ///
    /// // quarter circle
    /// let w = std::f64::consts::FRAC_1_SQRT_2;
    /// let curve = SplineCurve2D::try_nurbs(
    ///     vec![0., 0., 0., 1., 1., 1.],
    ///     vec![Point2::new(1., 0.), Point2::new(1., 1.), Point2::new(0., 1.)],
    ///     vec![1., w, 1.],
    /// )
    /// .unwrap();
    /// let p = curve.point(0.5);
    /// approx::assert_relative_eq!(p.coords.norm(), 1., epsilon = 1e-12);
    /// ```
    pub fn try_nurbs(
        knots: impl Into<KnotVector<T>>,
        control_points: Vec<OPoint<T, D>>,
        weights: Vec<T>,
    ) -> anyhow::Result<Self> {
        let basis = Basis::try_cox_de_boor(knots)?;
        check_count(control_points.len(), &basis)?;
        anyhow::ensure!(
            weights.len() == control_points.len(),
            "Invalid number of weights, got {}, expected {}",
            weights.len(),
            control_points.len()
        );
        anyhow::ensure!(
            weights.iter().all(|w| *w > T::zero()),
            "Weights must be strictly positive"
        );
        Ok(Self::new(basis, control_points, Some(weights)))
    }

    pub fn control_points(&self) -> &[OPoint<T, D>] {
        &self.control_points
    }

    pub fn weights(&self) -> Option<&[T]> {
        self.weights.as_deref()
    }

    pub fn basis(&self) -> &Basis<T> {
        &self.basis
    }

    pub fn degree(&self) -> usize {
        self.basis.degree()
    }

    pub fn domain(&self) -> (T, T) {
        self.basis.domain()
    }

    pub fn is_rational(&self) -> bool {
        self.weights.is_some()
    }

    /// Weight function `W(t)`, `None` for non-rational curves
    pub fn weight_function(&self, t: T) -> Option<T> {
        let weights = self.weights.as_ref()?;
        let plain = self.plain_values(t);
        Some(
            plain
                .iter()
                .zip(weights.iter())
                .fold(T::zero(), |acc, (n, w)| acc + *n * *w),
        )
    }

    /// Basis value of the `i`-th control point, rational if the curve is weighted
    pub fn basis_function(&self, i: usize, t: T) -> T {
        match (&self.weights, self.weight_function(t)) {
            (Some(weights), Some(w)) => self.basis.evaluate(i, t) * weights[i] / w,
            _ => self.basis.evaluate(i, t),
        }
    }

    /// Basis values of every control point
    pub fn basis_values(&self, t: T) -> Vec<T> {
        let plain = self.plain_values(t);
        match &self.weights {
            Some(weights) => {
                let w = plain
                    .iter()
                    .zip(weights.iter())
                    .fold(T::zero(), |acc, (n, w)| acc + *n * *w);
                plain
                    .iter()
                    .zip(weights.iter())
                    .map(|(n, weight)| *n * *weight / w)
                    .collect()
            }
            None => plain,
        }
    }

    /// Evaluate the curve at the given parameter to get a point
    pub fn point(&self, t: T) -> OPoint<T, D> {
        let mut position = OPoint::<T, D>::origin();
        for (p, b) in self.control_points.iter().zip(self.basis_values(t)) {
            position.coords += &p.coords * b;
        }
        position
    }

    /// Plain basis values padded or cut to the number of control points
    fn plain_values(&self, t: T) -> Vec<T> {
        let mut values = self.basis.values(t);
        values.resize(self.control_points.len(), T::zero());
        values
    }
}

fn check_count<T: FloatingPoint>(count: usize, basis: &Basis<T>) -> anyhow::Result<()> {
    anyhow::ensure!(
        count == basis.len(),
        "Invalid number of control points, got {}, expected {}",
        count,
        basis.len()
    );
    Ok(())
}
