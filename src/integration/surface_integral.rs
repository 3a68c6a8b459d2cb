use nalgebra::{allocator::Allocator, DefaultAllocator, DimName};

use crate::{misc::FloatingPoint, surface::TensorSurface};

use super::{integrate_over_spans, QuadratureOptions};

impl<T: FloatingPoint, D: DimName> TensorSurface<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// Integrate `f(u, v)` over the parametric domain, element by element
    pub fn try_integrate<F>(&self, f: F, options: &QuadratureOptions) -> anyhow::Result<T>
    where
        F: Fn(T, T) -> T,
    {
        let basis = self.tensor_basis();
        integrate_over_spans(&basis.u().spans(), &basis.v().spans(), f, options)
    }

    /// Integral of the basis function attached to the control point at column `i` and row `j`
    /// # Example
    /// ```
    /// use isospline::prelude::*;
    /// use nalgebra::Point2;
    ///
    /// let control_points: Vec<Vec<Point2<f64>>> = (0..2)
    ///     .map(|j| (0..3).map(|i| Point2::new(i as f64, j as f64)).collect())
    ///     .collect();
    /// let surface = TensorSurface::bezier((2, 1), control_points);
    /// let options = QuadratureOptions::default();
    /// // int B_{1,2}(u) du * int B_{0,1}(v) dv = 1/3 * 1/2
    /// let integral = surface.try_integrate_basis_function(1, 0, &options).unwrap();
    /// approx::assert_relative_eq!(integral, 1. / 6., epsilon = 1e-12);
    /// ```
    pub fn try_integrate_basis_function(
        &self,
        i: usize,
        j: usize,
        options: &QuadratureOptions,
    ) -> anyhow::Result<T> {
        self.try_integrate(|u, v| self.basis_function(i, j, u, v), options)
    }
}
