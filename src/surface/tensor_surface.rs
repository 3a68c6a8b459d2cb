use nalgebra::{allocator::Allocator, Const, DefaultAllocator, DimName, OPoint};
use simba::scalar::SupersetOf;

use crate::{
    basis::Basis,
    knot::KnotVector,
    misc::{cast_control_grid, grid_shape, transpose_grid, ControlGrid, FloatingPoint, WeightGrid},
};

use super::{RationalBasis, TensorBasis};

/// Tensor-product surface over a control grid
/// Bezier, B-spline and NURBS surfaces differ only in the basis per direction and the optional weights
/// by generics, it can be used for 2D or 3D control points with f32 or f64 scalar types
#[derive(Clone, Debug)]
pub struct TensorSurface<T: FloatingPoint, D: DimName>
where
    DefaultAllocator: Allocator<D>,
{
    /// rows follow the `v` direction, columns follow the `u` direction
    control_points: ControlGrid<T, D>,
    basis: TensorBasis<T>,
    /// same shape as `control_points`, present for NURBS surfaces only
    weights: Option<WeightGrid<T>>,
}

/// Surface with 2D control points
pub type TensorSurface2D<T> = TensorSurface<T, Const<2>>;
/// Surface with 3D control points
pub type TensorSurface3D<T> = TensorSurface<T, Const<3>>;

impl<T: FloatingPoint, D: DimName> TensorSurface<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    /// Create a surface without checking the control grid against the basis
    pub fn new(
        basis: TensorBasis<T>,
        control_points: ControlGrid<T, D>,
        weights: Option<WeightGrid<T>>,
    ) -> Self {
        #[cfg(feature = "log")]
        log::trace!(
            "tensor surface of degrees {:?}, rational: {}",
            basis.degrees(),
            weights.is_some()
        );
        Self {
            control_points,
            basis,
            weights,
        }
    }

    /// Create a Bezier surface with explicit degrees `(p, q)`
    /// Grid cells beyond `p + 1` columns or `q + 1` rows get a zero basis value
    pub fn bezier(degrees: (usize, usize), control_points: ControlGrid<T, D>) -> Self {
        let basis = TensorBasis::new(Basis::bernstein(degrees.0), Basis::bernstein(degrees.1));
        Self::new(basis, control_points, None)
    }

    /// Create a Bezier surface after checking that the control grid is rectangular
    pub fn try_bezier(
        degrees: (usize, usize),
        control_points: ControlGrid<T, D>,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(
            grid_shape(&control_points).is_some(),
            "Control points must form a non-empty rectangular grid"
        );
        Ok(Self::bezier(degrees, control_points))
    }

    /// Create a B-spline surface, the degree of each direction is derived from its open knot vector
    pub fn bspline(
        u_knots: impl Into<KnotVector<T>>,
        v_knots: impl Into<KnotVector<T>>,
        control_points: ControlGrid<T, D>,
    ) -> Self {
        let basis = TensorBasis::new(Basis::cox_de_boor(u_knots), Basis::cox_de_boor(v_knots));
        Self::new(basis, control_points, None)
    }

    /// Create a B-spline surface after validating the knot vectors and the control grid shape
    /// # Failures
    /// - if a knot vector is not open or not non-decreasing
    /// - if the control grid is not rectangular
    /// - if the number of columns (rows) differs from the number of `u` (`v`) basis functions
    ///
    /// # Example
    /// ```
    /// use isospline::prelude::*;
    /// use nalgebra::Point2;
    ///
    /// let control_points: Vec<Vec<Point2<f64>>> = (0..4)
    ///     .map(|j| (0..5).map(|i| Point2::new(i as f64, j as f64)).collect())
    ///     .collect();
    /// let u_knots = vec![0., 0., 0., 1., 2., 3., 3., 3.];
    /// let v_knots = vec![0., 0., 1., 2., 3., 3.];
    /// let surface = TensorSurface::try_bspline(u_knots, v_knots, control_points);
    /// assert!(surface.is_ok());
    /// ```
    pub fn try_bspline(
        u_knots: impl Into<KnotVector<T>>,
        v_knots: impl Into<KnotVector<T>>,
        control_points: ControlGrid<T, D>,
    ) -> anyhow::Result<Self> {
        let basis = TensorBasis::new(
            Basis::try_cox_de_boor(u_knots)?,
            Basis::try_cox_de_boor(v_knots)?,
        );
        check_grid_against_basis(&control_points, &basis)?;
        Ok(Self::new(basis, control_points, None))
    }

    /// Create a NURBS surface with one weight per control point
    pub fn nurbs(
        u_knots: impl Into<KnotVector<T>>,
        v_knots: impl Into<KnotVector<T>>,
        control_points: ControlGrid<T, D>,
        weights: WeightGrid<T>,
    ) -> Self {
        let basis = TensorBasis::new(Basis::cox_de_boor(u_knots), Basis::cox_de_boor(v_knots));
        Self::new(basis, control_points, Some(weights))
    }

    /// Create a NURBS surface after validating the knot vectors, the grid shapes and the weights
    /// # Failures
    /// - the same failures as [`TensorSurface::try_bspline`]
    /// - if the weight grid shape differs from the control grid shape
    /// - if any weight is not strictly positive
    pub fn try_nurbs(
        u_knots: impl Into<KnotVector<T>>,
        v_knots: impl Into<KnotVector<T>>,
        control_points: ControlGrid<T, D>,
        weights: WeightGrid<T>,
    ) -> anyhow::Result<Self> {
        let basis = TensorBasis::new(
            Basis::try_cox_de_boor(u_knots)?,
            Basis::try_cox_de_boor(v_knots)?,
        );
        check_grid_against_basis(&control_points, &basis)?;
        anyhow::ensure!(
            grid_shape(&weights) == grid_shape(&control_points),
            "Weight grid shape {:?} differs from control grid shape {:?}",
            grid_shape(&weights),
            grid_shape(&control_points)
        );
        anyhow::ensure!(
            weights.iter().flatten().all(|w| *w > T::zero()),
            "Weights must be strictly positive"
        );
        Ok(Self::new(basis, control_points, Some(weights)))
    }

    pub fn control_points(&self) -> &ControlGrid<T, D> {
        &self.control_points
    }

    pub fn weights(&self) -> Option<&WeightGrid<T>> {
        self.weights.as_ref()
    }

    pub fn tensor_basis(&self) -> &TensorBasis<T> {
        &self.basis
    }

    pub fn rational_basis(&self) -> Option<RationalBasis<'_, T>> {
        self.weights
            .as_ref()
            .map(|weights| RationalBasis::new(&self.basis, weights))
    }

    pub fn is_rational(&self) -> bool {
        self.weights.is_some()
    }

    /// Degrees `(p, q)` along `u` and `v`
    pub fn degrees(&self) -> (usize, usize) {
        self.basis.degrees()
    }

    pub fn u_domain(&self) -> (T, T) {
        self.basis.u().domain()
    }

    pub fn v_domain(&self) -> (T, T) {
        self.basis.v().domain()
    }

    fn rows(&self) -> usize {
        self.control_points.len()
    }

    fn columns(&self) -> usize {
        self.control_points.first().map(|row| row.len()).unwrap_or(0)
    }

    /// Basis value of the control point at column `i` and row `j`, rational if the surface is weighted
    pub fn basis_function(&self, i: usize, j: usize, u: T, v: T) -> T {
        match self.rational_basis() {
            Some(rational) => rational.value(i, j, u, v),
            None => self.basis.value(i, j, u, v),
        }
    }

    /// Basis values of every control point, laid out like the control grid
    pub fn basis_grid(&self, u: T, v: T) -> Vec<Vec<T>> {
        match self.rational_basis() {
            Some(rational) => rational.grid(u, v),
            None => self.basis.grid(u, v, self.rows(), self.columns()),
        }
    }

    /// Weight function `W(u, v)`, `None` for non-rational surfaces
    pub fn weight_function(&self, u: T, v: T) -> Option<T> {
        self.rational_basis()
            .map(|rational| rational.weight_function(u, v))
    }

    /// Evaluate the surface at the given u, v parameters to get a point
    /// Every Cox-de Boor basis function vanishes at the upper knot, so B-spline surfaces
    /// evaluate to the origin there and NURBS surfaces are undefined
    pub fn point(&self, u: T, v: T) -> OPoint<T, D> {
        let basis = self.basis_grid(u, v);
        let mut position = OPoint::<T, D>::origin();
        for (row, basis_row) in self.control_points.iter().zip(basis.iter()) {
            for (p, b) in row.iter().zip(basis_row.iter()) {
                position.coords += &p.coords * *b;
            }
        }
        position
    }

    /// Sample a regular `divs_u x divs_v` grid of points over the half-open parametric domain
    /// Rows follow the `v` direction, the upper bounds are never sampled
    pub fn regular_sample_points(&self, divs_u: usize, divs_v: usize) -> Vec<Vec<OPoint<T, D>>> {
        let (u0, u1) = self.u_domain();
        let (v0, v1) = self.v_domain();
        let du = (u1 - u0) / T::from_index(divs_u.max(1));
        let dv = (v1 - v0) / T::from_index(divs_v.max(1));

        (0..divs_v)
            .map(|j| {
                let v = v0 + dv * T::from_index(j);
                (0..divs_u)
                    .map(|i| self.point(u0 + du * T::from_index(i), v))
                    .collect()
            })
            .collect()
    }

    /// Swap the `u` and `v` directions
    /// # Example
    /// ```
    /// use isospline::prelude::*;
    /// use nalgebra::Point2;
    ///
    /// let control_points: Vec<Vec<Point2<f64>>> = (0..2)
    ///     .map(|j| (0..3).map(|i| Point2::new(i as f64, j as f64)).collect())
    ///     .collect();
    /// let surface = TensorSurface::bezier((2, 1), control_points);
    /// let transposed = surface.transpose();
    /// assert_eq!(transposed.degrees(), (1, 2));
    /// approx::assert_relative_eq!(
    ///     surface.point(0.3, 0.6),
    ///     transposed.point(0.6, 0.3),
    ///     epsilon = 1e-12
    /// );
    /// ```
    pub fn transpose(&self) -> Self {
        Self {
            control_points: transpose_grid(&self.control_points),
            basis: self.basis.transpose(),
            weights: self.weights.as_ref().map(|w| transpose_grid(w)),
        }
    }

    /// Cast the surface to another floating point type
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> TensorSurface<F, D> {
        TensorSurface {
            control_points: cast_control_grid(&self.control_points),
            basis: self.basis.cast(),
            weights: self.weights.as_ref().map(|rows| {
                rows.iter()
                    .map(|row| row.iter().map(|w| nalgebra::convert(*w)).collect())
                    .collect()
            }),
        }
    }
}

fn check_grid_against_basis<T: FloatingPoint, D: DimName>(
    control_points: &ControlGrid<T, D>,
    basis: &TensorBasis<T>,
) -> anyhow::Result<()>
where
    DefaultAllocator: Allocator<D>,
{
    let (rows, columns) = grid_shape(control_points).ok_or_else(|| {
        anyhow::anyhow!("Control points must form a non-empty rectangular grid")
    })?;
    anyhow::ensure!(
        columns == basis.u().len(),
        "Invalid number of control point columns, got {}, expected {}",
        columns,
        basis.u().len()
    );
    anyhow::ensure!(
        rows == basis.v().len(),
        "Invalid number of control point rows, got {}, expected {}",
        rows,
        basis.v().len()
    );
    Ok(())
}
