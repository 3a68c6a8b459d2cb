use nalgebra::{allocator::Allocator, DefaultAllocator, DimName, OPoint};

use crate::{
    basis::Basis,
    extraction::ExtractionOperator,
    misc::{grid_shape, transpose_grid, ControlGrid, FloatingPoint, WeightGrid},
    prelude::Decompose,
    surface::{TensorBasis, TensorSurface},
};

use super::direction_elements;

impl<T: FloatingPoint, D: DimName> Decompose for TensorSurface<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    type Output = Vec<Vec<TensorSurface<T, D>>>;

    /// Decompose the surface into Bezier patches of the same degrees, one per element
    /// The outer vector follows the `v` direction and the inner vector the `u` direction,
    /// matching the layout of the control grid.
    /// Each patch is parameterized over `[0, 1]^2` of its element
    fn try_decompose(&self) -> anyhow::Result<Self::Output> {
        let basis = self.tensor_basis();
        let (rows, columns) = grid_shape(self.control_points()).ok_or_else(|| {
            anyhow::anyhow!("Control points must form a non-empty rectangular grid")
        })?;
        anyhow::ensure!(
            columns >= basis.u().len() && rows >= basis.v().len(),
            "Control grid {}x{} is smaller than the basis {}x{}",
            rows,
            columns,
            basis.v().len(),
            basis.u().len()
        );

        if let Some(weights) = self.weights() {
            anyhow::ensure!(
                grid_shape(weights) == Some((rows, columns)),
                "Weight grid shape {:?} differs from control grid shape {:?}",
                grid_shape(weights),
                (rows, columns)
            );
        }

        let (p, q) = self.degrees();
        let u_elements = direction_elements(basis.u())?;
        let v_elements = direction_elements(basis.v())?;

        // homogeneous control points of rational surfaces
        let weighted: ControlGrid<T, D> = match self.weights() {
            Some(weights) => self
                .control_points()
                .iter()
                .zip(weights.iter())
                .map(|(row, w_row)| {
                    row.iter()
                        .zip(w_row.iter())
                        .map(|(pt, w)| OPoint::from(&pt.coords * *w))
                        .collect()
                })
                .collect(),
            None => self.control_points().clone(),
        };

        let patches = v_elements
            .iter()
            .map(|v_element| {
                u_elements
                    .iter()
                    .map(|u_element| {
                        let u_range = u_element.basis_indices();
                        let v_range = v_element.basis_indices();
                        let points: ControlGrid<T, D> = weighted[v_range.clone()]
                            .iter()
                            .map(|row| row[u_range.clone()].to_vec())
                            .collect();
                        let weights: Option<WeightGrid<T>> = self.weights().map(|weights| {
                            weights[v_range]
                                .iter()
                                .map(|row| row[u_range.clone()].to_vec())
                                .collect()
                        });

                        let points =
                            extract_grid(u_element.operator(), v_element.operator(), &points);
                        let weights = weights.map(|w| {
                            extract_weight_grid(u_element.operator(), v_element.operator(), &w)
                        });
                        let points = match &weights {
                            Some(weights) => project(points, weights),
                            None => points,
                        };

                        TensorSurface::new(
                            TensorBasis::new(Basis::bernstein(p), Basis::bernstein(q)),
                            points,
                            weights,
                        )
                    })
                    .collect()
            })
            .collect();

        #[cfg(feature = "log")]
        log::debug!(
            "decomposed into {}x{} Bezier patches",
            v_elements.len(),
            u_elements.len()
        );

        Ok(patches)
    }
}

/// Apply `u` to every row, then `v` to every column
fn extract_grid<T: FloatingPoint, D: DimName>(
    u: &ExtractionOperator<T>,
    v: &ExtractionOperator<T>,
    points: &ControlGrid<T, D>,
) -> ControlGrid<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    let rows: ControlGrid<T, D> = points
        .iter()
        .map(|row| u.bezier_control_points(row))
        .collect();
    let columns: ControlGrid<T, D> = transpose_grid(&rows)
        .iter()
        .map(|column| v.bezier_control_points(column))
        .collect();
    transpose_grid(&columns)
}

fn extract_weight_grid<T: FloatingPoint>(
    u: &ExtractionOperator<T>,
    v: &ExtractionOperator<T>,
    weights: &WeightGrid<T>,
) -> WeightGrid<T> {
    let rows: WeightGrid<T> = weights.iter().map(|row| u.bezier_weights(row)).collect();
    let columns: WeightGrid<T> = transpose_grid(&rows)
        .iter()
        .map(|column| v.bezier_weights(column))
        .collect();
    transpose_grid(&columns)
}

fn project<T: FloatingPoint, D: DimName>(
    points: ControlGrid<T, D>,
    weights: &WeightGrid<T>,
) -> ControlGrid<T, D>
where
    DefaultAllocator: Allocator<D>,
{
    points
        .into_iter()
        .zip(weights.iter())
        .map(|(row, w_row)| {
            row.into_iter()
                .zip(w_row.iter())
                .map(|(pt, w)| OPoint::from(pt.coords / *w))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{DVector, Point2, Point3};

    use crate::{
        extraction::extract_elements,
        knot::KnotVector,
        prelude::Decompose,
        surface::{TensorSurface, TensorSurface2D},
    };

    const U_KNOTS: [f64; 8] = [0., 0., 0., 1., 2., 3., 3., 3.];
    const V_KNOTS: [f64; 6] = [0., 0., 1., 2., 3., 3.];

    fn grid() -> Vec<Vec<Point2<f64>>> {
        (0..4)
            .map(|j| {
                (0..5)
                    .map(|i| Point2::new(i as f64 + 0.1 * (j * j) as f64, j as f64 - 0.2 * i as f64))
                    .collect()
            })
            .collect()
    }

    fn check_patches(surface: &TensorSurface2D<f64>) {
        let u_spans = KnotVector::new(U_KNOTS.to_vec()).spans();
        let v_spans = KnotVector::new(V_KNOTS.to_vec()).spans();
        let patches = surface.try_decompose().unwrap();
        assert_eq!(patches.len(), v_spans.len());
        for (row, v_span) in patches.iter().zip(v_spans.iter()) {
            assert_eq!(row.len(), u_spans.len());
            for (patch, u_span) in row.iter().zip(u_spans.iter()) {
                assert_eq!(patch.degrees(), (2, 1));
                for (s, t) in [(0., 0.), (0.25, 0.5), (0.8, 0.1), (0.5, 0.9)] {
                    assert_relative_eq!(
                        patch.point(s, t),
                        surface.point(u_span.global_parameter(s), v_span.global_parameter(t)),
                        epsilon = 1e-10
                    );
                }
            }
        }
    }

    #[test]
    fn bspline_patches_trace_the_surface() {
        let surface = TensorSurface2D::bspline(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid());
        check_patches(&surface);
    }

    #[test]
    fn nurbs_patches_trace_the_surface() {
        let weights: Vec<Vec<f64>> = (0..4)
            .map(|j| (0..5).map(|i| 1. + 0.25 * ((i + 3 * j) % 4) as f64).collect())
            .collect();
        let surface =
            TensorSurface2D::try_nurbs(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid(), weights)
                .unwrap();
        check_patches(&surface);
    }

    #[test]
    fn kronecker_operator_matches_patch_control_points() {
        let surface = TensorSurface2D::bspline(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid());
        let u_knots = KnotVector::new(U_KNOTS.to_vec());
        let v_knots = KnotVector::new(V_KNOTS.to_vec());
        let u_element = extract_elements(&u_knots, 2).nth(1).unwrap();
        let v_element = extract_elements(&v_knots, 1).nth(2).unwrap();
        let tensor = v_element.operator().kronecker(u_element.operator());

        // net supported on the element, flattened row by row
        let net: Vec<Point2<f64>> = grid()[v_element.basis_indices()]
            .iter()
            .flat_map(|row| row[u_element.basis_indices()].to_vec())
            .collect();
        let patch = &surface.try_decompose().unwrap()[2][1];
        let expected: Vec<Point2<f64>> = patch.control_points().iter().flatten().cloned().collect();

        for axis in 0..2 {
            let coords = DVector::from_iterator(net.len(), net.iter().map(|p| p[axis]));
            let bezier = tensor.matrix().transpose() * coords;
            for (b, e) in bezier.iter().zip(expected.iter()) {
                assert_relative_eq!(*b, e[axis], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn bezier_surface_is_a_single_patch() {
        let control_points: Vec<Vec<Point3<f64>>> = (0..3)
            .map(|j| (0..3).map(|i| Point3::new(i as f64, j as f64, (i * j) as f64)).collect())
            .collect();
        let surface = TensorSurface::bezier((2, 2), control_points);
        let patches = surface.try_decompose().unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].len(), 1);
        assert_relative_eq!(patches[0][0].point(0.3, 0.7), surface.point(0.3, 0.7), epsilon = 1e-12);
    }
}
