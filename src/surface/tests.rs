use approx::assert_relative_eq;
use nalgebra::{Point2, Point3};

use super::{TensorSurface, TensorSurface2D};
use crate::basis::bernstein;

const U_KNOTS: [f64; 8] = [0., 0., 0., 1., 2., 3., 3., 3.];
const V_KNOTS: [f64; 6] = [0., 0., 1., 2., 3., 3.];

/// 5 x 4 grid of points `(i, j)`, rows along `v`
fn grid() -> Vec<Vec<Point2<f64>>> {
    (0..4)
        .map(|j| (0..5).map(|i| Point2::new(i as f64, j as f64)).collect())
        .collect()
}

fn sqrt_weights() -> Vec<Vec<f64>> {
    (0..4)
        .map(|j| (0..5).map(|i| ((i * j) as f64).sqrt()).collect())
        .collect()
}

#[test]
fn bezier_surface_matches_hand_computed_blend() {
    let surface = TensorSurface2D::bezier((2, 1), grid());
    let p = surface.point(0.7, 0.8);

    // only the first 3 columns and 2 rows carry a non-zero Bernstein value
    let mut expected = Point2::origin();
    for j in 0..2 {
        for i in 0..3 {
            let b = bernstein(i, 2, 0.7) * bernstein(j, 1, 0.8);
            expected.coords += Point2::new(i as f64, j as f64).coords * b;
        }
    }
    assert_relative_eq!(p, expected, epsilon = 1e-12);
    assert_relative_eq!(p, Point2::new(1.4, 0.8), epsilon = 1e-12);
}

#[test]
fn bezier_surface_interpolates_corners() {
    let control_points: Vec<Vec<Point3<f64>>> = (0..3)
        .map(|j| {
            (0..4)
                .map(|i| Point3::new(i as f64, j as f64, ((i + j) % 2) as f64))
                .collect()
        })
        .collect();
    let surface = TensorSurface::bezier((3, 2), control_points.clone());
    assert_relative_eq!(surface.point(0., 0.), control_points[0][0]);
    assert_relative_eq!(surface.point(1., 0.), control_points[0][3]);
    assert_relative_eq!(surface.point(0., 1.), control_points[2][0]);
    assert_relative_eq!(surface.point(1., 1.), control_points[2][3]);
}

#[test]
fn bspline_surface_point() {
    let surface = TensorSurface2D::try_bspline(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid()).unwrap();
    assert_eq!(surface.degrees(), (2, 1));
    assert_eq!(surface.u_domain(), (0., 3.));
    assert_eq!(surface.v_domain(), (0., 3.));
    assert_relative_eq!(surface.point(1.9, 1.9), Point2::new(2.4, 1.9), epsilon = 1e-12);
    assert_relative_eq!(surface.point(0.5, 2.5), Point2::new(0.875, 2.5), epsilon = 1e-12);
}

#[test]
fn bspline_surface_vanishes_at_upper_knot() {
    let surface = TensorSurface2D::bspline(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid());
    let basis = surface.basis_grid(3., 1.);
    assert!(basis.iter().flatten().all(|b| *b == 0.));
    assert_eq!(surface.point(3., 1.), Point2::origin());
    assert_eq!(surface.point(1., 3.), Point2::origin());
}

#[test]
fn nurbs_with_equal_weights_reduces_to_bspline() {
    let bspline = TensorSurface2D::bspline(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid());
    let nurbs =
        TensorSurface2D::try_nurbs(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid(), vec![vec![1.; 5]; 4])
            .unwrap();
    assert!(nurbs.is_rational());
    for k in 0..30 {
        let u = k as f64 / 10.;
        let v = 2.95 - k as f64 / 11.;
        assert_relative_eq!(nurbs.point(u, v), bspline.point(u, v), epsilon = 1e-12);
        assert_relative_eq!(nurbs.weight_function(u, v).unwrap(), 1., epsilon = 1e-12);
    }
}

#[test]
fn nurbs_surface_point() {
    // zero weights on the first row and column are fine while W stays positive
    let nurbs = TensorSurface2D::nurbs(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid(), sqrt_weights());
    assert_relative_eq!(
        nurbs.point(1.9, 1.9),
        Point2::new(2.4520057652092015, 1.9271557635940504),
        epsilon = 1e-12
    );
    let sum: f64 = nurbs.basis_grid(1.9, 1.9).iter().flatten().sum();
    assert_relative_eq!(sum, 1., epsilon = 1e-12);
}

#[test]
fn basis_function_matches_basis_grid() {
    let weights: Vec<Vec<f64>> = (0..4)
        .map(|j| (0..5).map(|i| 1. + 0.1 * (i + 2 * j) as f64).collect())
        .collect();
    let nurbs = TensorSurface2D::nurbs(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid(), weights);
    let grid = nurbs.basis_grid(0.4, 2.2);
    for (j, row) in grid.iter().enumerate() {
        for (i, b) in row.iter().enumerate() {
            assert_relative_eq!(*b, nurbs.basis_function(i, j, 0.4, 2.2), epsilon = 1e-15);
        }
    }
}

#[test]
fn try_constructors_reject_inconsistent_input() {
    // 4 columns but the u knot vector spans 5 basis functions
    let narrow: Vec<Vec<Point2<f64>>> = grid().into_iter().map(|row| row[..4].to_vec()).collect();
    assert!(TensorSurface2D::try_bspline(U_KNOTS.to_vec(), V_KNOTS.to_vec(), narrow).is_err());

    let mut ragged = grid();
    ragged[2].pop();
    assert!(TensorSurface2D::try_bezier((2, 1), ragged).is_err());

    assert!(TensorSurface2D::try_bspline(
        vec![0., 0., 1., 2., 3., 3., 3.],
        V_KNOTS.to_vec(),
        grid()
    )
    .is_err());

    assert!(TensorSurface2D::try_nurbs(
        U_KNOTS.to_vec(),
        V_KNOTS.to_vec(),
        grid(),
        vec![vec![1.; 5]; 3]
    )
    .is_err());
    assert!(TensorSurface2D::try_nurbs(
        U_KNOTS.to_vec(),
        V_KNOTS.to_vec(),
        grid(),
        sqrt_weights()
    )
    .is_err());
}

#[test]
fn regular_sample_points_stay_inside_half_open_domain() {
    let surface = TensorSurface2D::bspline(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid());
    let points = surface.regular_sample_points(6, 3);
    assert_eq!(points.len(), 3);
    assert!(points.iter().all(|row| row.len() == 6));
    assert_relative_eq!(points[0][0], Point2::new(0., 0.));
    // v is linear in the rows, sampled at 0, 1, 2
    assert_relative_eq!(points[2][0].y, 2., epsilon = 1e-12);
}

#[test]
fn cast_to_f32() {
    let surface = TensorSurface2D::bspline(U_KNOTS.to_vec(), V_KNOTS.to_vec(), grid());
    let cast = surface.cast::<f32>();
    let p = cast.point(1.9, 1.9);
    assert_relative_eq!(p, Point2::new(2.4f32, 1.9f32), epsilon = 1e-5);
}
