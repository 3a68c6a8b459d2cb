use approx::assert_relative_eq;
use isospline::prelude::*;
use nalgebra::Point2;

const CUBIC_KNOTS: [f64; 11] = [0., 0., 0., 0., 1., 2., 3., 4., 4., 4., 4.];

#[test]
fn cubic_uniform_knots_yield_four_operators() {
    let knots = KnotVector::new(CUBIC_KNOTS.to_vec());
    let extraction = try_extract(&knots).unwrap();
    assert_eq!(extraction.degree(), 3);

    let operators: Vec<_> = extraction.collect();
    assert_eq!(operators.len(), 4);
    assert_eq!(operators.len(), knots.len() - 2 * 3 - 1);
    assert!(!operators.first().unwrap().is_identity());
    assert!(!operators.last().unwrap().is_identity());
    assert!(operators.iter().all(|o| o.degree() == 3));
}

#[test]
fn elements_reproduce_global_basis() {
    let knots = KnotVector::new(CUBIC_KNOTS.to_vec());
    let basis = Basis::try_cox_de_boor(knots.clone()).unwrap();
    for element in extract_elements(&knots, 3) {
        for k in 0..8 {
            let t = element.span().global_parameter(k as f64 / 8.);
            let global = basis.values(t);
            let local = element.bspline_basis(t);
            for (r, index) in element.basis_indices().enumerate() {
                assert_relative_eq!(local[r], global[index], epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn decomposed_curve_matches_bspline_curve() {
    let control_points: Vec<Point2<f64>> = (0..7)
        .map(|i| Point2::new(i as f64, ((i * 3) % 5) as f64))
        .collect();
    let curve = SplineCurve2D::try_bspline(CUBIC_KNOTS.to_vec(), control_points).unwrap();
    let segments = curve.try_decompose().unwrap();
    assert_eq!(segments.len(), 4);
    for (index, segment) in segments.iter().enumerate() {
        let t = index as f64 + 0.375;
        assert_relative_eq!(segment.point(0.375), curve.point(t), epsilon = 1e-10);
    }
}
