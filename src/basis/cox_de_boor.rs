use crate::misc::FloatingPoint;

/// `numerator / denominator`, or zero when the denominator is exactly zero.
/// Repeated knots make the Cox-de Boor coefficients `0 / 0`, which are defined as zero.
fn ratio_or_zero<T: FloatingPoint>(numerator: T, denominator: T) -> T {
    if denominator == T::zero() {
        T::zero()
    } else {
        numerator / denominator
    }
}

/// Evaluate the `i`-th B-spline basis function of the given degree at `t`
/// by the Cox-de Boor recursion.
///
/// The degree zero functions use the half-open interval `knots[i] <= t < knots[i + 1]`,
/// so every basis function is zero at the last knot value.
///
/// # Panics
/// Panics if `i + degree + 1` is out of the knot vector, valid indices are `0..knots.len() - degree - 1`
///
/// # Example
/// ```
/// use isospline::prelude::cox_de_boor;
/// let knots = [0., 0., 0., 1., 2., 3., 3., 3.];
/// assert_eq!(cox_de_boor(&knots, 0, 2, 0.), 1.);
/// assert_eq!(cox_de_boor(&knots, 4, 2, 3.), 0.);
/// ```
pub fn cox_de_boor<T: FloatingPoint>(knots: &[T], i: usize, degree: usize, t: T) -> T {
    if degree == 0 {
        return if knots[i] <= t && t < knots[i + 1] {
            T::one()
        } else {
            T::zero()
        };
    }

    let a = ratio_or_zero(t - knots[i], knots[i + degree] - knots[i]);
    let b = ratio_or_zero(
        knots[i + degree + 1] - t,
        knots[i + degree + 1] - knots[i + 1],
    );

    a * cox_de_boor(knots, i, degree - 1, t) + b * cox_de_boor(knots, i + 1, degree - 1, t)
}

/// Evaluate all `knots.len() - degree - 1` basis functions at `t` at once.
/// The triangular table keeps one row per degree, so each `(i, p)` entry of the recursion
/// is computed exactly once, in the same arithmetic order as [`cox_de_boor`].
pub fn cox_de_boor_values<T: FloatingPoint>(knots: &[T], degree: usize, t: T) -> Vec<T> {
    let spans = knots.len().saturating_sub(1);
    let mut values: Vec<T> = (0..spans)
        .map(|i| {
            if knots[i] <= t && t < knots[i + 1] {
                T::one()
            } else {
                T::zero()
            }
        })
        .collect();

    for p in 1..=degree {
        // ascending so that values[i + 1] still holds degree p - 1
        for i in 0..spans.saturating_sub(p) {
            let a = ratio_or_zero(t - knots[i], knots[i + p] - knots[i]);
            let b = ratio_or_zero(knots[i + p + 1] - t, knots[i + p + 1] - knots[i + 1]);
            values[i] = a * values[i] + b * values[i + 1];
        }
    }

    values.truncate(spans.saturating_sub(degree));
    values
}
