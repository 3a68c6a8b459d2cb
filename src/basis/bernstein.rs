use crate::misc::FloatingPoint;

/// Evaluate the `i`-th Bernstein polynomial of the given degree at `t` in `[0, 1]`
/// by the de Casteljau recurrence `B(i, p) = (1 - t) B(i, p - 1) + t B(i - 1, p - 1)`.
/// Indices outside `0..=degree` evaluate to zero.
///
/// # Example
/// ```
/// use isospline::prelude::bernstein;
/// use approx::assert_relative_eq;
/// assert_relative_eq!(bernstein(1, 2, 0.7), 0.42, epsilon = 1e-12);
/// assert_eq!(bernstein(3, 2, 0.7), 0.);
/// ```
pub fn bernstein<T: FloatingPoint>(i: usize, degree: usize, t: T) -> T {
    if i > degree {
        return T::zero();
    }
    if degree == 0 {
        return T::one();
    }

    let lower = (T::one() - t) * bernstein(i, degree - 1, t);
    let shifted = if i == 0 {
        T::zero()
    } else {
        t * bernstein(i - 1, degree - 1, t)
    };
    lower + shifted
}

/// Evaluate all `degree + 1` Bernstein polynomials at `t` at once.
/// Each `(i, p)` entry of the recurrence is computed exactly once,
/// in the same arithmetic order as [`bernstein`].
pub fn bernstein_values<T: FloatingPoint>(degree: usize, t: T) -> Vec<T> {
    let mut values = vec![T::zero(); degree + 1];
    values[0] = T::one();

    for p in 1..=degree {
        // descending so that values[i - 1] still holds degree p - 1
        for i in (0..=p).rev() {
            let lower = (T::one() - t) * values[i];
            let shifted = if i == 0 {
                T::zero()
            } else {
                t * values[i - 1]
            };
            values[i] = lower + shifted;
        }
    }

    values
}
