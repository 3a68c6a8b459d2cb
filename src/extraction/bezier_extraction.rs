use std::iter::FusedIterator;

use nalgebra::DMatrix;

use crate::{
    knot::{KnotSpan, KnotVector},
    misc::FloatingPoint,
};

use super::ExtractionOperator;

/// Lazy sequence of Bezier extraction operators, one per element from left to right
///
/// Implements the knot insertion scheme of Borden et al. (2011).
/// `a` and `b` are 1-based positions into the knot vector, as in the paper.
#[derive(Clone, Debug)]
pub struct BezierExtraction<'a, T: FloatingPoint> {
    knots: &'a [T],
    degree: usize,
    a: usize,
    b: usize,
    /// operator of the element being built
    current: DMatrix<T>,
    element: usize,
}

/// Extract the Bezier operators of an open knot vector of the given degree
/// The knot vector is not validated, see [`try_extract`]
///
/// # Example
/// ```
/// use isospline::prelude::*;
/// let knots = KnotVector::new(vec![0., 0., 0., 0., 1., 2., 3., 4., 4., 4., 4.]);
/// let operators: Vec<_> = extract(&knots, 3).collect();
/// assert_eq!(operators.len(), 4);
/// ```
pub fn extract<T: FloatingPoint>(knots: &KnotVector<T>, degree: usize) -> BezierExtraction<'_, T> {
    BezierExtraction {
        knots: knots.as_slice(),
        degree,
        a: degree + 1,
        b: degree + 2,
        current: DMatrix::identity(degree + 1, degree + 1),
        element: 0,
    }
}

/// Extract the Bezier operators after validating the knot vector
/// The degree is derived from the multiplicity of the first knot
/// # Failures
/// - if the knot vector is not open and non-decreasing
/// - if an interior knot repeats more than `degree + 1` times
/// - if the derived degree is zero, for which Bezier extraction is undefined
pub fn try_extract<T: FloatingPoint>(
    knots: &KnotVector<T>,
) -> anyhow::Result<BezierExtraction<'_, T>> {
    let degree = knots.try_open_degree()?;
    anyhow::ensure!(degree > 0, "Bezier extraction requires a degree of at least 1");
    Ok(extract(knots, degree))
}

impl<T: FloatingPoint> BezierExtraction<'_, T> {
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of operators produced so far
    pub fn emitted(&self) -> usize {
        self.element
    }

    /// knot value at the 1-based position `k`
    fn knot(&self, k: usize) -> T {
        self.knots[k - 1]
    }
}

impl<T: FloatingPoint> Iterator for BezierExtraction<'_, T> {
    type Item = ExtractionOperator<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.knots.len();
        if self.b >= m {
            return None;
        }

        let p = self.degree;
        let mut next = DMatrix::identity(p + 1, p + 1);

        // multiplicity of the knot at b
        let start = self.b;
        while self.b < m && self.knot(self.b + 1) == self.knot(self.b) {
            self.b += 1;
        }
        let mult = self.b - start + 1;

        if mult < p {
            let a = self.a;
            let numer = self.knot(self.b) - self.knot(a);
            let mut alphas = vec![T::zero(); p - mult];
            for j in ((mult + 1)..=p).rev() {
                let denom = self.knot(a + j) - self.knot(a);
                debug_assert!(denom > T::zero(), "degenerate knot insertion at {}", a + j);
                alphas[j - mult - 1] = numer / denom;
            }

            // insert the knot r times
            let r = p - mult;
            for j in 1..=r {
                let save = r - j + 1;
                let s = mult + j;
                for k in ((s + 1)..=(p + 1)).rev() {
                    let alpha = alphas[k - s - 1];
                    let column = self.current.column(k - 1) * alpha
                        + self.current.column(k - 2) * (T::one() - alpha);
                    self.current.set_column(k - 1, &column);
                }
                if self.b < m {
                    // the overlap with the next element seeds its operator
                    for offset in 0..=j {
                        next[(save - 1 + offset, save - 1)] = self.current[(p - j + offset, p)];
                    }
                }
            }
        }

        if self.b < m {
            self.a = self.b;
            self.b += 1;
        }

        #[cfg(feature = "log")]
        log::debug!(
            "extracted element {} (knot multiplicity {})",
            self.element,
            mult
        );
        self.element += 1;

        let operator = std::mem::replace(&mut self.current, next);
        Some(ExtractionOperator::new(operator))
    }
}

impl<T: FloatingPoint> FusedIterator for BezierExtraction<'_, T> {}

/// An element of the parametric domain together with its extraction operator
#[derive(Clone, Debug, PartialEq)]
pub struct BezierElement<T: FloatingPoint> {
    span: KnotSpan<T>,
    degree: usize,
    operator: ExtractionOperator<T>,
}

impl<T: FloatingPoint> BezierElement<T> {
    pub fn new(span: KnotSpan<T>, degree: usize, operator: ExtractionOperator<T>) -> Self {
        Self {
            span,
            degree,
            operator,
        }
    }

    pub fn span(&self) -> &KnotSpan<T> {
        &self.span
    }

    pub fn operator(&self) -> &ExtractionOperator<T> {
        &self.operator
    }

    /// Indices of the global basis functions (and control points) supported on the element
    pub fn basis_indices(&self) -> std::ops::RangeInclusive<usize> {
        let last = self.span.index();
        last.saturating_sub(self.degree)..=last
    }

    /// B-spline values supported on the element at a global parameter inside its span
    pub fn bspline_basis(&self, t: T) -> Vec<T> {
        self.operator
            .bspline_basis_at(self.span.local_parameter(t))
    }
}

/// Pair every extraction operator with the knot span it belongs to
/// # Example
/// ```
/// use isospline::prelude::*;
/// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 2., 2.]);
/// let elements: Vec<_> = extract_elements(&knots, 2).collect();
/// assert_eq!(elements.len(), 2);
/// assert_eq!(elements[1].basis_indices(), 1..=3);
/// ```
pub fn extract_elements<T: FloatingPoint>(
    knots: &KnotVector<T>,
    degree: usize,
) -> impl Iterator<Item = BezierElement<T>> + '_ {
    knots
        .spans()
        .into_iter()
        .zip(extract(knots, degree))
        .map(move |(span, operator)| BezierElement::new(span, degree, operator))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    use super::*;
    use crate::basis::cox_de_boor;

    fn cubic_knots() -> KnotVector<f64> {
        KnotVector::new(vec![0., 0., 0., 0., 1., 2., 3., 4., 4., 4., 4.])
    }

    #[test]
    fn single_element_yields_identity() {
        for degree in 1..5 {
            let knots: KnotVector<f64> = std::iter::repeat_n(0., degree + 1)
                .chain(std::iter::repeat_n(1., degree + 1))
                .collect();
            assert_eq!(knots.len(), 2 * degree + 2);
            let operators: Vec<_> = extract(&knots, degree).collect();
            assert_eq!(operators.len(), 1);
            assert!(operators[0].is_identity());
        }
    }

    #[test]
    fn cubic_uniform_operators() {
        let knots = cubic_knots();
        let operators: Vec<_> = extract(&knots, 3).collect();
        assert_eq!(operators.len(), 4);
        assert!(!operators[0].is_identity());
        assert!(!operators[3].is_identity());

        let first = DMatrix::from_row_slice(
            4,
            4,
            &[
                1., 0., 0., 0., //
                0., 1., 0.5, 0.25, //
                0., 0., 0.5, 7. / 12., //
                0., 0., 0., 1. / 6.,
            ],
        );
        let second = DMatrix::from_row_slice(
            4,
            4,
            &[
                0.25, 0., 0., 0., //
                7. / 12., 2. / 3., 1. / 3., 1. / 6., //
                1. / 6., 1. / 3., 2. / 3., 2. / 3., //
                0., 0., 0., 1. / 6.,
            ],
        );
        let last = DMatrix::from_row_slice(
            4,
            4,
            &[
                1. / 6., 0., 0., 0., //
                7. / 12., 0.5, 0., 0., //
                0.25, 0.5, 1., 0., //
                0., 0., 0., 1.,
            ],
        );
        assert_relative_eq!(*operators[0].matrix(), first, epsilon = 1e-12);
        assert_relative_eq!(*operators[1].matrix(), second, epsilon = 1e-12);
        assert_relative_eq!(*operators[3].matrix(), last, epsilon = 1e-12);
    }

    #[test]
    fn operator_count_without_repeated_interior_knots() {
        for (degree, interior) in [(1, 3), (2, 4), (3, 1), (4, 5)] {
            let knots = KnotVector::<f64>::uniform(interior + 2, degree);
            let len = knots.len();
            assert_eq!(extract(&knots, degree).count(), len - 2 * degree - 1);
        }
    }

    #[test]
    fn operators_reproduce_cox_de_boor() {
        let knots = KnotVector::new(vec![0., 0., 0., 0., 0.5, 1., 1., 2., 3., 3., 3., 3.]);
        let degree = 3;
        let elements: Vec<_> = extract_elements(&knots, degree).collect();
        assert_eq!(elements.len(), knots.spans().len());
        for element in elements.iter() {
            for k in 0..10 {
                let t = element.span().global_parameter(k as f64 / 10.);
                let local = element.bspline_basis(t);
                for (r, index) in element.basis_indices().enumerate() {
                    assert_relative_eq!(
                        local[r],
                        cox_de_boor(knots.as_slice(), index, degree, t),
                        epsilon = 1e-12
                    );
                }
            }
        }
    }

    #[test]
    fn repeated_interior_knot_still_advances() {
        // multiplicity equal to the degree: already C0, nothing to insert
        let knots = KnotVector::new(vec![0., 0., 0., 1., 1., 2., 3., 3., 3.]);
        let operators: Vec<_> = extract(&knots, 2).collect();
        assert_eq!(operators.len(), 3);
        assert!(operators[0].is_identity());

        let elements: Vec<_> = extract_elements(&knots, 2).collect();
        for element in elements.iter() {
            let t = element.span().global_parameter(0.3);
            let local = element.bspline_basis(t);
            for (r, index) in element.basis_indices().enumerate() {
                assert_relative_eq!(
                    local[r],
                    cox_de_boor(knots.as_slice(), index, 2, t),
                    epsilon = 1e-12
                );
            }
        }
    }

    #[test]
    fn fully_repeated_interior_knot() {
        let knots = KnotVector::new(vec![0., 0., 1., 1., 2., 2.]);
        let operators: Vec<_> = extract(&knots, 1).collect();
        assert_eq!(operators.len(), 2);
        assert!(operators.iter().all(|o| o.is_identity()));
    }

    #[test]
    fn sequence_is_fused() {
        let knots = cubic_knots();
        let mut extraction = extract(&knots, 3);
        assert_eq!(extraction.by_ref().count(), 4);
        assert_eq!(extraction.emitted(), 4);
        assert!(extraction.next().is_none());
        assert!(extraction.next().is_none());
    }

    #[test]
    fn try_extract_validates_knots() {
        assert!(try_extract(&cubic_knots()).is_ok());
        assert_eq!(try_extract(&cubic_knots()).unwrap().degree(), 3);
        assert!(try_extract(&KnotVector::new(vec![0., 0., 0., 1., 2., 2.])).is_err());
        assert!(try_extract(&KnotVector::new(vec![0., 1., 2.])).is_err());
    }
}
