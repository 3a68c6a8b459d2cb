use crate::{knot::KnotSpan, knot::KnotVector, misc::FloatingPoint};

use super::{bernstein, bernstein_values, cox_de_boor, cox_de_boor_values};

/// Univariate basis used along one parametric direction
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Basis<T> {
    /// Bernstein polynomials of an explicit degree over `[0, 1]`
    Bernstein { degree: usize },
    /// B-spline basis over a knot vector, with the degree derived from the knot vector once
    CoxDeBoor { knots: KnotVector<T>, degree: usize },
}

impl<T: FloatingPoint> Basis<T> {
    pub fn bernstein(degree: usize) -> Self {
        Self::Bernstein { degree }
    }

    /// Create a B-spline basis whose degree is the multiplicity of the first knot minus one
    /// The knot vector is assumed to be open and is not validated
    pub fn cox_de_boor(knots: impl Into<KnotVector<T>>) -> Self {
        let knots = knots.into();
        let degree = knots.open_degree();
        Self::CoxDeBoor { knots, degree }
    }

    /// Create a B-spline basis from a validated open knot vector
    /// # Example
    /// ```
    /// use isospline::prelude::Basis;
    /// let basis = Basis::try_cox_de_boor(vec![0., 0., 0., 1., 2., 3., 3., 3.]).unwrap();
    /// assert_eq!(basis.degree(), 2);
    /// assert_eq!(basis.len(), 5);
    /// assert!(Basis::try_cox_de_boor(vec![0., 0., 1., 2., 2., 2.]).is_err());
    /// ```
    pub fn try_cox_de_boor(knots: impl Into<KnotVector<T>>) -> anyhow::Result<Self> {
        let knots = knots.into();
        let degree = knots.try_open_degree()?;
        Ok(Self::CoxDeBoor { knots, degree })
    }

    pub fn degree(&self) -> usize {
        match self {
            Self::Bernstein { degree } => *degree,
            Self::CoxDeBoor { degree, .. } => *degree,
        }
    }

    pub fn knots(&self) -> Option<&KnotVector<T>> {
        match self {
            Self::Bernstein { .. } => None,
            Self::CoxDeBoor { knots, .. } => Some(knots),
        }
    }

    /// Number of basis functions
    pub fn len(&self) -> usize {
        match self {
            Self::Bernstein { degree } => degree + 1,
            Self::CoxDeBoor { knots, degree } => knots.basis_count(*degree),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parametric domain of the basis
    pub fn domain(&self) -> (T, T) {
        match self {
            Self::Bernstein { .. } => (T::zero(), T::one()),
            Self::CoxDeBoor { knots, degree } => knots.domain(*degree),
        }
    }

    /// Elements of the parametric domain
    /// Bernstein polynomials have a single `[0, 1]` span, indexed as in the equivalent open knot vector
    pub fn spans(&self) -> Vec<KnotSpan<T>> {
        match self {
            Self::Bernstein { degree } => vec![KnotSpan::new(*degree, T::zero(), T::one())],
            Self::CoxDeBoor { knots, .. } => knots.spans(),
        }
    }

    /// Evaluate the `i`-th basis function at `t` by plain recursion
    /// Indices beyond [`Basis::len`] evaluate to zero
    pub fn evaluate(&self, i: usize, t: T) -> T {
        match self {
            Self::Bernstein { degree } => bernstein(i, *degree, t),
            Self::CoxDeBoor { knots, degree } => {
                if i < self.len() {
                    cox_de_boor(knots.as_slice(), i, *degree, t)
                } else {
                    T::zero()
                }
            }
        }
    }

    /// Evaluate every basis function at `t`, sharing the recursion between them
    pub fn values(&self, t: T) -> Vec<T> {
        match self {
            Self::Bernstein { degree } => bernstein_values(*degree, t),
            Self::CoxDeBoor { knots, degree } => cox_de_boor_values(knots.as_slice(), *degree, t),
        }
    }

    /// Cast the basis to another floating point type
    pub fn cast<F: FloatingPoint + simba::scalar::SupersetOf<T>>(&self) -> Basis<F> {
        match self {
            Self::Bernstein { degree } => Basis::Bernstein { degree: *degree },
            Self::CoxDeBoor { knots, degree } => Basis::CoxDeBoor {
                knots: knots.cast(),
                degree: *degree,
            },
        }
    }
}
