use std::ops::Index;

use itertools::Itertools;
use nalgebra::convert;
use simba::scalar::SupersetOf;

use crate::misc::FloatingPoint;

use super::{KnotMultiplicity, KnotSpan};

/// Knot vector representation
/// Knots are expected to be non-decreasing, which is not checked by the unchecked constructors
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnotVector<T>(Vec<T>);

impl<T: FloatingPoint> KnotVector<T> {
    pub fn new(knots: Vec<T>) -> Self {
        Self(knots)
    }

    /// Create a knot vector after checking that it is non-decreasing
    /// # Example
    /// ```
    /// use isospline::prelude::KnotVector;
    /// assert!(KnotVector::try_new(vec![0., 0., 1., 1.]).is_ok());
    /// assert!(KnotVector::try_new(vec![0., 1., 0.5, 1.]).is_err());
    /// ```
    pub fn try_new(knots: Vec<T>) -> anyhow::Result<Self> {
        anyhow::ensure!(!knots.is_empty(), "Knot vector must not be empty");
        let knots = Self(knots);
        anyhow::ensure!(
            knots.is_non_decreasing(),
            "Knot vector must be non-decreasing"
        );
        Ok(knots)
    }

    /// Create an open uniform knot vector
    /// an open uniform knot vector has a degree + 1 multiplicity at the start and end
    /// # Example
    /// ```
    /// use isospline::prelude::KnotVector;
    /// let knots: KnotVector<f64> = KnotVector::uniform(3, 2);
    /// assert_eq!(knots.to_vec(), vec![0., 0., 0., 1., 2., 2., 2.]);
    /// ```
    pub fn uniform(n: usize, degree: usize) -> Self {
        let mut knots = vec![];
        knots.extend(std::iter::repeat_n(T::zero(), degree));
        knots.extend((0..n).map(T::from_index));
        knots.extend(std::iter::repeat_n(
            T::from_index(n.saturating_sub(1)),
            degree,
        ));
        Self(knots)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.0.clone()
    }

    pub fn first(&self) -> T {
        self.0[0]
    }

    pub fn last(&self) -> T {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Get the domain of the knot vector by degree
    pub fn domain(&self, degree: usize) -> (T, T) {
        (self.0[degree], self.0[self.0.len() - 1 - degree])
    }

    /// Number of basis functions of the given degree spanned by the knot vector
    pub fn basis_count(&self, degree: usize) -> usize {
        self.len().saturating_sub(degree + 1)
    }

    /// Degree of an open knot vector, derived from the multiplicity of the first knot value
    /// The result is meaningless if the knot vector is not open
    /// # Panics
    /// Panics if the knot vector is empty
    /// # Example
    /// ```
    /// use isospline::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// assert_eq!(knots.open_degree(), 2);
    /// ```
    pub fn open_degree(&self) -> usize {
        let first = self.first();
        self.iter().filter(|knot| **knot == first).count() - 1
    }

    /// Degree of an open knot vector, checking that the vector is actually open
    /// i.e. non-decreasing with the same multiplicity at both ends
    pub fn try_open_degree(&self) -> anyhow::Result<usize> {
        anyhow::ensure!(!self.is_empty(), "Knot vector must not be empty");
        anyhow::ensure!(
            self.is_non_decreasing(),
            "Knot vector must be non-decreasing"
        );
        let multiplicity = self.multiplicity();
        let (Some(start), Some(end)) = (multiplicity.first(), multiplicity.last()) else {
            anyhow::bail!("Knot vector must not be empty");
        };
        anyhow::ensure!(
            multiplicity.len() > 1,
            "Knot vector must span a non-empty domain"
        );
        anyhow::ensure!(
            start.multiplicity() == end.multiplicity(),
            "Knot vector is not open, first knot repeats {} times but last knot repeats {} times",
            start.multiplicity(),
            end.multiplicity()
        );
        let degree = self.open_degree();
        if let Some(m) = multiplicity[1..multiplicity.len() - 1]
            .iter()
            .find(|m| m.continuity(degree) < -1)
        {
            anyhow::bail!(
                "Interior knot repeats {} times, more than degree + 1 = {}",
                m.multiplicity(),
                degree + 1
            );
        }
        Ok(degree)
    }

    pub fn is_non_decreasing(&self) -> bool {
        self.iter().tuple_windows().all(|(a, b)| a <= b)
    }

    /// Get the multiplicity of each knot
    /// Knots are considered equal only if they compare exactly equal
    /// # Example
    /// ```
    /// use isospline::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 2., 3., 3., 3.]);
    /// let knot_multiplicity = knots.multiplicity();
    /// assert_eq!(knot_multiplicity[0].multiplicity(), 3);
    /// assert_eq!(knot_multiplicity[1].multiplicity(), 1);
    /// assert_eq!(knot_multiplicity[2].multiplicity(), 1);
    /// assert_eq!(knot_multiplicity[3].multiplicity(), 3);
    /// ```
    pub fn multiplicity(&self) -> Vec<KnotMultiplicity<T>> {
        self.iter()
            .chunk_by(|knot| **knot)
            .into_iter()
            .map(|(knot, run)| KnotMultiplicity::new(knot, run.count()))
            .collect()
    }

    /// Check if the knot vector is clamped
    /// `clamped` means the first and last knots have a multiplicity greater than the degree
    /// e.g. [0, 0, 0, 1, 2, 3, 3, 3] with degree 2 is clamped
    pub fn is_clamped(&self, degree: usize) -> bool {
        let multiplicity = self.multiplicity();
        match (multiplicity.first(), multiplicity.last()) {
            (Some(start), Some(end)) => {
                start.multiplicity() > degree && end.multiplicity() > degree
            }
            _ => false,
        }
    }

    /// Collect the non-degenerate knot spans (elements) from left to right
    /// # Example
    /// ```
    /// use isospline::prelude::KnotVector;
    /// let knots = KnotVector::new(vec![0., 0., 0., 1., 1., 2., 2., 2.]);
    /// let spans = knots.spans();
    /// assert_eq!(spans.len(), 2);
    /// assert_eq!(spans[0].index(), 2);
    /// assert_eq!(spans[1].index(), 4);
    /// ```
    pub fn spans(&self) -> Vec<KnotSpan<T>> {
        self.iter()
            .tuple_windows()
            .enumerate()
            .filter(|(_, (start, end))| start < end)
            .map(|(index, (start, end))| KnotSpan::new(index, *start, *end))
            .collect()
    }

    /// Find the span containing the parameter under the half-open convention
    /// Returns `None` outside `[first, last)`
    pub fn find_span(&self, t: T) -> Option<KnotSpan<T>> {
        self.spans().into_iter().find(|span| span.contains(t))
    }

    /// Cast the knot vector to another floating point type
    /// # Example
    /// ```
    /// use isospline::prelude::*;
    /// let knots: KnotVector<f64> = KnotVector::new(vec![1., 2., 3., 4., 5., 6.]);
    /// let knots2 = knots.cast::<f32>();
    /// assert_eq!(knots2.first(), 1.0);
    /// ```
    pub fn cast<F: FloatingPoint + SupersetOf<T>>(&self) -> KnotVector<F> {
        KnotVector::new(self.0.iter().map(|v| convert(*v)).collect())
    }
}

impl<T> Index<usize> for KnotVector<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<T> FromIterator<T> for KnotVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> From<Vec<T>> for KnotVector<T> {
    fn from(knots: Vec<T>) -> Self {
        Self(knots)
    }
}

impl<T> AsRef<[T]> for KnotVector<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}
