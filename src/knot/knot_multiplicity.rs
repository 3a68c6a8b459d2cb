/// A distinct knot value together with the number of times it repeats consecutively
#[derive(Clone, Debug, PartialEq)]
pub struct KnotMultiplicity<T> {
    knot: T,
    multiplicity: usize,
}

impl<T> KnotMultiplicity<T> {
    pub fn new(knot: T, multiplicity: usize) -> Self {
        Self { knot, multiplicity }
    }

    pub fn knot(&self) -> &T {
        &self.knot
    }

    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }

    /// Order of parametric continuity across this knot for a spline of the given degree
    /// `-1` means the spline is only joined (C^-1), anything lower means the knot splits it apart
    /// # Example
    /// ```
    /// use isospline::prelude::KnotMultiplicity;
    /// assert_eq!(KnotMultiplicity::new(1., 1).continuity(3), 2);
    /// assert_eq!(KnotMultiplicity::new(1., 3).continuity(3), 0);
    /// assert_eq!(KnotMultiplicity::new(1., 4).continuity(3), -1);
    /// ```
    pub fn continuity(&self, degree: usize) -> isize {
        degree as isize - self.multiplicity as isize
    }
}
