use crate::misc::FloatingPoint;

/// A non-degenerate knot span, i.e. one element of the parametric domain
/// `index` is the position `k` in the knot vector with `knots[k] < knots[k + 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnotSpan<T> {
    index: usize,
    start: T,
    end: T,
}

impl<T: FloatingPoint> KnotSpan<T> {
    pub fn new(index: usize, start: T, end: T) -> Self {
        Self { index, start, end }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn end(&self) -> T {
        self.end
    }

    pub fn length(&self) -> T {
        self.end - self.start
    }

    /// Check if the half-open span `[start, end)` contains the parameter
    pub fn contains(&self, t: T) -> bool {
        self.start <= t && t < self.end
    }

    /// Map a global parameter into the local `[0, 1]` parameter of the span
    pub fn local_parameter(&self, t: T) -> T {
        (t - self.start) / self.length()
    }

    /// Map a local `[0, 1]` parameter back onto the span
    pub fn global_parameter(&self, s: T) -> T {
        self.start + s * self.length()
    }
}
