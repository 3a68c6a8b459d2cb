use crate::misc::{FloatingPoint, WeightGrid};

use super::TensorBasis;

/// Rational (NURBS) decorator over a plain tensor-product basis
/// `R(i, j) = N(i, j) w(i, j) / W`, with `W = sum N(i, j) w(i, j)` over the whole weight grid
#[derive(Clone, Copy, Debug)]
pub struct RationalBasis<'a, T> {
    plain: &'a TensorBasis<T>,
    weights: &'a WeightGrid<T>,
}

impl<'a, T: FloatingPoint> RationalBasis<'a, T> {
    pub fn new(plain: &'a TensorBasis<T>, weights: &'a WeightGrid<T>) -> Self {
        Self { plain, weights }
    }

    pub fn plain(&self) -> &'a TensorBasis<T> {
        self.plain
    }

    fn rows(&self) -> usize {
        self.weights.len()
    }

    fn columns(&self) -> usize {
        self.weights.first().map(|row| row.len()).unwrap_or(0)
    }

    /// Weight function `W(u, v)`
    pub fn weight_function(&self, u: T, v: T) -> T {
        let plain = self.plain.grid(u, v, self.rows(), self.columns());
        weighted_sum(&plain, self.weights)
    }

    /// Single rational basis value by plain recursion
    pub fn value(&self, i: usize, j: usize, u: T, v: T) -> T {
        self.plain.value(i, j, u, v) * self.weights[j][i] / self.weight_function(u, v)
    }

    /// Rational basis for every cell of the weight grid, `W` is evaluated once
    pub fn grid(&self, u: T, v: T) -> Vec<Vec<T>> {
        let plain = self.plain.grid(u, v, self.rows(), self.columns());
        let w = weighted_sum(&plain, self.weights);
        #[cfg(feature = "log")]
        if w <= T::zero() {
            log::warn!("non-positive weight function at ({:?}, {:?})", u, v);
        }

        plain
            .iter()
            .zip(self.weights.iter())
            .map(|(row, weights)| {
                row.iter()
                    .zip(weights.iter())
                    .map(|(n, weight)| *n * *weight / w)
                    .collect()
            })
            .collect()
    }
}

fn weighted_sum<T: FloatingPoint>(plain: &[Vec<T>], weights: &WeightGrid<T>) -> T {
    let mut result = T::zero();
    for (row, weights) in plain.iter().zip(weights.iter()) {
        for (n, weight) in row.iter().zip(weights.iter()) {
            result += *n * *weight;
        }
    }
    result
}
