use crate::{basis::Basis, misc::FloatingPoint};

/// Bivariate tensor-product basis, one univariate basis per parametric direction
/// `i` indexes the `u` direction (grid columns), `j` the `v` direction (grid rows)
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TensorBasis<T> {
    u: Basis<T>,
    v: Basis<T>,
}

impl<T: FloatingPoint> TensorBasis<T> {
    pub fn new(u: Basis<T>, v: Basis<T>) -> Self {
        Self { u, v }
    }

    pub fn u(&self) -> &Basis<T> {
        &self.u
    }

    pub fn v(&self) -> &Basis<T> {
        &self.v
    }

    /// Degrees `(p, q)` along `u` and `v`
    pub fn degrees(&self) -> (usize, usize) {
        (self.u.degree(), self.v.degree())
    }

    /// `N_u(i, u) * N_v(j, v)` by plain recursion
    pub fn value(&self, i: usize, j: usize, u: T, v: T) -> T {
        self.u.evaluate(i, u) * self.v.evaluate(j, v)
    }

    /// Evaluate the basis for every cell of a `rows x columns` grid
    /// Each univariate basis is evaluated once, cells beyond a direction's basis count are zero
    pub fn grid(&self, u: T, v: T, rows: usize, columns: usize) -> Vec<Vec<T>> {
        let nu = self.u.values(u);
        let nv = self.v.values(v);
        (0..rows)
            .map(|j| {
                let bv = nv.get(j).copied().unwrap_or_else(T::zero);
                (0..columns)
                    .map(|i| nu.get(i).copied().unwrap_or_else(T::zero) * bv)
                    .collect()
            })
            .collect()
    }

    /// Swap the `u` and `v` directions
    pub fn transpose(&self) -> Self {
        Self {
            u: self.v.clone(),
            v: self.u.clone(),
        }
    }

    pub fn cast<F: FloatingPoint + simba::scalar::SupersetOf<T>>(&self) -> TensorBasis<F> {
        TensorBasis::new(self.u.cast(), self.v.cast())
    }
}
