/// Gauss-Legendre quadrature orders used per element in each parametric direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadratureOptions {
    /// number of quadrature points along `u` per element
    order_u: usize,
    /// number of quadrature points along `v` per element
    order_v: usize,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            order_u: 8,
            order_v: 8,
        }
    }
}

impl QuadratureOptions {
    pub fn with_order_u(mut self, order: usize) -> Self {
        self.order_u = order;
        self
    }

    pub fn with_order_v(mut self, order: usize) -> Self {
        self.order_v = order;
        self
    }

    /// Use the same order in both directions
    pub fn with_order(self, order: usize) -> Self {
        self.with_order_u(order).with_order_v(order)
    }

    pub fn order_u(&self) -> usize {
        self.order_u
    }

    pub fn order_v(&self) -> usize {
        self.order_v
    }
}
