pub mod quadrature_options;
pub mod surface_integral;

pub use quadrature_options::*;

use gauss_quad::GaussLegendre;

use crate::{knot::KnotSpan, misc::FloatingPoint};

/// Integrate `f(u, v)` over the grid of elements spanned by `u_spans` x `v_spans`
/// Each element pair is integrated with a tensor Gauss-Legendre rule,
/// so polynomials of degree `2n - 1` per direction are integrated exactly.
///
/// # Failures
/// - if a quadrature order is less than 2
/// - if the integrand or a span bound cannot be represented as `f64`, or the result is not finite
///
/// # Example
/// ```
/// use isospline::prelude::*;
/// let knots = KnotVector::new(vec![0., 0., 1., 2., 2.]);
/// let spans = knots.spans();
/// let area = integrate_over_spans(&spans, &spans, |_, _| 1., &QuadratureOptions::default()).unwrap();
/// approx::assert_relative_eq!(area, 4., epsilon = 1e-12);
/// ```
pub fn integrate_over_spans<T, F>(
    u_spans: &[KnotSpan<T>],
    v_spans: &[KnotSpan<T>],
    f: F,
    options: &QuadratureOptions,
) -> anyhow::Result<T>
where
    T: FloatingPoint,
    F: Fn(T, T) -> T,
{
    anyhow::ensure!(
        options.order_u() >= 2 && options.order_v() >= 2,
        "Quadrature orders must be at least 2, got ({}, {})",
        options.order_u(),
        options.order_v()
    );

    let gauss_u = GaussLegendre::init(options.order_u());
    let gauss_v = GaussLegendre::init(options.order_v());
    let integrand = |u: f64, v: f64| -> f64 {
        let value = f(nalgebra::convert(u), nalgebra::convert(v));
        value.to_f64().unwrap_or(f64::NAN)
    };

    let mut sum = 0.;
    for v_span in v_spans.iter() {
        let (v0, v1) = span_bounds(v_span)?;
        for u_span in u_spans.iter() {
            let (u0, u1) = span_bounds(u_span)?;
            sum += gauss_v.integrate(v0, v1, |v| {
                gauss_u.integrate(u0, u1, |u| integrand(u, v))
            });
        }
    }

    #[cfg(feature = "log")]
    log::debug!(
        "integrated over {}x{} elements with orders ({}, {})",
        u_spans.len(),
        v_spans.len(),
        options.order_u(),
        options.order_v()
    );

    anyhow::ensure!(sum.is_finite(), "Integral is not finite");
    Ok(nalgebra::convert(sum))
}

fn span_bounds<T: FloatingPoint>(span: &KnotSpan<T>) -> anyhow::Result<(f64, f64)> {
    let start = span.start().to_f64();
    let end = span.end().to_f64();
    start
        .zip(end)
        .ok_or_else(|| anyhow::anyhow!("Knot span {} is not representable as f64", span.index()))
}
