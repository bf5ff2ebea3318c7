//! Periodic trapezoidal rule over the uniform node grid.

use crate::discretize::{discrete_step, Nodes};
use crate::error::{check_len, CrackResult};
use crate::traits::Evaluate;

/// `H · Σ_j weights[j] · kernel(s_j)` over `points_number` nodes.
///
/// For periodic integrands the trapezoidal rule has equal weights, so the
/// step `H` is the only scaling applied.
pub fn trapezoid<K>(points_number: usize, weights: &[f64], kernel: &K) -> CrackResult<f64>
where
    K: Evaluate<f64> + ?Sized,
{
    let step = discrete_step(points_number)?;
    check_len("quadrature weights", points_number, weights.len())?;
    Ok(trapezoid_with_step(step, weights, kernel))
}

/// Unchecked form of [`trapezoid`] for callers that already hold a validated
/// step and one weight per node.
pub fn trapezoid_with_step<K>(step: f64, weights: &[f64], kernel: &K) -> f64
where
    K: Evaluate<f64> + ?Sized,
{
    let sum: f64 = Nodes::new(step, weights.len())
        .zip(weights)
        .map(|(s, w)| w * kernel.evaluate(s))
        .sum();
    step * sum
}
