//! Discretized Fréchet-derivative kernels of the data equation.
//!
//! For an outer angle `t` and a mode `k`, the kernel sums over the inner-curve
//! nodes the derivative of the data-equation kernel with respect to one
//! coordinate of the curve point, weighted by the density and by `cos(k s_j)`.
//! The returned value is the raw node sum: it is NOT multiplied by the step
//! `H`. The trapezoidal rule used for the right-hand side does include `H`,
//! so callers that mix both in one system scale kernel values by `H`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::traits::Curve;

/// Coordinate along which the inner curve is perturbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrechetDirection {
    X,
    Y,
}

/// Everything one kernel evaluation reads. Nothing here is mutated while a
/// sum is being accumulated.
#[derive(Debug, Clone, Copy)]
pub struct FrechetInputs<'a> {
    pub inner_curve: &'a dyn Curve,
    pub radius: f64,
    pub step: f64,
    pub density: &'a [f64],
}

pub fn frechet_kernel_sum(
    inputs: &FrechetInputs<'_>,
    direction: FrechetDirection,
    t: f64,
    k: usize,
) -> f64 {
    let radius = inputs.radius;
    let (cos_t, sin_t) = (t.cos(), t.sin());
    let mode = k as f64;

    let mut sum = 0.0;
    let mut sj = 0.0;
    for &density in inputs.density {
        let x = inputs.inner_curve.x(sj);
        let y = inputs.inner_curve.y(sj);

        let denominator = x * x + y * y + radius * radius
            - 2.0 * x * radius * cos_t
            - 2.0 * y * radius * sin_t;
        let (coordinate, projection) = match direction {
            FrechetDirection::X => (x, cos_t),
            FrechetDirection::Y => (y, sin_t),
        };
        let first_term = -(x * x + y * y - radius * radius)
            * (2.0 * coordinate - 2.0 * radius * projection)
            / (2.0 * PI * radius * denominator * denominator);
        let second_term = coordinate / (PI * radius * denominator);

        sum += (first_term + second_term) * density * (mode * sj).cos();
        sj += inputs.step;
    }
    sum
}
