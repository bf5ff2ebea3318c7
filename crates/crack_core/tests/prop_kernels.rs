//! Property-based tests for the Fréchet kernels and the linearized
//! right-hand side.
//!
//! Covers: linearity in the density, zero-density baseline, mode-0 symmetry
//! on a centered circle.

use std::f64::consts::TAU;
use std::sync::Arc;

use crack_core::curve::{Circle, SharedCurve};
use crack_core::discretize::nodes;
use crack_core::inverse::InverseProblemState;
use crack_core::test_data::MeasuredData;
use proptest::prelude::*;

const RADIUS: f64 = 2.0;

fn build_state(curve: SharedCurve, density: Vec<f64>) -> InverseProblemState {
    let n = density.len();
    let data = MeasuredData {
        initial_curve: curve,
        boundary_data: nodes(n).unwrap().map(|t| (3.0 * t).cos()).collect(),
        derivative_on_outer_curve: nodes(n).unwrap().map(|t| 0.5 - t.sin()).collect(),
    };
    let mut state = InverseProblemState::new(RADIUS, n, 3, Arc::new(data)).unwrap();
    state.set_density(density).unwrap();
    state
}

fn centered_circle(radius: f64) -> SharedCurve {
    Arc::new(Circle::centered(radius).unwrap())
}

fn shifted_circle(center: (f64, f64), radius: f64) -> SharedCurve {
    Arc::new(Circle::new(center, radius).unwrap())
}

fn density_strategy() -> impl Strategy<Value = Vec<f64>> {
    (4usize..40).prop_flat_map(|n| prop::collection::vec(-5.0f64..5.0, n))
}

// ── Linearity in density ─────────────────────────────────────────────

proptest! {
    /// Scaling the density by c scales both kernels by c.
    #[test]
    fn kernels_are_linear_in_density(
        density in density_strategy(),
        scale in -3.0f64..3.0,
        t in 0.0f64..TAU,
        k in 0usize..6,
        center_x in -0.4f64..0.4,
        curve_radius in 0.2f64..1.2,
    ) {
        let curve = shifted_circle((center_x, 0.1), curve_radius);
        let scaled: Vec<f64> = density.iter().map(|v| scale * v).collect();
        let original = build_state(curve.clone(), density);
        let scaled = build_state(curve, scaled);

        let x = original.frechet_kernel_by_x(t, k).unwrap();
        let y = original.frechet_kernel_by_y(t, k).unwrap();
        let x_scaled = scaled.frechet_kernel_by_x(t, k).unwrap();
        let y_scaled = scaled.frechet_kernel_by_y(t, k).unwrap();

        prop_assert!((x_scaled - scale * x).abs() <= 1e-9 * (1.0 + x.abs()));
        prop_assert!((y_scaled - scale * y).abs() <= 1e-9 * (1.0 + y.abs()));
    }

    /// The integral part of the right-hand side is linear as well:
    /// rhs(cρ) + ω₁ = c (rhs(ρ) + ω₁).
    #[test]
    fn rhs_integral_term_is_linear_in_density(
        density in density_strategy(),
        scale in -3.0f64..3.0,
        t in 0.0f64..TAU,
    ) {
        let curve = centered_circle(0.9);
        let scaled: Vec<f64> = density.iter().map(|v| scale * v).collect();
        let original = build_state(curve.clone(), density);
        let scaled = build_state(curve, scaled);

        let omega = original.omega1(t);
        let base = original.linearized_rhs(t).unwrap() + omega;
        let value = scaled.linearized_rhs(t).unwrap() + omega;
        prop_assert!((value - scale * base).abs() <= 1e-9 * (1.0 + base.abs()));
    }
}

// ── Zero-density baseline ────────────────────────────────────────────

proptest! {
    #[test]
    fn zero_density_gives_zero_kernels_and_background_rhs(
        n in 4usize..48,
        t in 0.0f64..TAU,
        k in 0usize..8,
        curve_radius in 0.1f64..1.8,
    ) {
        let state = build_state(centered_circle(curve_radius), vec![0.0; n]);
        prop_assert_eq!(state.frechet_kernel_by_x(t, k).unwrap(), 0.0);
        prop_assert_eq!(state.frechet_kernel_by_y(t, k).unwrap(), 0.0);
        prop_assert_eq!(state.linearized_rhs(t).unwrap(), -state.omega1(t));
    }
}

// ── Mode-0 symmetry ──────────────────────────────────────────────────

proptest! {
    /// For a centered circle and a density symmetric under node reversal,
    /// reflecting t → −t reflects the curve across the x-axis: the X kernel
    /// is even in t and the Y kernel is odd.
    #[test]
    fn mode_zero_reflection_symmetry(
        half in prop::collection::vec(0.1f64..3.0, 3..16),
        t in 0.0f64..TAU,
        curve_radius in 0.2f64..1.5,
    ) {
        // ρ_j = ρ_{N−j}: build a palindrome around node 0.
        let n = 2 * half.len();
        let density: Vec<f64> = (0..n)
            .map(|j| half[j.min(n - j) % half.len()])
            .collect();
        for j in 1..n {
            prop_assert_eq!(density[j], density[n - j]);
        }

        let state = build_state(centered_circle(curve_radius), density);
        let mirrored = (TAU - t) % TAU;

        let x_plus = state.frechet_kernel_by_x(t, 0).unwrap();
        let x_minus = state.frechet_kernel_by_x(mirrored, 0).unwrap();
        let y_plus = state.frechet_kernel_by_y(t, 0).unwrap();
        let y_minus = state.frechet_kernel_by_y(mirrored, 0).unwrap();

        prop_assert!((x_plus - x_minus).abs() <= 1e-9 * (1.0 + x_plus.abs()));
        prop_assert!((y_plus + y_minus).abs() <= 1e-9 * (1.0 + y_plus.abs()));
    }
}
