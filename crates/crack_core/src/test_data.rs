//! Providers of direct-problem inputs and measured outer-boundary data.

use std::fmt::Debug;

use anyhow::{bail, Context, Result};
use log::debug;

use crate::curve::SharedCurve;
use crate::kernel::Kernel;
use crate::problem::{DirectProblemData, ProblemState};
use crate::quadrature::trapezoid_with_step;
use crate::traits::Curve;

/// Source of the inputs an inverse problem is built from.
pub trait InverseProblemTestData: Debug {
    /// Inner curve to start from and Dirichlet data on the outer circle.
    fn direct_problem_data(&self) -> DirectProblemData;

    /// Measured normal derivative at the outer nodes.
    fn derivative_on_outer_curve(&self) -> Vec<f64>;
}

/// Data measured elsewhere, paired with a starting guess for the crack.
#[derive(Debug, Clone)]
pub struct MeasuredData {
    pub initial_curve: SharedCurve,
    pub boundary_data: Vec<f64>,
    pub derivative_on_outer_curve: Vec<f64>,
}

impl InverseProblemTestData for MeasuredData {
    fn direct_problem_data(&self) -> DirectProblemData {
        DirectProblemData {
            inner_curve: self.initial_curve.clone(),
            boundary_data: self.boundary_data.clone(),
        }
    }

    fn derivative_on_outer_curve(&self) -> Vec<f64> {
        self.derivative_on_outer_curve.clone()
    }
}

/// Data produced by the forward map of a known crack and density, so the
/// data equation holds exactly at the outer nodes for that pair.
#[derive(Debug, Clone)]
pub struct SyntheticTestData {
    reference_curve: SharedCurve,
    reference_density: Vec<f64>,
    initial_curve: SharedCurve,
    boundary_data: Vec<f64>,
    derivative: Vec<f64>,
}

impl SyntheticTestData {
    /// Evaluates `g(t_i) = ∂ω/∂ν(t_i) − ½ ∫ K(y(t_i), x(s)) ρ(s) ds` at every
    /// outer node `t_i`, with `ω` the harmonic extension of `boundary_data`.
    pub fn generate(
        radius: f64,
        reference_curve: SharedCurve,
        reference_density: Vec<f64>,
        boundary_data: Vec<f64>,
    ) -> Result<Self> {
        let points_number = boundary_data.len();
        if reference_density.len() != points_number {
            bail!(
                "Reference density has {} values, boundary data has {}.",
                reference_density.len(),
                points_number
            );
        }

        let reference = ProblemState::new(
            radius,
            points_number,
            DirectProblemData {
                inner_curve: reference_curve.clone(),
                boundary_data: boundary_data.clone(),
            },
        )
        .context("Failed to build the reference direct problem.")?;

        let kernel = Kernel::new(|point: &(f64, f64), s: f64| {
            reference.data_equation_operator_core(point, s)
        });
        let derivative: Vec<f64> = reference
            .nodes()
            .map(|t| {
                let bound = kernel.bind(reference.outer_curve().point(t));
                let integral = trapezoid_with_step(reference.step(), &reference_density, &bound);
                reference.harmonic_background_derivative(t) - integral / 2.0
            })
            .collect();

        if let Some(idx) = derivative.iter().position(|v| !v.is_finite()) {
            bail!("Synthetic derivative is not finite at outer node {idx}; the reference curve must lie inside the disk.");
        }
        debug!("synthetic data: {points_number} outer nodes, radius={radius}");

        Ok(Self {
            initial_curve: reference_curve.clone(),
            reference_curve,
            reference_density,
            boundary_data,
            derivative,
        })
    }

    /// Starts the inverse problem from `curve` instead of the reference one.
    pub fn with_initial_curve(mut self, curve: SharedCurve) -> Self {
        self.initial_curve = curve;
        self
    }

    pub fn reference_curve(&self) -> &SharedCurve {
        &self.reference_curve
    }

    pub fn reference_density(&self) -> &[f64] {
        &self.reference_density
    }
}

impl InverseProblemTestData for SyntheticTestData {
    fn direct_problem_data(&self) -> DirectProblemData {
        DirectProblemData {
            inner_curve: self.initial_curve.clone(),
            boundary_data: self.boundary_data.clone(),
        }
    }

    fn derivative_on_outer_curve(&self) -> Vec<f64> {
        self.derivative.clone()
    }
}
