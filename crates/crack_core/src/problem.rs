//! Geometry and boundary data of the direct problem in a disk.

use std::f64::consts::PI;
use std::sync::Arc;

use log::debug;

use crate::curve::{Circle, SharedCurve};
use crate::discretize::{discrete_step, Nodes};
use crate::error::{check_len, CrackError, CrackResult};
use crate::fourier::TrigInterpolant;

/// Inner curve and Dirichlet data on the outer circle, sampled at the nodes.
#[derive(Debug, Clone)]
pub struct DirectProblemData {
    pub inner_curve: SharedCurve,
    pub boundary_data: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ProblemState {
    radius: f64,
    points_number: usize,
    step: f64,
    inner_curve: SharedCurve,
    outer_curve: Circle,
    boundary_data: Arc<[f64]>,
    background_derivative: Arc<TrigInterpolant>,
}

impl ProblemState {
    pub fn new(radius: f64, points_number: usize, data: DirectProblemData) -> CrackResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(CrackError::InvalidParameter(format!(
                "radius must be positive and finite, got {radius}"
            )));
        }
        let step = discrete_step(points_number)?;
        check_len("boundary data", points_number, data.boundary_data.len())?;

        let outer_curve = Circle::centered(radius)?;
        let background_derivative =
            TrigInterpolant::from_samples(&data.boundary_data).dirichlet_to_neumann(radius);
        debug!("problem state: radius={radius}, points_number={points_number}");

        Ok(Self {
            radius,
            points_number,
            step,
            inner_curve: data.inner_curve,
            outer_curve,
            boundary_data: data.boundary_data.into(),
            background_derivative: Arc::new(background_derivative),
        })
    }

    /// Same disk and boundary data around a different inner curve.
    pub fn with_inner_curve(&self, inner_curve: SharedCurve) -> Self {
        Self {
            inner_curve,
            ..self.clone()
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn points_number(&self) -> usize {
        self.points_number
    }

    /// Uniform step `H` shared by kernels and quadrature.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn nodes(&self) -> Nodes {
        Nodes::new(self.step, self.points_number)
    }

    pub fn inner_curve(&self) -> &SharedCurve {
        &self.inner_curve
    }

    pub fn outer_curve(&self) -> &Circle {
        &self.outer_curve
    }

    pub fn boundary_data(&self) -> &[f64] {
        &self.boundary_data
    }

    /// Normal derivative at outer angle `t` of the harmonic function in the
    /// disk whose trace is the boundary data.
    pub fn harmonic_background_derivative(&self, t: f64) -> f64 {
        self.background_derivative.value(t)
    }

    /// Kernel of the data equation between a fixed point and the inner curve
    /// point `x(s)`: `(R² − |x|²) / (π R |x − point|²)`, twice the Poisson
    /// kernel of the disk when `point` lies on the outer circle.
    pub fn data_equation_operator_core(&self, point: &(f64, f64), s: f64) -> f64 {
        let (x, y) = self.inner_curve.point(s);
        let dx = x - point.0;
        let dy = y - point.1;
        let r2 = self.radius * self.radius;
        (r2 - x * x - y * y) / (PI * self.radius * (dx * dx + dy * dy))
    }

    /// Smallest gap `R − |x(s_j)|` over the nodes; non-positive when the
    /// inner curve reaches the outer circle.
    pub fn inner_curve_clearance(&self) -> f64 {
        self.nodes()
            .map(|s| {
                let (x, y) = self.inner_curve.point(s);
                self.radius - x.hypot(y)
            })
            .fold(f64::INFINITY, f64::min)
    }
}
