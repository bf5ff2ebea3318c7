//! Per-iteration state of the inverse crack problem.
//!
//! The state owns the geometry, the measured data and the current density.
//! Kernel evaluations go through an [`IterationSnapshot`], which pins one
//! density for its whole lifetime: `set_density` needs `&mut self`, so it
//! cannot overlap with a live snapshot, and snapshots taken before a
//! replacement keep the values they were created with.

use std::sync::Arc;

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::config::CrackProblemConfig;
use crate::curve::{Circle, SharedCurve};
use crate::discretize::Nodes;
use crate::error::{check_len, ensure_finite, CrackError, CrackResult};
use crate::fourier::TrigInterpolant;
use crate::frechet::{frechet_kernel_sum, FrechetDirection, FrechetInputs};
use crate::kernel::Kernel;
use crate::problem::ProblemState;
use crate::quadrature::trapezoid_with_step;
use crate::test_data::InverseProblemTestData;
use crate::traits::Curve;

pub type SharedTestData = Arc<dyn InverseProblemTestData + Send + Sync>;

#[derive(Debug, Clone)]
pub struct InverseProblemState {
    base: ProblemState,
    correction_polynomial_degree: usize,
    derivative_on_outer_curve: Arc<[f64]>,
    measured_derivative: Arc<TrigInterpolant>,
    density: Option<Arc<[f64]>>,
    test_data: SharedTestData,
}

impl InverseProblemState {
    pub fn new(
        radius: f64,
        points_number: usize,
        correction_polynomial_degree: usize,
        test_data: SharedTestData,
    ) -> CrackResult<Self> {
        let base = ProblemState::new(radius, points_number, test_data.direct_problem_data())?;
        let derivative = test_data.derivative_on_outer_curve();
        check_len("derivative on outer curve", points_number, derivative.len())?;

        let measured_derivative = TrigInterpolant::from_samples(&derivative);
        debug!(
            "inverse state: radius={radius}, points_number={points_number}, degree={correction_polynomial_degree}"
        );

        Ok(Self {
            base,
            correction_polynomial_degree,
            derivative_on_outer_curve: derivative.into(),
            measured_derivative: Arc::new(measured_derivative),
            density: None,
            test_data,
        })
    }

    pub fn from_config(config: &CrackProblemConfig, test_data: SharedTestData) -> CrackResult<Self> {
        config.validate()?;
        Self::new(
            config.radius,
            config.points_number,
            config.correction_polynomial_degree,
            test_data,
        )
    }

    pub fn problem(&self) -> &ProblemState {
        &self.base
    }

    pub fn radius(&self) -> f64 {
        self.base.radius()
    }

    pub fn points_number(&self) -> usize {
        self.base.points_number()
    }

    pub fn step(&self) -> f64 {
        self.base.step()
    }

    pub fn inner_curve(&self) -> &SharedCurve {
        self.base.inner_curve()
    }

    pub fn outer_curve(&self) -> &Circle {
        self.base.outer_curve()
    }

    pub fn correction_polynomial_degree(&self) -> usize {
        self.correction_polynomial_degree
    }

    pub fn derivative_on_outer_curve(&self) -> &[f64] {
        &self.derivative_on_outer_curve
    }

    pub fn test_data(&self) -> &SharedTestData {
        &self.test_data
    }

    /// Swaps in the corrected curve for the next iteration. The density is
    /// kept; the solver normally replaces it next.
    pub fn replace_inner_curve(&mut self, curve: SharedCurve) {
        self.base = self.base.with_inner_curve(curve);
    }

    pub fn set_density(&mut self, density: Vec<f64>) -> CrackResult<()> {
        check_len("density", self.points_number(), density.len())?;
        debug!("density assigned ({} values)", density.len());
        self.density = Some(density.into());
        Ok(())
    }

    pub fn clear_density(&mut self) {
        self.density = None;
    }

    pub fn density(&self) -> Option<&[f64]> {
        self.density.as_deref()
    }

    /// Background term `ω₁(t)`: interpolated measured derivative minus the
    /// normal derivative of the harmonic extension of the boundary data.
    pub fn omega1(&self, t: f64) -> f64 {
        self.measured_derivative.value(t) - self.base.harmonic_background_derivative(t)
    }

    pub fn snapshot(&self) -> CrackResult<IterationSnapshot<'_>> {
        let density = self.density.clone().ok_or(CrackError::UnboundDensity)?;
        Ok(IterationSnapshot {
            state: self,
            density,
        })
    }

    pub fn frechet_kernel_by_x(&self, t: f64, k: usize) -> CrackResult<f64> {
        Ok(self.snapshot()?.frechet_kernel_by_x(t, k))
    }

    pub fn frechet_kernel_by_y(&self, t: f64, k: usize) -> CrackResult<f64> {
        Ok(self.snapshot()?.frechet_kernel_by_y(t, k))
    }

    pub fn linearized_rhs(&self, t: f64) -> CrackResult<f64> {
        Ok(self.snapshot()?.linearized_rhs(t))
    }
}

/// Immutable view of one iteration: geometry, measured data and a pinned
/// density. Shareable across threads for concurrent kernel evaluation.
#[derive(Debug, Clone)]
pub struct IterationSnapshot<'s> {
    state: &'s InverseProblemState,
    density: Arc<[f64]>,
}

impl<'s> IterationSnapshot<'s> {
    pub fn state(&self) -> &'s InverseProblemState {
        self.state
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    fn frechet_inputs(&self) -> FrechetInputs<'_> {
        FrechetInputs {
            inner_curve: &**self.state.inner_curve(),
            radius: self.state.radius(),
            step: self.state.step(),
            density: &self.density,
        }
    }

    /// Raw node sum, without the step `H`; see [`crate::frechet`].
    pub fn frechet_kernel_by_x(&self, t: f64, k: usize) -> f64 {
        frechet_kernel_sum(&self.frechet_inputs(), FrechetDirection::X, t, k)
    }

    pub fn frechet_kernel_by_y(&self, t: f64, k: usize) -> f64 {
        frechet_kernel_sum(&self.frechet_inputs(), FrechetDirection::Y, t, k)
    }

    /// The kernel `(t, k) ↦ value` for one direction; bind `t` to sweep modes.
    pub fn frechet_kernel(
        &self,
        direction: FrechetDirection,
    ) -> Kernel<f64, usize, impl Fn(&f64, usize) -> f64 + '_> {
        let inputs = self.frechet_inputs();
        Kernel::new(move |t: &f64, k: usize| frechet_kernel_sum(&inputs, direction, *t, k))
    }

    /// `−½ ∫ K(y(t), x(s)) ρ(s) ds − ω₁(t)` with the trapezoidal rule.
    pub fn linearized_rhs(&self, t: f64) -> f64 {
        let problem = self.state.problem();
        let core = Kernel::new(|point: &(f64, f64), s: f64| {
            problem.data_equation_operator_core(point, s)
        });
        let bound = core.bind(problem.outer_curve().point(t));
        let integral = trapezoid_with_step(problem.step(), &self.density, &bound);
        -integral / 2.0 - self.state.omega1(t)
    }

    /// Builds the linearized system at the outer angles `nodes`.
    ///
    /// Columns hold the X modes `0..=degree` followed by the Y modes; entries
    /// are raw kernel sums. Non-finite values are reported only after the
    /// whole system is built, with `column == matrix.ncols()` standing for the
    /// right-hand side.
    pub fn assemble(&self, nodes: &[f64]) -> CrackResult<LinearizedSystem> {
        let modes = self.state.correction_polynomial_degree() + 1;
        let rows = nodes.len();
        let by_x = self.frechet_kernel(FrechetDirection::X);
        let by_y = self.frechet_kernel(FrechetDirection::Y);

        let matrix = DMatrix::from_fn(rows, 2 * modes, |row, column| {
            let t = nodes[row];
            if column < modes {
                by_x.evaluate_with(&t, column)
            } else {
                by_y.evaluate_with(&t, column - modes)
            }
        });
        let rhs = DVector::from_iterator(rows, nodes.iter().map(|&t| self.linearized_rhs(t)));

        for row in 0..rows {
            for column in 0..matrix.ncols() {
                ensure_finite(matrix[(row, column)], row, column)
                    .map_err(|err| log_degenerate(err, nodes[row]))?;
            }
            ensure_finite(rhs[row], row, matrix.ncols())
                .map_err(|err| log_degenerate(err, nodes[row]))?;
        }
        debug!("assembled linearized system: {rows} x {}", matrix.ncols());

        Ok(LinearizedSystem {
            nodes: nodes.to_vec(),
            modes,
            matrix,
            rhs,
        })
    }

    /// [`Self::assemble`] at the outer discretization nodes.
    pub fn assemble_at_outer_nodes(&self) -> CrackResult<LinearizedSystem> {
        let nodes: Vec<f64> = Nodes::new(self.state.step(), self.state.points_number()).collect();
        self.assemble(&nodes)
    }
}

fn log_degenerate(err: CrackError, t: f64) -> CrackError {
    warn!("degenerate kernel value at outer angle {t}: {err}");
    err
}

/// Fréchet matrix and right-hand side sampled at a set of outer angles.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearizedSystem {
    pub nodes: Vec<f64>,
    /// Number of modes per direction (`degree + 1`).
    pub modes: usize,
    pub matrix: DMatrix<f64>,
    pub rhs: DVector<f64>,
}

impl LinearizedSystem {
    pub fn x_block(&self) -> DMatrix<f64> {
        self.matrix.columns(0, self.modes).into_owned()
    }

    pub fn y_block(&self) -> DMatrix<f64> {
        self.matrix.columns(self.modes, self.modes).into_owned()
    }

    /// Matrix entries in row-major order.
    pub fn matrix_row_major(&self) -> Vec<f64> {
        self.matrix.transpose().iter().copied().collect()
    }
}
