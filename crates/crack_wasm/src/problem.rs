use std::sync::Arc;

use anyhow::{Context, Result};
use crack_core::config::CrackProblemConfig;
use crack_core::curve::{CorrectedCurve, CurveSpec, Ellipse, SharedCurve};
use crack_core::inverse::InverseProblemState;
use crack_core::test_data::MeasuredData;
use crack_core::traits::Curve;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmCrackProblem {
    pub(crate) state: InverseProblemState,
}

/// Row-major payload of an assembled linearized system.
#[derive(Debug, Serialize)]
pub(crate) struct LinearizedSystemPayload {
    nodes: Vec<f64>,
    rows: usize,
    cols: usize,
    modes: usize,
    matrix: Vec<f64>,
    rhs: Vec<f64>,
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub(crate) fn build_state(
    config: CrackProblemConfig,
    initial_curve: SharedCurve,
    boundary_data: Vec<f64>,
    derivative_on_outer_curve: Vec<f64>,
) -> Result<InverseProblemState> {
    let data = MeasuredData {
        initial_curve,
        boundary_data,
        derivative_on_outer_curve,
    };
    InverseProblemState::from_config(&config, Arc::new(data))
        .context("Failed to build inverse problem state")
}

#[wasm_bindgen]
impl WasmCrackProblem {
    #[wasm_bindgen(constructor)]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        radius: f64,
        points_number: u32,
        correction_polynomial_degree: u32,
        center_x: f64,
        center_y: f64,
        semi_axis_a: f64,
        semi_axis_b: f64,
        rotation: f64,
        boundary_data: Vec<f64>,
        derivative_on_outer_curve: Vec<f64>,
    ) -> Result<WasmCrackProblem, JsValue> {
        console_error_panic_hook::set_once();

        let config = CrackProblemConfig {
            radius,
            points_number: points_number as usize,
            correction_polynomial_degree: correction_polynomial_degree as usize,
        };
        let curve = Ellipse::new((center_x, center_y), (semi_axis_a, semi_axis_b), rotation)
            .map_err(js_error)?;
        let state = build_state(config, Arc::new(curve), boundary_data, derivative_on_outer_curve)
            .map_err(|err| js_error(format!("{err:#}")))?;
        Ok(WasmCrackProblem { state })
    }

    /// Builds from a `CrackProblemConfig` object and a tagged curve object,
    /// e.g. `{ type: "Circle", center: [0, 0], radius: 0.5 }`.
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(
        config: JsValue,
        curve: JsValue,
        boundary_data: Vec<f64>,
        derivative_on_outer_curve: Vec<f64>,
    ) -> Result<WasmCrackProblem, JsValue> {
        console_error_panic_hook::set_once();

        let config: CrackProblemConfig = from_value(config)
            .map_err(|err| js_error(format!("Invalid config: {err}")))?;
        let curve: CurveSpec =
            from_value(curve).map_err(|err| js_error(format!("Invalid curve: {err}")))?;
        let curve = curve.build().map_err(js_error)?;
        let state = build_state(config, curve, boundary_data, derivative_on_outer_curve)
            .map_err(|err| js_error(format!("{err:#}")))?;
        Ok(WasmCrackProblem { state })
    }

    pub fn points_number(&self) -> u32 {
        self.state.points_number() as u32
    }

    pub fn step(&self) -> f64 {
        self.state.step()
    }

    pub fn set_density(&mut self, density: Vec<f64>) -> Result<(), JsValue> {
        self.state.set_density(density).map_err(js_error)
    }

    pub fn get_density(&self) -> Option<Vec<f64>> {
        self.state.density().map(<[f64]>::to_vec)
    }

    pub fn frechet_kernel_by_x(&self, t: f64, k: u32) -> Result<f64, JsValue> {
        self.state
            .frechet_kernel_by_x(t, k as usize)
            .map_err(js_error)
    }

    pub fn frechet_kernel_by_y(&self, t: f64, k: u32) -> Result<f64, JsValue> {
        self.state
            .frechet_kernel_by_y(t, k as usize)
            .map_err(js_error)
    }

    pub fn linearized_rhs(&self, t: f64) -> Result<f64, JsValue> {
        self.state.linearized_rhs(t).map_err(js_error)
    }

    pub fn omega1(&self, t: f64) -> f64 {
        self.state.omega1(t)
    }

    pub fn inner_curve_clearance(&self) -> f64 {
        self.state.problem().inner_curve_clearance()
    }

    /// Samples the current inner curve at the discretization nodes as
    /// interleaved `[x0, y0, x1, y1, ...]`.
    pub fn inner_curve_points(&self) -> Vec<f64> {
        let curve = self.state.inner_curve();
        self.state
            .problem()
            .nodes()
            .flat_map(|s| {
                let (x, y) = curve.point(s);
                [x, y]
            })
            .collect()
    }

    /// Shifts the inner curve by cosine-mode coefficients for the next
    /// iteration.
    pub fn apply_correction(
        &mut self,
        x_coefficients: Vec<f64>,
        y_coefficients: Vec<f64>,
    ) -> Result<(), JsValue> {
        self.correct_curve(x_coefficients, y_coefficients)
            .map_err(|err| js_error(format!("{err:#}")))
    }

    /// Assembles the system at `nodes`, or at the outer discretization nodes
    /// when `nodes` is empty.
    pub fn assemble(&self, nodes: Vec<f64>) -> Result<JsValue, JsValue> {
        let payload = self
            .assemble_payload(&nodes)
            .map_err(|err| js_error(format!("{err:#}")))?;
        to_value(&payload).map_err(|err| js_error(format!("Serialization error: {err}")))
    }
}

impl WasmCrackProblem {
    pub(crate) fn correct_curve(
        &mut self,
        x_coefficients: Vec<f64>,
        y_coefficients: Vec<f64>,
    ) -> Result<()> {
        let curve = CorrectedCurve::new(
            self.state.inner_curve().clone(),
            x_coefficients,
            y_coefficients,
        )
        .context("Invalid curve correction")?;
        self.state.replace_inner_curve(Arc::new(curve));
        Ok(())
    }

    pub(crate) fn assemble_payload(&self, nodes: &[f64]) -> Result<LinearizedSystemPayload> {
        let snapshot = self
            .state
            .snapshot()
            .context("Cannot assemble without a density")?;
        let system = if nodes.is_empty() {
            snapshot.assemble_at_outer_nodes()
        } else {
            snapshot.assemble(nodes)
        }
        .context("Linearized system assembly failed")?;

        Ok(LinearizedSystemPayload {
            rows: system.matrix.nrows(),
            cols: system.matrix.ncols(),
            modes: system.modes,
            matrix: system.matrix_row_major(),
            rhs: system.rhs.iter().copied().collect(),
            nodes: system.nodes,
        })
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::WasmCrackProblem;
    use crack_core::config::CrackProblemConfig;
    use crack_core::curve::{Circle, CurveSpec};
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[derive(Serialize)]
    struct RadiusOnly {
        radius: f64,
    }

    #[derive(Serialize)]
    struct UnknownCurve {
        #[serde(rename = "type")]
        kind: &'static str,
        radius: f64,
    }

    fn circle_value(radius: f64) -> JsValue {
        to_value(&CurveSpec::Circle(Circle {
            center: (0.0, 0.0),
            radius,
        }))
        .expect("curve")
    }

    fn problem(points_number: u32) -> WasmCrackProblem {
        let n = points_number as usize;
        WasmCrackProblem::new(
            2.0,
            points_number,
            2,
            0.0,
            0.0,
            1.0,
            1.0,
            0.0,
            vec![0.0; n],
            vec![0.0; n],
        )
        .expect("problem should build")
    }

    #[wasm_bindgen_test]
    fn from_config_builds_from_js_objects() {
        let config = to_value(&CrackProblemConfig {
            radius: 2.0,
            points_number: 4,
            correction_polynomial_degree: 1,
        })
        .expect("config");
        let mut problem =
            WasmCrackProblem::from_config(config, circle_value(1.0), vec![0.0; 4], vec![0.0; 4])
                .expect("problem should build");
        assert_eq!(problem.points_number(), 4);
        problem.set_density(vec![1.0; 4]).expect("density");
        let value = problem.frechet_kernel_by_x(0.0, 0).expect("kernel");
        assert!((value - (-0.4300720239994327)).abs() < 1e-12);
    }

    #[wasm_bindgen_test]
    fn from_config_fills_missing_fields_with_defaults() {
        let defaults = CrackProblemConfig::default();
        let n = defaults.points_number;
        let config = to_value(&RadiusOnly { radius: 3.0 }).expect("config");
        let problem =
            WasmCrackProblem::from_config(config, circle_value(0.5), vec![0.0; n], vec![0.0; n])
                .expect("problem should build");
        assert_eq!(problem.points_number() as usize, n);
        assert_eq!(problem.state.radius(), 3.0);
        assert_eq!(
            problem.state.correction_polynomial_degree(),
            defaults.correction_polynomial_degree
        );
    }

    #[wasm_bindgen_test]
    fn from_config_rejects_invalid_curves() {
        let config = || to_value(&RadiusOnly { radius: 2.0 }).expect("config");
        let n = CrackProblemConfig::default().points_number;

        let negative = WasmCrackProblem::from_config(
            config(),
            circle_value(-0.5),
            vec![0.0; n],
            vec![0.0; n],
        );
        assert!(negative.is_err());

        let unknown = to_value(&UnknownCurve {
            kind: "Square",
            radius: 0.5,
        })
        .expect("curve");
        let result = WasmCrackProblem::from_config(config(), unknown, vec![0.0; n], vec![0.0; n]);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn wasm_problem_rejects_mismatched_density() {
        let mut problem = problem(4);
        assert!(problem.set_density(vec![1.0; 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn wasm_problem_rejects_kernel_without_density() {
        let problem = problem(4);
        assert!(problem.frechet_kernel_by_x(0.0, 0).is_err());
    }
}
