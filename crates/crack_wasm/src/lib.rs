//! WASM bindings for the inverse crack problem.
//!
//! `WasmCrackProblem` wraps one `InverseProblemState` so a JavaScript host can
//! drive the outer iteration: assign densities, sample kernels, assemble the
//! linearized system and apply curve corrections.

mod problem;

pub use problem::WasmCrackProblem;
