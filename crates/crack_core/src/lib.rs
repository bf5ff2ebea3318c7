pub mod config;
pub mod curve;
pub mod discretize;
pub mod error;
pub mod fourier;
pub mod frechet;
pub mod inverse;
pub mod kernel;
pub mod problem;
pub mod quadrature;
pub mod test_data;
/// The `crack_core` crate evaluates the linearization of the inverse crack
/// problem in a disk: the Fréchet-derivative kernels of the data equation with
/// respect to the crack curve, and the right-hand side of the linearized
/// equation, for one iteration of an outer solver.
///
/// Key components:
/// - **Traits**: `Curve` (closed parametrized curves), `Evaluate` (kernels with a fixed context).
/// - **Problem states**: `ProblemState` (disk, curves, boundary data) and `InverseProblemState`
///   (density, measured derivative, kernels) with `IterationSnapshot` for concurrent evaluation.
/// - **Numerics**: uniform discretization, periodic trapezoidal rule, FFT-based trigonometric
///   interpolation of outer-boundary data.
/// - **Test data**: synthetic measurements generated from a known crack and density.
pub mod traits;

pub use error::{CrackError, CrackResult};
pub use frechet::FrechetDirection;
pub use inverse::{InverseProblemState, IterationSnapshot, LinearizedSystem};
pub use problem::{DirectProblemData, ProblemState};
