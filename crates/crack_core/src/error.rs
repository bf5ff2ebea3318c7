use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CrackError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Density has not been assigned; set it before evaluating kernels")]
    UnboundDensity,

    #[error("Kernel evaluated before a context was prepared")]
    UnboundKernel,

    /// A kernel value is NaN or infinite, which means the inner curve touches
    /// or crosses the outer circle.
    #[error("Degenerate geometry at row={row}, column={column}: kernel value {value}")]
    DegenerateGeometry {
        row: usize,
        column: usize,
        value: f64,
    },
}

pub type CrackResult<T> = Result<T, CrackError>;

/// Turns a non-finite kernel value into `DegenerateGeometry`.
pub fn ensure_finite(value: f64, row: usize, column: usize) -> CrackResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CrackError::DegenerateGeometry { row, column, value })
    }
}

pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> CrackResult<()> {
    if expected != actual {
        return Err(CrackError::DimensionMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
