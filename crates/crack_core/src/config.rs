use serde::{Deserialize, Serialize};

use crate::error::{CrackError, CrackResult};

/// Settings shared by every iteration of one inverse crack problem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrackProblemConfig {
    /// Radius of the outer (measurement) circle.
    pub radius: f64,
    /// Number of discretization nodes on each curve.
    pub points_number: usize,
    /// Highest cosine mode of the curve correction.
    pub correction_polynomial_degree: usize,
}

impl Default for CrackProblemConfig {
    fn default() -> Self {
        Self {
            radius: 2.0,
            points_number: 64,
            correction_polynomial_degree: 3,
        }
    }
}

impl CrackProblemConfig {
    pub fn validate(&self) -> CrackResult<()> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(CrackError::InvalidParameter(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if self.points_number == 0 {
            return Err(CrackError::InvalidParameter(
                "points_number must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
