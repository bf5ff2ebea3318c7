//! Uniform discretization of one period of the curve parameter.

use std::f64::consts::TAU;

use crate::error::{CrackError, CrackResult};

/// Length of the parameter domain shared by every curve.
pub const PERIOD: f64 = TAU;

/// Step between neighbouring nodes when the period is split into
/// `points_number` equal sub-intervals.
pub fn discrete_step(points_number: usize) -> CrackResult<f64> {
    if points_number == 0 {
        return Err(CrackError::InvalidParameter(
            "points_number must be positive".to_string(),
        ));
    }
    Ok(PERIOD / points_number as f64)
}

/// Node parameters `s_0 = 0, s_{j+1} = s_j + H`.
///
/// The kernels advance their node parameter by repeated addition, so every
/// consumer that pairs values with kernel nodes goes through this iterator.
#[derive(Debug, Clone)]
pub struct Nodes {
    step: f64,
    current: f64,
    remaining: usize,
}

impl Nodes {
    pub fn new(step: f64, count: usize) -> Self {
        Self {
            step,
            current: 0.0,
            remaining: count,
        }
    }
}

impl Iterator for Nodes {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        let s = self.current;
        self.current += self.step;
        self.remaining -= 1;
        Some(s)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Nodes {}

/// All `points_number` node parameters.
pub fn nodes(points_number: usize) -> CrackResult<Nodes> {
    Ok(Nodes::new(discrete_step(points_number)?, points_number))
}
