//! Concrete closed curves used as cracks and as the measurement boundary.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CrackError, CrackResult};
use crate::traits::Curve;

/// Shared, thread-safe handle to any curve.
pub type SharedCurve = Arc<dyn Curve + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: (f64, f64),
    pub radius: f64,
}

impl Circle {
    pub fn new(center: (f64, f64), radius: f64) -> CrackResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(CrackError::InvalidParameter(format!(
                "circle radius must be positive and finite, got {radius}"
            )));
        }
        Ok(Self { center, radius })
    }

    pub fn centered(radius: f64) -> CrackResult<Self> {
        Self::new((0.0, 0.0), radius)
    }
}

impl Curve for Circle {
    fn x(&self, s: f64) -> f64 {
        self.center.0 + self.radius * s.cos()
    }

    fn y(&self, s: f64) -> f64 {
        self.center.1 + self.radius * s.sin()
    }
}

/// Ellipse with semi-axes `a`, `b`, rotated by `rotation` radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: (f64, f64),
    pub semi_axes: (f64, f64),
    #[serde(default)]
    pub rotation: f64,
}

impl Ellipse {
    pub fn new(center: (f64, f64), semi_axes: (f64, f64), rotation: f64) -> CrackResult<Self> {
        let (a, b) = semi_axes;
        if !(a > 0.0 && b > 0.0 && a.is_finite() && b.is_finite()) {
            return Err(CrackError::InvalidParameter(format!(
                "ellipse semi-axes must be positive and finite, got ({a}, {b})"
            )));
        }
        Ok(Self {
            center,
            semi_axes,
            rotation,
        })
    }

    fn local(&self, s: f64) -> (f64, f64) {
        (self.semi_axes.0 * s.cos(), self.semi_axes.1 * s.sin())
    }
}

impl Curve for Ellipse {
    fn x(&self, s: f64) -> f64 {
        let (u, v) = self.local(s);
        self.center.0 + u * self.rotation.cos() - v * self.rotation.sin()
    }

    fn y(&self, s: f64) -> f64 {
        let (u, v) = self.local(s);
        self.center.1 + u * self.rotation.sin() + v * self.rotation.cos()
    }
}

/// A base curve shifted by cosine series in each coordinate:
/// `x(s) = x₀(s) + Σ_k a_k cos(k s)`, `y(s) = y₀(s) + Σ_k b_k cos(k s)`.
///
/// The modes match the `cos(k s_j)` factor of the Fréchet kernels, so a
/// correction computed from them can be applied here directly.
#[derive(Debug, Clone)]
pub struct CorrectedCurve {
    base: SharedCurve,
    x_coefficients: Vec<f64>,
    y_coefficients: Vec<f64>,
}

impl CorrectedCurve {
    pub fn new(
        base: SharedCurve,
        x_coefficients: Vec<f64>,
        y_coefficients: Vec<f64>,
    ) -> CrackResult<Self> {
        if x_coefficients.len() != y_coefficients.len() {
            return Err(CrackError::DimensionMismatch {
                what: "correction coefficients",
                expected: x_coefficients.len(),
                actual: y_coefficients.len(),
            });
        }
        Ok(Self {
            base,
            x_coefficients,
            y_coefficients,
        })
    }

    /// Highest mode present, or `None` for an empty correction.
    pub fn degree(&self) -> Option<usize> {
        self.x_coefficients.len().checked_sub(1)
    }

    pub fn x_coefficients(&self) -> &[f64] {
        &self.x_coefficients
    }

    pub fn y_coefficients(&self) -> &[f64] {
        &self.y_coefficients
    }
}

fn cosine_series(coefficients: &[f64], s: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .map(|(k, c)| c * (k as f64 * s).cos())
        .sum()
}

impl Curve for CorrectedCurve {
    fn x(&self, s: f64) -> f64 {
        self.base.x(s) + cosine_series(&self.x_coefficients, s)
    }

    fn y(&self, s: f64) -> f64 {
        self.base.y(s) + cosine_series(&self.y_coefficients, s)
    }
}

/// Serializable description of a starting curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CurveSpec {
    Circle(Circle),
    Ellipse(Ellipse),
}

impl CurveSpec {
    /// Validates the parameters and returns a shared curve.
    pub fn build(self) -> CrackResult<SharedCurve> {
        let curve: SharedCurve = match self {
            CurveSpec::Circle(c) => Arc::new(Circle::new(c.center, c.radius)?),
            CurveSpec::Ellipse(e) => Arc::new(Ellipse::new(e.center, e.semi_axes, e.rotation)?),
        };
        Ok(curve)
    }
}
