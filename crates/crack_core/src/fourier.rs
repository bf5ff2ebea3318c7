//! Trigonometric interpolation of equispaced periodic samples.
//!
//! Coefficients come from a forward FFT (rustfft, unnormalized):
//! `X_m = Σ_j f_j e^{-i m s_j}`, so `a_m = 2 Re X_m / N`, `b_m = -2 Im X_m / N`.

use num_complex::Complex64;
use rustfft::FftPlanner;

#[derive(Debug, Clone, PartialEq)]
pub struct TrigInterpolant {
    constant: f64,
    /// `cos_coefficients[m - 1]` multiplies `cos(m t)`.
    cos_coefficients: Vec<f64>,
    /// `sin_coefficients[m - 1]` multiplies `sin(m t)`.
    sin_coefficients: Vec<f64>,
    /// Coefficient of `cos(N/2 · t)`, present for even `N`.
    nyquist: Option<(usize, f64)>,
}

impl TrigInterpolant {
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self::zero();
        }

        let mut data: Vec<Complex64> = samples.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);
        fft.process(&mut data);

        let scale = 1.0 / n as f64;
        let harmonics = (n - 1) / 2;
        let cos_coefficients = (1..=harmonics).map(|m| 2.0 * data[m].re * scale).collect();
        let sin_coefficients = (1..=harmonics).map(|m| -2.0 * data[m].im * scale).collect();
        let nyquist = (n % 2 == 0 && n > 1).then(|| (n / 2, data[n / 2].re * scale));

        Self {
            constant: data[0].re * scale,
            cos_coefficients,
            sin_coefficients,
            nyquist,
        }
    }

    pub fn zero() -> Self {
        Self {
            constant: 0.0,
            cos_coefficients: Vec::new(),
            sin_coefficients: Vec::new(),
            nyquist: None,
        }
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn value(&self, t: f64) -> f64 {
        let mut sum = self.constant;
        for (idx, (a, b)) in self
            .cos_coefficients
            .iter()
            .zip(&self.sin_coefficients)
            .enumerate()
        {
            let m = (idx + 1) as f64;
            sum += a * (m * t).cos() + b * (m * t).sin();
        }
        if let Some((m, c)) = self.nyquist {
            sum += c * (m as f64 * t).cos();
        }
        sum
    }

    /// Radial derivative on `r = radius` of the harmonic extension into the
    /// disk: the extension of mode `m` is `(r / radius)^m` times the mode, so
    /// each mode is scaled by `m / radius` and the constant drops out.
    pub fn dirichlet_to_neumann(&self, radius: f64) -> Self {
        let scaled = |coefficients: &[f64]| -> Vec<f64> {
            coefficients
                .iter()
                .enumerate()
                .map(|(idx, c)| c * (idx + 1) as f64 / radius)
                .collect()
        };
        Self {
            constant: 0.0,
            cos_coefficients: scaled(&self.cos_coefficients),
            sin_coefficients: scaled(&self.sin_coefficients),
            nyquist: self.nyquist.map(|(m, c)| (m, c * m as f64 / radius)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discretize::nodes;
    use approx::assert_abs_diff_eq;

    fn sample(n: usize, f: impl Fn(f64) -> f64) -> Vec<f64> {
        nodes(n).unwrap().map(f).collect()
    }

    #[test]
    fn reproduces_samples_at_nodes() {
        for n in [5, 8] {
            let samples = sample(n, |s| (s.sin() * 3.0).exp());
            let interpolant = TrigInterpolant::from_samples(&samples);
            for (s, expected) in nodes(n).unwrap().zip(&samples) {
                assert_abs_diff_eq!(interpolant.value(s), *expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn recovers_band_limited_function_between_nodes() {
        let f = |t: f64| 0.5 + 2.0 * t.cos() - 0.75 * (3.0 * t).sin();
        let interpolant = TrigInterpolant::from_samples(&sample(16, f));
        assert_abs_diff_eq!(interpolant.constant(), 0.5, epsilon = 1e-12);
        for t in [0.1, 1.3, 2.9, 5.5] {
            assert_abs_diff_eq!(interpolant.value(t), f(t), epsilon = 1e-12);
        }
    }

    #[test]
    fn dirichlet_to_neumann_scales_modes() {
        let radius = 2.0;
        let f = |t: f64| 1.0 + (2.0 * t).cos() + (t).sin();
        let dtn = TrigInterpolant::from_samples(&sample(12, f)).dirichlet_to_neumann(radius);
        // u = 1 + (r/R)^2 cos 2t + (r/R) sin t, so ∂u/∂r at r = R is 2/R cos 2t + 1/R sin t.
        for t in [0.0f64, 0.7, 4.0] {
            let expected = (2.0 * t).cos() + 0.5 * t.sin();
            assert_abs_diff_eq!(dtn.value(t), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn keeps_nyquist_mode_for_even_counts() {
        let samples = sample(4, |t| (2.0 * t).cos());
        let interpolant = TrigInterpolant::from_samples(&samples);
        assert_abs_diff_eq!(interpolant.value(0.0), 1.0, epsilon = 1e-12);
        let dtn = interpolant.dirichlet_to_neumann(1.0);
        assert_abs_diff_eq!(dtn.value(0.0), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_samples_give_zero() {
        let interpolant = TrigInterpolant::from_samples(&[]);
        assert_eq!(interpolant.value(1.0), 0.0);
    }
}
