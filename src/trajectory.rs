use crate::error::{Result, TrajectoidError};
use rustfft::num_complex::Complex64;

/// Guard added to the magnitude range before normalising.
pub const NORMALIZATION_EPSILON: f64 = 1e-12;

/// An ordered 3-D curve derived from a coefficient sequence.
///
/// Point `i` is `[i, normalised magnitude, phase]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    points: Vec<[f64; 3]>,
}

impl Trajectory {
    /// Maps magnitudes (and optional phases) onto a curve.
    ///
    /// `x` is the sample index, `y` the magnitude min-max normalised to
    /// `[0, 1]` and `z` the phase, or zero without one. A constant magnitude
    /// maps to `y = 0` everywhere.
    pub fn from_signal(magnitude: &[f64], phase: Option<&[f64]>) -> Result<Self> {
        if let Some(phase) = phase {
            if phase.len() != magnitude.len() {
                return Err(TrajectoidError::mismatch(
                    "trajectory phase",
                    magnitude.len(),
                    phase.len(),
                ));
            }
        }

        Ok(Self::assemble(magnitude, phase))
    }

    /// Uses `|c|` as magnitude and `arg(c)` as phase.
    pub fn from_complex(coefficients: &[Complex64]) -> Self {
        let (magnitude, phase): (Vec<f64>, Vec<f64>) =
            coefficients.iter().map(|c| (c.norm(), c.arg())).unzip();
        Self::assemble(&magnitude, Some(phase.as_slice()))
    }

    /// Treats real coefficients as complex numbers on the real axis, so the
    /// phase is 0 for non-negative values and π for negative ones.
    pub fn from_real(values: &[f64]) -> Self {
        let (magnitude, phase): (Vec<f64>, Vec<f64>) = values
            .iter()
            .map(|&v| {
                let c = Complex64::new(v, 0.0);
                (c.norm(), c.arg())
            })
            .unzip();
        Self::assemble(&magnitude, Some(phase.as_slice()))
    }

    fn assemble(magnitude: &[f64], phase: Option<&[f64]>) -> Self {
        let min = magnitude.iter().copied().fold(f64::INFINITY, f64::min);
        let max = magnitude.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min + NORMALIZATION_EPSILON;

        let points = magnitude
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                let z = phase.map_or(0.0, |p| p[i]);
                [i as f64, (m - min) / range, z]
            })
            .collect();
        Self { points }
    }

    pub fn from_points(points: Vec<[f64; 3]>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p[0]).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p[1]).collect()
    }

    pub fn zs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p[2]).collect()
    }

    /// Flat array of points [x, y, z, x, y, z, ...].
    pub fn flat(&self) -> Vec<f64> {
        self.points.iter().flatten().copied().collect()
    }
}
