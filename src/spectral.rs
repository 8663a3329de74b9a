//! Fourier decomposition, coefficient filtering and reconstruction.

use crate::error::{Result, TrajectoidError};
use crate::signal::Signal;
use rustfft::FftPlanner;
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// An inclusive frequency interval `[low, high]` in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    pub low: f64,
    pub high: f64,
}

impl FrequencyBand {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        let band = Self { low, high };
        band.validate()?;
        Ok(band)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(TrajectoidError::invalid("frequency_band", "bounds must be finite"));
        }
        if self.low > self.high {
            return Err(TrajectoidError::invalid(
                "frequency_band",
                format!("low bound {} exceeds high bound {}", self.low, self.high),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, frequency: f64) -> bool {
        frequency >= self.low && frequency <= self.high
    }
}

/// Complex Fourier coefficients, index-aligned with their bin frequencies.
#[derive(Clone, Debug, PartialEq)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    coefficients: Vec<Complex64>,
}

impl Spectrum {
    /// Pairs frequencies with coefficients; both must have the same length.
    pub fn from_parts(frequencies: Vec<f64>, coefficients: Vec<Complex64>) -> Result<Self> {
        if frequencies.len() != coefficients.len() {
            return Err(TrajectoidError::mismatch(
                "spectrum coefficients",
                frequencies.len(),
                coefficients.len(),
            ));
        }
        Ok(Self {
            frequencies,
            coefficients,
        })
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.norm()).collect()
    }

    /// The strictly positive frequency half as `(frequencies, coefficients)`.
    pub fn positive(&self) -> (Vec<f64>, Vec<Complex64>) {
        self.frequencies
            .iter()
            .zip(&self.coefficients)
            .filter(|(f, _)| **f > 0.0)
            .map(|(f, c)| (*f, *c))
            .unzip()
    }

    /// Same-length copy with the entries outside `band` and those weaker than
    /// `magnitude_threshold` set to zero. See [`filter`].
    pub fn filter(
        &self,
        band: Option<FrequencyBand>,
        magnitude_threshold: Option<f64>,
    ) -> Result<Spectrum> {
        let coefficients = filter(
            &self.frequencies,
            &self.coefficients,
            band,
            magnitude_threshold,
        )?;
        Ok(Spectrum {
            frequencies: self.frequencies.clone(),
            coefficients,
        })
    }

    /// Real part of the inverse transform. See [`reconstruct`].
    pub fn reconstruct(&self) -> Vec<f64> {
        reconstruct(&self.coefficients)
    }
}

/// Bin frequencies of an `n`-point transform: DC first, then the positive
/// frequencies in increasing order, then the negative ones, spaced
/// `sampling_rate / n` apart.
pub fn fft_frequencies(n: usize, sampling_rate: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let spacing = sampling_rate / n as f64;
    let non_negative = (n - 1) / 2 + 1;
    (0..n)
        .map(|i| {
            let bin = if i < non_negative {
                i as f64
            } else {
                i as f64 - n as f64
            };
            bin * spacing
        })
        .collect()
}

/// Discrete Fourier transform of the whole signal.
pub fn decompose(signal: &Signal) -> Spectrum {
    let n = signal.len();
    let mut buffer: Vec<Complex64> = signal
        .samples()
        .iter()
        .map(|&s| Complex64::new(s, 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(n).process(&mut buffer);
    log::debug!("forward transform over {} samples at {} Hz", n, signal.sampling_rate());

    Spectrum {
        frequencies: fft_frequencies(n, signal.sampling_rate()),
        coefficients: buffer,
    }
}

/// Zeroes coefficients without changing the array length.
///
/// With a band, every entry whose frequency lies outside the inclusive band is
/// zeroed. With a threshold, every remaining entry whose magnitude is below it
/// is zeroed as well. With neither, the result is a plain copy.
pub fn filter(
    frequencies: &[f64],
    coefficients: &[Complex64],
    band: Option<FrequencyBand>,
    magnitude_threshold: Option<f64>,
) -> Result<Vec<Complex64>> {
    if frequencies.len() != coefficients.len() {
        return Err(TrajectoidError::mismatch(
            "spectrum coefficients",
            frequencies.len(),
            coefficients.len(),
        ));
    }
    if let Some(band) = &band {
        band.validate()?;
    }
    if let Some(threshold) = magnitude_threshold {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(TrajectoidError::invalid(
                "magnitude_threshold",
                format!("must be finite and non-negative, got {}", threshold),
            ));
        }
    }

    let zero = Complex64::new(0.0, 0.0);
    let mut filtered = coefficients.to_vec();
    if let Some(band) = band {
        for (c, &f) in filtered.iter_mut().zip(frequencies) {
            if !band.contains(f) {
                *c = zero;
            }
        }
    }
    if let Some(threshold) = magnitude_threshold {
        for c in filtered.iter_mut() {
            if c.norm() < threshold {
                *c = zero;
            }
        }
    }

    log::debug!(
        "filter kept {} of {} coefficients",
        filtered.iter().filter(|c| **c != zero).count(),
        filtered.len()
    );
    Ok(filtered)
}

/// Inverse transform, keeping only the real part.
///
/// Filtering that breaks conjugate symmetry (a band covering positive
/// frequencies only, for instance) leaves an imaginary residue; it is dropped
/// here, so such a reconstruction is lossy.
pub fn reconstruct(coefficients: &[Complex64]) -> Vec<f64> {
    let n = coefficients.len();
    if n == 0 {
        return Vec::new();
    }
    let mut buffer = coefficients.to_vec();
    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_inverse(n).process(&mut buffer);

    let scale = 1.0 / n as f64;
    buffer.iter().map(|c| c.re * scale).collect()
}
