use crate::error::{Result, TrajectoidError};

/// Upper bound on the length of a synthesized signal.
pub const MAX_SYNTHESIZED_SAMPLES: usize = 1 << 26;

fn validate_rate(sampling_rate: f64) -> Result<()> {
    if !sampling_rate.is_finite() || sampling_rate <= 0.0 {
        return Err(TrajectoidError::invalid(
            "sampling_rate",
            format!("must be positive and finite, got {}", sampling_rate),
        ));
    }
    Ok(())
}

/// An ordered sequence of real samples taken at a fixed sampling rate.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    samples: Vec<f64>,
    sampling_rate: f64,
}

impl Signal {
    /// Wraps `samples` recorded at `sampling_rate` Hz.
    ///
    /// The samples must be non-empty and finite, and the rate positive.
    pub fn new(samples: Vec<f64>, sampling_rate: f64) -> Result<Self> {
        if samples.is_empty() {
            return Err(TrajectoidError::EmptyInput("signal has no samples"));
        }
        validate_rate(sampling_rate)?;
        if let Some(i) = samples.iter().position(|s| !s.is_finite()) {
            return Err(TrajectoidError::invalid(
                "samples",
                format!("sample {} is not finite", i),
            ));
        }
        Ok(Self {
            samples,
            sampling_rate,
        })
    }

    /// `len` copies of `value`.
    pub fn constant(value: f64, len: usize, sampling_rate: f64) -> Result<Self> {
        Self::new(vec![value; len], sampling_rate)
    }

    /// `len` evenly spaced samples from `start` to `stop`, both included.
    pub fn linspace(start: f64, stop: f64, len: usize, sampling_rate: f64) -> Result<Self> {
        let samples = match len {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (len - 1) as f64;
                (0..len).map(|i| start + step * i as f64).collect()
            }
        };
        Self::new(samples, sampling_rate)
    }

    /// A sum of sines, `Σ a·sin(2π·f·t)` for each `(a, f)` in `tones`, sampled
    /// over `duration` seconds (end point excluded).
    pub fn tones(tones: &[(f64, f64)], sampling_rate: f64, duration: f64) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TrajectoidError::invalid(
                "duration",
                format!("must be positive and finite, got {}", duration),
            ));
        }
        validate_rate(sampling_rate)?;
        let count = (sampling_rate * duration).floor();
        if !count.is_finite() || count > MAX_SYNTHESIZED_SAMPLES as f64 {
            return Err(TrajectoidError::invalid(
                "duration",
                format!(
                    "{} s at {} Hz exceeds {} samples",
                    duration, sampling_rate, MAX_SYNTHESIZED_SAMPLES
                ),
            ));
        }
        let count = count as usize;
        let samples = (0..count)
            .map(|i| {
                let t = i as f64 / sampling_rate;
                tones
                    .iter()
                    .map(|&(amplitude, frequency)| {
                        amplitude * (std::f64::consts::TAU * frequency * t).sin()
                    })
                    .sum()
            })
            .collect();
        Self::new(samples, sampling_rate)
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample times in seconds, starting at zero.
    pub fn times(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / self.sampling_rate)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_rejects_bad_input() {
        assert!(matches!(Signal::new(vec![], 1.0), Err(TrajectoidError::EmptyInput(_))));
        assert!(Signal::new(vec![1.0], 0.0).is_err());
        assert!(Signal::new(vec![1.0, f64::NAN], 1.0).is_err());
    }

    #[test]
    fn test_linspace_includes_end_points() {
        let s = Signal::linspace(0.0, 100.0, 100, 1.0).unwrap();
        assert_eq!(s.len(), 100);
        assert_eq!(s.samples()[0], 0.0);
        assert!((s.samples()[99] - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_tones_length_and_times() {
        let s = Signal::tones(&[(1.0, 50.0)], 1000.0, 1.0).unwrap();
        assert_eq!(s.len(), 1000);
        let t = s.times();
        assert!((t[1] - 0.001).abs() < 1e-15);
        assert!(s.samples()[0].abs() < 1e-12);
    }

    #[test]
    fn test_tones_rejects_unbounded_length() {
        let tone = [(1.0, 5.0)];
        assert!(matches!(
            Signal::tones(&tone, f64::INFINITY, 1.0),
            Err(TrajectoidError::InvalidParameter { name: "sampling_rate", .. })
        ));
        assert!(matches!(
            Signal::tones(&tone, f64::NAN, 1.0),
            Err(TrajectoidError::InvalidParameter { name: "sampling_rate", .. })
        ));
        assert!(matches!(
            Signal::tones(&tone, 1e300, 1.0),
            Err(TrajectoidError::InvalidParameter { name: "duration", .. })
        ));
        assert!(matches!(
            Signal::tones(&tone, 1000.0, 1e300),
            Err(TrajectoidError::InvalidParameter { name: "duration", .. })
        ));
        // Too short for a single sample
        assert!(matches!(
            Signal::tones(&tone, 1000.0, 1e-6),
            Err(TrajectoidError::EmptyInput(_))
        ));
    }
}
