//! Parameters of a full trajectoid run, loadable from JSON.

use crate::error::{Result, TrajectoidError};
use crate::spectral::FrequencyBand;
use crate::wavelet::Wavelet;
use serde::{Deserialize, Serialize};

/// Settings of the spectral branch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Inclusive pass band in Hz; `None` keeps every frequency.
    pub band: Option<FrequencyBand>,
    /// Coefficients with a smaller magnitude are zeroed.
    pub magnitude_threshold: Option<f64>,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            band: Some(FrequencyBand {
                low: 40.0,
                high: 130.0,
            }),
            magnitude_threshold: None,
        }
    }
}

/// Settings of the wavelet branch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveletConfig {
    #[serde(alias = "wavelet")]
    pub kernel: String,
    /// Requested level, clamped to the maximum the signal allows.
    pub level: Option<usize>,
    /// Band indices left untouched; 0 is the approximation.
    pub levels_to_keep: Vec<usize>,
}

impl Default for WaveletConfig {
    fn default() -> Self {
        Self {
            kernel: Wavelet::Db4.name().to_string(),
            level: Some(4),
            levels_to_keep: vec![0, 1],
        }
    }
}

impl WaveletConfig {
    pub fn wavelet(&self) -> Result<Wavelet> {
        self.kernel.parse()
    }
}

/// Settings of the support solids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Icosphere subdivision depth of the shared direction set.
    pub subdivisions: usize,
    /// Dilation radius of the rounded hull.
    pub hull_radius: f64,
    /// Projection quantile of the star body.
    pub quantile: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            subdivisions: 3,
            hull_radius: 0.08,
            quantile: 0.90,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TubeConfig {
    pub radius: f64,
    pub ring_points: usize,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            radius: 0.05,
            ring_points: 16,
        }
    }
}

/// Every knob of [`crate::pipeline::build`]. Missing JSON fields take their
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoidConfig {
    pub spectral: SpectralConfig,
    pub wavelet: WaveletConfig,
    pub mesh: MeshConfig,
    pub tube: TubeConfig,
}

/// Deepest icosphere accepted; depth 8 already has 655 362 directions.
pub const MAX_SUBDIVISIONS: usize = 8;

impl TrajectoidConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every parameter before any work starts.
    pub fn validate(&self) -> Result<()> {
        if let Some(band) = &self.spectral.band {
            band.validate()?;
        }
        if let Some(threshold) = self.spectral.magnitude_threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(TrajectoidError::invalid(
                    "magnitude_threshold",
                    format!("must be finite and non-negative, got {}", threshold),
                ));
            }
        }

        self.wavelet.wavelet()?;

        if self.mesh.subdivisions > MAX_SUBDIVISIONS {
            return Err(TrajectoidError::invalid(
                "subdivisions",
                format!("at most {} supported, got {}", MAX_SUBDIVISIONS, self.mesh.subdivisions),
            ));
        }
        if !self.mesh.hull_radius.is_finite() || self.mesh.hull_radius < 0.0 {
            return Err(TrajectoidError::invalid(
                "hull_radius",
                format!("must be finite and non-negative, got {}", self.mesh.hull_radius),
            ));
        }
        if !(0.0..=1.0).contains(&self.mesh.quantile) {
            return Err(TrajectoidError::invalid(
                "quantile",
                format!("must lie in [0, 1], got {}", self.mesh.quantile),
            ));
        }

        if !self.tube.radius.is_finite() || self.tube.radius <= 0.0 {
            return Err(TrajectoidError::invalid(
                "radius",
                format!("must be positive and finite, got {}", self.tube.radius),
            ));
        }
        if self.tube.ring_points < 3 {
            return Err(TrajectoidError::invalid(
                "ring_points",
                format!("needs at least 3 points per ring, got {}", self.tube.ring_points),
            ));
        }
        Ok(())
    }
}
