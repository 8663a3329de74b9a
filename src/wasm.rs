//! JavaScript bindings around [`crate::pipeline::build`].

mod utils;

#[cfg(target_arch = "wasm32")]
pub use utils::init_threads;

use crate::config::TrajectoidConfig;
use crate::pipeline::{self, Branch, Trajectoids};
use crate::signal::Signal;
use crate::spectral::FrequencyBand;
use utils::{js_error, parse_js_indices};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const TS_BRANCHES: &'static str = r#"
export const BRANCH_SPECTRAL = 0;
export const BRANCH_WAVELET = 1;
"#;

/// Collects parameters from JS, then runs the whole pipeline.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct TrajectoidBuilder {
    config: TrajectoidConfig,
}

#[wasm_bindgen]
impl TrajectoidBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TrajectoidBuilder {
        TrajectoidBuilder::default()
    }

    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<TrajectoidBuilder, JsValue> {
        let config = TrajectoidConfig::from_json(json).map_err(js_error)?;
        Ok(TrajectoidBuilder { config })
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.config.to_json().map_err(js_error)
    }

    pub fn set_band(&mut self, low: f64, high: f64) -> Result<(), JsValue> {
        self.config.spectral.band = Some(FrequencyBand::new(low, high).map_err(js_error)?);
        Ok(())
    }

    pub fn clear_band(&mut self) {
        self.config.spectral.band = None;
    }

    pub fn set_magnitude_threshold(&mut self, threshold: Option<f64>) {
        self.config.spectral.magnitude_threshold = threshold;
    }

    pub fn set_wavelet(&mut self, kernel: &str, level: Option<usize>) -> Result<(), JsValue> {
        kernel.parse::<crate::wavelet::Wavelet>().map_err(js_error)?;
        self.config.wavelet.kernel = kernel.to_string();
        self.config.wavelet.level = level;
        Ok(())
    }

    /// Takes an array of band indices, e.g. `[0, 1]`.
    pub fn set_levels_to_keep(&mut self, levels: JsValue) -> Result<(), JsValue> {
        let levels = parse_js_indices(&levels)
            .ok_or_else(|| js_error("levels must be an array of non-negative integers"))?;
        self.config.wavelet.levels_to_keep = levels;
        Ok(())
    }

    pub fn set_mesh(&mut self, subdivisions: usize, hull_radius: f64, quantile: f64) {
        self.config.mesh.subdivisions = subdivisions;
        self.config.mesh.hull_radius = hull_radius;
        self.config.mesh.quantile = quantile;
    }

    pub fn set_tube(&mut self, radius: f64, ring_points: usize) {
        self.config.tube.radius = radius;
        self.config.tube.ring_points = ring_points;
    }

    pub fn build(&self, samples: &[f64], sampling_rate: f64) -> Result<TrajectoidResult, JsValue> {
        let signal = Signal::new(samples.to_vec(), sampling_rate).map_err(js_error)?;
        let inner = pipeline::build(&signal, &self.config).map_err(js_error)?;
        Ok(TrajectoidResult { inner })
    }
}

/// Flat arrays of one built pair of trajectoids. Branch 0 is spectral, 1 wavelet.
#[wasm_bindgen]
pub struct TrajectoidResult {
    inner: Trajectoids,
}

impl TrajectoidResult {
    fn branch(&self, branch: u32) -> Result<&Branch, JsValue> {
        match branch {
            0 => Ok(&self.inner.spectral),
            1 => Ok(&self.inner.wavelet),
            _ => Err(js_error(format!("unknown branch {}", branch))),
        }
    }
}

#[wasm_bindgen]
impl TrajectoidResult {
    pub fn reconstruction(&self, branch: u32) -> Result<Vec<f64>, JsValue> {
        Ok(self.branch(branch)?.reconstruction.clone())
    }

    pub fn trajectory(&self, branch: u32) -> Result<Vec<f64>, JsValue> {
        Ok(self.branch(branch)?.trajectory.flat())
    }

    pub fn hull_vertices(&self, branch: u32) -> Result<Vec<f64>, JsValue> {
        Ok(self.branch(branch)?.rounded_hull.mesh().flat_vertices())
    }

    pub fn hull_faces(&self, branch: u32) -> Result<Vec<u32>, JsValue> {
        Ok(self.branch(branch)?.rounded_hull.mesh().flat_faces())
    }

    /// Whether the hull fell back to the star body.
    pub fn hull_is_fallback(&self, branch: u32) -> Result<bool, JsValue> {
        Ok(!self.branch(branch)?.rounded_hull.is_rounded_hull())
    }

    pub fn star_vertices(&self, branch: u32) -> Result<Vec<f64>, JsValue> {
        Ok(self.branch(branch)?.star_body.flat_vertices())
    }

    pub fn star_faces(&self, branch: u32) -> Result<Vec<u32>, JsValue> {
        Ok(self.branch(branch)?.star_body.flat_faces())
    }

    pub fn tube_vertices(&self, branch: u32) -> Result<Vec<f64>, JsValue> {
        Ok(self.branch(branch)?.tube.to_mesh().flat_vertices())
    }

    pub fn tube_faces(&self, branch: u32) -> Result<Vec<u32>, JsValue> {
        Ok(self.branch(branch)?.tube.to_mesh().flat_faces())
    }

    #[wasm_bindgen(getter)]
    pub fn frequencies(&self) -> Vec<f64> {
        self.inner.spectrum.frequencies().to_vec()
    }

    /// Magnitudes of the filtered spectrum.
    #[wasm_bindgen(getter)]
    pub fn magnitudes(&self) -> Vec<f64> {
        self.inner.filtered_spectrum.iter().map(|c| c.norm()).collect()
    }

    #[wasm_bindgen(getter)]
    pub fn band_lengths(&self) -> Vec<u32> {
        self.inner
            .wavelet_bands
            .bands()
            .iter()
            .map(|b| b.len() as u32)
            .collect()
    }
}
