//! Plain data records describing what a renderer should draw.
//!
//! Nothing here draws. A [`Figure`] is built explicitly and handed to whatever
//! renderer the caller uses (the SVG and glTF demos, a browser canvas, ...).

use crate::error::{Result, TrajectoidError};
use crate::mesh::Mesh;
use crate::signal::Signal;
use crate::spectral::Spectrum;
use serde::{Deserialize, Serialize};

/// An RGBA colour with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Spectral branch.
    pub const BLUE: Color = Color::rgb(0.12, 0.47, 0.71);
    /// Wavelet branch.
    pub const ORANGE: Color = Color::rgb(1.0, 0.5, 0.05);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A labelled 2-D line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    label: String,
    color: Color,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Series {
    /// `x` and `y` must have the same length and the label must not be blank.
    pub fn new(label: impl Into<String>, color: Color, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(TrajectoidError::invalid("label", "series label is empty"));
        }
        if x.len() != y.len() {
            return Err(TrajectoidError::mismatch("series values", x.len(), y.len()));
        }
        Ok(Self { label, color, x, y })
    }

    /// Magnitudes over the strictly positive frequencies.
    pub fn magnitude_spectrum(
        label: impl Into<String>,
        color: Color,
        spectrum: &Spectrum,
    ) -> Result<Self> {
        let (frequencies, coefficients) = spectrum.positive();
        let magnitudes = coefficients.iter().map(|c| c.norm()).collect();
        Self::new(label, color, frequencies, magnitudes)
    }

    /// `values` against the time axis of `signal`, truncated to the shorter of
    /// the two.
    pub fn over_time(
        label: impl Into<String>,
        color: Color,
        signal: &Signal,
        values: &[f64],
    ) -> Result<Self> {
        let mut times = signal.times();
        let n = times.len().min(values.len());
        times.truncate(n);
        Self::new(label, color, times, values[..n].to_vec())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(min, max)` of the y values, or `None` for an empty series.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        range(&self.y)
    }

    pub fn x_range(&self) -> Option<(f64, f64)> {
        range(&self.x)
    }
}

fn range(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

/// A labelled, coloured surface.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshLayer {
    pub label: String,
    pub color: Color,
    pub mesh: Mesh,
}

impl MeshLayer {
    pub fn new(label: impl Into<String>, color: Color, mesh: Mesh) -> Self {
        Self {
            label: label.into(),
            color,
            mesh,
        }
    }
}

/// A titled collection of series and surfaces drawn on shared axes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Figure {
    pub title: String,
    pub series: Vec<Series>,
    pub meshes: Vec<MeshLayer>,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_mesh(mut self, layer: MeshLayer) -> Self {
        self.meshes.push(layer);
        self
    }

    /// Bounds over every series, as `((x_min, x_max), (y_min, y_max))`.
    pub fn series_bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut bounds: Option<((f64, f64), (f64, f64))> = None;
        for s in &self.series {
            let (Some(xr), Some(yr)) = (s.x_range(), s.y_range()) else {
                continue;
            };
            bounds = Some(match bounds {
                None => (xr, yr),
                Some(((x0, x1), (y0, y1))) => {
                    ((x0.min(xr.0), x1.max(xr.1)), (y0.min(yr.0), y1.max(yr.1)))
                }
            });
        }
        bounds
    }
}
