//! End-to-end construction: signal in, both trajectoid branches out.

use crate::config::TrajectoidConfig;
use crate::error::Result;
use crate::icosphere::DirectionSet;
use crate::mesh::Mesh;
use crate::overlay::{Color, Figure, MeshLayer, Series};
use crate::signal::Signal;
use crate::spectral::{self, Spectrum};
use crate::support::{rounded_hull, star_body, SupportSolid};
use crate::trajectory::Trajectory;
use crate::tube::{sweep, SweptSurface};
use crate::wavelet::{self, WaveletBands};
use rustfft::num_complex::Complex64;

/// Geometry derived from one coefficient sequence.
#[derive(Clone, Debug)]
pub struct Branch {
    /// Signal rebuilt from the filtered coefficients, truncated to the input length.
    pub reconstruction: Vec<f64>,
    pub trajectory: Trajectory,
    pub tube: SweptSurface,
    pub rounded_hull: SupportSolid,
    pub star_body: Mesh,
}

/// Output of [`build`].
#[derive(Clone, Debug)]
pub struct Trajectoids {
    pub signal: Signal,
    pub spectrum: Spectrum,
    pub filtered_spectrum: Vec<Complex64>,
    pub wavelet_bands: WaveletBands,
    pub filtered_bands: WaveletBands,
    pub spectral: Branch,
    pub wavelet: Branch,
}

fn solids(
    trajectory: Trajectory,
    reconstruction: Vec<f64>,
    directions: &DirectionSet,
    config: &TrajectoidConfig,
) -> Result<Branch> {
    let tube = sweep(&trajectory, config.tube.radius, config.tube.ring_points)?;
    let hull = rounded_hull(trajectory.points(), config.mesh.hull_radius, directions)?;
    let star = star_body(trajectory.points(), config.mesh.quantile, directions)?;
    Ok(Branch {
        reconstruction,
        trajectory,
        tube,
        rounded_hull: hull,
        star_body: star,
    })
}

fn spectral_branch(
    signal: &Signal,
    directions: &DirectionSet,
    config: &TrajectoidConfig,
) -> Result<(Spectrum, Vec<Complex64>, Branch)> {
    let spectrum = spectral::decompose(signal);
    let filtered = spectral::filter(
        spectrum.frequencies(),
        spectrum.coefficients(),
        config.spectral.band,
        config.spectral.magnitude_threshold,
    )?;
    let reconstruction = spectral::reconstruct(&filtered);
    let trajectory = Trajectory::from_complex(&filtered);
    let branch = solids(trajectory, reconstruction, directions, config)?;
    Ok((spectrum, filtered, branch))
}

fn wavelet_branch(
    signal: &Signal,
    directions: &DirectionSet,
    config: &TrajectoidConfig,
) -> Result<(WaveletBands, WaveletBands, Branch)> {
    let kernel = config.wavelet.wavelet()?;
    let bands = wavelet::decompose(signal.samples(), kernel, config.wavelet.level)?;
    let filtered = bands.filter(&config.wavelet.levels_to_keep);
    let mut reconstruction = filtered.reconstruct(kernel)?;
    reconstruction.truncate(signal.len());
    let trajectory = Trajectory::from_real(&filtered.concatenated());
    let branch = solids(trajectory, reconstruction, directions, config)?;
    Ok((bands, filtered, branch))
}

/// Runs the spectral and wavelet branches side by side.
///
/// Both branches share one direction set, so their solids have identical face
/// lists and can be compared vertex by vertex.
pub fn build(signal: &Signal, config: &TrajectoidConfig) -> Result<Trajectoids> {
    config.validate()?;
    let directions = DirectionSet::icosphere(config.mesh.subdivisions);

    let (spectral, wavelet) = rayon::join(
        || spectral_branch(signal, &directions, config),
        || wavelet_branch(signal, &directions, config),
    );
    let (spectrum, filtered_spectrum, spectral) = spectral?;
    let (wavelet_bands, filtered_bands, wavelet) = wavelet?;

    log::info!(
        "built trajectoids from {} samples: {} spectral points, {} wavelet points \
         over {} bands, {} directions",
        signal.len(),
        spectral.trajectory.len(),
        wavelet.trajectory.len(),
        wavelet_bands.len(),
        directions.len()
    );

    Ok(Trajectoids {
        signal: signal.clone(),
        spectrum,
        filtered_spectrum,
        wavelet_bands,
        filtered_bands,
        spectral,
        wavelet,
    })
}

impl Trajectoids {
    /// Original spectrum next to the filtered one.
    pub fn spectrum_figure(&self) -> Result<Figure> {
        let filtered = Spectrum::from_parts(
            self.spectrum.frequencies().to_vec(),
            self.filtered_spectrum.clone(),
        )?;
        Ok(Figure::new("Magnitude spectrum")
            .with_series(Series::magnitude_spectrum(
                "Original",
                Color::BLUE.with_alpha(0.4),
                &self.spectrum,
            )?)
            .with_series(Series::magnitude_spectrum("Filtered", Color::BLUE, &filtered)?))
    }

    /// Both reconstructions over the time axis of the input.
    pub fn reconstruction_figure(&self) -> Result<Figure> {
        Ok(Figure::new("Overlay: Reconstructed DFT vs DWT")
            .with_series(Series::over_time(
                "Reconstructed DFT",
                Color::BLUE,
                &self.signal,
                &self.spectral.reconstruction,
            )?)
            .with_series(Series::over_time(
                "Reconstructed DWT",
                Color::ORANGE,
                &self.signal,
                &self.wavelet.reconstruction,
            )?))
    }

    pub fn hull_figure(&self) -> Figure {
        Figure::new("Overlay: Rounded Convex Hull Trajectoids")
            .with_mesh(MeshLayer::new(
                "DFT Rounded Hull",
                Color::BLUE,
                self.spectral.rounded_hull.mesh().clone(),
            ))
            .with_mesh(MeshLayer::new(
                "DWT Rounded Hull",
                Color::ORANGE,
                self.wavelet.rounded_hull.mesh().clone(),
            ))
    }

    pub fn star_figure(&self) -> Figure {
        Figure::new("Overlay: Star/Support Trajectoids")
            .with_mesh(MeshLayer::new(
                "DFT Star Body",
                Color::BLUE,
                self.spectral.star_body.clone(),
            ))
            .with_mesh(MeshLayer::new(
                "DWT Star Body",
                Color::ORANGE,
                self.wavelet.star_body.clone(),
            ))
    }

    pub fn tube_figure(&self) -> Figure {
        Figure::new("Overlay: Swept Trajectories")
            .with_mesh(MeshLayer::new("DFT Tube", Color::BLUE, self.spectral.tube.to_mesh()))
            .with_mesh(MeshLayer::new("DWT Tube", Color::ORANGE, self.wavelet.tube.to_mesh()))
    }
}
