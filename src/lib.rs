//! # trajectoid
//!
//! `trajectoid` turns a sampled signal into 3-D geometry, in Rust as well as compiled to
//! WebAssembly (WASM). Filtered Fourier or wavelet coefficients become a curve, and the curve
//! becomes a tube and two solids sampled along the directions of an icosphere.
//!
//! ## Features
//!
//! - **Spectral and wavelet branches**: FFT decomposition with band and magnitude filtering, and
//!   multilevel discrete wavelet decomposition (`haar`, `db2`, `db3`, `db4`, `db8`, `sym4`) with
//!   band zeroing.
//! - **Support solids**: star bodies from projection quantiles and rounded convex hulls from the
//!   exact support function of a dilated hull, both sharing one direction set topology.
//! - **Tubes**: circular cross-sections swept along the curve with a per-sample frame.
//! - **WASM-first**: Built with `wasm-bindgen`; support sampling runs on `rayon` threads.
//!
//! ## Example
//!
//! See the `demos/` directory for an SVG overlay of the reconstructions and a GLTF export of the
//! solids.
//!
//! ## Main Interface
//!
//! The primary entry point is [`build`], which runs both branches for a [`Signal`] under a
//! [`TrajectoidConfig`].

pub mod config;
mod error;
pub mod hull;
pub mod icosphere;
mod mesh;
pub mod overlay;
pub mod pipeline;
mod signal;
pub mod spectral;
pub mod support;
mod trajectory;
pub mod tube;
mod vector;
pub mod wasm;
pub mod wavelet;

pub use config::TrajectoidConfig;
pub use error::Result;
pub use error::TrajectoidError;
pub use hull::ConvexHull;
pub use icosphere::DirectionSet;
pub use mesh::Mesh;
pub use overlay::Color;
pub use overlay::Figure;
pub use overlay::MeshLayer;
pub use overlay::Series;
pub use pipeline::build;
pub use pipeline::Trajectoids;
pub use signal::Signal;
pub use spectral::FrequencyBand;
pub use spectral::Spectrum;
pub use support::rounded_hull;
pub use support::star_body;
pub use support::Support;
pub use support::SupportSolid;
pub use trajectory::Trajectory;
pub use trajectory::NORMALIZATION_EPSILON;
pub use tube::sweep;
pub use tube::SweptSurface;
pub use wavelet::Wavelet;
pub use wavelet::WaveletBands;
