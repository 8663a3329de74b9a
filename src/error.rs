use thiserror::Error;

/// Errors raised by the trajectoid pipeline.
///
/// Too few points for a hull and zero-range normalisation are recovered inside
/// the pipeline and never show up here.
#[derive(Debug, Error)]
pub enum TrajectoidError {
    /// The wavelet name does not match a supported kernel.
    #[error("unknown wavelet kernel `{0}`")]
    InvalidKernel(String),

    /// Paired arrays do not have consistent lengths.
    #[error("shape mismatch in {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl TrajectoidError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        TrajectoidError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        TrajectoidError::ShapeMismatch {
            what,
            expected,
            actual,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrajectoidError>;
