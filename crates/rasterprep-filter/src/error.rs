//! Error types for rasterprep-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterprep_core::Error),

    /// Color conversion error
    #[error("color error: {0}")]
    Color(#[from] rasterprep_color::ColorError),

    /// Unsupported channel count for this operation
    #[error("unsupported channels: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: &'static str, actual: u32 },

    /// Malformed or empty image
    #[error("invalid image: {0}")]
    InvalidImage(&'static str),

    /// Gamma correction failed to converge within the iteration cap
    #[error("gamma correction did not converge within {cap} iterations")]
    GammaConvergence { cap: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
