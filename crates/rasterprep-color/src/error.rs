//! Error types for rasterprep-color

use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterprep_core::Error),

    /// Source and reference shapes are incompatible
    #[error("shape mismatch: source has {source_channels} channels, reference has {reference_channels}")]
    ShapeMismatch {
        source_channels: u32,
        reference_channels: u32,
    },

    /// Unsupported channel count for this operation
    #[error("unsupported channels: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: &'static str, actual: u32 },
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
