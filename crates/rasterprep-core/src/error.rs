//! Error types for rasterprep-core
//!
//! Provides a unified error type for operations on raster buffers.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// rasterprep-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}x{channels}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        channels: u32,
    },

    /// Sample buffer length does not match the declared shape
    #[error("bad buffer length: expected {expected}, got {actual}")]
    BadBufferLength { expected: usize, actual: usize },

    /// Channel index out of range
    #[error("channel out of range: {channel} >= {channels}")]
    ChannelOutOfRange { channel: u32, channels: u32 },
}

/// Result type alias for rasterprep-core operations
pub type Result<T> = std::result::Result<T, Error>;
