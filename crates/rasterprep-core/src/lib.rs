//! rasterprep-core - Basic data structures for image normalization
//!
//! This crate provides the fundamental types used throughout the rasterprep
//! workspace:
//!
//! - [`Raster`] - interleaved 8-bit image buffer, the common currency
//!   between correction stages
//! - [`Histogram`] - 256-bin intensity histogram with CDF and percentile
//!   queries
//!
//! Everything here is format-agnostic; decoding and encoding live in
//! `rasterprep-io`, and the correction algorithms live in
//! `rasterprep-color` and `rasterprep-filter`.

pub mod error;
pub mod histogram;
pub mod raster;

pub use error::{Error, Result};
pub use histogram::Histogram;
pub use raster::{Raster, luma};
