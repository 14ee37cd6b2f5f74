//! rasterprep - batch normalization of raster images
//!
//! rasterprep evens out contrast, color and brightness across sets of
//! photographs so they read consistently, for example scans or field
//! photos taken under varying light.
//!
//! # Overview
//!
//! The pipeline composes three independent stages:
//!
//! - Contrast-limited adaptive histogram equalization on the HSV value
//!   plane, preserving hue and saturation
//! - Per-channel histogram matching against a reference image
//! - Iterative gamma correction of low-contrast images
//!
//! # Example
//!
//! ```
//! use rasterprep::{Raster, pipeline::{ImagePipeline, PipelineOptions}};
//!
//! let image = Raster::new(640, 480, 3).unwrap();
//! let pipeline = ImagePipeline::new(PipelineOptions {
//!     contrast: true,
//!     color_match: None,
//!     gamma: true,
//! });
//! let result = pipeline.process(image);
//! assert_eq!(result.corrected.width(), 640);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rasterprep_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rasterprep_color as color;
pub use rasterprep_filter as filter;
pub use rasterprep_io as io;
pub use rasterprep_pipeline as pipeline;
