//! rasterprep-color - Color processing for the rasterprep normalizer
//!
//! Two concerns live here:
//!
//! - [`colorspace`] - RGB <-> HSV conversion, including the plane
//!   decomposition used for luminance-isolated contrast work
//! - [`histmatch`] - per-channel histogram matching against a reference
//!   image

pub mod colorspace;
pub mod error;
pub mod histmatch;

pub use colorspace::{Hsv, HsvPlanes, hsv_to_rgb, merge_hsv, rgb_to_hsv, split_hsv};
pub use error::{ColorError, ColorResult};
pub use histmatch::match_histograms;
