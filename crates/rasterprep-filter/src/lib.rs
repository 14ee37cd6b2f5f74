//! rasterprep-filter - Pixel-level correction filters
//!
//! The two algorithmic stages of the normalization pipeline that are not
//! reference-driven:
//!
//! - [`clahe`] - contrast-limited adaptive histogram equalization on the
//!   HSV value plane
//! - [`gamma`] - low-contrast classification and iterative power-law gamma
//!   correction

pub mod clahe;
pub mod error;
pub mod gamma;

pub use clahe::{CLIP_LIMIT, TILE_GRID, clahe_plane, enhance};
pub use error::{FilterError, FilterResult};
pub use gamma::{
    GAMMA_STEP, LOW_CONTRAST_THRESHOLD, MAX_ITERATIONS, apply_gamma, correct, gamma_lut,
    is_low_contrast,
};
