//! Adaptive gamma correction
//!
//! The exposure stage of the pipeline: a low-contrast classifier drives an
//! iterative power-law remap. Starting from gamma 1.0, the gamma value is
//! raised in fixed steps and the transform is recomputed from the original
//! samples at the accumulated gamma until the classifier accepts the result
//! or the iteration cap is hit.
//!
//! Recomputing from the original (instead of chaining transforms on already
//! transformed output) keeps rounding error from compounding across
//! iterations.

use crate::error::{FilterError, FilterResult};
use rasterprep_core::Raster;

/// Gamma increment applied per iteration.
pub const GAMMA_STEP: f32 = 0.2;

/// Iteration cap for the correction loop.
///
/// A constant-intensity image never leaves the low-contrast class, so the
/// loop needs a liveness bound; exceeding it fails with
/// [`FilterError::GammaConvergence`].
pub const MAX_ITERATIONS: u32 = 50;

/// Classifier threshold: fraction of the full 0-255 scale the luma spread
/// must reach for an image to count as having usable contrast.
pub const LOW_CONTRAST_THRESHOLD: f64 = 0.05;

/// A 256-entry power-law lookup table.
pub type GammaLut = [u8; 256];

/// Build the power-law LUT `out = 255 * (in / 255)^gamma` (gain 1.0).
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `gamma` is not positive.
pub fn gamma_lut(gamma: f32) -> FilterResult<GammaLut> {
    if gamma <= 0.0 {
        return Err(FilterError::InvalidParameters("gamma must be > 0.0".into()));
    }
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        let x = i as f32 / 255.0;
        *entry = (255.0 * x.powf(gamma) + 0.5).clamp(0.0, 255.0) as u8;
    }
    Ok(lut)
}

/// Apply a power-law gamma remap to every channel of a raster.
///
/// Returns a new raster; the input is left untouched.
pub fn apply_gamma(raster: &Raster, gamma: f32) -> FilterResult<Raster> {
    let lut = gamma_lut(gamma)?;
    let mut out = raster.clone();
    for sample in out.data_mut() {
        *sample = lut[*sample as usize];
    }
    Ok(out)
}

/// Classify a raster as low-contrast.
///
/// The spread between the 1st and 99th luma percentiles is compared against
/// `threshold` as a fraction of the full 8-bit scale. Percentiles rather
/// than the raw min/max keep a handful of outlier pixels from masking a
/// flat exposure.
///
/// # Errors
///
/// Returns [`FilterError::InvalidImage`] for a raster with no samples.
pub fn is_low_contrast(raster: &Raster, threshold: f64) -> FilterResult<bool> {
    if raster.data().is_empty() {
        return Err(FilterError::InvalidImage("no samples to classify"));
    }
    let hist = raster.luma_histogram();
    let low = hist.percentile(0.01);
    let high = hist.percentile(0.99);
    let spread = (high as f64 - low as f64) / 255.0;
    Ok(spread < threshold)
}

/// Correct a low-contrast raster by iteratively raising gamma.
///
/// A raster that already classifies as having usable contrast is returned
/// unchanged (zero iterations, gamma stays 1.0). Otherwise gamma is raised
/// by [`GAMMA_STEP`] per iteration and the remap is recomputed from the
/// input at the accumulated gamma until the classifier accepts the result.
///
/// # Errors
///
/// Returns [`FilterError::GammaConvergence`] if [`MAX_ITERATIONS`] remaps
/// never produce an acceptable result (a constant-intensity raster is the
/// canonical case), and [`FilterError::InvalidImage`] for an empty buffer.
pub fn correct(raster: &Raster) -> FilterResult<Raster> {
    if !is_low_contrast(raster, LOW_CONTRAST_THRESHOLD)? {
        return Ok(raster.clone());
    }

    let mut gamma = 1.0f32;
    for _ in 0..MAX_ITERATIONS {
        gamma += GAMMA_STEP;
        let corrected = apply_gamma(raster, gamma)?;
        if !is_low_contrast(&corrected, LOW_CONTRAST_THRESHOLD)? {
            return Ok(corrected);
        }
    }
    Err(FilterError::GammaConvergence {
        cap: MAX_ITERATIONS,
    })
}
