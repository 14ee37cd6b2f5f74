//! Histogram matching (histogram specification)
//!
//! Remaps an image's per-channel intensity distribution onto a reference
//! image's distribution: for every source level, find the reference level
//! whose cumulative share is closest, then apply the 256-entry remapping to
//! the whole channel.
//!
//! Channels are matched independently. Joint matching would preserve hue
//! relationships better, but per-channel matching is the established
//! behavior for exposure/tone normalization across a dataset and is kept
//! deliberately.

use crate::error::{ColorError, ColorResult};
use rasterprep_core::{Histogram, Raster};

/// 256-entry per-channel remapping table.
type MatchLut = [u8; 256];

/// Build the CDF-matching LUT from a source histogram to a reference
/// histogram.
///
/// The reference CDF is non-decreasing, so the closest entry is found with
/// a binary search and a neighbor comparison.
fn match_lut(source: &Histogram, reference: &Histogram) -> MatchLut {
    let src_cdf = source.cdf();
    let ref_cdf = reference.cdf();

    let mut lut = [0u8; 256];
    for (level, entry) in lut.iter_mut().enumerate() {
        let q = src_cdf[level];
        let upper = ref_cdf.partition_point(|&p| p < q);
        *entry = if upper == 0 {
            0
        } else if upper >= 256 {
            255
        } else {
            // Pick whichever neighbor is closer in CDF space
            let below = upper - 1;
            if (q - ref_cdf[below]).abs() <= (ref_cdf[upper] - q).abs() {
                below as u8
            } else {
                upper as u8
            }
        };
    }
    lut
}

/// Remap `source` so each channel's intensity distribution matches
/// `reference`'s.
///
/// Returns a new raster; `source` is left untouched.
///
/// # Errors
///
/// Returns [`ColorError::ShapeMismatch`] if the channel counts differ.
/// Width and height may differ freely; only the distributions matter.
pub fn match_histograms(source: &Raster, reference: &Raster) -> ColorResult<Raster> {
    if source.channels() != reference.channels() {
        return Err(ColorError::ShapeMismatch {
            source_channels: source.channels(),
            reference_channels: reference.channels(),
        });
    }

    let channels = source.channels();
    let mut luts = Vec::with_capacity(channels as usize);
    for c in 0..channels {
        let src_hist = source.channel_histogram(c)?;
        let ref_hist = reference.channel_histogram(c)?;
        luts.push(match_lut(&src_hist, &ref_hist));
    }

    let mut out = source.clone();
    for px in out.pixels_mut() {
        for (c, sample) in px.iter_mut().enumerate() {
            *sample = luts[c][*sample as usize];
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgb(w: u32, h: u32) -> Raster {
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for y in 0..h {
            for x in 0..w {
                let v = ((x + y * w) * 255 / (w * h - 1).max(1)) as u8;
                data.extend_from_slice(&[v, v / 2, 255 - v]);
            }
        }
        Raster::from_raw(w, h, 3, data).unwrap()
    }

    #[test]
    fn test_match_lut_identical_histograms_is_identity() {
        let hist = Histogram::from_samples(0u8..=255);
        let lut = match_lut(&hist, &hist);
        for (i, &v) in lut.iter().enumerate() {
            assert_eq!(v as usize, i);
        }
    }

    #[test]
    fn test_match_lut_monotone() {
        let src = Histogram::from_samples((0u8..=127).chain(0..=127));
        let reference = Histogram::from_samples(128u8..=255);
        let lut = match_lut(&src, &reference);
        for i in 1..256 {
            assert!(lut[i] >= lut[i - 1], "not monotone at {i}");
        }
        // Everything must land in the reference's populated range
        assert!(lut[0] >= 128);
    }

    #[test]
    fn test_self_match_near_idempotent() {
        let raster = gradient_rgb(16, 16);
        let matched = match_histograms(&raster, &raster).unwrap();
        assert_eq!(matched.width(), raster.width());
        assert_eq!(matched.channels(), 3);
        // Matching an image against itself may shift a level by quantization
        // but the per-channel histograms stay statistically close.
        for c in 0..3 {
            let before = raster.channel_histogram(c).unwrap().cdf();
            let after = matched.channel_histogram(c).unwrap().cdf();
            let max_gap = before
                .iter()
                .zip(after.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0f64, f64::max);
            assert!(max_gap < 0.05, "channel {c} CDF drifted by {max_gap}");
        }
    }

    #[test]
    fn test_dark_image_matched_to_bright_reference_brightens() {
        let dark = Raster::from_raw(4, 1, 3, vec![10; 12]).unwrap();
        let bright = Raster::from_raw(4, 1, 3, vec![200; 12]).unwrap();
        let matched = match_histograms(&dark, &bright).unwrap();
        assert!(matched.data().iter().all(|&v| v == 200));
    }

    #[test]
    fn test_shape_mismatch_leaves_source_untouched() {
        let source = gradient_rgb(8, 8);
        let snapshot = source.clone();
        let gray = Raster::new(8, 8, 1).unwrap();
        assert!(matches!(
            match_histograms(&source, &gray),
            Err(ColorError::ShapeMismatch {
                source_channels: 3,
                reference_channels: 1
            })
        ));
        assert_eq!(source, snapshot);
    }

    #[test]
    fn test_reference_dimensions_may_differ() {
        let source = gradient_rgb(8, 8);
        let reference = gradient_rgb(5, 3);
        assert!(match_histograms(&source, &reference).is_ok());
    }
}
