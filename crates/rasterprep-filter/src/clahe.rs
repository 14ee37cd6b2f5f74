//! Contrast-limited adaptive histogram equalization
//!
//! The contrast stage of the pipeline: the image is converted to HSV, the
//! value plane is equalized tile-by-tile with a clip limit, and the result
//! is recombined with the untouched hue and saturation planes. Operating on
//! the value plane alone corrects lighting without distorting chroma;
//! tiling makes the equalization adapt to local rather than global
//! statistics.
//!
//! Reference: Zuiderveld (1994), "Contrast Limited Adaptive Histogram
//! Equalization", Graphics Gems IV.

use crate::error::{FilterError, FilterResult};
use rasterprep_color::{merge_hsv, split_hsv};
use rasterprep_core::Raster;

/// Tiles per axis for the fixed enhancement grid.
pub const TILE_GRID: u32 = 8;

/// Contrast amplification limit, as a multiple of a uniform bin count.
pub const CLIP_LIMIT: f32 = 3.0;

/// Enhance local contrast of a 3-channel raster.
///
/// Applies CLAHE (8x8 tile grid, clip limit 3.0) to the HSV value plane.
///
/// # Errors
///
/// Returns [`FilterError::UnsupportedChannels`] for non-RGB input; never
/// fails on a well-formed 3-channel raster.
pub fn enhance(raster: &Raster) -> FilterResult<Raster> {
    if raster.channels() != 3 {
        return Err(FilterError::UnsupportedChannels {
            expected: "3 (RGB)",
            actual: raster.channels(),
        });
    }

    let mut planes = split_hsv(raster)?;
    let equalized = clahe_plane(
        planes.value(),
        raster.width(),
        raster.height(),
        TILE_GRID,
        CLIP_LIMIT,
    )?;
    planes.set_value(equalized)?;
    Ok(merge_hsv(&planes)?)
}

/// Run CLAHE over a single 8-bit plane.
///
/// `grid` is the number of tiles per axis; `clip_limit` is the histogram
/// clip threshold as a multiple of the uniform bin count (counts beyond it
/// are redistributed evenly, which tames amplification in near-uniform
/// tiles). Each output pixel bilinearly interpolates between the LUTs of
/// the four nearest tile centers.
///
/// # Errors
///
/// Returns [`FilterError::InvalidImage`] for an empty plane and
/// [`FilterError::InvalidParameters`] for a zero grid or non-positive clip
/// limit.
pub fn clahe_plane(
    plane: &[u8],
    width: u32,
    height: u32,
    grid: u32,
    clip_limit: f32,
) -> FilterResult<Vec<u8>> {
    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 || plane.len() != w * h {
        return Err(FilterError::InvalidImage("empty or misshapen plane"));
    }
    if grid == 0 {
        return Err(FilterError::InvalidParameters("grid must be >= 1".into()));
    }
    if clip_limit <= 0.0 {
        return Err(FilterError::InvalidParameters(
            "clip limit must be > 0.0".into(),
        ));
    }

    // Tile size from the grid; small images collapse to fewer tiles.
    let tile_w = w.div_ceil(grid as usize);
    let tile_h = h.div_ceil(grid as usize);
    let cols = w.div_ceil(tile_w);
    let rows = h.div_ceil(tile_h);

    // Per-tile LUTs from clipped histograms.
    let mut tile_luts = vec![[0u8; 256]; cols * rows];
    for ty in 0..rows {
        for tx in 0..cols {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            let x1 = (x0 + tile_w).min(w);
            let y1 = (y0 + tile_h).min(h);
            let tile_pixels = (x1 - x0) * (y1 - y0);

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[plane[y * w + x] as usize] += 1;
                }
            }

            clip_histogram(&mut hist, tile_pixels, clip_limit);
            tile_luts[ty * cols + tx] = equalization_lut(&hist, tile_pixels);
        }
    }

    // Remap each pixel, interpolating between the four surrounding tiles.
    let tile_cx = |tx: usize| (tx as f32 + 0.5) * tile_w as f32;
    let tile_cy = |ty: usize| (ty as f32 + 0.5) * tile_h as f32;

    let mut out = vec![0u8; w * h];
    for y in 0..h {
        let fy = (y as f32 / tile_h as f32) - 0.5;
        let ty0 = (fy.floor().max(0.0)) as usize;
        let ty1 = (ty0 + 1).min(rows - 1);
        let ay = if ty0 == ty1 {
            0.0
        } else {
            ((y as f32 - tile_cy(ty0)) / (tile_cy(ty1) - tile_cy(ty0))).clamp(0.0, 1.0)
        };

        for x in 0..w {
            let fx = (x as f32 / tile_w as f32) - 0.5;
            let tx0 = (fx.floor().max(0.0)) as usize;
            let tx1 = (tx0 + 1).min(cols - 1);
            let ax = if tx0 == tx1 {
                0.0
            } else {
                ((x as f32 - tile_cx(tx0)) / (tile_cx(tx1) - tile_cx(tx0))).clamp(0.0, 1.0)
            };

            let v = plane[y * w + x] as usize;
            let v00 = tile_luts[ty0 * cols + tx0][v] as f32;
            let v10 = tile_luts[ty0 * cols + tx1][v] as f32;
            let v01 = tile_luts[ty1 * cols + tx0][v] as f32;
            let v11 = tile_luts[ty1 * cols + tx1][v] as f32;

            let val = v00 * (1.0 - ax) * (1.0 - ay)
                + v10 * ax * (1.0 - ay)
                + v01 * (1.0 - ax) * ay
                + v11 * ax * ay;
            out[y * w + x] = (val + 0.5).clamp(0.0, 255.0) as u8;
        }
    }

    Ok(out)
}

/// Clip histogram bins at `clip_limit` times the uniform bin count and
/// redistribute the excess evenly.
fn clip_histogram(hist: &mut [u32; 256], tile_pixels: usize, clip_limit: f32) {
    let clip_val = (((tile_pixels as f32 / 256.0) * clip_limit).ceil() as u32).max(1);

    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > clip_val {
            excess += *bin - clip_val;
            *bin = clip_val;
        }
    }

    let per_bin = excess / 256;
    let remainder = (excess % 256) as usize;
    for (i, bin) in hist.iter_mut().enumerate() {
        *bin += per_bin;
        if i < remainder {
            *bin += 1;
        }
    }
}

/// Build the equalization LUT for one tile.
///
/// Uses the standard CDF mapping with the first populated bin pinned to 0.
/// A degenerate tile (all mass in one bin after clipping) keeps the
/// identity mapping.
fn equalization_lut(hist: &[u32; 256], tile_pixels: usize) -> [u8; 256] {
    let mut cdf = [0u32; 256];
    cdf[0] = hist[0];
    for i in 1..256 {
        cdf[i] = cdf[i - 1] + hist[i];
    }

    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);
    let denom = tile_pixels as f32 - cdf_min as f32;

    let mut lut = [0u8; 256];
    if denom <= 0.0 {
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }
    for i in 0..256 {
        let val = (cdf[i] as f32 - cdf_min as f32) / denom * 255.0;
        lut[i] = (val + 0.5).clamp(0.0, 255.0) as u8;
    }
    lut
}
