//! Color space conversion
//!
//! RGB <-> HSV conversion at two granularities: single pixels ([`rgb_to_hsv`]
//! / [`hsv_to_rgb`]) and whole rasters split into planes ([`split_hsv`] /
//! [`merge_hsv`]).
//!
//! The plane form exists for luminance-isolated processing: contrast
//! enhancement equalizes the value plane while the hue and saturation planes
//! are carried through untouched, so chroma is never distorted.

use crate::error::{ColorError, ColorResult};
use rasterprep_core::Raster;

/// HSV color representation
///
/// - `h`: Hue in range [0.0, 1.0) (1.0 wraps to 0.0)
/// - `s`: Saturation in range [0.0, 1.0]
/// - `v`: Value in range [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    /// Create a new HSV color
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

/// An RGB raster decomposed into HSV planes.
///
/// Hue and saturation are kept at full float precision; the value plane is
/// 8-bit so it can be fed straight into histogram-based operations. A raster
/// reassembled from planes with an untouched value plane reproduces the
/// original RGB samples.
#[derive(Debug, Clone)]
pub struct HsvPlanes {
    width: u32,
    height: u32,
    hue: Vec<f32>,
    saturation: Vec<f32>,
    value: Vec<u8>,
}

impl HsvPlanes {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Hue plane, row-major, [0.0, 1.0).
    pub fn hue(&self) -> &[f32] {
        &self.hue
    }

    /// Saturation plane, row-major, [0.0, 1.0].
    pub fn saturation(&self) -> &[f32] {
        &self.saturation
    }

    /// Value plane, row-major, 8-bit.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Replace the value plane.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Core`] wrapping a length error if `value` does
    /// not cover every pixel.
    pub fn set_value(&mut self, value: Vec<u8>) -> ColorResult<()> {
        let expected = self.width as usize * self.height as usize;
        if value.len() != expected {
            return Err(ColorError::Core(rasterprep_core::Error::BadBufferLength {
                expected,
                actual: value.len(),
            }));
        }
        self.value = value;
        Ok(())
    }
}

/// Convert RGB values to HSV.
///
/// Returns HSV with all components in range [0.0, 1.0].
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };

    let h = if delta == 0.0 {
        0.0
    } else if max == rf {
        ((gf - bf) / delta).rem_euclid(6.0) / 6.0
    } else if max == gf {
        ((bf - rf) / delta + 2.0) / 6.0
    } else {
        ((rf - gf) / delta + 4.0) / 6.0
    };

    Hsv { h, s, v }
}

/// Convert HSV values to RGB.
///
/// Input HSV should have all components in range [0.0, 1.0].
pub fn hsv_to_rgb(hsv: Hsv) -> (u8, u8, u8) {
    let h = hsv.h.rem_euclid(1.0) * 6.0;
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);

    let sector = h.floor() as u32 % 6;
    let f = h - h.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (rf, gf, bf) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (
        (rf * 255.0 + 0.5) as u8,
        (gf * 255.0 + 0.5) as u8,
        (bf * 255.0 + 0.5) as u8,
    )
}

/// Decompose a 3-channel raster into HSV planes.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedChannels`] for non-RGB input.
pub fn split_hsv(raster: &Raster) -> ColorResult<HsvPlanes> {
    if raster.channels() != 3 {
        return Err(ColorError::UnsupportedChannels {
            expected: "3 (RGB)",
            actual: raster.channels(),
        });
    }

    let n = raster.pixel_count();
    let mut hue = Vec::with_capacity(n);
    let mut saturation = Vec::with_capacity(n);
    let mut value = Vec::with_capacity(n);

    for px in raster.pixels() {
        let hsv = rgb_to_hsv(px[0], px[1], px[2]);
        hue.push(hsv.h);
        saturation.push(hsv.s);
        // v is max(r, g, b) / 255, so this recovers the exact 8-bit maximum
        value.push(px[0].max(px[1]).max(px[2]));
    }

    Ok(HsvPlanes {
        width: raster.width(),
        height: raster.height(),
        hue,
        saturation,
        value,
    })
}

/// Reassemble HSV planes into a 3-channel RGB raster.
pub fn merge_hsv(planes: &HsvPlanes) -> ColorResult<Raster> {
    let mut data = Vec::with_capacity(planes.value.len() * 3);
    for i in 0..planes.value.len() {
        let (r, g, b) = hsv_to_rgb(Hsv {
            h: planes.hue[i],
            s: planes.saturation[i],
            v: planes.value[i] as f32 / 255.0,
        });
        data.push(r);
        data.push(g);
        data.push(b);
    }
    Raster::from_raw(planes.width, planes.height, 3, data).map_err(ColorError::Core)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hsv_primaries() {
        let red = rgb_to_hsv(255, 0, 0);
        assert!((red.h - 0.0).abs() < 1e-6);
        assert!((red.s - 1.0).abs() < 1e-6);
        assert!((red.v - 1.0).abs() < 1e-6);

        let green = rgb_to_hsv(0, 255, 0);
        assert!((green.h - 1.0 / 3.0).abs() < 1e-6);

        let blue = rgb_to_hsv(0, 0, 255);
        assert!((blue.h - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_rgb_to_hsv_grays_have_zero_saturation() {
        for v in [0u8, 1, 128, 255] {
            let hsv = rgb_to_hsv(v, v, v);
            assert_eq!(hsv.h, 0.0);
            assert_eq!(hsv.s, 0.0);
            assert!((hsv.v - v as f32 / 255.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_hsv_round_trip_exact() {
        // Every sector plus grays and near-degenerate chroma
        let samples: [(u8, u8, u8); 10] = [
            (255, 0, 0),
            (255, 128, 0),
            (128, 255, 0),
            (0, 255, 64),
            (0, 64, 255),
            (128, 0, 255),
            (17, 33, 201),
            (200, 200, 200),
            (0, 0, 0),
            (254, 255, 253),
        ];
        for (r, g, b) in samples {
            let hsv = rgb_to_hsv(r, g, b);
            let (nr, ng, nb) = hsv_to_rgb(hsv);
            assert_eq!((nr, ng, nb), (r, g, b), "round trip failed for {:?}", (r, g, b));
        }
    }

    #[test]
    fn test_split_merge_identity() {
        let data: Vec<u8> = (0u8..=255).cycle().take(8 * 4 * 3).collect();
        let raster = Raster::from_raw(8, 4, 3, data).unwrap();
        let planes = split_hsv(&raster).unwrap();
        let rebuilt = merge_hsv(&planes).unwrap();
        assert_eq!(rebuilt, raster);
    }

    #[test]
    fn test_split_hsv_rejects_grayscale() {
        let gray = Raster::new(4, 4, 1).unwrap();
        assert!(matches!(
            split_hsv(&gray),
            Err(ColorError::UnsupportedChannels { actual: 1, .. })
        ));
    }

    #[test]
    fn test_set_value_length_check() {
        let raster = Raster::new(4, 4, 3).unwrap();
        let mut planes = split_hsv(&raster).unwrap();
        assert!(planes.set_value(vec![0; 16]).is_ok());
        assert!(planes.set_value(vec![0; 15]).is_err());
    }

    #[test]
    fn test_value_plane_is_channel_max() {
        let raster = Raster::from_raw(2, 1, 3, vec![10, 250, 30, 5, 5, 5]).unwrap();
        let planes = split_hsv(&raster).unwrap();
        assert_eq!(planes.value(), &[250, 5]);
    }
}
