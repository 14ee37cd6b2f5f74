//! Raster - the in-memory image buffer
//!
//! `Raster` is the common currency between every stage of the correction
//! pipeline: a decoded image with 8-bit samples stored interleaved in
//! row-major order (`data[(y * width + x) * channels + c]`).
//!
//! # Invariants
//!
//! - `data.len() == width * height * channels`, checked at construction
//! - Dimensions and channel count never change after construction
//! - 3-channel rasters are in RGB order
//!
//! # Ownership model
//!
//! A `Raster` exclusively owns its samples. Correction stages either mutate
//! a buffer they own or return a fresh buffer that replaces the caller's;
//! buffers are never aliased across stages.

use crate::error::{Error, Result};

/// Interleaved 8-bit raster image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Create a zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if any dimension is zero or the
    /// channel count is not 1 or 3.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        Self::validate_shape(width, height, channels)?;
        let len = width as usize * height as usize * channels as usize;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![0u8; len],
        })
    }

    /// Create a raster from an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a bad shape and
    /// [`Error::BadBufferLength`] if `data` does not match it.
    pub fn from_raw(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        Self::validate_shape(width, height, channels)?;
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::BadBufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    fn validate_shape(width: u32, height: u32, channels: u32) -> Result<()> {
        if width == 0 || height == 0 || !matches!(channels, 1 | 3) {
            return Err(Error::InvalidDimensions {
                width,
                height,
                channels,
            });
        }
        Ok(())
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel (1 for grayscale, 3 for RGB).
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Borrow the interleaved sample buffer.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the interleaved sample buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the raster, returning its sample buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Get one sample, or `None` if any coordinate is out of bounds.
    pub fn sample(&self, x: u32, y: u32, channel: u32) -> Option<u8> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return None;
        }
        Some(self.data[self.sample_index(x, y, channel)])
    }

    /// Set one sample.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfRange`] for a bad channel and
    /// [`Error::InvalidDimensions`] for out-of-bounds coordinates.
    pub fn set_sample(&mut self, x: u32, y: u32, channel: u32, value: u8) -> Result<()> {
        if channel >= self.channels {
            return Err(Error::ChannelOutOfRange {
                channel,
                channels: self.channels,
            });
        }
        if x >= self.width || y >= self.height {
            return Err(Error::InvalidDimensions {
                width: x,
                height: y,
                channels: channel,
            });
        }
        let idx = self.sample_index(x, y, channel);
        self.data[idx] = value;
        Ok(())
    }

    /// Borrow the interleaved samples of one pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        &self.data[start..start + self.channels as usize]
    }

    #[inline]
    fn sample_index(&self, x: u32, y: u32, channel: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
            + channel as usize
    }

    /// Iterate over pixels as interleaved sample slices.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.channels as usize)
    }

    /// Iterate mutably over pixels as interleaved sample slices.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(self.channels as usize)
    }

    /// True if the two rasters have the same width, height, and channels.
    pub fn same_shape(&self, other: &Raster) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.channels == other.channels
    }
}

/// BT.601 luma from RGB samples.
///
/// `luma = 0.299 R + 0.587 G + 0.114 B`, computed in fixed point.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    // 0.299/0.587/0.114 scaled by 2^16
    let y = 19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32;
    ((y + (1 << 15)) >> 16) as u8
}
