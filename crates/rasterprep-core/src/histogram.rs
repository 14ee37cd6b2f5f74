//! Intensity histograms over raster channels
//!
//! 256-bin histograms are the workhorse of every correction stage:
//! equalization LUTs, CDF matching, and the low-contrast classifier all
//! start from one.

use crate::error::{Error, Result};
use crate::raster::{Raster, luma};

/// 256-bin intensity histogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Build a histogram directly from intensity samples.
    pub fn from_samples<I: IntoIterator<Item = u8>>(samples: I) -> Self {
        let mut bins = [0u64; 256];
        let mut total = 0u64;
        for s in samples {
            bins[s as usize] += 1;
            total += 1;
        }
        Self { bins, total }
    }

    /// Count in one bin.
    #[inline]
    pub fn bin(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }

    /// Total number of counted samples.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Normalized cumulative distribution, `cdf[v] = P(sample <= v)`.
    ///
    /// All entries are zero for an empty histogram.
    pub fn cdf(&self) -> [f64; 256] {
        let mut cdf = [0.0f64; 256];
        if self.total == 0 {
            return cdf;
        }
        let mut cumulative = 0u64;
        let total = self.total as f64;
        for (value, &count) in self.bins.iter().enumerate() {
            cumulative += count;
            cdf[value] = cumulative as f64 / total;
        }
        cdf
    }

    /// Smallest intensity whose cumulative share reaches `fraction`.
    ///
    /// `fraction` is clamped to [0, 1]. Returns 0 for an empty histogram.
    pub fn percentile(&self, fraction: f64) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let target = (fraction.clamp(0.0, 1.0) * self.total as f64).ceil() as u64;
        let target = target.max(1);
        let mut cumulative = 0u64;
        for (value, &count) in self.bins.iter().enumerate() {
            cumulative += count;
            if cumulative >= target {
                return value as u8;
            }
        }
        255
    }
}

impl Raster {
    /// Histogram of one channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelOutOfRange`] for a bad channel index.
    pub fn channel_histogram(&self, channel: u32) -> Result<Histogram> {
        if channel >= self.channels() {
            return Err(Error::ChannelOutOfRange {
                channel,
                channels: self.channels(),
            });
        }
        let step = self.channels() as usize;
        Ok(Histogram::from_samples(
            self.data()[channel as usize..].iter().step_by(step).copied(),
        ))
    }

    /// Histogram of the BT.601 luma.
    ///
    /// For grayscale rasters this is the plain intensity histogram.
    pub fn luma_histogram(&self) -> Histogram {
        match self.channels() {
            1 => Histogram::from_samples(self.data().iter().copied()),
            _ => Histogram::from_samples(
                self.pixels().map(|px| luma(px[0], px[1], px[2])),
            ),
        }
    }
}
