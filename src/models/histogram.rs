use crate::error::{PipelineError, Result};
use crate::models::Grid;

/// Number of bins, one per 8-bit intensity
pub const BINS: usize = 256;

/// 256-bin histogram of intensity values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; BINS],
    total: u64,
}

impl Histogram {
    /// Tally the intensities of a single-channel grid
    pub fn from_grid(gray: &Grid) -> Result<Self> {
        if gray.is_degenerate() {
            return Err(PipelineError::InvalidInput(format!(
                "cannot compute histogram of a {}x{} grid",
                gray.width(),
                gray.height()
            )));
        }
        if gray.channels() != 1 {
            return Err(PipelineError::InvalidInput(format!(
                "histogram expects a single-channel grid, got {} channels",
                gray.channels()
            )));
        }

        let mut bins = [0u64; BINS];
        for &pixel in gray.as_bytes() {
            bins[usize::from(pixel)] += 1;
        }
        let total = bins.iter().sum();
        Ok(Self { bins, total })
    }

    /// Count of pixels with the given intensity
    pub fn count(&self, intensity: u8) -> u64 {
        self.bins[usize::from(intensity)]
    }

    /// All bins in ascending intensity order
    pub fn bins(&self) -> &[u64; BINS] {
        &self.bins
    }

    /// Total pixel count; equals width * height of the source grid
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of intensities that occur at least once
    pub fn occupied(&self) -> usize {
        self.bins.iter().filter(|&&c| c > 0).count()
    }

    /// Min-max scale the counts into `[0, height]`.
    ///
    /// The smallest count maps to 0 and the largest to `height`, truncating
    /// toward zero. A flat distribution (every count equal, or a source with a
    /// single intensity) scales to all zeros.
    pub fn scaled(&self, height: u32) -> [u32; BINS] {
        let mut out = [0u32; BINS];
        let min = self.bins.iter().copied().min().unwrap_or(0);
        let max = self.bins.iter().copied().max().unwrap_or(0);
        if max == min || self.occupied() <= 1 {
            return out;
        }

        let range = (max - min) as f64;
        for (dst, &count) in out.iter_mut().zip(self.bins.iter()) {
            let v = (count - min) as f64 * f64::from(height) / range;
            *dst = (v as u32).min(height);
        }
        out
    }
}
