use crate::error::{PipelineError, Result};
use crate::models::Grid;

/// Fixed cutoff used by the pipeline. Not user-configurable.
pub const THRESHOLD: u8 = 127;

/// Foreground value written for pixels above the threshold
pub const MAX_VALUE: u8 = 255;

/// Simple global threshold binarization
///
/// Pixels strictly greater than `threshold` become [`MAX_VALUE`], everything
/// else (including pixels equal to the threshold) becomes 0. The output has
/// the same dimensions as the input and holds no other values.
pub fn threshold_binarize(gray: &Grid, threshold: u8) -> Result<Grid> {
    if gray.is_degenerate() {
        return Err(PipelineError::InvalidInput(format!(
            "cannot binarize a {}x{} grid",
            gray.width(),
            gray.height()
        )));
    }
    if gray.channels() != 1 {
        return Err(PipelineError::InvalidInput(format!(
            "binarization expects a single-channel grid, got {} channels",
            gray.channels()
        )));
    }

    let data = gray
        .as_bytes()
        .iter()
        .map(|&v| if v > threshold { MAX_VALUE } else { 0 })
        .collect();

    Grid::from_raw(gray.width(), gray.height(), 1, data)
        .ok_or_else(|| PipelineError::InvalidInput("binarized buffer size mismatch".into()))
}
