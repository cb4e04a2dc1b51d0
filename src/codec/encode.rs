use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::Grid;

/// Serialize a 1- or 3-channel grid as PNG
pub fn encode_png(grid: &Grid) -> Result<Vec<u8>> {
    if grid.is_degenerate() {
        return Err(PipelineError::Encode(format!(
            "cannot encode a {}x{} grid",
            grid.width(),
            grid.height()
        )));
    }
    let color = match grid.channels() {
        1 => ColorType::L8,
        3 => ColorType::Rgb8,
        n => {
            return Err(PipelineError::Encode(format!(
                "unsupported channel count {n} (expected 1 or 3)"
            )));
        }
    };
    let width = u32::try_from(grid.width())
        .map_err(|_| PipelineError::Encode(format!("width {} too large", grid.width())))?;
    let height = u32::try_from(grid.height())
        .map_err(|_| PipelineError::Encode(format!("height {} too large", grid.height())))?;

    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(grid.as_bytes(), width, height, color)
        .map_err(|e| PipelineError::Encode(e.to_string()))?;

    debug!(width, height, bytes = out.len(), "encoded png");
    Ok(out)
}
