use image::{ColorType, DynamicImage};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::models::Grid;
use crate::utils::grayscale::{rgb_to_grayscale, rgba_to_grayscale};

fn load(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(PipelineError::Decode("input is empty".into()));
    }
    let img = image::load_from_memory(bytes).map_err(|e| PipelineError::Decode(e.to_string()))?;
    if img.width() == 0 || img.height() == 0 {
        return Err(PipelineError::Decode(format!(
            "image has degenerate dimensions {}x{}",
            img.width(),
            img.height()
        )));
    }
    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );
    Ok(img)
}

/// Decode an encoded raster image into a single-channel intensity grid.
///
/// Grayscale sources keep their values; colour sources are reduced with the
/// BT.601 luma weights and any alpha channel is ignored.
pub fn decode_intensity(bytes: &[u8]) -> Result<Grid> {
    let img = load(bytes)?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    let gray = match img.color() {
        ColorType::L8 => img.into_luma8().into_raw(),
        c if !c.has_color() => img.to_luma8().into_raw(),
        c if c.has_alpha() => rgba_to_grayscale(&img.to_rgba8().into_raw(), width, height),
        _ => rgb_to_grayscale(&img.to_rgb8().into_raw(), width, height),
    };

    Grid::from_raw(width, height, 1, gray)
        .ok_or_else(|| PipelineError::Decode("decoded buffer size mismatch".into()))
}

/// Decode an encoded raster image keeping its colour layout.
///
/// Grayscale sources produce one channel, colour sources three (RGB). Alpha
/// is dropped.
pub fn decode_raster(bytes: &[u8]) -> Result<Grid> {
    let img = load(bytes)?;
    let (width, height) = (img.width() as usize, img.height() as usize);

    let (channels, data) = if img.color().has_color() {
        (3, img.to_rgb8().into_raw())
    } else {
        (1, img.to_luma8().into_raw())
    };

    Grid::from_raw(width, height, channels, data)
        .ok_or_else(|| PipelineError::Decode("decoded buffer size mismatch".into()))
}
