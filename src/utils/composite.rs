//! Placeholder artwork for the upload panel
//!
//! Presentation-side helpers only; nothing in the analysis pipeline calls
//! these.

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// Square canvas filled with a solid colour
pub fn placeholder_canvas(size: u32, fill: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(size, size, Rgb(fill))
}

/// Composite `overlay` centered over `canvas`.
///
/// The overlay is shrunk (never enlarged) so that it fits within
/// `max_fraction` of the canvas on both axes, keeping its aspect ratio.
/// Overlays with an alpha channel are blended as
/// `alpha * overlay + (1 - alpha) * canvas`; opaque overlays are copied.
pub fn composite_centered(canvas: &mut RgbImage, overlay: &DynamicImage, max_fraction: f32) {
    let (cw, ch) = canvas.dimensions();
    let (ow, oh) = (overlay.width(), overlay.height());
    if ow == 0 || oh == 0 || cw == 0 || ch == 0 {
        return;
    }

    let max_w = cw as f32 * max_fraction;
    let max_h = ch as f32 * max_fraction;
    let scale = (max_w / ow as f32).min(max_h / oh as f32).min(1.0);
    let new_w = ((ow as f32 * scale) as u32).clamp(1, cw);
    let new_h = ((oh as f32 * scale) as u32).clamp(1, ch);

    let resized = if (new_w, new_h) == (ow, oh) {
        overlay.to_rgba8()
    } else {
        // Triangle support scales with the shrink ratio, averaging each source footprint
        imageops::resize(&overlay.to_rgba8(), new_w, new_h, FilterType::Triangle)
    };
    let has_alpha = overlay.color().has_alpha();

    let x_offset = (cw - new_w) / 2;
    let y_offset = (ch - new_h) / 2;

    for (x, y, src) in resized.enumerate_pixels() {
        let dst = canvas.get_pixel_mut(x + x_offset, y + y_offset);
        if !has_alpha {
            dst.0 = [src[0], src[1], src[2]];
            continue;
        }
        let alpha = f32::from(src[3]) / 255.0;
        for c in 0..3 {
            let blended = alpha * f32::from(src[c]) + (1.0 - alpha) * f32::from(dst[c]);
            dst[c] = blended as u8;
        }
    }
}
