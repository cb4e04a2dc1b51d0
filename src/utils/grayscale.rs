//! Convert RGB image to grayscale
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses 14-bit fixed point with rounding: Y = (4899*R + 9617*G + 1868*B + 2^13) >> 14
//!
//! The coefficients sum to exactly 2^14, so pure white stays 255 and
//! neutral grays map to themselves.

/// Coefficients for grayscale conversion, scaled by 2^14
const COEF_R: u32 = 4899;
const COEF_G: u32 = 9617;
const COEF_B: u32 = 1868;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let y = (COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32 + ROUND) >> SHIFT;
    y.min(255) as u8
}

/// Convert interleaved RGB bytes to one luma byte per pixel
pub fn rgb_to_grayscale(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    to_grayscale_strided(rgb, width * height, 3)
}

/// Convert RGBA image to grayscale (ignores alpha channel)
pub fn rgba_to_grayscale(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    to_grayscale_strided(rgba, width * height, 4)
}

fn to_grayscale_strided(data: &[u8], pixel_count: usize, stride: usize) -> Vec<u8> {
    data.chunks_exact(stride)
        .take(pixel_count)
        .map(|px| luma(px[0], px[1], px[2]))
        .collect()
}
