//! Raster codecs
//!
//! - Decoding arbitrary uploaded bytes into grids (`decode`)
//! - Lossless PNG encoding of grids (`encode`)

pub mod decode;
pub mod encode;

pub use decode::{decode_intensity, decode_raster};
pub use encode::encode_png;
