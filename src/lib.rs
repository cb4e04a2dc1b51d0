//! EcliPixel - fixed-threshold binarization and intensity histograms
//!
//! Takes an uploaded image (any format the `image` crate decodes), reduces it
//! to grayscale, and produces two PNGs: the image thresholded at 127 and a
//! 256x200 bar chart of its intensity histogram. All operations are pure
//! functions of their input bytes.
//!
//! ```no_run
//! let upload = std::fs::read("photo.jpg").unwrap();
//! let binary_png = eclipixel::binarize(&upload).unwrap();
//! let chart_png = eclipixel::histogram(&upload).unwrap();
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Raster decoding and PNG encoding
pub mod codec;
/// Configuration for the CLI and HTTP server
pub mod config;
/// Error taxonomy
pub mod error;
/// Pixel containers (Grid, Histogram)
pub mod models;
/// Composed decode -> transform -> encode operations
pub mod pipeline;
/// HTTP host
pub mod server;
/// Image transforms (grayscale, binarization, histogram chart, compositing)
pub mod utils;

pub use error::{ConfigError, PipelineError, Result};
pub use models::{Grid, Histogram};
pub use pipeline::{Analysis, analyze, binarize, histogram};
