//! Upload-to-PNG pipeline
//!
//! ```text
//! raw bytes -> decode_intensity -> threshold_binarize -> encode_png  (binarized)
//!                              \-> Histogram -> render_chart -> encode_png  (chart)
//! ```
//!
//! Every call owns its grids; nothing is shared between calls.

use tracing::{debug, debug_span};

use crate::codec::{decode_intensity, encode_png};
use crate::error::Result;
use crate::models::{Grid, Histogram};
use crate::utils::binarization::{THRESHOLD, threshold_binarize};
use crate::utils::histogram::render_chart;

/// Both outputs of a single upload
#[derive(Debug, Clone)]
pub struct Analysis {
    /// PNG of the binarized image
    pub binary_png: Vec<u8>,
    /// PNG of the intensity histogram chart
    pub chart_png: Vec<u8>,
}

/// Decode, threshold at 127, and re-encode as PNG
pub fn binarize(raw: &[u8]) -> Result<Vec<u8>> {
    let _span = debug_span!("binarize", input_bytes = raw.len()).entered();
    let gray = decode_intensity(raw)?;
    binarize_grid(&gray)
}

/// Decode and render the intensity histogram chart as PNG.
///
/// The histogram is taken over the grayscale image, before thresholding.
pub fn histogram(raw: &[u8]) -> Result<Vec<u8>> {
    let _span = debug_span!("histogram", input_bytes = raw.len()).entered();
    let gray = decode_intensity(raw)?;
    histogram_grid(&gray)
}

/// Decode once and run both branches
pub fn analyze(raw: &[u8]) -> Result<Analysis> {
    let _span = debug_span!("analyze", input_bytes = raw.len()).entered();
    let gray = decode_intensity(raw)?;
    Ok(Analysis {
        binary_png: binarize_grid(&gray)?,
        chart_png: histogram_grid(&gray)?,
    })
}

fn binarize_grid(gray: &Grid) -> Result<Vec<u8>> {
    let binary = threshold_binarize(gray, THRESHOLD)?;
    debug!(
        width = binary.width(),
        height = binary.height(),
        threshold = THRESHOLD,
        "binarized"
    );
    encode_png(&binary)
}

fn histogram_grid(gray: &Grid) -> Result<Vec<u8>> {
    let hist = Histogram::from_grid(gray)?;
    debug!(
        total = hist.total(),
        occupied = hist.occupied(),
        peak = hist.bins().iter().max().copied().unwrap_or(0),
        "histogram computed"
    );
    encode_png(&render_chart(&hist))
}
