//! Image transforms used by the pipeline
//!
//! This module provides:
//! - Grayscale conversion (RGB/RGBA to luma)
//! - Fixed-threshold binarization
//! - Histogram chart rendering
//! - Placeholder compositing for the upload panel

pub mod binarization;
pub mod composite;
pub mod grayscale;
pub mod histogram;
