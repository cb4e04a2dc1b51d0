use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the image-analysis pipeline.
///
/// Every stage is deterministic, so none of these are retried; they are handed
/// to the caller exactly as produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// Input bytes could not be parsed as a raster image, or decoded to zero pixels.
    #[error("failed to decode image: {0}")]
    Decode(String),
    /// A grid with unusable dimensions or layout reached a processing stage.
    #[error("invalid input grid: {0}")]
    InvalidInput(String),
    /// A grid could not be serialized to PNG.
    #[error("failed to encode image: {0}")]
    Encode(String),
}

/// Convenience alias used throughout the pipeline.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file couldn't be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration file isn't valid TOML for [`crate::config::AppConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
    /// A value is outside its accepted range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
