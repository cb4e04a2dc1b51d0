//! Configuration for the hosting surfaces (CLI and HTTP server).
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. TOML file: an explicit path, else `eclipixel.toml` in the working directory
//! 3. Environment: `ECLIPIXEL_BIND_ADDRESS`, `ECLIPIXEL_PORT`, `ECLIPIXEL_LOG`
//! 4. CLI flags (applied by the binary)
//!
//! The binarization threshold is fixed and deliberately absent here.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::ConfigError;

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "eclipixel.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Log filter settings.
    pub logging: LoggingConfig,
    /// Upload placeholder artwork.
    pub placeholder: PlaceholderConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_address: String,
    /// TCP port.
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Placeholder canvas shown before an image is uploaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Edge length of the square canvas in pixels.
    pub size: u32,
    /// Canvas fill colour (RGB).
    pub fill: [u8; 3],
    /// Largest fraction of the canvas the overlay may cover on either axis.
    pub overlay_fraction: f32,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            size: 700,
            fill: [69, 69, 69],
            overlay_fraction: 0.5,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file and the process environment.
    ///
    /// An explicit `path` must exist. Without one, `eclipixel.toml` in the
    /// working directory is used if present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => {
                info!("Loading config: {}", p.display());
                Self::from_file(p)?
            }
            None => {
                let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
                if implicit.is_file() {
                    info!("Loading config: {}", implicit.display());
                    Self::from_file(&implicit)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override fields from environment variables.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("ECLIPIXEL_BIND_ADDRESS") {
            self.server.bind_address = addr;
        }
        if let Some(port) = lookup("ECLIPIXEL_PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => warn!("Ignoring ECLIPIXEL_PORT={port:?}: not a port number"),
            }
        }
        if let Some(level) = lookup("ECLIPIXEL_LOG") {
            self.logging.level = level;
        }
    }

    /// Check values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_upload_bytes must be positive".into(),
            ));
        }
        if self.placeholder.size == 0 {
            return Err(ConfigError::Invalid("placeholder.size must be positive".into()));
        }
        let f = self.placeholder.overlay_fraction;
        if !(f > 0.0 && f <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "placeholder.overlay_fraction must be in (0, 1], got {f}"
            )));
        }
        Ok(())
    }
}
