//! Configuration file support
//!
//! Settings are read from a TOML file and then overridden by command-line
//! values. Search order:
//!
//! 1. `./pdf-autocrop.toml`
//! 2. `<config dir>/pdf-autocrop/config.toml`
//!
//! ```toml
//! parallel = true
//! threads = 4
//! output_prefix = "cropped"
//!
//! [margins]
//! top = 10
//! bottom = 10
//! ```

use crate::crop::CropOptions;
use crate::margin::Margins;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "pdf-autocrop.toml";

/// Default stem for timestamped output files
pub const DEFAULT_OUTPUT_PREFIX: &str = "pdf-crop";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Values read from a configuration file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Padding kept around detected content
    pub margins: Margins,
    /// Render pages on a thread pool
    pub parallel: bool,
    /// Thread count for parallel mode
    pub threads: Option<usize>,
    /// Renderer executable (name on PATH or explicit path)
    pub pdftoppm: Option<PathBuf>,
    /// Anti-aliased rendering
    pub antialias: bool,
    /// Stem for timestamped output file names
    pub output_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            margins: Margins::ZERO,
            parallel: false,
            threads: None,
            pdftoppm: None,
            antialias: true,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub margins: Option<Margins>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub pdftoppm: Option<PathBuf>,
}

impl Config {
    /// Candidate config file locations, in search order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("pdf-autocrop").join("config.toml"));
        }
        paths
    }

    /// Load the first config file found, or defaults when there is none
    pub fn load() -> Result<Self> {
        for path in Self::search_paths() {
            if path.is_file() {
                return Self::load_from_path(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load from an explicit path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse from TOML text
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply command-line overrides
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Config {
        let mut merged = self.clone();
        if let Some(margins) = cli.margins {
            merged.margins = margins;
        }
        if let Some(parallel) = cli.parallel {
            merged.parallel = parallel;
        }
        if cli.threads.is_some() {
            merged.threads = cli.threads;
        }
        if cli.pdftoppm.is_some() {
            merged.pdftoppm.clone_from(&cli.pdftoppm);
        }
        merged
    }

    /// Options for the crop pipeline
    pub fn crop_options(&self) -> CropOptions {
        CropOptions::builder()
            .margins(self.margins)
            .parallel(self.parallel)
            .threads(self.threads)
            .build()
    }
}
