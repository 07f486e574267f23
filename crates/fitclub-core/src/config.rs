//! Configuration module
//!
//! Media processing and storage settings, read from the environment (and an
//! optional `.env` file) with defaults for everything.

use std::env;

use crate::constants::{
    DEFAULT_FONT_PATHS, DEFAULT_STORAGE_PATH, MAX_IMAGE_DIMENSION, MAX_IMAGE_SIZE_MB,
};
use crate::storage_types::StorageBackend;

/// Media processing configuration
#[derive(Clone, Debug)]
pub struct MediaConfig {
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub storage_path: String,
    // Validation limits
    pub max_file_size_bytes: usize,
    pub max_dimension: u32,
    // Watermark / label rendering
    pub watermark_enabled: bool,
    pub font_paths: Vec<String>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Local,
            storage_path: DEFAULT_STORAGE_PATH.to_string(),
            max_file_size_bytes: MAX_IMAGE_SIZE_MB * 1024 * 1024,
            max_dimension: MAX_IMAGE_DIMENSION,
            watermark_enabled: true,
            font_paths: DEFAULT_FONT_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl MediaConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(s) => s.parse::<StorageBackend>()?,
            None => defaults.storage_backend,
        };

        let max_file_size_mb = match lookup("MAX_IMAGE_SIZE_MB") {
            Some(s) => s
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_IMAGE_SIZE_MB must be a valid number"))?,
            None => MAX_IMAGE_SIZE_MB,
        };

        let max_dimension = match lookup("MAX_IMAGE_DIMENSION") {
            Some(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("MAX_IMAGE_DIMENSION must be a valid number"))?,
            None => defaults.max_dimension,
        };

        let watermark_enabled = match lookup("WATERMARK_ENABLED") {
            Some(s) => s
                .trim()
                .to_lowercase()
                .parse::<bool>()
                .map_err(|_| anyhow::anyhow!("WATERMARK_ENABLED must be true or false"))?,
            None => defaults.watermark_enabled,
        };

        let font_paths = lookup("LABEL_FONT_PATHS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.font_paths);

        let config = MediaConfig {
            storage_backend,
            storage_path: lookup("MEDIA_STORAGE_PATH").unwrap_or(defaults.storage_path),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            max_dimension,
            watermark_enabled,
            font_paths,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_IMAGE_SIZE_MB must be greater than zero"));
        }

        if self.max_dimension == 0 {
            return Err(anyhow::anyhow!(
                "MAX_IMAGE_DIMENSION must be greater than zero"
            ));
        }

        if self.storage_backend == StorageBackend::Local && self.storage_path.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "MEDIA_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        Ok(())
    }
}
