//! Collector configuration.

use crate::error::{AppError, AppResult};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::ObjectStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use stockpile_dataset::DEFAULT_ROTATION_THRESHOLD_BYTES;

/// Object store backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Amazon S3 (or S3-compatible). Credentials, region, and endpoint come
    /// from the environment (`AWS_*` variables).
    S3 { bucket: String },
    /// Local filesystem directory, mainly for development.
    Local { root: String },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Local {
            root: "./data/datasets".to_string(),
        }
    }
}

impl StoreConfig {
    /// Build the configured object store.
    pub fn build(&self) -> AppResult<Arc<dyn ObjectStore>> {
        match self {
            Self::S3 { bucket } => {
                let store = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket)
                    .build()?;
                Ok(Arc::new(store))
            }
            Self::Local { root } => {
                std::fs::create_dir_all(root)?;
                let store = LocalFileSystem::new_with_prefix(root)?;
                Ok(Arc::new(store))
            }
        }
    }
}

/// Collector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Object store the datasets accumulate into.
    #[serde(default)]
    pub store: StoreConfig,
    /// Segment rotation threshold in bytes.
    #[serde(default = "default_rotation_threshold_bytes")]
    pub rotation_threshold_bytes: usize,
}

fn default_rotation_threshold_bytes() -> usize {
    DEFAULT_ROTATION_THRESHOLD_BYTES
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            rotation_threshold_bytes: default_rotation_threshold_bytes(),
        }
    }
}

impl CollectorConfig {
    /// Load from the given file, falling back to defaults when it is absent.
    pub fn load_or_default(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }
}
