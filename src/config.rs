//! Store configuration
//!
//! Capacities are fixed for the lifetime of a store, so they are decided up
//! front. Configs deserialize from YAML; missing fields fall back to defaults.
//!
//! ```yaml
//! graph:
//!   node_capacity: 10000
//!   edge_capacity: 50000
//! vector:
//!   dimension: 384
//!   capacity: 10000
//! ```

use crate::graph::GraphConfig;
use crate::vector::VectorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Shape of a graph store plus its companion vector index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NautylusConfig {
    pub graph: GraphConfig,
    pub vector: VectorConfig,
}

impl NautylusConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a YAML config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        info!("Loading config from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}
