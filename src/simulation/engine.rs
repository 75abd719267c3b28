//! High-level runtime engine settings
//!
//! Selects dimension, neighbor backend, threading and the seed
//! used when building and running a `Scenario`

use crate::configuration::config::{EngineConfig, NeighborBackend};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    pub dimension: usize,          // 2 or 3
    pub backend: NeighborBackend,  // spatial hash or brute force
    pub parallel: bool,            // split force evaluation and integration across rayon
    pub seed: u64,                 // spawn placement and colocation tie-breaks
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            dimension: 3,
            backend: NeighborBackend::SpatialHash,
            parallel: false,
            seed: 0,
        }
    }
}

impl Engine {
    pub fn from_config(cfg: &EngineConfig) -> Result<Self, ConfigError> {
        if !matches!(cfg.dimension, 2 | 3) {
            return Err(ConfigError::UnsupportedDimension(cfg.dimension));
        }
        Ok(Self {
            dimension: usize::from(cfg.dimension),
            backend: cfg.backend,
            parallel: cfg.parallel,
            seed: cfg.seed,
        })
    }
}
