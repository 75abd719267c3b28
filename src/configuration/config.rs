//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – global engine options (dimension, neighbor backend, threading, seed)
//! - [`ParametersConfig`] – physical tunables of the pseudo-fluid
//! - [`SpawnConfig`]      – how initial positions are drawn
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example 2D scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   dimension: 2              # 2 or 3
//!   backend: "spatial_hash"   # or "brute_force"
//!   parallel: false           # evaluate forces on the rayon pool
//!   seed: 7                   # drives spawn placement and colocation tie-breaks
//!   tick_rate: 60.0           # ticks per second
//!
//! parameters:
//!   particle_count: 300
//!   bounds: [2.0, 2.0]        # per-axis half extent
//!   effect_radius: 0.7        # repulsion cutoff and hash cell size
//!   k_constant: 0.1           # repulsion stiffness
//!   damp_amount: 0.95         # per-tick velocity decay
//!   particle_velocity_cap: 0.3
//!   wall_force_dist: 0.3      # width of the soft wall band
//!   wall_force_strength: 0.27 # push at full wall penetration
//!
//! spawn:
//!   shape: "box"              # or "sphere" with an optional radius
//! ```
//!
//! The engine then maps this configuration into its validated runtime
//! representation ([`crate::Parameters`], [`crate::Engine`]).

use serde::Deserialize;

/// Which neighbor query the spatial index answers with
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborBackend {
    #[serde(rename = "spatial_hash")] // uniform grid with cell side `effect_radius`, 3^D cells per query
    #[default]
    SpatialHash,

    #[serde(rename = "brute_force")] // one cell spanning the whole domain, every particle is a candidate
    BruteForce,
}

/// How initial positions are drawn
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(tag = "shape")]
pub enum SpawnConfig {
    #[serde(rename = "box")] // uniform inside the full bounds
    #[default]
    Box,

    #[serde(rename = "sphere")] // uniform inside a ball centered at the origin
    Sphere { radius: Option<f64> },
}

fn default_tick_rate() -> f64 {
    60.0
}

fn default_gravity() -> f64 {
    9.81
}

fn default_bounce_factor() -> f64 {
    0.5
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub dimension: u8, // 2 or 3
    #[serde(default)]
    pub backend: NeighborBackend, // neighbor candidate source
    #[serde(default)]
    pub parallel: bool, // run force evaluation and integration on the rayon pool
    #[serde(default)]
    pub seed: u64, // deterministic seed to make runs reproducible
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64, // ticks per second, scales gravity
}

/// Physical tunables
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub particle_count: i64,        // signed so a negative count is reported, not a parse failure
    pub bounds: Vec<f64>,           // half extent per axis
    pub effect_radius: f64,         // repulsion cutoff, also the hash cell size
    pub k_constant: f64,            // repulsion stiffness
    pub damp_amount: f64,           // multiplicative velocity decay per tick
    pub particle_velocity_cap: f64, // speed limit applied to last tick's velocity
    pub wall_force_dist: f64,       // soft wall band width
    pub wall_force_strength: f64,   // soft wall push at full penetration
    #[serde(default = "default_gravity")]
    pub gravity: f64, // downward acceleration per second
    #[serde(default = "default_bounce_factor")]
    pub bounce_factor: f64, // fraction of velocity kept (and inverted) on a hard wall hit
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,         // engine-level configuration
    pub parameters: ParametersConfig, // physical tunables
    #[serde(default)]
    pub spawn: SpawnConfig, // initial placement
}

impl ScenarioConfig {
    /// Parse a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
