//! Error types for scenario construction.
//!
//! Every check happens once, when a scenario is built. A running simulation
//! has no fallible operations.

use std::fmt;

/// Reasons a configuration is rejected before any particle is created.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `particle_count` was negative.
    NegativeParticleCount(i64),
    /// A float tunable was NaN or infinite.
    NonFinite { field: &'static str, value: f64 },
    /// `effect_radius` was zero or negative.
    NonPositiveEffectRadius(f64),
    /// One `bounds` component was zero or negative.
    NonPositiveBound { axis: usize, value: f64 },
    /// `bounds` did not have one entry per dimension.
    BoundsDimension { expected: usize, found: usize },
    /// `damp_amount` fell outside `[0, 1]`.
    DampOutOfRange(f64),
    /// `bounce_factor` fell outside `[0, 1]`.
    BounceOutOfRange(f64),
    /// `particle_velocity_cap` was negative.
    NegativeVelocityCap(f64),
    /// `wall_force_dist` was negative.
    NegativeWallForceDist(f64),
    /// `tick_rate` was zero or negative.
    NonPositiveTickRate(f64),
    /// `bounds[axis] / effect_radius` spans more grid cells than integer cell keys can address.
    GridTooFine { axis: usize, cells: f64 },
    /// Starting velocities did not match the number of positions.
    VelocityCountMismatch { positions: usize, velocities: usize },
    /// Only 2D and 3D simulations exist.
    UnsupportedDimension(u8),
    /// Sphere spawn radius was non-positive or larger than the smallest bound.
    InvalidSpawnRadius { radius: f64, max: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeParticleCount(n) => {
                write!(f, "particle_count must be >= 0, got {}", n)
            }
            ConfigError::NonFinite { field, value } => {
                write!(f, "{} must be finite, got {}", field, value)
            }
            ConfigError::NonPositiveEffectRadius(r) => {
                write!(f, "effect_radius must be > 0 (it is the hash cell size), got {}", r)
            }
            ConfigError::NonPositiveBound { axis, value } => {
                write!(f, "bounds[{}] must be > 0, got {}", axis, value)
            }
            ConfigError::BoundsDimension { expected, found } => {
                write!(f, "bounds needs {} components for this dimension, got {}", expected, found)
            }
            ConfigError::DampOutOfRange(d) => {
                write!(f, "damp_amount must lie in [0, 1], got {}", d)
            }
            ConfigError::BounceOutOfRange(b) => {
                write!(f, "bounce_factor must lie in [0, 1], got {}", b)
            }
            ConfigError::NegativeVelocityCap(c) => {
                write!(f, "particle_velocity_cap must be >= 0, got {}", c)
            }
            ConfigError::NegativeWallForceDist(d) => {
                write!(f, "wall_force_dist must be >= 0, got {}", d)
            }
            ConfigError::NonPositiveTickRate(r) => {
                write!(f, "tick_rate must be > 0, got {}", r)
            }
            ConfigError::GridTooFine { axis, cells } => {
                write!(
                    f,
                    "bounds[{}] / effect_radius is {:e} cells, more than the grid can address",
                    axis, cells
                )
            }
            ConfigError::VelocityCountMismatch { positions, velocities } => {
                write!(f, "got {} velocities for {} positions", velocities, positions)
            }
            ConfigError::UnsupportedDimension(d) => {
                write!(f, "dimension must be 2 or 3, got {}", d)
            }
            ConfigError::InvalidSpawnRadius { radius, max } => {
                write!(f, "spawn sphere radius must lie in (0, {}], got {}", max, radius)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
