//! Physical parameters for the simulation
//!
//! `Parameters` holds the validated runtime settings:
//! - domain half extents and the repulsion cutoff (`bounds`, `effect_radius`),
//! - force strengths (`k_constant`, soft wall band, gravity),
//! - per-tick velocity handling (damping, speed cap, wall bounce),
//! - the tick rate gravity is scaled by

use crate::configuration::config::ParametersConfig;
use crate::error::ConfigError;
use crate::simulation::states::NVec;

/// Largest `bound / effect_radius` ratio accepted; cell keys stay exact integers in f64
pub const MAX_GRID_CELLS: f64 = (1u64 << 52) as f64;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters<const D: usize> {
    pub particle_count: usize,
    pub bounds: NVec<D>,             // half extent per axis
    pub effect_radius: f64,          // repulsion cutoff, hash cell size
    pub k_constant: f64,             // repulsion stiffness
    pub damp_amount: f64,            // velocity multiplier per tick
    pub particle_velocity_cap: f64,  // applied to last tick's velocity
    pub wall_force_dist: f64,        // soft wall band width
    pub wall_force_strength: f64,    // soft wall push at full penetration
    pub gravity: f64,                // per second
    pub bounce_factor: f64,          // kept fraction of velocity on a hard wall hit
    pub tick_rate: f64,              // ticks per second
}

impl<const D: usize> Default for Parameters<D> {
    /// Tunables of the planar spatial-hash fluid, used for every dimension
    fn default() -> Self {
        Self {
            particle_count: 300,
            bounds: NVec::<D>::repeat(2.0),
            effect_radius: 0.7,
            k_constant: 0.1,
            damp_amount: 0.95,
            particle_velocity_cap: 0.3,
            wall_force_dist: 0.3,
            wall_force_strength: 0.27,
            gravity: 9.81,
            bounce_factor: 0.5,
            tick_rate: 60.0,
        }
    }
}

impl<const D: usize> Parameters<D> {
    /// Map the YAML-facing parameters onto a `D`-dimensional runtime set and validate it
    pub fn from_config(cfg: &ParametersConfig, tick_rate: f64) -> Result<Self, ConfigError> {
        if cfg.particle_count < 0 {
            return Err(ConfigError::NegativeParticleCount(cfg.particle_count));
        }
        if cfg.bounds.len() != D {
            return Err(ConfigError::BoundsDimension {
                expected: D,
                found: cfg.bounds.len(),
            });
        }

        let params = Self {
            particle_count: cfg.particle_count as usize,
            bounds: NVec::<D>::from_column_slice(&cfg.bounds),
            effect_radius: cfg.effect_radius,
            k_constant: cfg.k_constant,
            damp_amount: cfg.damp_amount,
            particle_velocity_cap: cfg.particle_velocity_cap,
            wall_force_dist: cfg.wall_force_dist,
            wall_force_strength: cfg.wall_force_strength,
            gravity: cfg.gravity,
            bounce_factor: cfg.bounce_factor,
            tick_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Reject values that would divide by zero, grow without bound or flip signs.
    ///
    /// Every float is checked for NaN and infinity first, then for its range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("effect_radius", self.effect_radius),
            ("k_constant", self.k_constant),
            ("damp_amount", self.damp_amount),
            ("particle_velocity_cap", self.particle_velocity_cap),
            ("wall_force_dist", self.wall_force_dist),
            ("wall_force_strength", self.wall_force_strength),
            ("gravity", self.gravity),
            ("bounce_factor", self.bounce_factor),
            ("tick_rate", self.tick_rate),
        ];
        let bounds = self.bounds.iter().map(|&b| ("bounds", b));
        if let Some((field, value)) = scalars.into_iter().chain(bounds).find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field, value });
        }

        if !(self.effect_radius > 0.0) {
            return Err(ConfigError::NonPositiveEffectRadius(self.effect_radius));
        }
        for (axis, &value) in self.bounds.iter().enumerate() {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveBound { axis, value });
            }
            let cells = value / self.effect_radius;
            if cells > MAX_GRID_CELLS {
                return Err(ConfigError::GridTooFine { axis, cells });
            }
        }
        if !(0.0..=1.0).contains(&self.damp_amount) {
            return Err(ConfigError::DampOutOfRange(self.damp_amount));
        }
        if !(0.0..=1.0).contains(&self.bounce_factor) {
            return Err(ConfigError::BounceOutOfRange(self.bounce_factor));
        }
        if !(self.particle_velocity_cap >= 0.0) {
            return Err(ConfigError::NegativeVelocityCap(self.particle_velocity_cap));
        }
        if !(self.wall_force_dist >= 0.0) {
            return Err(ConfigError::NegativeWallForceDist(self.wall_force_dist));
        }
        if !(self.tick_rate > 0.0) {
            return Err(ConfigError::NonPositiveTickRate(self.tick_rate));
        }

        if self.particle_count == 0 {
            log::warn!("particle_count is 0, every tick will be a no-op");
        }
        if self.bounds.iter().any(|&b| self.wall_force_dist > b) {
            log::warn!(
                "wall_force_dist {} exceeds a half extent, opposite walls will push at once",
                self.wall_force_dist
            );
        }
        Ok(())
    }

    /// Gravity contribution for one tick
    pub fn gravity_per_tick(&self) -> f64 {
        self.gravity / self.tick_rate
    }
}
