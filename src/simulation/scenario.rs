//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - validated physical parameters (`Parameters`)
//! - simulation state (`SimulationState` with particles spawned at rest)
//! - active force set (`ForceSet`)
//!
//! `Scenario<D>` is generic over the dimension; [`AnyScenario`] picks 2 or 3
//! from the configuration at run time.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::configuration::config::ScenarioConfig;
use crate::error::ConfigError;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, Gravity, PairwiseRepulsion, WallForce};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::params::Parameters;
use crate::simulation::spawn::{spawn_positions, SpawnShape};
use crate::simulation::states::{NVec, SimulationState, StateStats};

/// A runnable simulation: configuration, state and forces in one place.
///
/// The host calls [`Scenario::step`] once per fixed tick and reads
/// [`Scenario::positions`] for rendering.
pub struct Scenario<const D: usize> {
    pub engine: Engine,
    pub parameters: Parameters<D>,
    pub state: SimulationState<D>,
    pub forces: ForceSet<D>,
}

/// Gravity, repulsion and soft walls wired from `params`
pub fn default_forces<const D: usize>(params: &Parameters<D>, seed: u64) -> ForceSet<D> {
    ForceSet::new()
        .with(Gravity {
            per_tick: params.gravity_per_tick(),
        })
        .with(PairwiseRepulsion {
            effect_radius: params.effect_radius,
            k_constant: params.k_constant,
            seed,
        })
        .with(WallForce {
            bounds: params.bounds,
            dist: params.wall_force_dist,
            strength: params.wall_force_strength,
        })
}

impl<const D: usize> Scenario<D> {
    /// Spawn `particle_count` particles at rest inside `shape`, drawn from a
    /// generator seeded with `engine.seed`. Validation happens in
    /// [`Scenario::with_positions`].
    pub fn new(engine: Engine, parameters: Parameters<D>, shape: SpawnShape) -> Result<Self, ConfigError> {
        let mut rng = ChaCha8Rng::seed_from_u64(engine.seed);
        let positions = spawn_positions(shape, &parameters.bounds, parameters.particle_count, &mut rng);
        Self::with_positions(engine, parameters, positions)
    }

    /// Validate `parameters` and start from explicit positions (at rest).
    ///
    /// `parameters.particle_count` is overwritten with `positions.len()` and
    /// `engine.dimension` with `D`.
    pub fn with_positions(
        mut engine: Engine,
        mut parameters: Parameters<D>,
        positions: Vec<NVec<D>>,
    ) -> Result<Self, ConfigError> {
        if engine.dimension != D {
            log::debug!("engine dimension {} replaced by {}", engine.dimension, D);
            engine.dimension = D;
        }
        parameters.particle_count = positions.len();
        parameters.validate()?;

        let state = SimulationState::new(positions, parameters.effect_radius, engine.backend);
        let forces = default_forces(&parameters, engine.seed);

        log::debug!(
            "scenario: D = {}, {} particles, backend {:?}, parallel = {}, seed = {}",
            D,
            state.len(),
            engine.backend,
            engine.parallel,
            engine.seed
        );

        Ok(Self {
            engine,
            parameters,
            state,
            forces,
        })
    }

    /// Build from a parsed scenario file
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let engine = Engine::from_config(&cfg.engine)?;
        if engine.dimension != D {
            return Err(ConfigError::UnsupportedDimension(cfg.engine.dimension));
        }
        let parameters = Parameters::<D>::from_config(&cfg.parameters, cfg.engine.tick_rate)?;
        let shape = SpawnShape::from_config(&cfg.spawn, &parameters.bounds)?;
        Self::new(engine, parameters, shape)
    }

    /// Advance one fixed tick
    pub fn step(&mut self) {
        euler_integrator(&mut self.state, &self.forces, &self.parameters, self.engine.parallel);
    }

    pub fn positions(&self) -> &[NVec<D>] {
        self.state.positions()
    }

    pub fn velocities(&self) -> &[NVec<D>] {
        self.state.velocities()
    }

    pub fn tick(&self) -> u64 {
        self.state.tick()
    }

    pub fn stats(&self) -> StateStats {
        self.state.stats()
    }
}

/// Scenario whose dimension is only known once the config is read
pub enum AnyScenario {
    Planar(Scenario<2>),
    Spatial(Scenario<3>),
}

impl AnyScenario {
    pub fn build(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        match cfg.engine.dimension {
            2 => Ok(AnyScenario::Planar(Scenario::build_scenario(cfg)?)),
            3 => Ok(AnyScenario::Spatial(Scenario::build_scenario(cfg)?)),
            other => Err(ConfigError::UnsupportedDimension(other)),
        }
    }

    pub fn step(&mut self) {
        match self {
            AnyScenario::Planar(s) => s.step(),
            AnyScenario::Spatial(s) => s.step(),
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            AnyScenario::Planar(_) => 2,
            AnyScenario::Spatial(_) => 3,
        }
    }

    pub fn particle_count(&self) -> usize {
        match self {
            AnyScenario::Planar(s) => s.state.len(),
            AnyScenario::Spatial(s) => s.state.len(),
        }
    }

    pub fn tick(&self) -> u64 {
        match self {
            AnyScenario::Planar(s) => s.tick(),
            AnyScenario::Spatial(s) => s.tick(),
        }
    }

    pub fn tick_rate(&self) -> f64 {
        match self {
            AnyScenario::Planar(s) => s.parameters.tick_rate,
            AnyScenario::Spatial(s) => s.parameters.tick_rate,
        }
    }

    pub fn stats(&self) -> StateStats {
        match self {
            AnyScenario::Planar(s) => s.stats(),
            AnyScenario::Spatial(s) => s.stats(),
        }
    }
}
