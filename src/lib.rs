pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use simulation::states::{NVec, NVec2, NVec3, CellKey, SimulationState, StateStats};
pub use simulation::spatial_index::SpatialIndex;
pub use simulation::forces::{ForceContext, ForceSet, ForceTerm, Gravity, PairwiseRepulsion, WallForce};
pub use simulation::integrator::{euler_integrator, integrate_particle};
pub use simulation::params::Parameters;
pub use simulation::engine::Engine;
pub use simulation::spawn::SpawnShape;
pub use simulation::scenario::{AnyScenario, Scenario};

pub use configuration::config::{EngineConfig, NeighborBackend, ParametersConfig, ScenarioConfig, SpawnConfig};

pub use error::ConfigError;

pub use benchmark::benchmark::{bench_neighbors, bench_step_curve};
