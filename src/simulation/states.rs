//! Core state types for the particle simulation.
//!
//! One dimension-parametric set of types covers both variants:
//! - `NVec<2>` / `SimulationState<2>` for the planar simulation
//! - `NVec<3>` / `SimulationState<3>` for the volumetric simulation
//!
//! A particle has no struct of its own; its identity is its index into the
//! parallel `positions` / `velocities` arrays.

use nalgebra::SVector;

use crate::configuration::config::NeighborBackend;
use crate::error::ConfigError;
use crate::simulation::spatial_index::SpatialIndex;

pub type NVec<const D: usize> = SVector<f64, D>;
pub type NVec2 = NVec<2>;
pub type NVec3 = NVec<3>;

/// Integer grid cell coordinate, one component per axis
pub type CellKey<const D: usize> = [i64; D];

/// Positions, velocities and the neighbor index for a fixed particle population
#[derive(Debug, Clone)]
pub struct SimulationState<const D: usize> {
    pub(crate) positions: Vec<NVec<D>>,  // indexed by particle id
    pub(crate) velocities: Vec<NVec<D>>, // indexed by particle id
    pub(crate) index: SpatialIndex<D>,   // cell -> ids, kept in sync with `positions`
    pub(crate) tick: u64,                // ticks completed
}

/// Summary numbers for logging and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateStats {
    pub mean_speed: f64,
    pub max_speed: f64,
    pub occupied_cells: usize,
}

impl<const D: usize> SimulationState<D> {
    /// Create a state at rest with the index built over `positions`.
    pub fn new(positions: Vec<NVec<D>>, cell_size: f64, backend: NeighborBackend) -> Self {
        let velocities = vec![NVec::<D>::zeros(); positions.len()];
        let mut index = SpatialIndex::new(cell_size, backend);
        index.build(&positions);

        log::debug!(
            "state: {} particles in {} cells (D = {}, cell size {})",
            positions.len(),
            index.cell_count(),
            D,
            cell_size
        );

        Self {
            positions,
            velocities,
            index,
            tick: 0,
        }
    }

    /// Same as [`SimulationState::new`] but with explicit starting velocities,
    /// one per position.
    pub fn with_velocities(
        positions: Vec<NVec<D>>,
        velocities: Vec<NVec<D>>,
        cell_size: f64,
        backend: NeighborBackend,
    ) -> Result<Self, ConfigError> {
        if positions.len() != velocities.len() {
            return Err(ConfigError::VelocityCountMismatch {
                positions: positions.len(),
                velocities: velocities.len(),
            });
        }
        let mut state = Self::new(positions, cell_size, backend);
        state.velocities = velocities;
        Ok(state)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current positions, for renderers and diagnostics
    pub fn positions(&self) -> &[NVec<D>] {
        &self.positions
    }

    pub fn velocities(&self) -> &[NVec<D>] {
        &self.velocities
    }

    pub fn index(&self) -> &SpatialIndex<D> {
        &self.index
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> StateStats {
        let (sum, max) = self
            .velocities
            .iter()
            .map(|v| v.norm())
            .fold((0.0, 0.0_f64), |(sum, max), s| (sum + s, max.max(s)));

        let mean_speed = if self.is_empty() { 0.0 } else { sum / self.len() as f64 };

        StateStats {
            mean_speed,
            max_speed: max,
            occupied_cells: self.index.cell_count(),
        }
    }
}
