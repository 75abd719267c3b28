//! Initial particle placement.
//!
//! Positions come from one seeded generator so a given seed always yields
//! the same layout. Velocities always start at zero.

use rand::Rng;

use crate::configuration::config::SpawnConfig;
use crate::error::ConfigError;
use crate::simulation::states::NVec;

/// Validated spawn region
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnShape {
    /// Uniform inside `[-bound, bound]` on every axis
    Box,
    /// Uniform inside a ball of this radius around the origin
    Sphere(f64),
}

impl SpawnShape {
    /// Resolve a spawn config against the domain bounds.
    ///
    /// A sphere without an explicit radius fills the smallest half extent.
    pub fn from_config<const D: usize>(cfg: &SpawnConfig, bounds: &NVec<D>) -> Result<Self, ConfigError> {
        match *cfg {
            SpawnConfig::Box => Ok(SpawnShape::Box),
            SpawnConfig::Sphere { radius } => {
                let max = bounds.min();
                let radius = radius.unwrap_or(max);
                if !(radius > 0.0 && radius <= max) {
                    return Err(ConfigError::InvalidSpawnRadius { radius, max });
                }
                Ok(SpawnShape::Sphere(radius))
            }
        }
    }
}

/// Draw `count` positions inside `shape`
pub fn spawn_positions<const D: usize, R: Rng>(
    shape: SpawnShape,
    bounds: &NVec<D>,
    count: usize,
    rng: &mut R,
) -> Vec<NVec<D>> {
    (0..count)
        .map(|_| match shape {
            SpawnShape::Box => NVec::<D>::from_fn(|axis, _| rng.gen_range(-1.0..=1.0) * bounds[axis]),
            SpawnShape::Sphere(radius) => random_in_ball(radius, &mut *rng),
        })
        .collect()
}

fn random_in_ball<const D: usize, R: Rng>(radius: f64, rng: &mut R) -> NVec<D> {
    loop {
        let v = NVec::<D>::from_fn(|_, _| rng.gen_range(-1.0..=1.0));
        if v.norm_squared() <= 1.0 {
            return v * radius;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn box_spawn_stays_inside_bounds() {
        let bounds = NVec::<2>::new(2.0, 0.5);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let positions = spawn_positions(SpawnShape::Box, &bounds, 500, &mut rng);

        assert_eq!(positions.len(), 500);
        for p in &positions {
            assert!(p.x.abs() <= 2.0 && p.y.abs() <= 0.5, "escaped: {:?}", p);
        }
    }

    #[test]
    fn sphere_spawn_stays_inside_radius() {
        let bounds = NVec::<3>::repeat(5.0);
        let shape = SpawnShape::from_config(&SpawnConfig::Sphere { radius: Some(1.5) }, &bounds).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for p in spawn_positions(shape, &bounds, 500, &mut rng) {
            assert!(p.norm() <= 1.5 + 1e-12);
        }
    }

    #[test]
    fn sphere_radius_defaults_to_smallest_bound() {
        let bounds = NVec::<3>::new(4.0, 1.0, 3.0);
        let shape = SpawnShape::from_config(&SpawnConfig::Sphere { radius: None }, &bounds).unwrap();
        assert_eq!(shape, SpawnShape::Sphere(1.0));

        let too_big = SpawnShape::from_config(&SpawnConfig::Sphere { radius: Some(2.0) }, &bounds);
        assert!(matches!(too_big, Err(ConfigError::InvalidSpawnRadius { .. })));
    }
}
