//! Force contributors for the particle engine
//!
//! Every term computes the force on one particle from a read-only snapshot
//! of all positions plus the spatial index. Terms are summed by
//! [`ForceSet`]. Mass is one, so a force is applied directly as a change in
//! velocity per tick.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::simulation::spatial_index::SpatialIndex;
use crate::simulation::states::NVec;

/// Axis gravity pulls along (y, in both 2D and 3D)
pub const VERTICAL_AXIS: usize = 1;

/// Everything a force term may read during the force pass of one tick
pub struct ForceContext<'a, const D: usize> {
    pub positions: &'a [NVec<D>],    // pre-tick snapshot
    pub index: &'a SpatialIndex<D>, // matches `positions`
    pub tick: u64,                  // tick being computed, feeds tie-break randomness
}

/// Trait for force sources
/// Implementations return their contribution on particle `i`
pub trait ForceTerm<const D: usize> {
    fn force(&self, i: usize, ctx: &ForceContext<'_, D>) -> NVec<D>;
}

/// Collection of force terms (gravity, repulsion, walls)
/// Their contributions are summed into a single force vector per particle
pub struct ForceSet<const D: usize> {
    terms: Vec<Box<dyn ForceTerm<D> + Send + Sync>>,
}

impl<const D: usize> Default for ForceSet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> ForceSet<D> {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: ForceTerm<D> + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Total force on particle `i`
    pub fn evaluate(&self, i: usize, ctx: &ForceContext<'_, D>) -> NVec<D> {
        self.terms
            .iter()
            .fold(NVec::<D>::zeros(), |acc, term| acc + term.force(i, ctx))
    }

    /// Compute total forces for all particles
    /// - `out[i]` is overwritten with the force on particle `i`
    /// - with `parallel` the particles are split across the rayon pool; results
    ///   are identical either way since no term depends on evaluation order
    pub fn accumulate_forces(&self, ctx: &ForceContext<'_, D>, out: &mut [NVec<D>], parallel: bool) {
        if parallel {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(i, f)| *f = self.evaluate(i, ctx));
        } else {
            for (i, f) in out.iter_mut().enumerate() {
                *f = self.evaluate(i, ctx);
            }
        }
    }
}

/// Constant downward pull, already scaled to one tick
pub struct Gravity {
    pub per_tick: f64, // gravity / tick_rate
}

impl<const D: usize> ForceTerm<D> for Gravity {
    fn force(&self, _i: usize, _ctx: &ForceContext<'_, D>) -> NVec<D> {
        let mut f = NVec::<D>::zeros();
        f[VERTICAL_AXIS] = -self.per_tick;
        f
    }
}

/// Short-range linear repulsion between particles
///
/// For a neighbor at distance `d < effect_radius` the push is
/// `k_constant * (1 - d / effect_radius)`, pointing away from the neighbor.
/// Exactly colocated neighbors push with full `k_constant` in a random
/// direction drawn from a stream keyed by `(seed, tick, i)`.
pub struct PairwiseRepulsion {
    pub effect_radius: f64,
    pub k_constant: f64,
    pub seed: u64,
}

impl<const D: usize> ForceTerm<D> for PairwiseRepulsion {
    fn force(&self, i: usize, ctx: &ForceContext<'_, D>) -> NVec<D> {
        let xi = ctx.positions[i];
        let mut f = NVec::<D>::zeros();
        // created on the first colocated neighbor only
        let mut rng: Option<ChaCha8Rng> = None;

        for j in ctx.index.candidate_neighbors(&xi) {
            if j == i {
                continue;
            }

            // dir points from i to j, the push on i goes along -dir
            let dir = ctx.positions[j] - xi;
            let dist = dir.norm();

            if dist == 0.0 {
                let rng = rng.get_or_insert_with(|| tie_break_rng(self.seed, ctx.tick, i));
                f += random_unit_vector::<D, _>(rng) * self.k_constant;
                continue;
            }

            let q = dist / self.effect_radius;
            if q < 1.0 {
                let strength = (1.0 - q) * self.k_constant;
                f -= dir * (strength / dist);
            }
        }

        f
    }
}

/// Soft push away from the domain faces
///
/// Inside a band of width `dist` next to a face the push grows linearly
/// with penetration and reaches `strength` at the face itself.
pub struct WallForce<const D: usize> {
    pub bounds: NVec<D>, // half extent per axis
    pub dist: f64,       // band width
    pub strength: f64,   // push at full penetration
}

impl<const D: usize> WallForce<D> {
    fn ramp(&self, distance_to_face: f64) -> f64 {
        let penetration = self.dist - distance_to_face;
        if penetration <= 0.0 {
            return 0.0;
        }
        (penetration / self.dist).min(1.0) * self.strength
    }
}

impl<const D: usize> ForceTerm<D> for WallForce<D> {
    fn force(&self, i: usize, ctx: &ForceContext<'_, D>) -> NVec<D> {
        let mut f = NVec::<D>::zeros();
        if self.dist <= 0.0 {
            return f;
        }

        let x = ctx.positions[i];
        for axis in 0..D {
            let to_upper = self.bounds[axis] - x[axis];
            let to_lower = x[axis] + self.bounds[axis];
            f[axis] -= self.ramp(to_upper);
            f[axis] += self.ramp(to_lower);
        }
        f
    }
}

/// Random stream for particle `id` at `tick`.
///
/// Each particle owns a ChaCha stream and each tick starts at its own word
/// offset, so draws do not depend on which thread evaluates which particle.
pub fn tie_break_rng(seed: u64, tick: u64, id: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(id as u64);
    rng.set_word_pos(u128::from(tick) << 32);
    rng
}

/// Uniformly distributed direction on the unit (D-1)-sphere
pub fn random_unit_vector<const D: usize, R: Rng>(rng: &mut R) -> NVec<D> {
    // rejection sample the unit ball, then project onto its surface
    loop {
        let v = NVec::<D>::from_fn(|_, _| rng.gen_range(-1.0..=1.0));
        let n2 = v.norm_squared();
        if n2 > 1e-12 && n2 <= 1.0 {
            return v / n2.sqrt();
        }
    }
}
