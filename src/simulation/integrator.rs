//! Fixed-step integrator for the particle system
//!
//! One tick is two passes:
//! 1. force evaluation over an untouched position snapshot (read-only),
//! 2. integration of every particle followed by a single-threaded reindex.
//!
//! The timestep is one tick and mass is one, so forces are added straight
//! onto velocities and velocities straight onto positions.

use rayon::prelude::*;

use super::forces::{ForceContext, ForceSet};
use super::params::Parameters;
use super::states::{NVec, SimulationState};

/// Advance `state` by one tick using explicit Euler plus damping and walls.
///
/// With `parallel`, the force pass and the per-particle integration run on
/// the rayon pool; the spatial index is always updated serially afterwards.
pub fn euler_integrator<const D: usize>(
    state: &mut SimulationState<D>,
    forces: &ForceSet<D>,
    params: &Parameters<D>,
    parallel: bool,
) {
    if state.is_empty() { // no particles, nothing moves
        state.tick += 1;
        return;
    }
    let n = state.len();

    // Force pass: every particle sees the same pre-tick positions
    let mut accel = vec![NVec::<D>::zeros(); n];
    {
        let ctx = ForceContext {
            positions: &state.positions,
            index: &state.index,
            tick: state.tick,
        };
        forces.accumulate_forces(&ctx, &mut accel, parallel);
    }

    // Integration pass: per-particle slots are disjoint
    let previous = state.positions.clone();
    if parallel {
        state
            .positions
            .par_iter_mut()
            .zip(state.velocities.par_iter_mut())
            .zip(accel.par_iter())
            .for_each(|((x, v), f)| integrate_particle(x, v, f, params));
    } else {
        for ((x, v), f) in state
            .positions
            .iter_mut()
            .zip(state.velocities.iter_mut())
            .zip(accel.iter())
        {
            integrate_particle(x, v, f, params);
        }
    }

    // Reindex: bucket mutation stays on one thread
    let mut moved = 0usize;
    for (id, (old, new)) in previous.iter().zip(state.positions.iter()).enumerate() {
        if state.index.relocate(id, old, new) {
            moved += 1;
        }
    }

    log::trace!(
        "tick {}: {} of {} particles changed cell, {} cells occupied",
        state.tick,
        moved,
        n,
        state.index.cell_count()
    );

    state.tick += 1;
}

/// Apply one tick to a single particle, in this order:
/// 1. cap the speed carried over from the previous tick,
/// 2. add this tick's force,
/// 3. move,
/// 4. damp,
/// 5. reflect and attenuate any axis that left the domain,
/// 6. clamp back inside the domain.
///
/// The cap acts before the new force is added, so a single tick can still
/// end above `particle_velocity_cap`; the excess is trimmed next tick.
pub fn integrate_particle<const D: usize>(
    x: &mut NVec<D>,
    v: &mut NVec<D>,
    force: &NVec<D>,
    params: &Parameters<D>,
) {
    *v = v.cap_magnitude(params.particle_velocity_cap);
    *v += force;
    *x += *v;
    *v *= params.damp_amount;

    for axis in 0..D {
        let bound = params.bounds[axis];
        if x[axis] > bound || x[axis] < -bound {
            v[axis] *= -params.bounce_factor;
        }
        x[axis] = x[axis].clamp(-bound, bound);
    }
}
