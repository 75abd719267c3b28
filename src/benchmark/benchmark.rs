use std::time::Instant;

use crate::configuration::config::NeighborBackend;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec3;

/// Deterministic layout of `n` particles spread over the default 3D domain
fn make_positions(n: usize, bound: f64) -> Vec<NVec3> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            NVec3::new(
                (i_f * 0.37).sin() * bound,
                (i_f * 0.13).cos() * bound,
                (i_f * 0.07).sin() * bound,
            )
        })
        .collect()
}

/// Parameters scaled so the particle density stays moderate as n grows
fn make_params(n: usize) -> Parameters<3> {
    let bound = (n as f64).cbrt() * 0.5;
    Parameters {
        particle_count: n,
        bounds: NVec3::repeat(bound),
        ..Parameters::default()
    }
}

fn make_scenario(n: usize, backend: NeighborBackend) -> Option<Scenario<3>> {
    let params = make_params(n);
    let positions = make_positions(n, params.bounds.x);
    let engine = Engine {
        dimension: 3,
        backend,
        ..Engine::default()
    };
    match Scenario::with_positions(engine, params, positions) {
        Ok(s) => Some(s),
        Err(e) => {
            log::error!("benchmark scenario rejected: {}", e);
            None
        }
    }
}

/// Average wall time of one `step()` in milliseconds
fn time_steps(scenario: &mut Scenario<3>, steps: usize) -> f64 {
    // Warm up
    scenario.step();

    let t0 = Instant::now();
    for _ in 0..steps {
        scenario.step();
    }
    t0.elapsed().as_secs_f64() * 1000.0 / steps as f64
}

/// Time one tick with the brute-force and the spatial-hash backends
pub fn bench_neighbors() {
    let ns = [200, 400, 800, 1600, 3200, 6400];
    let steps = 3;

    for n in ns {
        let (Some(mut brute), Some(mut hash)) = (
            make_scenario(n, NeighborBackend::BruteForce),
            make_scenario(n, NeighborBackend::SpatialHash),
        ) else {
            return;
        };

        let ms_brute = time_steps(&mut brute, steps);
        let ms_hash = time_steps(&mut hash, steps);

        println!("N = {:5}, brute step = {:9.3} ms,   hash step = {:9.3} ms", n, ms_brute, ms_hash);
    }
}

/// Same comparison over a finer range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_step_curve() {
    println!("N,brute_ms,hash_ms");

    for n in (200..=6400).step_by(200) {
        // Large n: one step only for brute force to avoid minutes of runtime
        let steps_brute = if n <= 1600 { 3 } else { 1 };
        let steps_hash = 3;

        let (Some(mut brute), Some(mut hash)) = (
            make_scenario(n, NeighborBackend::BruteForce),
            make_scenario(n, NeighborBackend::SpatialHash),
        ) else {
            return;
        };

        let ms_brute = time_steps(&mut brute, steps_brute);
        let ms_hash = time_steps(&mut hash, steps_hash);

        println!("{},{:.6},{:.6}", n, ms_brute, ms_hash);
    }
}
