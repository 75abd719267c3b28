use fluidsim::{AnyScenario, ScenarioConfig};
use fluidsim::{bench_neighbors, bench_step_curve};

use anyhow::{Context, Result};
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file, either a path or a name under `scenarios/`
    #[arg(short, long, default_value = "hash_2d.yaml")]
    file_name: String,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Pace ticks at the scenario's tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Run the neighbor backend benchmark instead of a scenario
    #[arg(long)]
    bench: bool,

    /// With --bench, print a CSV curve instead of the summary table
    #[arg(long)]
    curve: bool,
}

fn resolve_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = resolve_path(file_name);
    let file = File::open(&config_path)
        .with_context(|| format!("failed to open scenario {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)
        .with_context(|| format!("failed to parse scenario {}", config_path.display()))?;

    log::debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn run(mut scenario: AnyScenario, ticks: u64, realtime: bool) {
    let tick_rate = scenario.tick_rate();
    let period = Duration::from_secs_f64(1.0 / tick_rate);
    // one summary per simulated second
    let report_every = (tick_rate.round() as u64).max(1);

    log::info!(
        "running {}D scenario with {} particles for {} ticks",
        scenario.dimension(),
        scenario.particle_count(),
        ticks
    );

    let started = Instant::now();
    let mut next_deadline = Instant::now() + period;

    for _ in 0..ticks {
        scenario.step();

        if scenario.tick() % report_every == 0 {
            let stats = scenario.stats();
            log::info!(
                "tick {:6}: mean speed {:.5}, max speed {:.5}, {} cells occupied",
                scenario.tick(),
                stats.mean_speed,
                stats.max_speed,
                stats.occupied_cells
            );
        }

        if realtime {
            let now = Instant::now();
            if next_deadline > now {
                std::thread::sleep(next_deadline - now);
            }
            next_deadline += period;
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    log::info!(
        "finished {} ticks in {:.3} s ({:.1} ticks/s)",
        scenario.tick(),
        elapsed,
        scenario.tick() as f64 / elapsed.max(f64::EPSILON)
    );
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        if args.curve {
            bench_step_curve();
        } else {
            bench_neighbors();
        }
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let scenario = AnyScenario::build(&scenario_cfg).context("invalid scenario configuration")?;

    run(scenario, args.ticks, args.realtime);

    Ok(())
}
