use std::{iter, path::PathBuf, time::Duration};

use anyhow::{Context as _, ensure};
use chrono::{DateTime, Utc};
use lander_autopilot::{Autopilot, AutopilotConfig, GenerationReport};
use lander_brain::Topology;
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::info;

use crate::{
    sim::{Lander, Spawner},
    util,
};

const DEFAULT_GENERATIONS: usize = 50;
const DEFAULT_TICK_MS: u64 = 100;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Autopilot configuration file (JSON); missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of generations to run
    #[arg(long, default_value_t = DEFAULT_GENERATIONS)]
    generations: usize,
    /// Override the population size
    #[arg(long)]
    population: Option<usize>,
    /// Override the hidden layer sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    hidden: Vec<usize>,
    /// Simulated time per tick in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Report output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TrainingReport {
    started_at: DateTime<Utc>,
    seed: Option<u64>,
    config: AutopilotConfig,
    generations: Vec<GenerationReport>,
}

fn load_config(arg: &TrainArg) -> anyhow::Result<AutopilotConfig> {
    let mut config = match &arg.config {
        Some(path) => util::read_json_file::<AutopilotConfig, _>("autopilot config", path)?,
        None => AutopilotConfig::default(),
    };
    if let Some(population) = arg.population {
        config.population_size = population;
    }
    if !arg.hidden.is_empty() {
        config.topology = Topology::new(
            config.topology.inputs(),
            arg.hidden.clone(),
            config.topology.outputs(),
        )
        .context("Invalid --hidden layer sizes")?;
    }
    Ok(config)
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    ensure!(arg.tick_ms > 0, "--tick-ms must be positive");
    let config = load_config(arg)?;
    let tick = Duration::from_millis(arg.tick_ms);
    let ticks_per_generation = usize::try_from(
        config.generation_interval().as_millis() / tick.as_millis(),
    )
    .context("Generation interval is too long")?
    .max(1);
    let dt = tick.as_secs_f64();

    let mut rng = match arg.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_os_rng(),
    };
    let started_at = Utc::now();
    let mut autopilot =
        Autopilot::new(config.clone(), &mut rng).context("Failed to create autopilot")?;
    info!(ticks_per_generation, dt, "training started");

    let mut spawner = Spawner::for_level(autopilot.level())?;
    let mut landers: Vec<Lander> = iter::repeat_with(|| spawner.spawn(&mut rng))
        .take(autopilot.size())
        .collect();
    let mut reports = Vec::with_capacity(arg.generations);

    for _ in 0..arg.generations {
        for _ in 0..ticks_per_generation {
            let telemetry = landers.iter().map(Lander::telemetry).collect::<Vec<_>>();
            let outcomes = autopilot.on_tick_all(&telemetry)?;
            for (lander, outcome) in iter::zip(&mut landers, outcomes) {
                if outcome.respawn {
                    *lander = spawner.spawn(&mut rng);
                } else {
                    lander.step(outcome.action, dt);
                }
            }
        }

        let report = autopilot.on_generation_boundary(&mut rng)?;
        eprintln!(
            "Generation #{:<4} best {:>8.3}  mean {:>8.3}  min {:>8.3}  successes {:>3}/{}  level {}  mutation {:.3}",
            report.generation,
            report.best_fitness,
            report.fitness.mean,
            report.fitness.min,
            report.successes,
            autopilot.size(),
            report.level,
            report.mutation_rate,
        );
        if report.leveled_up {
            spawner = Spawner::for_level(autopilot.level())?;
        }
        reports.push(report);

        for lander in &mut landers {
            *lander = spawner.spawn(&mut rng);
        }
    }

    eprintln!("Training completed after {} generations.", reports.len());
    if let Some(best) = reports
        .iter()
        .max_by(|a, b| a.best_fitness.total_cmp(&b.best_fitness))
    {
        eprintln!(
            "  Best fitness: {:.3} (generation #{})",
            best.best_fitness, best.generation
        );
    }
    eprintln!("  Final level: {}", autopilot.level());

    let report = TrainingReport {
        started_at,
        seed: arg.seed,
        config,
        generations: reports,
    };
    util::save_json(&report, arg.output.as_deref())?;
    if let Some(path) = &arg.output {
        eprintln!("Report saved to {}", path.display());
    }

    Ok(())
}
