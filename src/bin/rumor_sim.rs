//! Headless Rumor Runner
//!
//! Runs rumor-propagation simulations without any display and prints the
//! resulting statistics as JSON or text.

use clap::Parser;
use serde::Serialize;

use rumor_lattice::simulation::{average_percent_reached, Simulation};
use rumor_lattice::{Result, Shape, SimulationConfig};

/// Headless Rumor Runner - batch rumor-propagation statistics
#[derive(Parser, Debug)]
#[command(name = "rumor_sim")]
#[command(about = "Run rumor-propagation simulations and output spread statistics")]
struct Args {
    /// Population density: probability a lattice position is occupied
    #[arg(long, short = 'p', default_value_t = 0.85)]
    density: f64,

    /// Spread cooldown L in iterations
    #[arg(long, short = 'l', default_value_t = 5)]
    cooldown: u32,

    /// Number of iterations per run
    #[arg(long, default_value_t = 100)]
    iterations: u32,

    /// Share of cells that always repeat a heard rumor
    #[arg(long, default_value_t = 0.7)]
    s1: f64,

    /// Share of cells repeating with probability 2/3
    #[arg(long, default_value_t = 0.15)]
    s2: f64,

    /// Share of cells repeating with probability 1/3
    #[arg(long, default_value_t = 0.1)]
    s3: f64,

    /// Share of cells that never repeat
    #[arg(long, default_value_t = 0.05)]
    s4: f64,

    /// Lattice rows
    #[arg(long, default_value_t = 100)]
    rows: usize,

    /// Lattice columns
    #[arg(long, default_value_t = 100)]
    cols: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Average the final spread over this many independent runs instead of
    /// reporting a single run's series
    #[arg(long)]
    repeats: Option<usize>,

    /// Sample percent-reached every N iterations in single-run mode
    #[arg(long, default_value_t = 5)]
    stats_stride: u32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output for a single run
#[derive(Serialize)]
struct RunReport {
    seed: u64,
    iterations: u32,
    stats_stride: u32,
    percent_reached_series: Vec<f64>,
    final_percent_reached: f64,
}

/// JSON output for the averaging mode
#[derive(Serialize)]
struct RepeatReport {
    seed: u64,
    repeats: usize,
    iterations: u32,
    average_percent_reached: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = SimulationConfig {
        density: args.density,
        cooldown_limit: args.cooldown,
        iterations: args.iterations,
        susceptibility_weights: [args.s1, args.s2, args.s3, args.s4],
        shape: Shape::new(args.rows, args.cols),
        seed,
    };
    config.validate()?;

    if let Some(repeats) = args.repeats {
        let average = average_percent_reached(&config, repeats)?;
        let report = RepeatReport {
            seed,
            repeats,
            iterations: args.iterations,
            average_percent_reached: average,
        };
        if args.format == "json" {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "Average spread over {} runs: {:.2}%",
                repeats,
                average * 100.0
            );
        }
        return Ok(());
    }

    let mut sim = Simulation::new(&config)?;
    let (_, series) = sim.run_with_stats(args.iterations, args.stats_stride);
    let report = RunReport {
        seed,
        iterations: args.iterations,
        stats_stride: args.stats_stride,
        percent_reached_series: series,
        final_percent_reached: sim.percent_reached(),
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (i, value) in report.percent_reached_series.iter().enumerate() {
            println!(
                "iteration {:>5}: {:.2}% reached",
                (i as u32 + 1) * args.stats_stride,
                value * 100.0
            );
        }
        println!(
            "final: {:.2}% reached (seed {})",
            report.final_percent_reached * 100.0,
            seed
        );
    }

    Ok(())
}
