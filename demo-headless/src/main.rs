use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wildfire_core::{BatchResult, BatchRunner, IgnitionPolicy, SimulationConfig, SpreadEngine};

/// Ignition rule choices on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Block spread onto neighbors far below the burning tree
    Elevation,
    /// Weighted wind/elevation score against the series threshold
    Wind,
    /// Every fine neighbor ignites
    Unconditional,
}

impl From<PolicyArg> for IgnitionPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Elevation => IgnitionPolicy::elevation_threshold(),
            PolicyArg::Wind => IgnitionPolicy::wind_score(),
            PolicyArg::Unconditional => IgnitionPolicy::Unconditional,
        }
    }
}

/// Grid wildfire spread demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "wildfire-demo")]
#[command(about = "Headless grid wildfire spread simulation", long_about = None)]
struct Args {
    /// Grid rows
    #[arg(long, default_value_t = 100)]
    height: usize,

    /// Grid columns
    #[arg(long, default_value_t = 100)]
    width: usize,

    /// Probability that a slot holds a tree (0-1)
    #[arg(short, long, default_value_t = 0.6)]
    density: f64,

    /// RNG seed for terrain, wind, placement and activation order
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Ignition rule
    #[arg(short, long, value_enum, default_value_t = PolicyArg::Elevation)]
    policy: PolicyArg,

    /// Tick budget (also the wind series length)
    #[arg(short, long, default_value_t = 500)]
    max_ticks: u64,

    /// Column whose trees start on fire
    #[arg(long, default_value_t = 0)]
    ignition_column: usize,

    /// Let trees lit this tick spread before the tick ends
    #[arg(long)]
    cascade: bool,

    /// Print a report row every N ticks
    #[arg(short, long, default_value_t = 5)]
    report_interval: u64,

    /// Write the per-tick metrics series as JSON
    #[arg(long)]
    metrics_json: Option<PathBuf>,

    /// Comma-separated densities to sweep instead of a single run
    #[arg(long, value_delimiter = ',')]
    sweep: Option<Vec<f64>>,

    /// Seeds per density in sweep mode
    #[arg(short, long, default_value_t = 10)]
    iterations: usize,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            height: self.height,
            width: self.width,
            density: self.density,
            ignition_column: self.ignition_column,
            policy: self.policy.into(),
            max_ticks: self.max_ticks,
            seed: self.seed,
            cascade_within_tick: self.cascade,
            ..SimulationConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Wildfire Spread Demo ===\n");

    match &args.sweep {
        Some(densities) => run_sweep(&args, densities),
        None => run_single(&args),
    }
}

fn run_single(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = args.config();
    let mut engine = SpreadEngine::new(config)?;

    println!(
        "Grid: {}x{}, density {:.2}, policy '{}', seed {}",
        config.width,
        config.height,
        config.density,
        config.policy.name(),
        config.seed
    );
    println!(
        "Placed {} trees, {} ignited in column {}\n",
        engine.placed_cells(),
        engine.counts().on_fire,
        config.ignition_column
    );

    println!("  Tick | Wind (km/h) | Dir(deg) |   Fine | On Fire | Burned Out");
    println!("-------|-------------|----------|--------|---------|-----------");

    let interval = args.report_interval.max(1);
    while engine.is_running() && engine.ticks() < config.max_ticks {
        let wind = engine.current_wind();
        engine.step()?;

        let tick = engine.ticks();
        if tick % interval == 0 || !engine.is_running() {
            let counts = engine.counts();
            let (speed, direction) = wind.map_or((0, 0), |w| (w.speed, w.direction));
            println!(
                "{:6} | {:11} | {:8} | {:6} | {:7} | {:10}",
                tick, speed, direction, counts.fine, counts.on_fire, counts.burned_out
            );
        }
    }

    let counts = engine.counts();
    let burned_share = if counts.total() == 0 {
        0.0
    } else {
        counts.burned_out as f64 / counts.total() as f64 * 100.0
    };

    println!("\n=== Simulation Complete ===");
    println!("Ticks run: {}", engine.ticks());
    if engine.is_running() {
        println!("Tick budget exhausted with {} trees still burning", counts.on_fire);
    } else {
        println!("Fire burned out");
    }
    println!("Trees untouched: {}", counts.fine);
    println!("Trees burned: {} ({:.1}%)", counts.burned_out, burned_share);

    if let Some(path) = &args.metrics_json {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, engine.metrics().samples())?;
        info!("Wrote {} metrics samples to {}", engine.metrics().len(), path.display());
    }

    Ok(())
}

fn run_sweep(args: &Args, densities: &[f64]) -> Result<(), Box<dyn Error>> {
    let runner = BatchRunner::new(args.config(), densities.to_vec(), args.iterations);
    let results = runner.run()?;

    println!(
        "Sweep: {} densities x {} seeds on a {}x{} grid\n",
        densities.len(),
        args.iterations,
        args.width,
        args.height
    );
    println!("Density |   Seed | Ticks | Burned (%) | Halted");
    println!("--------|--------|-------|------------|-------");
    for result in &results {
        println!(
            "{:7.2} | {:6} | {:5} | {:10.1} | {}",
            result.density,
            result.seed,
            result.ticks,
            result.burned_fraction() * 100.0,
            if result.halted { "yes" } else { "no" }
        );
    }

    println!("\nDensity | Mean ticks | Mean burned (%) | Halted");
    println!("--------|------------|-----------------|-------");

    for density in densities {
        let group: Vec<_> = results
            .iter()
            .filter(|result| result.density.to_bits() == density.to_bits())
            .collect();
        if group.is_empty() {
            continue;
        }
        let runs = group.len() as f64;
        let mean_ticks = group.iter().map(|r| r.ticks as f64).sum::<f64>() / runs;
        let mean_burned = group
            .iter()
            .copied()
            .map(BatchResult::burned_fraction)
            .sum::<f64>()
            / runs
            * 100.0;
        let halted = group.iter().filter(|r| r.halted).count();
        println!(
            "{:7.2} | {:10.1} | {:15.1} | {:3}/{}",
            density,
            mean_ticks,
            mean_burned,
            halted,
            group.len()
        );
    }

    if let Some(path) = &args.metrics_json {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &results)?;
        info!("Wrote {} sweep results to {}", results.len(), path.display());
    }

    Ok(())
}
