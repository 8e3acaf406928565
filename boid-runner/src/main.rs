use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_runner::{run, JsonLinesSink, RunOptions, SummarySink};
use boid_shared::SimulationSettings;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Boids flocking simulation", long_about = None)]
struct Args {
    /// JSON settings file; fields it leaves out keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run (overrides the settings file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of ticks to run; runs until interrupted when omitted
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Number of boids (overrides the settings file)
    #[arg(short = 'n', long)]
    boids: Option<usize>,

    /// Frames per second (overrides the settings file)
    #[arg(long)]
    fps: Option<u32>,

    /// Step as fast as possible instead of at the frame rate
    #[arg(long)]
    unthrottled: bool,

    /// Find neighbors with a spatial grid instead of checking every pair
    #[arg(long)]
    grid: bool,

    /// What to write for each frame
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Log statistics only
    Summary,
    /// Newline-delimited JSON frames on stdout
    Json,
}

fn load_settings(args: &Args) -> Result<SimulationSettings> {
    let mut settings = match &args.config {
        Some(path) => SimulationSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => SimulationSettings::default(),
    };

    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(boids) = args.boids {
        settings.num_boids = boids;
    }
    if let Some(fps) = args.fps {
        settings.frame_rate = fps;
    }

    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Boid simulation starting...");
    if let Some(path) = &args.config {
        log::info!("Settings: {}", path.display());
    }

    let options = RunOptions {
        settings: load_settings(&args)?,
        ticks: args.ticks,
        throttle: !args.unthrottled,
        spatial_grid: args.grid,
    };

    match args.format {
        Format::Summary => {
            run(&options, &mut SummarySink::new()).context("Simulation error")?;
        }
        Format::Json => {
            let stdout = io::stdout();
            let mut sink = JsonLinesSink::new(BufWriter::new(stdout.lock()));
            run(&options, &mut sink).context("Simulation error")?;
        }
    }

    Ok(())
}
