use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use boid_core::{NeighborQuery, Simulation, TickStats};
use boid_shared::{FrameSnapshot, SimulationSettings};

use crate::clock::FrameClock;
use crate::sink::FrameSink;

/// How a run is driven.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub settings: SimulationSettings,
    /// Stop after this many ticks; run until the process is killed otherwise.
    pub ticks: Option<u64>,
    /// Hold each frame to the configured frame rate.
    pub throttle: bool,
    /// Use the spatial grid instead of checking every pair.
    pub spatial_grid: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            settings: SimulationSettings::default(),
            ticks: None,
            throttle: true,
            spatial_grid: false,
        }
    }
}

/// What happened during a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub seed: u64,
    pub ticks: u64,
    pub totals: TickStats,
    pub elapsed: Duration,
}

/// Validate the settings, then step the flock and hand every frame to `sink`.
///
/// The initial flock is presented as frame 0.
pub fn run<S: FrameSink + ?Sized>(options: &RunOptions, sink: &mut S) -> Result<RunReport> {
    let config = options
        .settings
        .validate()
        .context("Refusing to start the simulation")?;

    let seed = options.settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);

    if options.spatial_grid {
        let sim = Simulation::with_spatial_grid(config, seed)?;
        drive(sim, seed, options, sink)
    } else {
        let sim = Simulation::new(config, seed)?;
        drive(sim, seed, options, sink)
    }
}

fn drive<Q, S>(mut sim: Simulation<Q>, seed: u64, options: &RunOptions, sink: &mut S) -> Result<RunReport>
where
    Q: NeighborQuery,
    S: FrameSink + ?Sized,
{
    log::info!(
        "Running {} boids with {} neighbor query",
        sim.flock().len(),
        sim.query_name()
    );

    let started = Instant::now();
    let mut clock = options
        .throttle
        .then(|| FrameClock::new(options.settings.frame_rate));
    let mut totals = TickStats::default();

    sink.begin(&options.settings)?;
    sink.present(&FrameSnapshot::capture(sim.tick(), sim.flock()))?;

    while options.ticks.map_or(true, |limit| sim.tick() < limit) {
        let stats = sim.step();
        totals += stats;
        log::trace!("tick {}: {:?}", sim.tick(), stats);

        sink.present(&FrameSnapshot::capture(sim.tick(), sim.flock()))?;

        if let Some(clock) = clock.as_mut() {
            clock.wait();
        }
    }

    let report = RunReport {
        seed,
        ticks: sim.tick(),
        totals,
        elapsed: started.elapsed(),
    };
    sink.finish(&report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SummarySink;

    #[test]
    fn test_runs_requested_ticks() {
        let options = RunOptions {
            settings: SimulationSettings {
                seed: Some(5),
                num_boids: 10,
                ..Default::default()
            },
            ticks: Some(12),
            throttle: false,
            spatial_grid: false,
        };
        let mut sink = SummarySink::new();
        let report = run(&options, &mut sink).unwrap();
        assert_eq!(report.ticks, 12);
        assert_eq!(report.seed, 5);
        assert_eq!(sink.frames(), 13);
    }

    #[test]
    fn test_zero_ticks_presents_initial_frame() {
        let options = RunOptions {
            ticks: Some(0),
            throttle: false,
            ..Default::default()
        };
        let mut sink = SummarySink::new();
        let report = run(&options, &mut sink).unwrap();
        assert_eq!(report.ticks, 0);
        assert_eq!(sink.frames(), 1);
    }
}
