//! One discrete tick over the whole flock.
//!
//! A tick reads only the previous tick's snapshot and writes every boid into a
//! separate buffer, so the result does not depend on iteration order or on how
//! the per-boid work is split across threads.

use alloc::vec::Vec;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::boid::{Boid, Flock};
use crate::boundary::resolve_boundary_with_bounce;
use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::integrator::{at_speed, next_heading, sample_jitter};
use crate::neighbors::{BruteForce, NeighborQuery, SpatialGrid};
use crate::rules::Steering;
use crate::vector::Vector2D;

/// Seeded generator used for flock creation and jitter.
pub type FlockRng = ChaCha8Rng;

/// Per-tick counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Boids that had no neighbors and were jittered.
    pub isolated: usize,
    /// Boids whose smoothed heading cancelled out.
    pub degenerate: usize,
    /// Boids that hit at least one wall.
    pub reflected: usize,
}

impl core::ops::AddAssign for TickStats {
    fn add_assign(&mut self, other: Self) {
        self.isolated += other.isolated;
        self.degenerate += other.degenerate;
        self.reflected += other.reflected;
    }
}

struct BoidOutcome {
    boid: Boid,
    isolated: bool,
    degenerate: bool,
    reflected: bool,
}

impl TickStats {
    fn record(&mut self, outcome: &BoidOutcome) {
        self.isolated += outcome.isolated as usize;
        self.degenerate += outcome.degenerate as usize;
        self.reflected += outcome.reflected as usize;
    }
}

/// Create `config.num_boids` boids with uniform positions and directions.
pub fn initialize_flock<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Flock, ConfigError> {
    config.validate()?;
    let boids = (0..config.num_boids)
        .map(|_| Boid::random(config, rng))
        .collect::<Vec<_>>();
    Ok(Flock::new(boids))
}

/// Advance the flock by one tick using the brute-force neighbor query.
pub fn advance<R: Rng + ?Sized>(flock: &Flock, config: &SimulationConfig, rng: &mut R) -> Flock {
    advance_with(flock, config, &mut BruteForce, rng)
}

/// Advance the flock by one tick using `query` for neighbor discovery.
pub fn advance_with<Q, R>(flock: &Flock, config: &SimulationConfig, query: &mut Q, rng: &mut R) -> Flock
where
    Q: NeighborQuery + ?Sized,
    R: Rng + ?Sized,
{
    let mut next = Flock::with_capacity(flock.len());
    advance_into(flock, &mut next, config, query, rng);
    next
}

/// Compute the tick after `current` into `next`, replacing its contents.
///
/// Jitter angles are drawn for every boid in index order before any boid is
/// updated, so serial and parallel passes consume the generator identically.
pub fn advance_into<Q, R>(
    current: &Flock,
    next: &mut Flock,
    config: &SimulationConfig,
    query: &mut Q,
    rng: &mut R,
) -> TickStats
where
    Q: NeighborQuery + ?Sized,
    R: Rng + ?Sized,
{
    let snapshot = current.boids();
    let jitter: Vec<f64> = snapshot
        .iter()
        .map(|_| sample_jitter(config.jitter_degrees, rng))
        .collect();

    query.rebuild(snapshot, config.view_range);
    let query = &*query;

    let mut stats = TickStats::default();
    let buffer = next.boids_mut();
    buffer.clear();

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let outcomes: Vec<BoidOutcome> = (0..snapshot.len())
            .into_par_iter()
            .map_init(Vec::new, |scratch, index| {
                update_boid(snapshot, index, jitter[index], config, query, scratch)
            })
            .collect();

        for outcome in &outcomes {
            stats.record(outcome);
            buffer.push(outcome.boid);
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut scratch = Vec::new();
        for (index, &angle) in jitter.iter().enumerate() {
            let outcome = update_boid(snapshot, index, angle, config, query, &mut scratch);
            stats.record(&outcome);
            buffer.push(outcome.boid);
        }
    }

    stats
}

fn update_boid<Q: NeighborQuery + ?Sized>(
    snapshot: &[Boid],
    index: usize,
    jitter: f64,
    config: &SimulationConfig,
    query: &Q,
    scratch: &mut Vec<usize>,
) -> BoidOutcome {
    scratch.clear();
    query.neighbors_into(snapshot, index, config.view_range, scratch);

    let boid = &snapshot[index];
    let (steering, count) = Steering::compute(boid, scratch.iter().map(|&j| &snapshot[j]));
    let update = next_heading(boid.heading, &steering, count > 0, jitter, config);
    if update.degenerate {
        log::trace!("boid {} kept its heading: steering cancelled out", index);
    }

    let (position, heading, bounce) = resolve_boundary_with_bounce(
        boid.position + update.heading,
        update.heading,
        config.width,
        config.height,
    );

    BoidOutcome {
        boid: Boid::new(position, heading),
        isolated: count == 0,
        degenerate: update.degenerate,
        reflected: bounce.any(),
    }
}

/// A running simulation: validated config, double-buffered flock, neighbor
/// query, and its own seeded generator.
pub struct Simulation<Q: NeighborQuery = BruteForce> {
    config: SimulationConfig,
    current: Flock,
    next: Flock,
    query: Q,
    rng: FlockRng,
    tick: u64,
}

impl Simulation<BruteForce> {
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_query(config, seed, BruteForce)
    }
}

impl Simulation<SpatialGrid> {
    pub fn with_spatial_grid(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        let grid = SpatialGrid::new(config.width, config.height);
        Self::with_query(config, seed, grid)
    }
}

impl<Q: NeighborQuery> Simulation<Q> {
    /// Validate `config` and spawn a random flock from `seed`.
    pub fn with_query(config: SimulationConfig, seed: u64, query: Q) -> Result<Self, ConfigError> {
        let mut rng = FlockRng::seed_from_u64(seed);
        let flock = initialize_flock(&config, &mut rng)?;
        log::debug!(
            "spawned {} boids in {}x{} arena (seed {}, {} neighbor query)",
            flock.len(),
            config.width,
            config.height,
            seed,
            query.name()
        );
        Ok(Self::assemble(config, flock, rng, query))
    }

    /// Start from a prepared flock instead of a random one.
    ///
    /// Every boid must lie inside the arena and have a direction; headings are
    /// rescaled to `config.velocity`.
    pub fn from_flock(
        config: SimulationConfig,
        mut flock: Flock,
        seed: u64,
        query: Q,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if flock.is_empty() {
            return Err(ConfigError::NoBoids);
        }
        for (index, boid) in flock.boids_mut().iter_mut().enumerate() {
            let Vector2D { x, y } = boid.position;
            if !(0.0..=config.width).contains(&x) || !(0.0..=config.height).contains(&y) {
                return Err(ConfigError::BoidOutsideArena { index, x, y });
            }
            if boid.heading.normalize().is_err() {
                return Err(ConfigError::DegenerateHeading { index });
            }
            boid.heading = at_speed(boid.heading, config.velocity);
        }
        Ok(Self::assemble(config, flock, FlockRng::seed_from_u64(seed), query))
    }

    fn assemble(config: SimulationConfig, flock: Flock, rng: FlockRng, query: Q) -> Self {
        Self {
            next: Flock::with_capacity(flock.len()),
            current: flock,
            config,
            query,
            rng,
            tick: 0,
        }
    }

    /// Advance one tick and swap buffers.
    pub fn step(&mut self) -> TickStats {
        let stats = advance_into(
            &self.current,
            &mut self.next,
            &self.config,
            &mut self.query,
            &mut self.rng,
        );
        core::mem::swap(&mut self.current, &mut self.next);
        self.tick += 1;
        stats
    }

    /// Advance `ticks` ticks, returning the summed counters.
    pub fn run(&mut self, ticks: u64) -> TickStats {
        let mut total = TickStats::default();
        for _ in 0..ticks {
            total += self.step();
        }
        total
    }

    pub fn flock(&self) -> &Flock {
        &self.current
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of ticks advanced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn query_name(&self) -> &'static str {
        self.query.name()
    }
}
