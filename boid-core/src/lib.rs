#![cfg_attr(not(feature = "std"), no_std)]

//! Boids flocking in a bounded 2D arena.
//!
//! Every tick each boid looks at the other boids within its view range, steers
//! by cohesion, alignment, and separation, smooths the result against its
//! previous heading, moves a fixed distance, and bounces off the arena walls.

extern crate alloc;

pub mod boid;
pub mod boundary;
pub mod config;
pub mod error;
pub mod integrator;
pub mod neighbors;
pub mod rules;
pub mod simulation;
pub mod vector;

pub use boid::{Boid, Flock};
pub use boundary::{resolve_boundary, Bounce};
pub use config::SimulationConfig;
pub use error::{ConfigError, DegenerateVectorError};
pub use integrator::{next_heading, HeadingUpdate};
pub use neighbors::{BruteForce, NeighborQuery, SpatialGrid};
pub use rules::Steering;
pub use simulation::{advance, advance_into, advance_with, initialize_flock, FlockRng, Simulation, TickStats};
pub use vector::Vector2D;
