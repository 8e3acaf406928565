//! Error types for the flocking core.
//!
//! Normalisation failures are recovered inside a tick; configuration errors are
//! reported once, before the first tick runs.

use core::fmt;

/// Attempted to normalise a vector whose magnitude is effectively zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateVectorError;

impl fmt::Display for DegenerateVectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot normalise a zero-length vector")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DegenerateVectorError {}

/// A [`SimulationConfig`](crate::SimulationConfig) that cannot produce defined motion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Arena width or height is not a positive finite number.
    InvalidArena { width: f64, height: f64 },
    /// The flock would be empty.
    NoBoids,
    /// Per-tick displacement must be positive and finite.
    InvalidVelocity(f64),
    /// View range must be finite and not negative.
    InvalidViewRange(f64),
    /// Smoothing weight must lie in (0, 1].
    SmoothingOutOfRange(f64),
    /// Jitter bound must be finite and not negative.
    InvalidJitter(f64),
    /// A rule weight is NaN or infinite.
    NonFiniteWeight { name: &'static str, value: f64 },
    /// A prepared boid starts outside the arena.
    BoidOutsideArena { index: usize, x: f64, y: f64 },
    /// A prepared boid has no direction to fly in.
    DegenerateHeading { index: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArena { width, height } => write!(
                f,
                "arena must have positive finite dimensions, got {}x{}",
                width, height
            ),
            ConfigError::NoBoids => write!(f, "number of boids must be at least 1"),
            ConfigError::InvalidVelocity(v) => {
                write!(f, "velocity must be positive and finite, got {}", v)
            }
            ConfigError::InvalidViewRange(r) => {
                write!(f, "view range must be finite and not negative, got {}", r)
            }
            ConfigError::SmoothingOutOfRange(w) => {
                write!(f, "smoothing weight must be in (0, 1], got {}", w)
            }
            ConfigError::InvalidJitter(j) => {
                write!(f, "jitter bound must be finite and not negative, got {}", j)
            }
            ConfigError::NonFiniteWeight { name, value } => {
                write!(f, "{} must be finite, got {}", name, value)
            }
            ConfigError::BoidOutsideArena { index, x, y } => {
                write!(f, "boid {} starts outside the arena at ({}, {})", index, x, y)
            }
            ConfigError::DegenerateHeading { index } => {
                write!(f, "boid {} has a zero-length heading", index)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
