//! Headless driver for the flocking core: loads settings, paces frames, and
//! hands each frame to a [`FrameSink`].

pub mod clock;
pub mod runner;
pub mod sink;

pub use clock::FrameClock;
pub use runner::{run, RunOptions, RunReport};
pub use sink::{FrameSink, JsonLinesSink, SummarySink};
