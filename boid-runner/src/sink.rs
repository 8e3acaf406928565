use std::io::Write;

use anyhow::{Context, Result};
use boid_shared::{FrameSnapshot, SimulationSettings};

use crate::runner::RunReport;

/// The consumer of rendered frames: a window, a file, a log.
pub trait FrameSink {
    /// Called once before the first frame.
    fn begin(&mut self, _settings: &SimulationSettings) -> Result<()> {
        Ok(())
    }

    fn present(&mut self, frame: &FrameSnapshot) -> Result<()>;

    /// Called once after the last frame.
    fn finish(&mut self, _report: &RunReport) -> Result<()> {
        Ok(())
    }
}

/// Streams newline-delimited JSON: the settings first, then one line per frame.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn begin(&mut self, settings: &SimulationSettings) -> Result<()> {
        self.write_line(settings).context("Failed to write settings header")
    }

    fn present(&mut self, frame: &FrameSnapshot) -> Result<()> {
        self.write_line(frame)
            .and_then(|_| Ok(self.writer.flush()?))
            .with_context(|| format!("Failed to write frame {}", frame.tick))
    }

    fn finish(&mut self, _report: &RunReport) -> Result<()> {
        self.writer.flush().context("Failed to flush frames")
    }
}

/// Logs flock statistics instead of drawing anything.
#[derive(Default)]
pub struct SummarySink {
    frames: u64,
}

impl SummarySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for SummarySink {
    fn begin(&mut self, settings: &SimulationSettings) -> Result<()> {
        log::info!(
            "{} boids in a {}x{} arena at {} fps",
            settings.num_boids,
            settings.width,
            settings.height,
            settings.frame_rate
        );
        Ok(())
    }

    fn present(&mut self, frame: &FrameSnapshot) -> Result<()> {
        self.frames += 1;
        if log::log_enabled!(log::Level::Debug) && !frame.boids.is_empty() {
            let n = frame.boids.len() as f64;
            let cx = frame.boids.iter().map(|b| b.x).sum::<f64>() / n;
            let cy = frame.boids.iter().map(|b| b.y).sum::<f64>() / n;
            log::debug!("tick {}: flock centre ({:.1}, {:.1})", frame.tick, cx, cy);
        }
        Ok(())
    }

    fn finish(&mut self, report: &RunReport) -> Result<()> {
        log::info!(
            "ran {} ticks in {:.2?} (seed {}): {} isolated, {} degenerate, {} wall bounces",
            report.ticks,
            report.elapsed,
            report.seed,
            report.totals.isolated,
            report.totals.degenerate,
            report.totals.reflected
        );
        Ok(())
    }
}
