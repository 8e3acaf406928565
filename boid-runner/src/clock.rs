use std::time::{Duration, Instant};

/// Fixed-rate frame pacing.
///
/// `wait` blocks until the next frame is due. A frame that overruns its slot
/// moves the schedule forward rather than rushing the following frames.
pub struct FrameClock {
    period: Duration,
    next_frame: Instant,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        let period = Duration::from_secs(1) / frame_rate.max(1);
        Self {
            period,
            next_frame: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Sleep until the next frame deadline and return how long was slept.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        if now >= self.next_frame {
            log::debug!(
                "frame overran its {:?} slot by {:?}",
                self.period,
                now - self.next_frame
            );
            self.next_frame = now + self.period;
            return Duration::ZERO;
        }

        let remaining = self.next_frame - now;
        std::thread::sleep(remaining);
        self.next_frame += self.period;
        remaining
    }
}
