//! Frame driver: turns host timestamps into scene time.

use crate::error::{PortfolioError, Result};

/// Largest delta a single frame may report. Longer gaps (background tab,
/// debugger pause) are folded into this so motion resumes where it stopped.
pub const MAX_DELTA: f32 = 0.25;

/// Timing handed to every per-frame step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTick {
    /// Scene time in seconds: the sum of all clamped deltas.
    pub elapsed: f32,
    /// Seconds since the previous frame, in `0..=MAX_DELTA`.
    pub delta: f32,
    pub frame: u64,
}

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    tick: FrameTick,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance using a host timestamp in milliseconds (`requestAnimationFrame`).
    pub fn tick(&mut self, now_ms: f64) -> Result<FrameTick> {
        if !now_ms.is_finite() {
            return Err(PortfolioError::InvalidFrame(now_ms));
        }
        let delta = match self.last_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_DELTA),
            None => 0.0,
        };
        // A timestamp going backwards must not rewind `last_ms`.
        self.last_ms = Some(self.last_ms.map_or(now_ms, |last| last.max(now_ms)));
        self.advance(delta);
        Ok(self.tick)
    }

    /// Advance by an explicit delta in seconds. Used by simulated time.
    /// A non-finite delta counts as zero.
    pub fn advance(&mut self, delta: f32) -> FrameTick {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, MAX_DELTA)
        } else {
            0.0
        };
        self.tick = FrameTick {
            elapsed: self.tick.elapsed + delta,
            delta,
            frame: self.tick.frame + 1,
        };
        self.tick
    }

    pub fn current(&self) -> FrameTick {
        self.tick
    }
}
