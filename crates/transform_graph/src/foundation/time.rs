//! Frame timing for whoever drives the pipeline
//!
//! The pipeline itself never reads the wall clock: the physics step uses a
//! fixed timestep and hooks receive whatever delta the driver passes in.
//! `FrameClock` is the convenience the driver uses to measure that delta.

use std::time::Instant;

/// Wall-clock frame timer producing per-frame deltas in seconds
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_tick: Instant,
    max_delta: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Largest delta reported by default, so a stalled frame does not produce a huge step
    pub const DEFAULT_MAX_DELTA: f32 = 0.25;

    /// Create a new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            max_delta: Self::DEFAULT_MAX_DELTA,
            frame_count: 0,
        }
    }

    /// Builder pattern: set the clamp applied to reported deltas
    pub fn with_max_delta(mut self, max_delta: f32) -> Self {
        self.max_delta = max_delta.max(0.0);
        self
    }

    /// Advance one frame and return the elapsed seconds since the previous tick
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frame_count += 1;
        delta.min(self.max_delta)
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_counts_frames() {
        let mut clock = FrameClock::new();
        clock.tick();
        clock.tick();
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_tick_is_clamped() {
        let mut clock = FrameClock::new().with_max_delta(0.0);
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_eq!(clock.tick(), 0.0);
    }
}
