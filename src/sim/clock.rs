//! Fixed timestep accumulator
//!
//! Converts variable wall-clock frame times into a whole number of simulation
//! ticks.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Seconds per tick
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Feed elapsed seconds; returns how many ticks to run now
    ///
    /// Long stalls are clamped and at most `MAX_SUBSTEPS` ticks are returned,
    /// leaving the remainder in the accumulator.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < MAX_SUBSTEPS {
            self.accumulator -= self.dt;
            steps += 1;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FixedTimestep::new(60);
        assert_eq!(clock.advance(0.01), 0);
        assert_eq!(clock.advance(0.01), 1);
        assert_eq!(clock.advance(1.0 / 60.0), 1);
    }

    #[test]
    fn test_caps_substeps() {
        let mut clock = FixedTimestep::new(120);
        // 0.1s clamp = 12 ticks at 120 Hz, capped to 8 now
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        assert!(clock.advance(0.0) > 0, "leftover time is kept");
    }

    #[test]
    fn test_reset_drops_leftover() {
        let mut clock = FixedTimestep::new(60);
        clock.advance(0.015);
        clock.reset();
        assert_eq!(clock.advance(0.005), 0);
    }
}
