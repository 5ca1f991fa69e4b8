//! Fixed timestep accumulator
//!
//! Turns variable wall-clock frame deltas into a whole number of logical
//! ticks so the simulation runs identically regardless of frame jitter.
//! The clock never touches game state; callers run one tick per release.

use crate::consts::FRAME_DURATION_MS;

#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    accumulator_ms: f64,
    last_timestamp_ms: Option<f64>,
    /// Optional cap on ticks released per call
    max_substeps: Option<u32>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that releases at most `max` ticks per call and drops the rest
    pub fn with_max_substeps(max: u32) -> Self {
        Self {
            max_substeps: Some(max),
            ..Self::default()
        }
    }

    pub fn set_max_substeps(&mut self, max: Option<u32>) {
        self.max_substeps = max;
    }

    /// Time carried over toward the next tick
    pub fn accumulator_ms(&self) -> f64 {
        self.accumulator_ms
    }

    /// Accumulate `delta_ms` and return the number of ticks to run now.
    ///
    /// Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, delta_ms: f64) -> u32 {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.accumulator_ms += delta_ms;
        }

        let mut ticks = 0;
        while self.accumulator_ms >= FRAME_DURATION_MS {
            if self.max_substeps.is_some_and(|max| ticks >= max) {
                log::warn!(
                    "Clock backlog of {:.1} ms dropped after {} ticks",
                    self.accumulator_ms,
                    ticks
                );
                self.accumulator_ms %= FRAME_DURATION_MS;
                break;
            }
            self.accumulator_ms -= FRAME_DURATION_MS;
            ticks += 1;
        }
        ticks
    }

    /// Frame-callback entry point taking an absolute timestamp.
    ///
    /// The first timestamp after a reset only primes the clock.
    pub fn advance_to(&mut self, timestamp_ms: f64) -> u32 {
        let delta = match self.last_timestamp_ms {
            Some(last) => timestamp_ms - last,
            None => 0.0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        self.advance(delta)
    }

    /// Clear accumulated time and the last timestamp
    pub fn reset(&mut self) {
        self.accumulator_ms = 0.0;
        self.last_timestamp_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_whole_ticks_only() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance(10.0), 0);
        assert_eq!(clock.advance(10.0), 1);
        assert!((clock.accumulator_ms() - (20.0 - FRAME_DURATION_MS)).abs() < 1e-9);
    }

    #[test]
    fn test_jitter_independent() {
        // Same total time split differently yields the same tick count
        let mut smooth = FixedClock::new();
        let mut jittery = FixedClock::new();
        let smooth_ticks: u32 = (0..67).map(|_| smooth.advance(15.0)).sum();
        let jittery_ticks: u32 = [401.0, 5.0, 94.0, 250.0, 255.0]
            .into_iter()
            .map(|d| jittery.advance(d))
            .sum();
        assert_eq!(smooth_ticks, 60);
        assert_eq!(jittery_ticks, 60);
    }

    #[test]
    fn test_large_delta_bursts() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance(10_001.0), 600);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance(-50.0), 0);
        assert_eq!(clock.advance(f64::NAN), 0);
        assert_eq!(clock.accumulator_ms(), 0.0);
    }

    #[test]
    fn test_advance_to_primes_then_measures() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance_to(5_000.0), 0);
        assert_eq!(clock.advance_to(5_060.0), 3);

        clock.reset();
        // After reset a long gap does not produce a burst
        assert_eq!(clock.advance_to(60_000.0), 0);
        assert_eq!(clock.accumulator_ms(), 0.0);
    }

    #[test]
    fn test_max_substeps_drops_backlog() {
        let mut clock = FixedClock::with_max_substeps(4);
        assert_eq!(clock.advance(1_000.0), 4);
        assert!(clock.accumulator_ms() < FRAME_DURATION_MS);
    }
}
