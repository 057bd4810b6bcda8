//! Virtual clock for deterministic simulation runs.
//!
//! The clock is advanced manually by the driver; in live mode one tick
//! maps to one wall-clock second, in headless mode ticks advance with
//! no sleeping at all. Virtual time 0 maps to a fixed epoch so that
//! generated timestamps are stable across runs.

use std::time::Duration;

/// 2024-01-01 00:00:00 UTC, in unix millis.
const EPOCH_MS: i64 = 1_704_067_200_000;

/// Manually advanced millisecond clock.
#[derive(Debug, Clone)]
pub struct SimClock {
    elapsed_ms: i64,
}

impl SimClock {
    /// Clock at the fixed epoch.
    pub fn new() -> Self {
        Self { elapsed_ms: 0 }
    }

    /// Advances virtual time by the given duration.
    pub fn advance(&mut self, duration: Duration) {
        self.elapsed_ms += duration.as_millis() as i64;
    }

    /// Current virtual time as unix millis.
    pub fn now_ms(&self) -> i64 {
        EPOCH_MS + self.elapsed_ms
    }

    /// Milliseconds since the session started.
    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms
    }

    /// Whole seconds since the session started.
    pub fn uptime_secs(&self) -> u64 {
        (self.elapsed_ms / 1000) as u64
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_epoch() {
        let clock = SimClock::new();
        assert_eq!(clock.now_ms(), EPOCH_MS);
        assert_eq!(clock.uptime_secs(), 0);
    }

    #[test]
    fn test_clock_advances() {
        let mut clock = SimClock::new();
        clock.advance(Duration::from_secs(1));
        clock.advance(Duration::from_millis(500));

        assert_eq!(clock.elapsed_ms(), 1500);
        assert_eq!(clock.now_ms(), EPOCH_MS + 1500);
        assert_eq!(clock.uptime_secs(), 1);
    }
}
