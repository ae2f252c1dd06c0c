//! Time sources for driving tracks.
//!
//! Tracks never read time themselves; the render loop samples a clock once
//! per frame and passes the value down.

use std::time::{SystemTime, UNIX_EPOCH};

/// Anything that can report the current time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock, in milliseconds since the Unix epoch
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// A clock that only moves when told to.
///
/// Used for deterministic playback: step it by a fixed frame interval, seek
/// it, or run it faster or slower than real time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: f64,
    /// Multiplier applied to `advance` (1.0 = normal, 2.0 = 2x speed)
    speed: f64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: start_ms,
            speed: 1.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the playback speed, clamped to 0.1x..10x
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(0.1, 10.0);
    }

    /// Move forward by `dt_ms` scaled by the speed. Negative steps are
    /// ignored so time never runs backwards.
    pub fn advance(&mut self, dt_ms: f64) {
        self.now += dt_ms.max(0.0) * self.speed;
    }

    /// Jump to an absolute time
    pub fn seek(&mut self, now_ms: f64) {
        self.now = now_ms;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_steps_and_seeks() {
        let mut clock = ManualClock::new(100.0);
        clock.advance(16.0);
        assert_eq!(clock.now_ms(), 116.0);

        clock.advance(-50.0);
        assert_eq!(clock.now_ms(), 116.0);

        clock.seek(10.0);
        assert_eq!(clock.now_ms(), 10.0);
    }

    #[test]
    fn speed_scales_steps() {
        let mut clock = ManualClock::default();
        clock.set_speed(2.0);
        clock.advance(100.0);
        assert_eq!(clock.now_ms(), 200.0);

        clock.set_speed(100.0);
        assert_eq!(clock.speed(), 10.0);
    }

    #[test]
    fn system_clock_is_past_the_epoch() {
        let a = SystemClock.now_ms();
        let b = SystemClock.now_ms();
        assert!(a > 0.0);
        assert!(b >= a);
    }
}
