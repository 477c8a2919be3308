//! Periodic spawn and difficulty timers
//!
//! Each timer keeps an explicit "next fire time" on the simulation clock and
//! is polled once per frame. The clock only runs while the game is running,
//! so paused time never counts toward any interval.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Something the scheduler asks the game loop to do this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    IncreaseDifficulty,
    SpawnEnemy,
    SpawnCloud,
    SpawnBalloon,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    period_ms: f64,
    next_fire_ms: f64,
}

impl Timer {
    fn new(period_ms: f64, now_ms: f64) -> Self {
        Self {
            period_ms,
            next_fire_ms: now_ms + period_ms,
        }
    }

    /// Fire at most once per poll; a timer that fell behind skips ahead
    /// instead of bursting.
    fn poll(&mut self, now_ms: f64) -> bool {
        if now_ms < self.next_fire_ms {
            return false;
        }
        self.next_fire_ms += self.period_ms;
        if self.next_fire_ms <= now_ms {
            self.next_fire_ms = now_ms + self.period_ms;
        }
        true
    }

    /// Change the period and restart the countdown from `now_ms`
    fn rearm(&mut self, period_ms: f64, now_ms: f64) {
        self.period_ms = period_ms;
        self.next_fire_ms = now_ms + period_ms;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    difficulty: Timer,
    missile: Timer,
    cloud: Timer,
    balloon: Timer,
}

impl Schedule {
    /// All timers armed at `now_ms`; none fires before its first full period
    pub fn new(now_ms: f64) -> Self {
        Self {
            difficulty: Timer::new(DIFFICULTY_PERIOD_MS, now_ms),
            missile: Timer::new(MISSILE_PERIOD_MS, now_ms),
            cloud: Timer::new(CLOUD_PERIOD_MS, now_ms),
            balloon: Timer::new(BALLOON_PERIOD_MS, now_ms),
        }
    }

    /// Collect the signals due at `now_ms`, in a fixed order
    pub fn poll(&mut self, now_ms: f64) -> Vec<Signal> {
        let mut due = Vec::new();
        if self.difficulty.poll(now_ms) {
            due.push(Signal::IncreaseDifficulty);
        }
        if self.missile.poll(now_ms) {
            due.push(Signal::SpawnEnemy);
        }
        if self.cloud.poll(now_ms) {
            due.push(Signal::SpawnCloud);
        }
        if self.balloon.poll(now_ms) {
            due.push(Signal::SpawnBalloon);
        }
        due
    }

    /// Current time between missiles
    pub fn missile_period_ms(&self) -> f64 {
        self.missile.period_ms
    }

    /// Shrink the missile period geometrically, never below one frame,
    /// and restart the missile countdown.
    pub fn decay_missile_period(&mut self, now_ms: f64) {
        let period = (self.missile.period_ms * MISSILE_PERIOD_DECAY).max(FRAME_MS);
        self.missile.rearm(period, now_ms);
    }
}
