//! Cooldown tracker for the ability bars
//!
//! The bar is full (`max_charge`) right after the ability fires and drains
//! linearly to zero over the cooldown duration.

use serde::{Deserialize, Serialize};

/// Bar length in HUD pixels when an ability has just been used
pub const MAX_CHARGE: f32 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownTracker {
    /// Simulation time (ms) of the last trigger, `None` if never used
    last_trigger: Option<f64>,
    /// Cooldown duration in ms
    duration_ms: f64,
    /// Bar length at the moment of triggering
    max_charge: f32,
    /// Current bar length, recomputed by `update`
    charge: f32,
}

impl CooldownTracker {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            last_trigger: None,
            duration_ms,
            max_charge: MAX_CHARGE,
            charge: 0.0,
        }
    }

    /// Record that the ability fired at `now_ms`
    pub fn trigger(&mut self, now_ms: f64) {
        self.last_trigger = Some(now_ms);
        self.charge = self.max_charge;
    }

    /// Recompute the bar length for `now_ms`
    pub fn update(&mut self, now_ms: f64) {
        self.charge = self.max_charge * self.fraction_remaining(now_ms);
    }

    /// Milliseconds until the ability is ready again
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        match self.last_trigger {
            Some(t) => (self.duration_ms - (now_ms - t)).max(0.0),
            None => 0.0,
        }
    }

    /// Fraction of the cooldown still to run, in [0, 1]
    pub fn fraction_remaining(&self, now_ms: f64) -> f32 {
        (self.remaining_ms(now_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
    }

    /// Current bar length
    pub fn charge(&self) -> f32 {
        self.charge
    }

    pub fn max_charge(&self) -> f32 {
        self.max_charge
    }

    #[cfg(test)]
    fn is_ready(&self, now_ms: f64) -> bool {
        self.remaining_ms(now_ms) <= 0.0
    }
}
