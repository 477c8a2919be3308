//! Missiles and the spawner policy that picks their variant
//!
//! Three motion policies share one struct; the variant-specific state lives
//! in the `Motion` enum and is dispatched by `match` in `Enemy::update`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::rect::Rect;
use crate::consts::*;

/// Any missile whose centre passes this fraction of the field width speeds up
pub const CLOSE_FRACTION: f32 = 0.75;
/// Speed every missile takes on once close
pub const CLOSE_SPEED: f32 = 30.0;
/// Speed range of plain missiles
pub const LINEAR_SPEED_MIN: u32 = 10;
pub const LINEAR_SPEED_MAX: u32 = 25;
/// Base speed (and weave amplitude) of sinusoidal missiles
pub const SINE_SPEED: f32 = 10.0;
/// Weave frequency multiplier (radians per second of simulation time)
const SINE_FREQUENCY: f32 = 4.0;
/// Cruise speed of boosted missiles before the boost kicks in
pub const BOOST_START_SPEED: f32 = 5.0;

/// Variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Linear,
    Sinusoidal,
    Boosted,
}

impl EnemyKind {
    /// Pick a variant from a uniform draw `u` in [0, 1) at difficulty `level`.
    ///
    /// Sinusoidal and Boosted each get `level / 20` of the probability mass;
    /// from level 10 on Linear is never chosen and the Boosted branch
    /// absorbs whatever Sinusoidal leaves over.
    pub fn choose(u: f32, level: u32) -> Self {
        let share = level as f32 / 20.0;
        if u < share {
            EnemyKind::Sinusoidal
        } else if u < 2.0 * share {
            EnemyKind::Boosted
        } else {
            EnemyKind::Linear
        }
    }
}

/// Motion policy with its variant-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Straight line at constant speed
    Linear,
    /// Weaving vertical path
    Sinusoidal {
        /// Phase offset in radians
        phase: f32,
        /// Vertical excursion per frame at the sine peak. Fixed at spawn;
        /// the close-range speed-up changes `speed` only.
        amplitude: f32,
        /// Visual tilt in degrees (rendering only)
        tilt: f32,
    },
    /// Slow cruise, then a permanent jump to `CLOSE_SPEED`
    Boosted {
        boosted: bool,
        /// x coordinate the left edge must pass to trigger the boost
        threshold: f32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Horizontal speed in pixels per frame
    pub speed: f32,
    pub motion: Motion,
}

impl Enemy {
    /// Create a missile of the given kind just past the right edge
    pub fn spawn<R: Rng>(kind: EnemyKind, rng: &mut R) -> Self {
        let y = rng.random_range(0..=FIELD_HEIGHT as u32) as f32;
        let rect = Rect::new(FIELD_WIDTH, y, MISSILE_SIZE.0, MISSILE_SIZE.1);
        let (speed, motion) = match kind {
            EnemyKind::Linear => (
                rng.random_range(LINEAR_SPEED_MIN..=LINEAR_SPEED_MAX) as f32,
                Motion::Linear,
            ),
            EnemyKind::Sinusoidal => (
                SINE_SPEED,
                Motion::Sinusoidal {
                    phase: TAU * rng.random::<f32>(),
                    amplitude: SINE_SPEED,
                    tilt: 0.0,
                },
            ),
            EnemyKind::Boosted => (
                BOOST_START_SPEED,
                Motion::Boosted {
                    boosted: false,
                    threshold: FIELD_WIDTH * CLOSE_FRACTION,
                },
            ),
        };
        Self { rect, speed, motion }
    }

    /// Draw a variant for `level` and spawn it
    pub fn spawn_for_level<R: Rng>(level: u32, rng: &mut R) -> Self {
        let kind = EnemyKind::choose(rng.random::<f32>(), level);
        Self::spawn(kind, rng)
    }

    pub fn kind(&self) -> EnemyKind {
        match self.motion {
            Motion::Linear => EnemyKind::Linear,
            Motion::Sinusoidal { .. } => EnemyKind::Sinusoidal,
            Motion::Boosted { .. } => EnemyKind::Boosted,
        }
    }

    /// Visual tilt in degrees
    pub fn tilt(&self) -> f32 {
        match self.motion {
            Motion::Sinusoidal { tilt, .. } => tilt,
            _ => 0.0,
        }
    }

    /// Advance one frame. `clock_secs` is the simulation time in seconds.
    ///
    /// Returns false once the missile has left the play-field.
    pub fn update(&mut self, clock_secs: f64) -> bool {
        match &mut self.motion {
            Motion::Linear => {
                self.rect.translate(Vec2::new(-self.speed, 0.0));
            }
            Motion::Sinusoidal {
                phase,
                amplitude,
                tilt,
            } => {
                let t = (clock_secs % std::f64::consts::TAU) as f32;
                let vy = (SINE_FREQUENCY * (t + *phase)).sin();
                self.rect.translate(Vec2::new(-self.speed, *amplitude * vy));
                *tilt = vy.atan().to_degrees();
            }
            Motion::Boosted { boosted, threshold } => {
                if !*boosted && self.rect.left() < *threshold {
                    self.speed = CLOSE_SPEED;
                    *boosted = true;
                }
                self.rect.translate(Vec2::new(-self.speed, 0.0));
            }
        }

        if self.rect.center().x < FIELD_WIDTH * CLOSE_FRACTION {
            self.speed = CLOSE_SPEED;
        }

        self.rect.right() >= 0.0 && self.rect.left() <= FIELD_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    fn sample_distribution(level: u32, n: usize) -> HashMap<EnemyKind, f32> {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts: HashMap<EnemyKind, usize> = HashMap::new();
        for _ in 0..n {
            let kind = EnemyKind::choose(rng.random::<f32>(), level);
            *counts.entry(kind).or_default() += 1;
        }
        [EnemyKind::Linear, EnemyKind::Sinusoidal, EnemyKind::Boosted]
            .into_iter()
            .map(|k| (k, *counts.get(&k).unwrap_or(&0) as f32 / n as f32))
            .collect()
    }

    #[test]
    fn test_choose_thresholds() {
        assert_eq!(EnemyKind::choose(0.04, 1), EnemyKind::Sinusoidal);
        assert_eq!(EnemyKind::choose(0.06, 1), EnemyKind::Boosted);
        assert_eq!(EnemyKind::choose(0.10, 1), EnemyKind::Linear);
        assert_eq!(EnemyKind::choose(0.99, 1), EnemyKind::Linear);
    }

    #[test]
    fn test_spawn_distribution_level_3() {
        let dist = sample_distribution(3, 40_000);
        assert!((dist[&EnemyKind::Sinusoidal] - 0.15).abs() < 0.01);
        assert!((dist[&EnemyKind::Boosted] - 0.15).abs() < 0.01);
        assert!((dist[&EnemyKind::Linear] - 0.70).abs() < 0.01);
    }

    #[test]
    fn test_spawn_distribution_saturates() {
        for level in [10, 14, 25] {
            let dist = sample_distribution(level, 20_000);
            let total: f32 = dist.values().sum();
            assert!((total - 1.0).abs() < 1e-4);
            assert_eq!(dist[&EnemyKind::Linear], 0.0);
        }
        let dist = sample_distribution(10, 20_000);
        assert!((dist[&EnemyKind::Sinusoidal] - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_spawn_position_and_speeds() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            let e = Enemy::spawn(EnemyKind::Linear, &mut rng);
            assert_eq!(e.rect.left(), FIELD_WIDTH);
            assert!(e.rect.top() >= 0.0 && e.rect.top() <= FIELD_HEIGHT);
            assert!(e.speed >= 10.0 && e.speed <= 25.0);
        }
        assert_eq!(Enemy::spawn(EnemyKind::Sinusoidal, &mut rng).speed, SINE_SPEED);
        assert_eq!(Enemy::spawn(EnemyKind::Boosted, &mut rng).speed, BOOST_START_SPEED);
    }

    #[test]
    fn test_linear_speeds_up_when_close() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut e = Enemy::spawn(EnemyKind::Linear, &mut rng);
        e.speed = 10.0;
        e.rect.pos.x = FIELD_WIDTH * CLOSE_FRACTION - e.rect.size.x / 2.0 + 5.0;
        assert!(e.update(0.0));
        assert_eq!(e.speed, CLOSE_SPEED);
    }

    #[test]
    fn test_boost_is_one_way() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut e = Enemy::spawn(EnemyKind::Boosted, &mut rng);
        let mut frames = 0;
        while e.speed < CLOSE_SPEED {
            e.update(0.0);
            frames += 1;
            assert!(frames < 100);
        }
        assert!(matches!(e.motion, Motion::Boosted { boosted: true, .. }));
        // Dragging it back to the right does not undo the boost
        e.rect.pos.x = FIELD_WIDTH - 10.0;
        e.update(0.0);
        assert_eq!(e.speed, CLOSE_SPEED);
    }

    #[test]
    fn test_sine_weaves_and_tilts() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut e = Enemy::spawn(EnemyKind::Sinusoidal, &mut rng);
        e.motion = Motion::Sinusoidal {
            phase: 0.0,
            amplitude: SINE_SPEED,
            tilt: 0.0,
        };
        let y0 = e.rect.top();
        // 4 * t = π/2: peak excursion, downward since y grows down
        let t = std::f64::consts::FRAC_PI_8;
        e.update(t);
        assert!((e.rect.top() - (y0 + SINE_SPEED)).abs() < 1e-3);
        assert!((e.tilt() - 45.0).abs() < 1e-3);
        assert_eq!(e.rect.left(), FIELD_WIDTH - SINE_SPEED);
    }

    #[test]
    fn test_sped_up_sine_keeps_its_weave() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut e = Enemy::spawn(EnemyKind::Sinusoidal, &mut rng);
        e.motion = Motion::Sinusoidal {
            phase: 0.0,
            amplitude: SINE_SPEED,
            tilt: 0.0,
        };
        e.speed = CLOSE_SPEED;
        let y0 = e.rect.top();
        e.update(std::f64::consts::FRAC_PI_8);
        assert!((e.rect.top() - (y0 + SINE_SPEED)).abs() < 1e-3);
        assert_eq!(e.rect.left(), FIELD_WIDTH - CLOSE_SPEED);
    }

    #[test]
    fn test_leaves_field_on_left() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut e = Enemy::spawn(EnemyKind::Linear, &mut rng);
        let mut frames = 0;
        while e.update(0.0) {
            frames += 1;
            assert!(frames < 200);
        }
        assert!(e.rect.right() < 0.0);
    }
}
