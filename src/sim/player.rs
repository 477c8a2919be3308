//! The player's aircraft
//!
//! Moves with the arrow keys, tilts for visual feedback, and has two
//! cooldown-gated abilities: flash (instant dash) and defend (a few frames
//! of invulnerability).

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::SQRT_2;

use super::rect::Rect;
use crate::consts::*;

/// Left edge the opening fly-in stops at
pub const INTRO_TARGET_X: f32 = 100.0;
/// Tilt change per frame while turning the same way as the current tilt
const ROT_STEP: f32 = 1.0;
/// Tilt multiplier while reversing (or starting from level)
const ROT_REVERSE_FACTOR: f32 = 3.0;
/// Tilt decay per frame toward level flight
const ROT_LEVEL_OFF: f32 = 2.0;

/// Directional keys held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    /// Net direction with components in {-1, 0, 1} (y grows downward)
    pub fn direction(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.down as i32 - self.up as i32;
        Vec2::new(x as f32, y as f32)
    }

    /// Tilt request: +1 nose up, -1 nose down, 0 for none or both
    pub fn rotation(&self) -> i32 {
        self.up as i32 - self.down as i32
    }
}

/// Per-frame speed along a direction; diagonals are slowed so the
/// displacement magnitude matches orthogonal movement
fn speed_along(direction: Vec2) -> f32 {
    if direction.x != 0.0 && direction.y != 0.0 {
        PLAYER_SPEED / SQRT_2
    } else {
        PLAYER_SPEED
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Visual tilt in degrees, within ±MAX_ROTATION
    pub angle: f32,
    /// Last nonzero movement direction (zero until the player first moves)
    pub direction: Vec2,
    /// Frames of invulnerability left
    pub defending: u32,
    /// Simulation time (ms) of the last flash
    pub last_flash: Option<f64>,
    /// Simulation time (ms) of the last defend
    pub last_defend: Option<f64>,
    /// Set once a missile got through; the renderer shows an explosion
    pub exploded: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// A player parked off-screen to the left, ready for the fly-in
    pub fn new() -> Self {
        Self {
            rect: Rect::from_center(
                Vec2::new(-100.0, FIELD_HEIGHT / 2.0),
                Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1),
            ),
            angle: 0.0,
            direction: Vec2::ZERO,
            defending: 0,
            last_flash: None,
            last_defend: None,
            exploded: false,
        }
    }

    /// Advance one frame of player control
    pub fn update(&mut self, input: &MoveInput) {
        if self.defending > 0 {
            self.defending -= 1;
        }

        let dir = input.direction();
        self.rect.translate(dir * speed_along(dir));
        if dir != Vec2::ZERO {
            self.direction = dir;
        }
        self.rect.clamp_inside(FIELD_WIDTH, FIELD_HEIGHT);
        debug_assert!(self.rect.is_inside(FIELD_WIDTH, FIELD_HEIGHT));

        self.update_angle(input.rotation());
    }

    fn update_angle(&mut self, rot: i32) {
        if rot != 0 {
            let same_way = (self.angle > 0.0 && rot > 0) || (self.angle < 0.0 && rot < 0);
            let factor = if same_way { ROT_STEP } else { ROT_REVERSE_FACTOR };
            self.angle = (self.angle + factor * rot as f32).clamp(-MAX_ROTATION, MAX_ROTATION);
        } else if self.angle != 0.0 {
            let level = (self.angle.abs() - ROT_LEVEL_OFF).max(0.0);
            self.angle = level.copysign(self.angle);
        }
    }

    /// Dash along the last movement direction.
    ///
    /// Returns false (and does nothing) while on cooldown.
    pub fn flash(&mut self, now_ms: f64) -> bool {
        self.flash_with(now_ms, FLASH_BOOST, FLASH_COOLDOWN_MS)
    }

    pub fn flash_with(&mut self, now_ms: f64, boost: f32, cooldown_ms: f64) -> bool {
        if let Some(t) = self.last_flash {
            if now_ms - t < cooldown_ms {
                return false;
            }
        }
        self.last_flash = Some(now_ms);

        if self.direction == Vec2::ZERO {
            self.direction = Vec2::X;
        }
        let speed = speed_along(self.direction);
        self.rect.translate(self.direction * speed * boost);
        self.rect.clamp_inside(FIELD_WIDTH, FIELD_HEIGHT);
        true
    }

    /// Become invulnerable for `DEFEND_FRAMES` updates.
    ///
    /// Returns false (and does nothing) while on cooldown.
    pub fn defend(&mut self, now_ms: f64) -> bool {
        if self.defend_cooldown_remaining(now_ms) > 0.0 {
            return false;
        }
        self.last_defend = Some(now_ms);
        self.defending = DEFEND_FRAMES;
        true
    }

    /// Milliseconds until defend can be used again
    pub fn defend_cooldown_remaining(&self, now_ms: f64) -> f64 {
        match self.last_defend {
            Some(t) => (DEFEND_COOLDOWN_MS - (now_ms - t)).max(0.0),
            None => 0.0,
        }
    }

    pub fn is_defending(&self) -> bool {
        self.defending > 0
    }

    /// One frame of the opening fly-in. Returns true once in position.
    pub fn glide_in(&mut self) -> bool {
        if self.rect.left() < INTRO_TARGET_X {
            self.rect.translate(Vec2::new(PLAYER_SPEED / 2.0, 0.0));
        }
        self.rect.left() >= INTRO_TARGET_X
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn centered_player() -> Player {
        let mut player = Player::new();
        player.rect = Rect::from_center(
            Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1),
        );
        player
    }

    const UP_RIGHT: MoveInput = MoveInput {
        up: true,
        down: false,
        left: false,
        right: true,
    };
    const RIGHT: MoveInput = MoveInput {
        up: false,
        down: false,
        left: false,
        right: true,
    };

    #[test]
    fn test_diagonal_speed_matches_orthogonal() {
        let mut a = centered_player();
        let start = a.rect.pos;
        a.update(&RIGHT);
        let straight = (a.rect.pos - start).length();

        let mut b = centered_player();
        let start = b.rect.pos;
        b.update(&UP_RIGHT);
        let diagonal = (b.rect.pos - start).length();

        assert!((straight - PLAYER_SPEED).abs() < 1e-4);
        assert!((diagonal - straight).abs() < 1e-4);
    }

    #[test]
    fn test_flash_cooldown() {
        let mut player = centered_player();
        player.update(&RIGHT);
        let before = player.rect.pos;

        assert!(player.flash(1000.0));
        let moved = player.rect.pos - before;
        assert!((moved.x - PLAYER_SPEED * FLASH_BOOST).abs() < 1e-3);
        assert_eq!(moved.y, 0.0);

        // Second flash inside the cooldown: no-op
        let pos = player.rect.pos;
        assert!(!player.flash(1000.0 + FLASH_COOLDOWN_MS - 1.0));
        assert_eq!(player.rect.pos, pos);

        // Back toward the middle, then the cooldown has passed
        player.rect = centered_player().rect;
        let pos = player.rect.pos;
        assert!(player.flash(1000.0 + FLASH_COOLDOWN_MS));
        assert!(((player.rect.pos - pos).length() - PLAYER_SPEED * FLASH_BOOST).abs() < 1e-3);
    }

    #[test]
    fn test_flash_defaults_rightward() {
        let mut player = centered_player();
        let start = player.rect.pos;
        assert!(player.flash(0.0));
        assert_eq!(player.direction, Vec2::X);
        assert!(player.rect.pos.x > start.x);
    }

    #[test]
    fn test_diagonal_flash_distance() {
        let mut player = centered_player();
        player.rect.pos.y = FIELD_HEIGHT - PLAYER_SIZE.1 - 10.0;
        player.rect.pos.x = 10.0;
        player.update(&UP_RIGHT);
        let start = player.rect.pos;
        assert!(player.flash(0.0));
        let dist = (player.rect.pos - start).length();
        assert!((dist - PLAYER_SPEED * FLASH_BOOST).abs() < 1e-2);
    }

    #[test]
    fn test_last_direction_survives_idle_frames() {
        let mut player = centered_player();
        player.update(&MoveInput {
            left: true,
            ..Default::default()
        });
        player.update(&MoveInput::default());
        assert_eq!(player.direction, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_defend_lasts_five_updates() {
        let mut player = centered_player();
        assert!(player.defend(0.0));
        for _ in 0..4 {
            player.update(&MoveInput::default());
            assert!(player.is_defending());
        }
        player.update(&MoveInput::default());
        assert_eq!(player.defending, 0);
        assert!(!player.is_defending());
    }

    #[test]
    fn test_defend_cooldown() {
        let mut player = centered_player();
        assert!(player.defend(0.0));
        assert!(!player.defend(DEFEND_COOLDOWN_MS - 1.0));
        assert!(player.defend(DEFEND_COOLDOWN_MS));
    }

    #[test]
    fn test_tilt_bounded_and_levels_off() {
        let mut player = centered_player();
        let up = MoveInput {
            up: true,
            ..Default::default()
        };
        player.update(&up);
        assert_eq!(player.angle, 3.0);
        player.update(&up);
        assert_eq!(player.angle, 4.0);
        for _ in 0..30 {
            player.update(&up);
        }
        assert_eq!(player.angle, MAX_ROTATION);

        // Reversing snaps back faster
        player.update(&MoveInput {
            down: true,
            ..Default::default()
        });
        assert_eq!(player.angle, 12.0);

        // Releasing levels off by 2 per frame
        player.update(&MoveInput::default());
        assert_eq!(player.angle, 10.0);
        for _ in 0..10 {
            player.update(&MoveInput::default());
        }
        assert_eq!(player.angle, 0.0);
    }

    #[test]
    fn test_glide_in_stops_at_target() {
        let mut player = Player::new();
        let mut frames = 0;
        while !player.glide_in() {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(player.rect.left() >= INTRO_TARGET_X);
        assert!(player.rect.left() < INTRO_TARGET_X + PLAYER_SPEED / 2.0);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_field(
            start_x in -200.0f32..1000.0,
            start_y in -200.0f32..800.0,
            inputs in proptest::collection::vec(any::<(bool, bool, bool, bool)>(), 1..60),
        ) {
            let mut player = Player::new();
            player.rect.pos = Vec2::new(start_x, start_y);
            for (up, down, left, right) in inputs {
                player.update(&MoveInput { up, down, left, right });
                prop_assert!(player.rect.is_inside(FIELD_WIDTH, FIELD_HEIGHT));
                prop_assert!(player.angle.abs() <= MAX_ROTATION);
            }
        }

        #[test]
        fn prop_step_length_is_direction_independent(
            (up, down, left, right) in any::<(bool, bool, bool, bool)>(),
        ) {
            let mut player = centered_player();
            let start = player.rect.pos;
            let input = MoveInput { up, down, left, right };
            player.update(&input);
            let step = (player.rect.pos - start).length();
            if input.direction() == Vec2::ZERO {
                prop_assert_eq!(step, 0.0);
            } else {
                prop_assert!((step - PLAYER_SPEED).abs() < 1e-4);
            }
        }
    }
}
