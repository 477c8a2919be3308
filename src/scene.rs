//! Per-frame draw list
//!
//! Turns a `GameState` into what should be drawn, in the fixed layer order:
//! back clouds, player, balloons, enemies, front clouds, then the HUD and the
//! optional full-field colour wash. The renderer only decides how each
//! sprite looks.

use std::f64::consts::TAU;

use crate::sim::{CloudLayer, EnemyKind, GamePhase, GameState, Rect};

/// Level above which the strobe overlay is shown
pub const STROBE_LEVEL: u32 = 5;

/// What to draw at a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sprite {
    Cloud(CloudLayer),
    /// Player aircraft, tilted by `angle` degrees
    Player { angle: f32, shielded: bool },
    /// Player after a fatal hit
    Explosion,
    Balloon,
    Missile { kind: EnemyKind, tilt: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub sprite: Sprite,
    pub rect: Rect,
}

/// A cooldown bar; `charge` drains from `max` to 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub charge: f32,
    pub max: f32,
}

impl Bar {
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.charge / self.max).clamp(0.0, 1.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub flash: Bar,
    pub defend: Bar,
    pub score: u64,
    pub level: u32,
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub phase: GamePhase,
    pub items: Vec<DrawItem>,
    pub hud: Hud,
    pub overlay: Option<Rgba>,
}

/// Colour wash at simulation time `t` seconds
pub fn strobe_color(t: f64) -> Rgba {
    let t = t % TAU;
    let channel = |k: f64| (125.0 * ((t + k * TAU / 3.0).sin() + 1.0)).round() as u8;
    Rgba {
        r: channel(0.0),
        g: channel(1.0),
        b: channel(2.0),
        a: (60.0 * ((10.0 * t).sin() + 1.0)).round() as u8,
    }
}

/// Build the draw list for the current frame
pub fn build_scene(state: &GameState, strobe_enabled: bool) -> Scene {
    let mut items = Vec::with_capacity(
        state.back_clouds.len()
            + state.front_clouds.len()
            + state.balloons.len()
            + state.enemies.len()
            + 1,
    );

    items.extend(state.back_clouds.iter().map(|c| DrawItem {
        sprite: Sprite::Cloud(CloudLayer::Back),
        rect: c.rect,
    }));

    let player = &state.player;
    items.push(DrawItem {
        sprite: if player.exploded {
            Sprite::Explosion
        } else {
            Sprite::Player {
                angle: player.angle,
                shielded: player.is_defending(),
            }
        },
        rect: player.rect,
    });

    items.extend(state.balloons.iter().map(|b| DrawItem {
        sprite: Sprite::Balloon,
        rect: b.rect,
    }));
    items.extend(state.enemies.iter().map(|e| DrawItem {
        sprite: Sprite::Missile {
            kind: e.kind(),
            tilt: e.tilt(),
        },
        rect: e.rect,
    }));
    items.extend(state.front_clouds.iter().map(|c| DrawItem {
        sprite: Sprite::Cloud(CloudLayer::Front),
        rect: c.rect,
    }));

    let hud = Hud {
        flash: Bar {
            label: "Flash",
            charge: state.flash_cooldown.charge(),
            max: state.flash_cooldown.max_charge(),
        },
        defend: Bar {
            label: "Defend",
            charge: state.defend_cooldown.charge(),
            max: state.defend_cooldown.max_charge(),
        },
        score: state.score,
        level: state.level,
    };

    let overlay = (strobe_enabled && state.level > STROBE_LEVEL)
        .then(|| strobe_color(state.clock_secs()));

    Scene {
        phase: state.phase,
        items,
        hud,
        overlay,
    }
}
