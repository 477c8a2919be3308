//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-stepped only, driven by the simulation clock
//! - Seeded RNG only
//! - No rendering, platform or file dependencies

pub mod collision;
pub mod cooldown;
pub mod enemy;
pub mod player;
pub mod rect;
pub mod scenery;
pub mod schedule;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, resolve_collisions};
pub use cooldown::CooldownTracker;
pub use enemy::{Enemy, EnemyKind, Motion};
pub use player::{MoveInput, Player};
pub use rect::Rect;
pub use scenery::{Balloon, Cloud, CloudLayer};
pub use schedule::{Schedule, Signal};
pub use state::{EndStage, GameEvent, GamePhase, GameState};
pub use tick::{TextEdit, TickInput, tick};
