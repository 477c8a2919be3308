//! Collision resolution between the player and everything it can touch
//!
//! Runs once per frame after all entities have moved. Missiles are checked
//! first and at most one missile hit is applied; balloons are always checked
//! afterwards, even on the frame the player is destroyed.

use super::state::{EndStage, GameEvent, GamePhase, GameState, balloon_points};
use crate::consts::DEFEND_KILL_SCORE;

/// What a missile hit did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyHit {
    /// Player was defending: missile destroyed, points awarded
    Deflected,
    /// Player destroyed
    Fatal,
}

/// Result of a collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub enemy: Option<EnemyHit>,
    pub balloons_collected: usize,
    pub points: u64,
}

impl CollisionOutcome {
    pub fn is_fatal(&self) -> bool {
        self.enemy == Some(EnemyHit::Fatal)
    }
}

/// Resolve player/missile and player/balloon overlaps
pub fn resolve_collisions(state: &mut GameState) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let player_rect = state.player.rect;

    if let Some(idx) = state
        .enemies
        .iter()
        .position(|e| e.rect.overlaps(&player_rect))
    {
        state.enemies.remove(idx);
        if state.player.is_defending() {
            state.score += DEFEND_KILL_SCORE;
            outcome.points += DEFEND_KILL_SCORE;
            outcome.enemy = Some(EnemyHit::Deflected);
            state.events.push(GameEvent::EnemyDeflected);
        } else {
            state.player.exploded = true;
            state.phase = GamePhase::Ended(EndStage::EnteringName);
            outcome.enemy = Some(EnemyHit::Fatal);
            log::info!(
                "Player destroyed at level {} with score {}",
                state.level,
                state.score
            );
        }
    }

    let points = balloon_points(state.level);
    let before = state.balloons.len();
    state.balloons.retain(|b| !b.rect.overlaps(&player_rect));
    let collected = before - state.balloons.len();
    for _ in 0..collected {
        state.score += points;
        state.events.push(GameEvent::BalloonCollected { points });
    }
    outcome.balloons_collected = collected;
    outcome.points += points * collected as u64;

    // Reported after balloons so the final score includes them
    if outcome.is_fatal() {
        state.events.push(GameEvent::PlayerDestroyed {
            score: state.score,
            level: state.level,
        });
    }

    outcome
}
