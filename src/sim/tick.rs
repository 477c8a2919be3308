//! Frame-stepped simulation tick
//!
//! Core game loop that advances the simulation by one frame: phase
//! transitions from input, timer signals, entity updates, collisions.

use super::collision::resolve_collisions;
use super::enemy::Enemy;
use super::player::MoveInput;
use super::scenery::{Balloon, Cloud};
use super::schedule::{Schedule, Signal};
use super::state::{EndStage, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// One edit to the name being typed on the end screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Erase,
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional keys held this frame
    pub movement: MoveInput,
    /// Flash key pressed
    pub flash: bool,
    /// Defend key pressed
    pub defend: bool,
    /// Pause toggle
    pub pause: bool,
    /// Enter: pause toggle while alive, submit name / restart once ended
    pub confirm: bool,
    /// Start a fresh game
    pub reset: bool,
    /// Escape or window close
    pub quit: bool,
    /// Text typed this frame, in order
    pub text: Vec<TextEdit>,
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if input.quit && state.phase != GamePhase::Quit {
        log::info!("Quit requested");
        state.phase = GamePhase::Quit;
    }

    match state.phase {
        GamePhase::Quit => return,
        GamePhase::Ended(EndStage::EnteringName) => {
            enter_name(state, input);
            return;
        }
        _ => {}
    }

    if input.reset {
        state.reset();
        return;
    }

    if input.pause || input.confirm {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                log::info!("Resumed");
            }
            GamePhase::Ended(EndStage::Summary) if input.confirm => {
                state.reset();
                return;
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Intro => fly_in(state),
        GamePhase::Running => run_frame(state, input, dt_ms),
        _ => {}
    }
}

/// Opening animation: clouds drift while the player glides in
fn fly_in(state: &mut GameState) {
    state.back_clouds.retain_mut(Cloud::update);
    state.front_clouds.retain_mut(Cloud::update);
    if state.player.glide_in() {
        state.phase = GamePhase::Running;
        state.schedule = Schedule::new(state.clock_ms);
        state.events.push(GameEvent::Started);
        log::info!("Game started (seed {})", state.seed);
    }
}

fn run_frame(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    state.clock_ms += dt_ms;
    state.time_ticks += 1;
    let now = state.clock_ms;

    // Abilities
    if input.flash && state.player.flash(now) {
        state.flash_cooldown.trigger(now);
    }
    if input.defend && state.player.defend(now) {
        state.defend_cooldown.trigger(now);
    }

    // Timers
    for signal in state.schedule.poll(now) {
        apply_signal(state, signal);
    }

    // Entities, each collection as a complete pass
    state.player.update(&input.movement);
    let clock_secs = state.clock_secs();
    state.enemies.retain_mut(|e| e.update(clock_secs));
    state.back_clouds.retain_mut(Cloud::update);
    state.front_clouds.retain_mut(Cloud::update);
    state.balloons.retain_mut(Balloon::update);

    let outcome = resolve_collisions(state);
    if outcome.points > 0 {
        log::debug!(
            "Frame {}: +{} ({} balloons)",
            state.time_ticks,
            outcome.points,
            outcome.balloons_collected
        );
    }

    state.flash_cooldown.update(now);
    state.defend_cooldown.update(now);
}

fn apply_signal(state: &mut GameState, signal: Signal) {
    match signal {
        Signal::IncreaseDifficulty => {
            state.level += 1;
            state.schedule.decay_missile_period(state.clock_ms);
            state.events.push(GameEvent::LevelUp { level: state.level });
            log::info!(
                "Level {} at frame {} (missile every {:.0} ms)",
                state.level,
                state.time_ticks,
                state.schedule.missile_period_ms()
            );
        }
        Signal::SpawnEnemy => {
            let enemy = Enemy::spawn_for_level(state.level, &mut state.rng);
            log::debug!("Spawned {:?} missile at y={}", enemy.kind(), enemy.rect.top());
            state.enemies.push(enemy);
        }
        Signal::SpawnCloud => {
            let cloud = Cloud::spawn(&mut state.rng);
            state.add_cloud(cloud);
        }
        Signal::SpawnBalloon => {
            let balloon = Balloon::spawn(&mut state.rng);
            state.balloons.push(balloon);
        }
    }
}

/// Modal name entry on the end screen
fn enter_name(state: &mut GameState, input: &TickInput) {
    for edit in &input.text {
        match *edit {
            TextEdit::Insert(c) => {
                if !c.is_control() && state.name_entry.chars().count() < MAX_NAME_LEN {
                    state.name_entry.push(c);
                }
            }
            TextEdit::Erase => {
                state.name_entry.pop();
            }
        }
    }

    if input.confirm {
        let name = state.name_entry.trim().to_string();
        if name.is_empty() {
            state.events.push(GameEvent::ScoreSkipped);
        } else {
            state.events.push(GameEvent::ScoreSubmitted {
                name,
                score: state.score,
            });
        }
        state.phase = GamePhase::Ended(EndStage::Summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemyKind;
    use crate::sim::player::INTRO_TARGET_X;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let idle = TickInput::default();
        while state.phase == GamePhase::Intro {
            tick(&mut state, &idle, FRAME_MS);
        }
        state
    }

    #[test]
    fn test_intro_to_running() {
        let mut state = GameState::new(1);
        let idle = TickInput::default();
        tick(&mut state, &idle, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.clock_ms, 0.0);

        let state = running_state(1);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.player.rect.left() >= INTRO_TARGET_X);
        assert!(state.events.contains(&GameEvent::Started));
    }

    #[test]
    fn test_tick_pause() {
        let mut state = running_state(2);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Paused);

        // Enter also toggles while alive
        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_timers_freeze_while_paused() {
        let mut state = running_state(3);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_MS);
        let clock = state.clock_ms;
        let frames = state.time_ticks;
        let clouds = state.back_clouds.len() + state.front_clouds.len();

        let idle = TickInput::default();
        for _ in 0..(30 * 20) {
            tick(&mut state, &idle, FRAME_MS);
        }
        assert_eq!(state.clock_ms, clock);
        assert_eq!(state.time_ticks, frames);
        assert_eq!(state.level, 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.back_clouds.len() + state.front_clouds.len(), clouds);
    }

    #[test]
    fn test_three_difficulty_ticks() {
        let mut state = running_state(4);
        let idle = TickInput::default();
        let frames = (3.0 * DIFFICULTY_PERIOD_MS / FRAME_MS).ceil() as usize + 1;
        for _ in 0..frames {
            tick(&mut state, &idle, FRAME_MS);
            // Keep the player alive
            state.enemies.clear();
        }
        assert_eq!(state.level, 4);
        assert!((state.schedule.missile_period_ms() - 512.0).abs() < 1e-6);
        let level_ups = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 3);
    }

    #[test]
    fn test_spawns_while_running() {
        let mut state = running_state(5);
        state.player.defending = u32::MAX;
        let idle = TickInput::default();
        let mut saw_enemy = false;
        for _ in 0..(5 * FPS) {
            tick(&mut state, &idle, FRAME_MS);
            saw_enemy |= !state.enemies.is_empty();
        }
        assert!(saw_enemy);
        assert!(!state.balloons.is_empty());
        assert!(state.is_alive());
    }

    #[test]
    fn test_abilities_trigger_cooldown_bars() {
        let mut state = running_state(6);
        let input = TickInput {
            flash: true,
            defend: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        assert!(state.flash_cooldown.charge() > 99.0);
        assert!(state.defend_cooldown.charge() > 99.0);
        assert!(state.player.is_defending());

        // Second press inside the cooldown does not refill the bars
        let idle = TickInput::default();
        for _ in 0..FPS {
            tick(&mut state, &idle, FRAME_MS);
        }
        tick(&mut state, &input, FRAME_MS);
        assert!(state.flash_cooldown.charge() < 90.0);
    }

    fn kill_player(state: &mut GameState) {
        let mut enemy = Enemy::spawn(EnemyKind::Linear, &mut state.rng);
        enemy.rect = state.player.rect;
        enemy.speed = 0.0;
        enemy.rect.pos.x += 1.0;
        state.enemies.push(enemy);
        tick(state, &TickInput::default(), FRAME_MS);
    }

    #[test]
    fn test_death_name_entry_and_restart() {
        let mut state = running_state(7);
        state.score = 42;
        kill_player(&mut state);
        assert_eq!(state.phase, GamePhase::Ended(EndStage::EnteringName));

        // Reset and pause keys are just text while typing
        let typing = TickInput {
            reset: true,
            pause: true,
            text: vec![
                TextEdit::Insert('r'),
                TextEdit::Insert('x'),
                TextEdit::Erase,
                TextEdit::Insert('p'),
            ],
            ..Default::default()
        };
        tick(&mut state, &typing, FRAME_MS);
        assert_eq!(state.name_entry, "rp");
        assert_eq!(state.phase, GamePhase::Ended(EndStage::EnteringName));

        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Ended(EndStage::Summary));
        assert!(state.take_events().contains(&GameEvent::ScoreSubmitted {
            name: "rp".to_string(),
            score: 42,
        }));

        // Pause does nothing once dead; Enter restarts
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Ended(EndStage::Summary));
        tick(&mut state, &confirm, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let mut state = running_state(8);
        kill_player(&mut state);
        let confirm = TickInput {
            confirm: true,
            text: vec![TextEdit::Insert(' ')],
            ..Default::default()
        };
        tick(&mut state, &confirm, FRAME_MS);
        assert!(state.take_events().contains(&GameEvent::ScoreSkipped));
    }

    #[test]
    fn test_name_length_capped() {
        let mut state = running_state(9);
        kill_player(&mut state);
        let typing = TickInput {
            text: vec![TextEdit::Insert('A'); 40],
            ..Default::default()
        };
        tick(&mut state, &typing, FRAME_MS);
        assert_eq!(state.name_entry.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn test_quit_from_any_phase() {
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        for phase in [
            GamePhase::Intro,
            GamePhase::Running,
            GamePhase::Paused,
            GamePhase::Ended(EndStage::EnteringName),
            GamePhase::Ended(EndStage::Summary),
        ] {
            let mut state = GameState::new(10);
            state.phase = phase;
            tick(&mut state, &quit, FRAME_MS);
            assert!(state.should_quit());
        }
    }

    #[test]
    fn test_reset_from_paused() {
        let mut state = running_state(11);
        state.phase = GamePhase::Paused;
        state.score = 30;
        let reset = TickInput {
            reset: true,
            ..Default::default()
        };
        tick(&mut state, &reset, FRAME_MS);
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.score, 0);
    }
}
