//! Game state and phase machine
//!
//! `GameState` is the one container for everything that changes during a
//! game. It is owned by the driver and handed to `tick` by reference.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::cooldown::CooldownTracker;
use super::enemy::Enemy;
use super::player::Player;
use super::scenery::{Balloon, Cloud, CloudLayer};
use super::schedule::Schedule;
use crate::consts::*;

/// Clouds scattered over the sky when a game starts
pub const STARTING_CLOUDS: usize = 30;

/// What the game is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Opening fly-in; the player glides onto the field
    Intro,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Player was hit
    Ended(EndStage),
    /// Terminal: the driver should exit
    Quit,
}

/// Sub-state of the end screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndStage {
    /// Modal name entry for the high-score table
    EnteringName,
    /// Final scores shown, waiting for reset
    Summary,
}

/// Notable things that happened during a tick, for the driver to act on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Fly-in finished and play began
    Started,
    LevelUp { level: u32 },
    /// A missile hit the player while defending
    EnemyDeflected,
    BalloonCollected { points: u64 },
    PlayerDestroyed { score: u64, level: u32 },
    /// Name entry finished with a non-empty name
    ScoreSubmitted { name: String, score: u64 },
    /// Name entry finished with an empty name
    ScoreSkipped,
}

/// Score for a balloon collected at `level`
pub fn balloon_points(level: u32) -> u64 {
    BALLOON_BASE_SCORE + (level.max(1) as u64 - 1) * BALLOON_SCORE_PER_LEVEL
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this game was started with
    pub seed: u64,
    /// Seeded RNG for spawns
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation clock in ms (frozen outside Intro/Running)
    pub clock_ms: f64,
    /// Frames simulated
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub back_clouds: Vec<Cloud>,
    pub front_clouds: Vec<Cloud>,
    pub balloons: Vec<Balloon>,
    pub score: u64,
    /// Difficulty level, starts at 1 and only goes up
    pub level: u32,
    pub schedule: Schedule,
    pub flash_cooldown: CooldownTracker,
    pub defend_cooldown: CooldownTracker,
    /// Name typed on the end screen
    pub name_entry: String,
    /// Events since the driver last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh game with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Intro,
            clock_ms: 0.0,
            time_ticks: 0,
            player: Player::new(),
            enemies: Vec::new(),
            back_clouds: Vec::new(),
            front_clouds: Vec::new(),
            balloons: Vec::new(),
            score: 0,
            level: 1,
            schedule: Schedule::new(0.0),
            flash_cooldown: CooldownTracker::new(FLASH_COOLDOWN_MS),
            defend_cooldown: CooldownTracker::new(DEFEND_COOLDOWN_MS),
            name_entry: String::new(),
            events: Vec::new(),
        };

        for _ in 0..STARTING_CLOUDS {
            let cloud = Cloud::spawn_scattered(&mut state.rng);
            state.add_cloud(cloud);
        }

        state
    }

    /// Start over with every field back at its first-game default
    pub fn reset(&mut self) {
        let seed = self.rng.random();
        *self = Self::new(seed);
        log::info!("Game reset (seed {})", seed);
    }

    pub fn is_alive(&self) -> bool {
        !matches!(self.phase, GamePhase::Ended(_))
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn should_quit(&self) -> bool {
        self.phase == GamePhase::Quit
    }

    /// Simulation clock in seconds
    pub fn clock_secs(&self) -> f64 {
        self.clock_ms / 1000.0
    }

    /// File a cloud under its layer
    pub fn add_cloud(&mut self, cloud: Cloud) {
        match cloud.layer {
            CloudLayer::Back => self.back_clouds.push(cloud),
            CloudLayer::Front => self.front_clouds.push(cloud),
        }
    }

    /// Drain the events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
