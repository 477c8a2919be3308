//! Sky Dodge - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, timers, collisions, game state)
//! - `scene`: Draw list handed to the renderer, in fixed layer order
//! - `renderer`: Terminal rendering of a scene
//! - `platform`: Native terminal platform (frame pacing, keyboard input)
//! - `persistence`: Versioned JSON files in the data directory
//! - `highscores`: Top-5 leaderboard

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions in pixels
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Target frame rate; the simulation advances once per frame
    pub const FPS: u32 = 30;
    /// Duration of one frame in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / FPS as f64;

    /// Speeds in pixels per frame
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const CLOUD_SPEED: f32 = 4.0;
    pub const BALLOON_RISE_SPEED: f32 = 3.0;

    /// Spawn / difficulty periods in milliseconds
    pub const CLOUD_PERIOD_MS: f64 = 300.0;
    pub const BALLOON_PERIOD_MS: f64 = 4000.0;
    pub const MISSILE_PERIOD_MS: f64 = 1000.0;
    pub const DIFFICULTY_PERIOD_MS: f64 = 10_000.0;
    /// Missile period multiplier applied on every difficulty tick
    pub const MISSILE_PERIOD_DECAY: f64 = 0.8;

    /// Sprite sizes (width, height) in pixels
    pub const PLAYER_SIZE: (f32, f32) = (64.0, 32.0);
    pub const MISSILE_SIZE: (f32, f32) = (48.0, 16.0);
    pub const BALLOON_SIZE: (f32, f32) = (32.0, 48.0);
    pub const CLOUD_BASE_SIZE: (f32, f32) = (350.0, 200.0);

    /// Ability tuning
    pub const FLASH_BOOST: f32 = 20.0;
    pub const FLASH_COOLDOWN_MS: f64 = 5000.0;
    pub const DEFEND_COOLDOWN_MS: f64 = 5000.0;
    /// Frames of invulnerability granted by defend
    pub const DEFEND_FRAMES: u32 = 5;

    /// Visual rotation limits (degrees)
    pub const MAX_ROTATION: f32 = 15.0;

    /// Scoring
    pub const DEFEND_KILL_SCORE: u64 = 5;
    pub const BALLOON_BASE_SCORE: u64 = 10;
    pub const BALLOON_SCORE_PER_LEVEL: u64 = 2;

    /// Maximum length of a high-score name
    pub const MAX_NAME_LEN: usize = 12;
}
