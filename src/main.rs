//! Sky Dodge entry point
//!
//! Sets up the terminal and logger, then runs the 30 Hz game loop.

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode, supports_keyboard_enhancement},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use sky_dodge::consts::*;
use sky_dodge::platform::{Event, EventHandler, InputMapper, TerminalGuard, restore_terminal};
use sky_dodge::renderer::{self, View, palette::Palette};
use sky_dodge::scene::build_scene;
use sky_dodge::sim::{EndStage, GameEvent, GamePhase, GameState, tick};
use sky_dodge::{HighScores, Settings, persistence};

const LOG_FILE: &str = "sky-dodge.log";

/// Smoothed frames-per-second from tick arrival times
struct FpsCounter {
    last: Option<Instant>,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: None,
            fps: FPS as f32,
        }
    }

    fn tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last {
            let dt = now.duration_since(last).as_secs_f32();
            if dt > 0.0 {
                self.fps = self.fps * 0.9 + (1.0 / dt) * 0.1;
            }
        }
        self.last = Some(now);
    }
}

/// Driver state around the simulation
struct Game {
    state: GameState,
    input: InputMapper,
    settings: Settings,
    palette: Palette,
    high_scores: HighScores,
    scores_path: PathBuf,
    frame_count: u64,
    fps: FpsCounter,
}

impl Game {
    fn new(seed: u64, release_events: bool) -> Self {
        let settings = Settings::load();
        let palette = Palette::for_settings(settings.high_contrast);
        let scores_path = HighScores::default_path();
        let high_scores = HighScores::load_from(&scores_path);
        log::info!("Game initialized with seed: {}", seed);

        Self {
            state: GameState::new(seed),
            input: InputMapper::new(release_events),
            settings,
            palette,
            high_scores,
            scores_path,
            frame_count: 0,
            fps: FpsCounter::new(),
        }
    }

    fn typing(&self) -> bool {
        self.state.phase == GamePhase::Ended(EndStage::EnteringName)
    }

    fn on_tick(&mut self) {
        self.fps.tick();
        self.frame_count += 1;

        let input = self.input.next_input();
        tick(&mut self.state, &input, FRAME_MS);

        for event in self.state.take_events() {
            match event {
                GameEvent::PlayerDestroyed { .. } => self.input.release_all(),
                GameEvent::ScoreSubmitted { name, score } => {
                    if let Some(rank) = self.high_scores.add_score(&name, score) {
                        log::info!("{} placed #{} with {}", name, rank, score);
                    }
                    self.high_scores.save_to(&self.scores_path);
                }
                _ => {}
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame) {
        let scene = build_scene(&self.state, self.settings.effective_strobe());
        renderer::render(
            frame,
            &View {
                scene: &scene,
                name_entry: &self.state.name_entry,
                high_scores: &self.high_scores,
                fps: self.settings.show_fps.then_some(self.fps.fps),
                palette: &self.palette,
                frame_count: self.frame_count,
            },
        );
    }
}

fn init_logger() {
    let target = match File::create(persistence::data_dir().join(LOG_FILE)) {
        Ok(file) => env_logger::Target::Pipe(Box::new(file)),
        // The terminal belongs to the UI; never log to it
        Err(_) => env_logger::Target::Pipe(Box::new(io::sink())),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(target)
        .init();
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(enhanced: bool) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear()?;

    let mut game = Game::new(time_seed(), enhanced);
    let events = EventHandler::new(Duration::from_secs_f64(FRAME_MS / 1000.0));

    terminal.draw(|frame| game.draw(frame))?;
    loop {
        match events.next()? {
            Event::Tick => {
                game.on_tick();
                terminal.draw(|frame| game.draw(frame))?;
            }
            Event::Key(key) => {
                let typing = game.typing();
                game.input.on_key(key, typing);
            }
            Event::Resize => {
                terminal.autoresize()?;
            }
        }

        if game.state.should_quit() {
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    init_logger();
    log::info!("Sky Dodge starting...");

    // Setup terminal
    enable_raw_mode().context("enable raw mode")?;
    let mut guard = TerminalGuard::new();
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("push keyboard flags")?;
        guard.set_enhanced();
    }
    log::info!("Key release events: {}", enhanced);

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal(enhanced);
        default_hook(info);
    }));

    let result = run(enhanced);
    drop(guard);
    log::info!("Sky Dodge exiting");
    result
}
