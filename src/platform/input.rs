//! Keyboard to `TickInput` mapping
//!
//! Terminals report key presses, not key state. When the terminal supports
//! release events the arrow keys are tracked exactly; otherwise a key counts
//! as held for a few frames after its last press or auto-repeat.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{MoveInput, TextEdit, TickInput};

/// Frames an arrow key stays down after a press when releases are not reported
pub const HOLD_FRAMES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(Arrow::Up),
            KeyCode::Down => Some(Arrow::Down),
            KeyCode::Left => Some(Arrow::Left),
            KeyCode::Right => Some(Arrow::Right),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Collects key events between frames and hands out one `TickInput` per frame
#[derive(Debug, Clone)]
pub struct InputMapper {
    /// Terminal reports key releases
    release_events: bool,
    /// Frames each arrow stays held (`u32::MAX` until released)
    held: [u32; 4],
    /// One-shot commands since the last frame
    pending: TickInput,
}

impl InputMapper {
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            held: [0; 4],
            pending: TickInput::default(),
        }
    }

    /// Record a key event. `typing` is true while the name prompt is open.
    pub fn on_key(&mut self, key: KeyEvent, typing: bool) {
        // Ctrl+C always quits; raw mode swallows SIGINT
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.pending.quit = true;
            return;
        }

        if let Some(arrow) = Arrow::from_code(key.code) {
            self.on_arrow(arrow, key.kind);
            return;
        }

        // Everything else acts on the initial press only
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => self.pending.quit = true,
            KeyCode::Enter => self.pending.confirm = true,
            KeyCode::Backspace if typing => self.pending.text.push(TextEdit::Erase),
            KeyCode::Char(c) if typing => self.pending.text.push(TextEdit::Insert(c)),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                ' ' | 'f' => self.pending.flash = true,
                'd' => self.pending.defend = true,
                'p' => self.pending.pause = true,
                'r' => self.pending.reset = true,
                _ => {}
            },
            _ => {}
        }
    }

    fn on_arrow(&mut self, arrow: Arrow, kind: KeyEventKind) {
        let slot = &mut self.held[arrow.index()];
        match kind {
            KeyEventKind::Release => *slot = 0,
            _ if self.release_events => *slot = u32::MAX,
            _ => *slot = HOLD_FRAMES,
        }
    }

    /// Input for the next frame; clears one-shot commands and ages held keys
    pub fn next_input(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.movement = MoveInput {
            up: self.held[Arrow::Up.index()] > 0,
            down: self.held[Arrow::Down.index()] > 0,
            left: self.held[Arrow::Left.index()] > 0,
            right: self.held[Arrow::Right.index()] > 0,
        };

        if !self.release_events {
            for slot in &mut self.held {
                *slot = slot.saturating_sub(1);
            }
        }

        input
    }

    /// Forget held keys, e.g. after a reset
    pub fn release_all(&mut self) {
        self.held = [0; 4];
    }
}
