//! Platform abstraction layer
//!
//! Handles the native terminal side of the game:
//! - Frame pacing (fixed 30 Hz ticks)
//! - Keyboard events and their mapping to `TickInput`
//! - Restoring the terminal on exit

pub mod event;
pub mod input;
pub mod terminal;

pub use event::{Event, EventHandler};
pub use input::InputMapper;
pub use terminal::{TerminalGuard, restore_terminal};
