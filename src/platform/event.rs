//! Terminal event source
//!
//! A background thread polls crossterm and forwards key events, with a
//! `Tick` sent on a fixed schedule so frame pacing does not drift while
//! keys are pressed.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized; the next draw picks up the new size
    Resize,
    Tick,
}

pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let mut next_tick = Instant::now() + tick_rate;
            loop {
                let timeout = next_tick.saturating_duration_since(Instant::now());
                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(event::Event::Key(key)) => Some(Event::Key(key)),
                        Ok(event::Event::Resize(..)) => Some(Event::Resize),
                        _ => None,
                    };
                    if let Some(ev) = forwarded {
                        if tx.send(ev).is_err() {
                            return;
                        }
                    }
                }

                if Instant::now() >= next_tick {
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                    next_tick += tick_rate;
                    // Fell far behind (e.g. suspended): resync instead of bursting
                    let now = Instant::now();
                    if next_tick < now {
                        next_tick = now + tick_rate;
                    }
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> Result<Event> {
        self.rx.recv().context("event thread stopped")
    }
}
