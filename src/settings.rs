//! Game settings and preferences
//!
//! Persisted separately from high scores in the data directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::persistence;

/// File name inside the data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no high-level strobe)
    pub reduced_motion: bool,
    /// High contrast mode
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // HUD
            show_fps: false,

            // Accessibility
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Strobe overlay allowed (respects reduced_motion)
    pub fn effective_strobe(&self) -> bool {
        !self.reduced_motion
    }

    pub fn default_path() -> PathBuf {
        persistence::data_dir().join(SETTINGS_FILE)
    }

    /// Load settings; a missing file is created with defaults
    pub fn load_from(path: &Path) -> Self {
        match persistence::load_json::<Settings>(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if persistence::is_not_found(&e) => {
                log::info!("Using default settings");
                let settings = Self::default();
                settings.save_to(path);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) {
        match persistence::save_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {:#}", e),
        }
    }

    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }
}
