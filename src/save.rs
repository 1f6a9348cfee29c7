//! Persistent save file: high score and player settings
//!
//! A single JSON file next to the binary. Anything missing or malformed
//! degrades to defaults; writes are best-effort and never surface errors
//! into gameplay.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

const SAVE_FILE: &str = "snake_arcade_save.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    pub high_score: u32,
    pub theme: Theme,
    pub sound: bool,
    pub show_grid: bool,
    pub particles: bool,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            high_score: 0,
            theme: Theme::Dark,
            sound: true,
            show_grid: false,
            particles: true,
        }
    }
}

pub fn load() -> SaveData {
    if Path::new(SAVE_FILE).exists() {
        if let Ok(text) = fs::read_to_string(SAVE_FILE) {
            return serde_json::from_str(&text).unwrap_or_default();
        }
    }
    SaveData::default()
}

pub fn store(data: &SaveData) {
    if let Ok(text) = serde_json::to_string_pretty(data) {
        let _ = fs::write(SAVE_FILE, text);
    }
}
