//! Game settings and tuning
//!
//! Read from an optional JSON file; anything missing takes its default.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Relaxed,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Relaxed => "Relaxed",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "relaxed" | "easy" => Some(Difficulty::Relaxed),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Level timer multiplier
    pub fn time_scale(&self) -> f32 {
        match self {
            Difficulty::Relaxed => 1.5,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.7,
        }
    }
}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Tray & pool ===
    /// Tray slot count
    pub tray_capacity: usize,
    /// Fruit types registered with the pool (ids `0..fruit_types`)
    pub fruit_types: u32,
    /// Idle fruits kept per type
    pub pool_size_per_type: usize,

    // === Timing ===
    /// Base level time limit before the difficulty multiplier
    pub level_time_secs: f32,
    /// Fruits released per spawn step
    pub spawns_per_step: usize,
    /// Frames to yield between spawn steps
    pub spawn_interval_frames: u32,

    // === Physics stabilization ===
    /// Frames a fruit stays kinematic after spawning
    pub kinematic_frames: u32,
    /// Cap on how fast overlapping bodies are pushed apart
    pub max_depenetration_velocity: f32,

    // === Spawn area ===
    /// Lower corner of the drop area (y is the base drop height)
    pub spawn_min: Vec3,
    /// Upper corner of the drop area
    pub spawn_max: Vec3,
    /// Extra height per spawn so later fruits drop from higher up
    pub stack_step: f32,

    /// Duration of the shrink-out animation when a triple clears
    pub clear_anim_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            tray_capacity: 7,
            fruit_types: 8,
            pool_size_per_type: 12,

            level_time_secs: 120.0,
            spawns_per_step: 2,
            spawn_interval_frames: 3,

            kinematic_frames: 10,
            max_depenetration_velocity: 2.0,

            spawn_min: Vec3::new(-2.0, 4.0, -3.0),
            spawn_max: Vec3::new(2.0, 4.0, 3.0),
            stack_step: 0.05,

            clear_anim_secs: 0.2,
        }
    }
}

impl Settings {
    /// Create settings for a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Level time limit after the difficulty multiplier
    pub fn effective_level_time(&self) -> f32 {
        self.level_time_secs * self.difficulty.time_scale()
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Strict load
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }
}
