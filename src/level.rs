//! Level data
//!
//! Levels ship as a JSON array bundled into the binary. Each level lists its
//! tasks as packed codes (see [`crate::sim::codec`]).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::FruitType;
use crate::sim::codec;

/// Bundled, read-only level set
pub const BUNDLED_LEVELS: &str = include_str!("../assets/levels.json");

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level data: {0}")]
    Json(#[from] serde_json::Error),
}

/// One level as authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelModel {
    pub ordinal: u32,
    /// Packed `(type, count)` codes
    #[serde(default)]
    pub tasks: Vec<u32>,
    #[serde(default)]
    pub reward: u32,
}

impl LevelModel {
    pub fn new(ordinal: u32, tasks: &[(FruitType, u32)], reward: u32) -> Self {
        Self {
            ordinal,
            tasks: tasks.iter().map(|&(t, c)| codec::encode(t, c)).collect(),
            reward,
        }
    }

    /// Decoded `(type, count)` pairs in authored order
    pub fn decoded_tasks(&self) -> impl Iterator<Item = (FruitType, u32)> + '_ {
        self.tasks.iter().map(|&code| codec::decode(code))
    }

    /// Remaining count per type. Repeated types are summed.
    pub fn remaining_map(&self) -> BTreeMap<FruitType, u32> {
        let mut map = BTreeMap::new();
        for (fruit_type, count) in self.decoded_tasks() {
            *map.entry(fruit_type).or_insert(0) += count;
        }
        map
    }
}

/// Parse a level array
pub fn parse_levels(json: &str) -> Result<Vec<LevelModel>, LevelError> {
    let mut levels: Vec<LevelModel> = serde_json::from_str(json)?;
    levels.sort_by_key(|l| l.ordinal);
    Ok(levels)
}

/// Read and parse a level file
pub fn load_levels(path: impl AsRef<Path>) -> Result<Vec<LevelModel>, LevelError> {
    let json = std::fs::read_to_string(path)?;
    parse_levels(&json)
}

/// Lenient parse: on failure log and return no levels. The game then has
/// nothing to play and stays idle.
pub fn parse_levels_or_empty(json: &str) -> Vec<LevelModel> {
    match parse_levels(json) {
        Ok(levels) => {
            log::info!("Loaded {} levels", levels.len());
            levels
        }
        Err(e) => {
            log::error!("Level data unusable, continuing with no levels: {}", e);
            Vec::new()
        }
    }
}

/// Lenient file load, see [`parse_levels_or_empty`]
pub fn load_levels_or_empty(path: impl AsRef<Path>) -> Vec<LevelModel> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(json) => parse_levels_or_empty(&json),
        Err(e) => {
            log::error!("Cannot read levels from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// The level set compiled into the binary
pub fn bundled_levels() -> Vec<LevelModel> {
    parse_levels_or_empty(BUNDLED_LEVELS)
}
