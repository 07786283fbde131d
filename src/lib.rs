//! Fruit Tray - a 3D triple-match tray game core
//!
//! Core modules:
//! - `sim`: Deterministic game core (tray, pool, level orchestration)
//! - `level`: Level data and the packed task format
//! - `present`: Commands for the rendering/physics/UI side
//! - `settings`: Data-driven game tuning
//! - `wallet`: Level rewards for the current run

pub mod level;
pub mod present;
pub mod settings;
pub mod sim;
pub mod wallet;

pub use level::LevelModel;
pub use present::{Command, Presenter};
pub use settings::{Difficulty, Settings};
pub use wallet::Wallet;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
