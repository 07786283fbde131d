//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by fruit id / fruit type)
//! - No rendering, physics or platform dependencies; the scene only sees `Command`s

pub mod autoplay;
pub mod codec;
pub mod pool;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod tray;

pub use autoplay::choose_pick;
pub use pool::{Pool, Poolable};
pub use schedule::{LevelTimer, PendingSpawn, SpawnSequence, TimerStep};
pub use state::{
    BodyMode, FailReason, FruitId, FruitModel, FruitType, GameEvent, GamePhase, GameState,
    PromptChoice, spawn_count,
};
pub use tick::{TickInput, tick};
pub use tray::{MATCH_SIZE, Tray, TryAddOutcome};
