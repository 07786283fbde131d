//! Game state and the level orchestrator
//!
//! One `GameState` owns the tray, the pool, the board and the level
//! progress. Everything the scene needs to know is written to `commands`;
//! everything gameplay code might react to is written to `events`.

use std::collections::BTreeMap;

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::pool::{Pool, Poolable};
use super::schedule::{LevelTimer, PendingSpawn, SpawnSequence, format_clock};
use super::tray::{MATCH_SIZE, Tray, TryAddOutcome, remove_and_compact};
use crate::level::LevelModel;
use crate::present::{Command, Label, Prompt};
use crate::settings::Settings;
use crate::wallet::Wallet;

/// Fruit type identifier
pub type FruitType = u32;
/// Stable per-object identifier, kept across pool reuse
pub type FruitId = u32;

/// Physics body mode requested for a fruit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyMode {
    /// Held still for `frames_left` more ticks after spawning
    Kinematic { frames_left: u32 },
    Dynamic,
}

/// A pooled fruit
#[derive(Debug, Clone, PartialEq)]
pub struct FruitModel {
    pub id: FruitId,
    pub fruit_type: FruitType,
    /// In the tray (no longer on the board)
    pub busy: bool,
    pub pose: Vec3,
    pub body: BodyMode,
}

impl FruitModel {
    pub fn new(id: FruitId, fruit_type: FruitType) -> Self {
        Self {
            id,
            fruit_type,
            busy: false,
            pose: Vec3::ZERO,
            body: BodyMode::Kinematic { frames_left: 0 },
        }
    }
}

impl Poolable for FruitModel {
    type Key = FruitType;

    fn pool_key(&self) -> FruitType {
        self.fruit_type
    }

    fn reset(&mut self) {
        self.busy = false;
        self.pose = Vec3::ZERO;
        self.body = BodyMode::Kinematic { frames_left: 0 };
    }
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing loaded yet
    Idle,
    Playing,
    /// Level cleared, more levels remain
    NextLevelPrompt,
    /// Timer ran out or the tray overflowed
    FailedPrompt,
    /// Final level cleared
    GameFinishedPrompt,
}

/// Button pressed on a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Next,
    Retry,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    TimeUp,
    TrayOverflow,
}

/// Gameplay events emitted during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelStarted {
        ordinal: u32,
    },
    Picked {
        fruit: FruitId,
        fruit_type: FruitType,
        slot: usize,
    },
    PickRejected {
        fruit: FruitId,
    },
    TripleCleared {
        fruit_type: FruitType,
        slots: [usize; MATCH_SIZE],
    },
    LevelComplete {
        ordinal: u32,
        reward: u32,
        secs: f32,
    },
    LevelFailed {
        ordinal: u32,
        reason: FailReason,
    },
    GameFinished,
}

/// Spawn count for a task: rounded up so the type can be fully cleared in triples
pub fn spawn_count(task_count: u32) -> u32 {
    task_count.div_ceil(MATCH_SIZE as u32) * MATCH_SIZE as u32
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub settings: Settings,
    levels: Vec<LevelModel>,
    level_index: usize,
    phase: GamePhase,
    tray: Tray,
    /// Fruits sitting in the tray, slot-for-slot with `tray`
    tray_fruits: Vec<Option<FruitModel>>,
    /// Fruits on the board (sorted by id)
    board: Vec<FruitModel>,
    pool: Pool<FruitModel>,
    remaining: BTreeMap<FruitType, u32>,
    /// Set once the current attempt has been scored
    completed: bool,
    pub spawner: SpawnSequence,
    pub timer: LevelTimer,
    pub wallet: Wallet,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub events: Vec<GameEvent>,
    pub commands: Vec<Command>,
}

impl GameState {
    pub fn new(settings: Settings, levels: Vec<LevelModel>, seed: u64) -> Self {
        let mut next_id: FruitId = 1;
        let pool = Pool::new(
            0..settings.fruit_types,
            settings.pool_size_per_type,
            move |fruit_type| {
                let fruit = FruitModel::new(next_id, fruit_type);
                next_id += 1;
                fruit
            },
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tray: Tray::new(settings.tray_capacity),
            tray_fruits: vec![None; settings.tray_capacity],
            spawner: SpawnSequence::new(settings.spawns_per_step, settings.spawn_interval_frames),
            timer: LevelTimer::default(),
            settings,
            levels,
            level_index: 0,
            phase: GamePhase::Idle,
            board: Vec::new(),
            pool,
            remaining: BTreeMap::new(),
            completed: false,
            wallet: Wallet::new(),
            time_ticks: 0,
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn levels(&self) -> &[LevelModel] {
        &self.levels
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn current_level(&self) -> Option<&LevelModel> {
        self.levels.get(self.level_index)
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.levels.len()
    }

    pub fn tray(&self) -> &Tray {
        &self.tray
    }

    /// Fruit ids in tray slot order
    pub fn tray_fruit_ids(&self) -> Vec<Option<FruitId>> {
        self.tray_fruits
            .iter()
            .map(|f| f.as_ref().map(|f| f.id))
            .collect()
    }

    pub fn board(&self) -> &[FruitModel] {
        &self.board
    }

    pub fn pool(&self) -> &Pool<FruitModel> {
        &self.pool
    }

    pub fn remaining(&self) -> &BTreeMap<FruitType, u32> {
        &self.remaining
    }

    /// Fruits currently out of the pool (board + tray)
    pub fn active_count(&self) -> usize {
        self.board.len() + self.tray_fruits.iter().filter(|f| f.is_some()).count()
    }

    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Leave Idle and begin the first level. Returns false if there is nothing to play.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        if self.levels.is_empty() {
            log::error!("No levels loaded, cannot start");
            return false;
        }
        self.begin_level(0);
        true
    }

    /// Apply a prompt button. Returns false if the choice does not fit the current prompt.
    pub fn resolve_prompt(&mut self, choice: PromptChoice) -> bool {
        let index = match (self.phase, choice) {
            (GamePhase::NextLevelPrompt, PromptChoice::Next) => self.level_index + 1,
            (GamePhase::FailedPrompt, PromptChoice::Retry) => self.level_index,
            (GamePhase::FailedPrompt | GamePhase::GameFinishedPrompt, PromptChoice::Restart) => 0,
            _ => {
                log::debug!("Ignoring {:?} in {:?}", choice, self.phase);
                return false;
            }
        };
        self.begin_level(index);
        true
    }

    /// Full board reset into level `index`
    pub fn begin_level(&mut self, index: usize) {
        let Some(level) = self.levels.get(index).cloned() else {
            log::error!("Level index {} out of range ({} levels)", index, self.levels.len());
            return;
        };

        // Stop in-flight sequences before touching the board
        self.spawner.cancel();
        self.timer.cancel();
        self.recycle_all();

        self.level_index = index;
        self.completed = false;
        self.remaining = level.remaining_map();

        let mut spawns: Vec<PendingSpawn> = self
            .remaining
            .iter()
            .flat_map(|(&fruit_type, &count)| {
                (0..spawn_count(count)).map(move |_| PendingSpawn {
                    fruit_type,
                    order: 0,
                })
            })
            .collect();
        spawns.shuffle(&mut self.rng);
        for (order, spawn) in spawns.iter_mut().enumerate() {
            spawn.order = order as u32;
        }
        let total = spawns.len();
        self.spawner.start(spawns);
        self.timer.start(self.settings.effective_level_time());

        self.commands.push(Command::HidePrompt);
        self.commands.push(Command::SetText {
            label: Label::Level,
            text: level.ordinal.to_string(),
        });
        self.commands.push(Command::SetText {
            label: Label::Timer,
            text: format_clock(self.timer.display_secs()),
        });
        for (&fruit_type, &count) in &self.remaining {
            self.commands.push(Command::SetText {
                label: Label::Task(fruit_type),
                text: count.to_string(),
            });
        }

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelStarted {
            ordinal: level.ordinal,
        });
        log::info!(
            "Level {} started: {} tasks, {} fruits to spawn",
            level.ordinal,
            self.remaining.len(),
            total
        );
    }

    /// Return every board and tray fruit to the pool
    fn recycle_all(&mut self) {
        let fruits: Vec<FruitModel> = self
            .board
            .drain(..)
            .chain(self.tray_fruits.iter_mut().filter_map(Option::take))
            .collect();
        for fruit in fruits {
            self.commands.push(Command::Despawn {
                fruit: fruit.id,
                delay_secs: 0.0,
            });
            self.pool.put(fruit);
        }
        self.tray.clear();
    }

    /// Take a fruit from the pool and drop it onto the board
    pub fn spawn_fruit(&mut self, pending: PendingSpawn) -> Option<FruitId> {
        let Some(mut fruit) = self.pool.get(pending.fruit_type) else {
            log::warn!("No pool registered for fruit type {}", pending.fruit_type);
            return None;
        };

        let lo = self.settings.spawn_min.min(self.settings.spawn_max);
        let hi = self.settings.spawn_min.max(self.settings.spawn_max);
        let x = self.rng.random_range(lo.x..=hi.x);
        let z = self.rng.random_range(lo.z..=hi.z);
        let y = lo.y + pending.order as f32 * self.settings.stack_step;

        fruit.busy = false;
        fruit.pose = Vec3::new(x, y, z);
        fruit.body = BodyMode::Kinematic {
            frames_left: self.settings.kinematic_frames,
        };

        self.commands.push(Command::Spawn {
            fruit: fruit.id,
            fruit_type: fruit.fruit_type,
            pose: fruit.pose,
            max_depenetration_velocity: self.settings.max_depenetration_velocity,
        });

        let id = fruit.id;
        let pos = self.board.partition_point(|f| f.id < id);
        self.board.insert(pos, fruit);
        Some(id)
    }

    /// Count down kinematic holds and release finished ones to the physics engine
    pub fn settle_bodies(&mut self) {
        for fruit in &mut self.board {
            if let BodyMode::Kinematic { frames_left } = &mut fruit.body {
                if *frames_left == 0 {
                    fruit.body = BodyMode::Dynamic;
                    self.commands.push(Command::SetKinematic {
                        fruit: fruit.id,
                        kinematic: false,
                    });
                } else {
                    *frames_left -= 1;
                }
            }
        }
    }

    /// Move a board fruit into the tray
    pub fn pick_fruit(&mut self, id: FruitId) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(pos) = self.board.iter().position(|f| f.id == id) else {
            log::debug!("Pick ignored, fruit {} is not on the board", id);
            return;
        };
        if let BodyMode::Kinematic { frames_left } = self.board[pos].body {
            log::debug!("Pick ignored, fruit {} still settling ({} frames)", id, frames_left);
            return;
        }
        let fruit_type = self.board[pos].fruit_type;

        match self.tray.try_add(fruit_type) {
            TryAddOutcome::Rejected => {
                self.events.push(GameEvent::PickRejected { fruit: id });
                self.fail(FailReason::TrayOverflow);
            }
            TryAddOutcome::Accepted { slot, cleared } => {
                let mut fruit = self.board.remove(pos);
                fruit.busy = true;
                self.commands.push(Command::SetColliderEnabled {
                    fruit: id,
                    enabled: false,
                });
                self.commands.push(Command::SetKinematic {
                    fruit: id,
                    kinematic: true,
                });
                self.commands.push(Command::MoveToSlot { fruit: id, slot });
                self.tray_fruits[slot] = Some(fruit);
                self.events.push(GameEvent::Picked {
                    fruit: id,
                    fruit_type,
                    slot,
                });
                log::debug!("Fruit {} (type {}) -> slot {}", id, fruit_type, slot);

                if let Some(slots) = cleared {
                    self.clear_triple(fruit_type, slots);
                }
            }
        }
    }

    fn clear_triple(&mut self, fruit_type: FruitType, slots: [usize; MATCH_SIZE]) {
        for &i in &slots {
            if let Some(fruit) = self.tray_fruits[i].take() {
                self.commands.push(Command::AnimateScale {
                    fruit: fruit.id,
                    from: 1.0,
                    to: 0.0,
                    secs: self.settings.clear_anim_secs,
                });
                self.commands.push(Command::Despawn {
                    fruit: fruit.id,
                    delay_secs: self.settings.clear_anim_secs,
                });
                self.pool.put(fruit);
            }
        }

        let before: Vec<Option<FruitId>> = self.tray_fruit_ids();
        remove_and_compact(&mut self.tray_fruits, &slots);
        for (slot, fruit) in self.tray_fruits.iter().enumerate() {
            if let Some(fruit) = fruit {
                if before[slot] != Some(fruit.id) {
                    self.commands.push(Command::MoveToSlot {
                        fruit: fruit.id,
                        slot,
                    });
                }
            }
        }

        if let Some(count) = self.remaining.get_mut(&fruit_type) {
            *count = count.saturating_sub(MATCH_SIZE as u32);
            let text = count.to_string();
            self.commands.push(Command::SetText {
                label: Label::Task(fruit_type),
                text,
            });
        }

        self.events.push(GameEvent::TripleCleared { fruit_type, slots });
        log::debug!("Cleared triple of type {} from slots {:?}", fruit_type, slots);
    }

    /// Score the level if every task is done. Fires at most once per attempt.
    pub fn check_completion(&mut self) -> bool {
        if self.phase != GamePhase::Playing
            || self.completed
            || self.remaining.values().any(|&c| c > 0)
        {
            return false;
        }
        let Some(level) = self.current_level() else {
            return false;
        };
        let (ordinal, reward) = (level.ordinal, level.reward);

        self.completed = true;
        self.spawner.cancel();
        self.timer.cancel();
        let secs = self.timer.elapsed();

        if self.wallet.credit(ordinal, reward, secs) {
            log::info!("New best time for level {}: {:.1}s", ordinal, secs);
        }
        self.commands.push(Command::SetText {
            label: Label::Coins,
            text: self.wallet.coins.to_string(),
        });
        self.events.push(GameEvent::LevelComplete {
            ordinal,
            reward,
            secs,
        });

        if self.is_last_level() {
            self.phase = GamePhase::GameFinishedPrompt;
            self.commands
                .push(Command::ShowPrompt(Prompt::GameFinished { reward }));
            self.events.push(GameEvent::GameFinished);
            log::info!("Level {} complete, game finished", ordinal);
        } else {
            self.phase = GamePhase::NextLevelPrompt;
            self.commands
                .push(Command::ShowPrompt(Prompt::NextLevel { reward }));
            log::info!("Level {} complete in {:.1}s", ordinal, secs);
        }
        true
    }

    /// End the attempt as a loss
    pub fn fail(&mut self, reason: FailReason) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.spawner.cancel();
        self.timer.cancel();
        self.phase = GamePhase::FailedPrompt;

        let ordinal = self.current_level().map(|l| l.ordinal).unwrap_or(0);
        self.commands.push(Command::ShowPrompt(Prompt::Failed));
        self.events.push(GameEvent::LevelFailed { ordinal, reason });
        log::info!("Level {} failed: {:?}", ordinal, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            fruit_types: 4,
            pool_size_per_type: 3,
            spawns_per_step: 100,
            spawn_interval_frames: 0,
            kinematic_frames: 0,
            ..Settings::default()
        }
    }

    fn levels() -> Vec<LevelModel> {
        vec![
            LevelModel::new(1, &[(0, 3), (1, 3)], 10),
            LevelModel::new(2, &[(2, 6)], 20),
        ]
    }

    fn spawn_all(state: &mut GameState) {
        for pending in state.spawner.step() {
            state.spawn_fruit(pending);
        }
    }

    /// Spawn everything and let it settle so it can be picked
    fn spawn_settled(state: &mut GameState) {
        spawn_all(state);
        state.settle_bodies();
    }

    fn board_ids_of(state: &GameState, fruit_type: FruitType) -> Vec<FruitId> {
        state
            .board()
            .iter()
            .filter(|f| f.fruit_type == fruit_type)
            .map(|f| f.id)
            .collect()
    }

    #[test]
    fn test_spawn_count_rounds_to_triples() {
        assert_eq!(spawn_count(0), 0);
        assert_eq!(spawn_count(3), 3);
        assert_eq!(spawn_count(4), 6);
        assert_eq!(spawn_count(8), 9);
    }

    #[test]
    fn test_start_requires_levels() {
        let mut state = GameState::new(settings(), Vec::new(), 1);
        assert!(!state.start());
        assert_eq!(state.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_start_builds_remaining_and_queues_spawns() {
        let mut state = GameState::new(settings(), levels(), 1);
        assert!(state.start());
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.remaining().get(&0), Some(&3));
        assert_eq!(state.spawner.pending(), 6);
        assert!(!state.start());
    }

    #[test]
    fn test_spawn_starts_kinematic_then_dynamic() {
        let s = Settings {
            kinematic_frames: 1,
            ..settings()
        };
        let mut state = GameState::new(s, levels(), 1);
        state.start();
        spawn_all(&mut state);
        assert_eq!(state.board().len(), 6);
        assert!(
            state
                .board()
                .iter()
                .all(|f| f.body == BodyMode::Kinematic { frames_left: 1 })
        );

        state.drain_commands();
        state.settle_bodies();
        state.settle_bodies();
        assert!(state.board().iter().all(|f| f.body == BodyMode::Dynamic));
        let released = state
            .drain_commands()
            .into_iter()
            .filter(|c| matches!(c, Command::SetKinematic { kinematic: false, .. }))
            .count();
        assert_eq!(released, 6);
    }

    #[test]
    fn test_triple_clears_and_returns_to_pool() {
        let mut state = GameState::new(settings(), levels(), 7);
        state.start();
        spawn_settled(&mut state);

        let ids = board_ids_of(&state, 0);
        assert_eq!(ids.len(), 3);
        for id in ids {
            state.pick_fruit(id);
        }

        assert!(state.tray().is_empty());
        assert_eq!(state.remaining().get(&0), Some(&0));
        assert_eq!(state.pool().idle_count(0), 3);
        assert!(
            state
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::TripleCleared { fruit_type: 0, .. }))
        );
    }

    #[test]
    fn test_survivors_reported_at_new_slots() {
        let mut state = GameState::new(settings(), levels(), 3);
        state.start();
        spawn_settled(&mut state);

        let zeros = board_ids_of(&state, 0);
        let ones = board_ids_of(&state, 1);
        state.pick_fruit(zeros[0]);
        state.pick_fruit(ones[0]);
        state.pick_fruit(zeros[1]);
        state.drain_commands();
        state.pick_fruit(zeros[2]);

        assert_eq!(state.tray_fruit_ids()[0], Some(ones[0]));
        assert!(state.drain_commands().contains(&Command::MoveToSlot {
            fruit: ones[0],
            slot: 0
        }));
    }

    #[test]
    fn test_completion_fires_once() {
        let mut state = GameState::new(settings(), levels(), 11);
        state.start();
        spawn_settled(&mut state);
        for t in [0, 1] {
            for id in board_ids_of(&state, t) {
                state.pick_fruit(id);
            }
        }

        assert!(state.check_completion());
        assert!(!state.check_completion());
        assert_eq!(state.phase(), GamePhase::NextLevelPrompt);
        let completions = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelComplete { .. }))
            .count();
        assert_eq!(completions, 1);
        assert_eq!(state.wallet.coins, 10);
    }

    #[test]
    fn test_overflow_on_reject_fails() {
        let s = Settings {
            tray_capacity: 2,
            ..settings()
        };
        let mut state = GameState::new(s, levels(), 5);
        state.start();
        spawn_settled(&mut state);

        let zeros = board_ids_of(&state, 0);
        let ones = board_ids_of(&state, 1);
        state.pick_fruit(zeros[0]);
        state.pick_fruit(ones[0]);
        assert!(state.tray().is_full());
        assert_eq!(state.phase(), GamePhase::Playing);

        state.pick_fruit(zeros[1]);
        assert_eq!(state.phase(), GamePhase::FailedPrompt);
        assert!(state.commands.contains(&Command::ShowPrompt(Prompt::Failed)));
        // Rejected fruit stays on the board
        assert!(state.board().iter().any(|f| f.id == zeros[1]));
    }

    #[test]
    fn test_retry_resets_board_and_conserves_fruits() {
        let mut state = GameState::new(settings(), levels(), 9);
        state.start();
        spawn_settled(&mut state);
        let zeros = board_ids_of(&state, 0);
        state.pick_fruit(zeros[0]);
        state.fail(FailReason::TimeUp);

        let created = state.pool().created();
        assert!(state.resolve_prompt(PromptChoice::Retry));
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.active_count(), 0);
        assert!(state.tray().is_empty());
        assert_eq!(state.remaining().get(&0), Some(&3));
        assert_eq!(
            state.pool().created() - state.pool().destroyed(),
            state.pool().total_idle() + state.active_count()
        );
        assert_eq!(state.pool().created(), created);
    }

    #[test]
    fn test_invalid_prompt_choice_ignored() {
        let mut state = GameState::new(settings(), levels(), 9);
        state.start();
        assert!(!state.resolve_prompt(PromptChoice::Next));
        state.fail(FailReason::TimeUp);
        assert!(!state.resolve_prompt(PromptChoice::Next));
        assert_eq!(state.phase(), GamePhase::FailedPrompt);
    }

    #[test]
    fn test_last_level_finishes_game() {
        let mut state = GameState::new(settings(), levels(), 2);
        state.begin_level(1);
        spawn_settled(&mut state);
        for id in board_ids_of(&state, 2) {
            state.pick_fruit(id);
        }
        assert!(state.check_completion());
        assert_eq!(state.phase(), GamePhase::GameFinishedPrompt);
        assert!(state.drain_events().contains(&GameEvent::GameFinished));

        assert!(state.resolve_prompt(PromptChoice::Restart));
        assert_eq!(state.level_index(), 0);
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_pick_ignored_while_settling() {
        let s = Settings {
            kinematic_frames: 10,
            ..settings()
        };
        let mut state = GameState::new(s, levels(), 4);
        state.start();
        spawn_all(&mut state);

        let id = state.board()[0].id;
        state.pick_fruit(id);
        assert!(state.tray().is_empty());
        assert!(state.board().iter().any(|f| f.id == id));
        assert!(state.drain_events().iter().all(|e| !matches!(e, GameEvent::Picked { .. })));

        for _ in 0..=10 {
            state.settle_bodies();
        }
        state.pick_fruit(id);
        assert_eq!(state.tray().len(), 1);
    }

    #[test]
    fn test_cleared_fruit_despawn_waits_for_shrink() {
        let mut state = GameState::new(settings(), levels(), 7);
        state.start();
        spawn_settled(&mut state);
        state.drain_commands();

        let ids = board_ids_of(&state, 0);
        for &id in &ids {
            state.pick_fruit(id);
        }

        let anim = state.settings.clear_anim_secs;
        let commands = state.drain_commands();
        for id in ids {
            assert!(commands.contains(&Command::Despawn {
                fruit: id,
                delay_secs: anim
            }));
        }
    }

    #[test]
    fn test_completion_without_level_leaves_attempt_running() {
        let mut state = GameState::new(settings(), levels(), 6);
        state.start();
        state.remaining.values_mut().for_each(|c| *c = 0);
        state.levels.clear();

        assert!(!state.check_completion());
        assert!(!state.completed);
        assert!(state.timer.is_running());
        assert!(state.spawner.is_running());
        assert_eq!(state.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_unknown_type_spawn_is_skipped() {
        let mut state = GameState::new(settings(), levels(), 2);
        let spawned = state.spawn_fruit(PendingSpawn {
            fruit_type: 99,
            order: 0,
        });
        assert!(spawned.is_none());
        assert!(state.board().is_empty());
    }
}
