//! Fruit Tray headless runner
//!
//! Loads settings and levels, then drives the fixed-timestep loop with
//! autoplay picks, resolving prompts automatically and logging the command
//! stream the scene would receive.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use fruit_tray::consts::{MAX_SUBSTEPS, SIM_DT};
use fruit_tray::level;
use fruit_tray::present::{LogPresenter, Presenter};
use fruit_tray::sim::{GameEvent, GamePhase, GameState, PromptChoice, TickInput, tick};
use fruit_tray::{Difficulty, Settings};

#[derive(Parser, Debug)]
#[command(name = "fruit-tray")]
#[command(about = "Run the triple-match tray game headless with autoplay")]
struct Args {
    /// Level file (JSON array); the bundled set is used when omitted
    #[arg(long, env = "FRUIT_TRAY_LEVELS")]
    levels: Option<PathBuf>,

    /// Settings file (JSON)
    #[arg(long, env = "FRUIT_TRAY_SETTINGS")]
    settings: Option<PathBuf>,

    /// Difficulty preset (relaxed, normal, hard); overrides the settings file
    #[arg(long)]
    difficulty: Option<String>,

    /// Run seed
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Render frame time in seconds fed to the fixed-step loop
    #[arg(long, default_value = "0.016666668")]
    frame_secs: f32,

    /// Stop after this many rendered frames
    #[arg(long, default_value = "100000")]
    max_frames: u64,

    /// Retries allowed per level before giving up
    #[arg(long, default_value = "3")]
    max_retries: u32,
}

/// Runner holding the game and loop bookkeeping
struct Game {
    state: GameState,
    presenter: LogPresenter,
    accumulator: f32,
    input: TickInput,
    retries: u32,
    max_retries: u32,
    finished: bool,
}

impl Game {
    fn new(state: GameState, max_retries: u32) -> Self {
        Self {
            state,
            presenter: LogPresenter::default(),
            accumulator: 0.0,
            input: TickInput {
                start: true,
                idle_mode: true,
                ..Default::default()
            },
            retries: 0,
            max_retries,
            finished: false,
        }
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.prompt = None;
            self.input.pick = None;

            self.flush();
            self.answer_prompt();
            if self.finished {
                break;
            }
        }
    }

    fn flush(&mut self) {
        let commands = self.state.drain_commands();
        self.presenter.apply_all(&commands);

        for event in self.state.drain_events() {
            match event {
                GameEvent::LevelStarted { .. } => {}
                GameEvent::LevelComplete { .. } => self.retries = 0,
                GameEvent::LevelFailed { ordinal, reason } => {
                    log::warn!("Level {} failed ({:?})", ordinal, reason);
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    /// Press whichever prompt button autoplay would press
    fn answer_prompt(&mut self) {
        match self.state.phase() {
            GamePhase::NextLevelPrompt => self.input.prompt = Some(PromptChoice::Next),
            GamePhase::FailedPrompt if self.retries < self.max_retries => {
                self.retries += 1;
                self.input.prompt = Some(PromptChoice::Retry);
            }
            GamePhase::FailedPrompt | GamePhase::GameFinishedPrompt => self.finished = true,
            GamePhase::Idle if !self.input.start => self.finished = true,
            GamePhase::Idle | GamePhase::Playing => {}
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(name) = &args.difficulty {
        match Difficulty::from_str(name) {
            Some(difficulty) => settings.difficulty = difficulty,
            None => bail!("unknown difficulty '{}'", name),
        }
    }
    if args.frame_secs <= 0.0 {
        bail!("frame_secs must be greater than 0");
    }

    let levels = match &args.levels {
        Some(path) => level::load_levels_or_empty(path),
        None => level::bundled_levels(),
    };

    log::info!(
        "Starting run: seed {}, {} levels, difficulty {}",
        args.seed,
        levels.len(),
        settings.difficulty.as_str()
    );

    let state = GameState::new(settings, levels, args.seed);
    let mut game = Game::new(state, args.max_retries);

    let mut frames = 0;
    while !game.finished && frames < args.max_frames {
        game.update(args.frame_secs);
        frames += 1;
    }

    let state = &game.state;
    log::info!(
        "Run ended after {} frames in {:?} at level index {}: {} coins, {} commands",
        frames,
        state.phase(),
        state.level_index(),
        state.wallet.coins,
        game.presenter.applied
    );
    for record in &state.wallet.records {
        log::info!(
            "  level {}: best {:.1}s over {} clears",
            record.ordinal,
            record.best_secs,
            record.clears
        );
    }

    if state.phase() == GamePhase::Idle {
        bail!("no playable levels");
    }
    Ok(())
}
