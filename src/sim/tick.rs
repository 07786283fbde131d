//! Per-frame tick
//!
//! Advances the orchestrator one frame: prompt input, staggered spawns,
//! body activation, the pick, completion and the level timer, in that order.

use super::autoplay::choose_pick;
use super::schedule::{TimerStep, format_clock};
use super::state::{FailReason, FruitId, GamePhase, GameState, PromptChoice};
use crate::present::{Command, Label};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave Idle and start the first level
    pub start: bool,
    /// Fruit the player tapped
    pub pick: Option<FruitId>,
    /// Prompt button pressed
    pub prompt: Option<PromptChoice>,
    /// Idle/demo mode - autoplay picks when the player doesn't
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.start {
        state.start();
    }
    if let Some(choice) = input.prompt {
        state.resolve_prompt(choice);
    }

    if state.phase() != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    for pending in state.spawner.step() {
        state.spawn_fruit(pending);
    }
    state.settle_bodies();

    let pick = match input.pick {
        Some(id) => Some(id),
        None if input.idle_mode => choose_pick(state),
        None => None,
    };
    if let Some(id) = pick {
        state.pick_fruit(id);
    }

    // Completion wins over a timer running out on the same frame
    if state.check_completion() || state.phase() != GamePhase::Playing {
        return;
    }

    match state.timer.step(dt) {
        TimerStep::Idle => {}
        TimerStep::Second(secs) => state.commands.push(Command::SetText {
            label: Label::Timer,
            text: format_clock(secs),
        }),
        TimerStep::Expired => {
            state.commands.push(Command::SetText {
                label: Label::Timer,
                text: format_clock(0),
            });
            state.fail(FailReason::TimeUp);
        }
    }
}
