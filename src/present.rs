//! Commands for the engine-side collaborators
//!
//! The simulation never touches rendering, physics or UI directly. Each tick
//! it appends `Command`s describing what the scene should do; the host drains
//! them and hands them to a [`Presenter`].

use glam::Vec3;

use crate::sim::{FruitId, FruitType};

/// Text fields the core writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Countdown clock
    Timer,
    /// Current level ordinal
    Level,
    /// Remaining count for one task type
    Task(FruitType),
    /// Wallet total
    Coins,
}

/// Modal prompts shown when a level attempt ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    NextLevel { reward: u32 },
    Failed,
    GameFinished { reward: u32 },
}

/// One instruction for the scene
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Activate a pooled fruit at `pose`, kinematic, with a capped depenetration velocity
    Spawn {
        fruit: FruitId,
        fruit_type: FruitType,
        pose: Vec3,
        max_depenetration_velocity: f32,
    },
    /// Switch a fruit's body between kinematic and dynamic
    SetKinematic { fruit: FruitId, kinematic: bool },
    SetColliderEnabled { fruit: FruitId, enabled: bool },
    /// Fly a picked fruit to a tray slot
    MoveToSlot { fruit: FruitId, slot: usize },
    AnimateScale {
        fruit: FruitId,
        from: f32,
        to: f32,
        secs: f32,
    },
    /// Deactivate a fruit once `delay_secs` have passed (lets a shrink-out
    /// play first). It is already back in the pool.
    Despawn { fruit: FruitId, delay_secs: f32 },
    SetText { label: Label, text: String },
    ShowPrompt(Prompt),
    HidePrompt,
}

/// Receiver for the command stream (scene graph, UI, or a test recorder)
pub trait Presenter {
    fn apply(&mut self, command: &Command);

    fn apply_all(&mut self, commands: &[Command]) {
        for command in commands {
            self.apply(command);
        }
    }
}

/// Presenter that writes every command to the log
#[derive(Debug, Default)]
pub struct LogPresenter {
    pub applied: usize,
}

impl Presenter for LogPresenter {
    fn apply(&mut self, command: &Command) {
        self.applied += 1;
        match command {
            Command::ShowPrompt(prompt) => log::info!("Prompt: {:?}", prompt),
            Command::SetText {
                label: Label::Timer,
                ..
            } => log::trace!("{:?}", command),
            _ => log::debug!("{:?}", command),
        }
    }
}

/// Presenter that keeps everything it receives
impl Presenter for Vec<Command> {
    fn apply(&mut self, command: &Command) {
        self.push(command.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_presenter_records_in_order() {
        let mut recorded: Vec<Command> = Vec::new();
        recorded.apply_all(&[
            Command::HidePrompt,
            Command::Despawn {
                fruit: 3,
                delay_secs: 0.0,
            },
        ]);
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0], Command::HidePrompt);
        assert!(matches!(recorded[1], Command::Despawn { fruit: 3, .. }));
    }

    #[test]
    fn test_log_presenter_counts() {
        let mut presenter = LogPresenter::default();
        presenter.apply(&Command::ShowPrompt(Prompt::Failed));
        presenter.apply(&Command::SetText {
            label: Label::Timer,
            text: "00:10".into(),
        });
        assert_eq!(presenter.applied, 2);
    }
}
