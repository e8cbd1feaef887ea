//! Input actions and the phase transition table
//!
//! `transition` is a pure function of (phase, runner sub-state, action). It
//! is defined for every combination; actions that mean nothing in the
//! current phase leave everything unchanged.

use super::runner::RunnerState;
use super::state::{GamePhase, GameState};

/// Discrete player intents, independent of which keys produce them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    ConfirmPressed,
    ConfirmReleased,
    DownPressed,
    DownReleased,
    DebugToggle,
    PauseToggle,
}

impl InputAction {
    pub const ALL: [InputAction; 6] = [
        InputAction::ConfirmPressed,
        InputAction::ConfirmReleased,
        InputAction::DownPressed,
        InputAction::DownReleased,
        InputAction::DebugToggle,
        InputAction::PauseToggle,
    ];
}

/// Work the state has to do beyond switching phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Jump,
    /// Set the runner's sub-state to `Transition::runner`
    SetRunner,
    ToggleDebug,
    /// Reset every transient for a new run
    Restart,
}

/// Outcome of applying one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub phase: GamePhase,
    pub runner: RunnerState,
    pub command: Command,
}

impl Transition {
    fn stay(phase: GamePhase, runner: RunnerState) -> Self {
        Self {
            phase,
            runner,
            command: Command::None,
        }
    }
}

/// The transition table
pub fn transition(phase: GamePhase, runner: RunnerState, action: InputAction) -> Transition {
    use GamePhase::*;
    use InputAction::*;

    let stay = Transition::stay(phase, runner);
    match (phase, action) {
        (_, DebugToggle) => Transition {
            command: Command::ToggleDebug,
            ..stay
        },

        (InProgress, ConfirmPressed) => match runner {
            RunnerState::Jump | RunnerState::Dead => stay,
            _ => Transition {
                runner: RunnerState::Jump,
                command: Command::Jump,
                ..stay
            },
        },
        (InProgress, DownPressed) if runner != RunnerState::Jump => Transition {
            runner: RunnerState::DownRun,
            command: Command::SetRunner,
            ..stay
        },
        (InProgress, DownReleased) if runner != RunnerState::Jump => Transition {
            runner: RunnerState::Run,
            command: Command::SetRunner,
            ..stay
        },
        (InProgress, PauseToggle) => Transition {
            phase: Paused,
            ..stay
        },

        (Paused, PauseToggle) => Transition {
            phase: InProgress,
            ..stay
        },

        (Start, ConfirmReleased) => Transition {
            phase: Intro,
            ..stay
        },

        (Over, ConfirmReleased) => Transition {
            phase: InProgress,
            runner: RunnerState::Run,
            command: Command::Restart,
        },

        _ => stay,
    }
}

/// Apply one action to the live state. Returns the phase change, if any.
pub fn apply_input(state: &mut GameState, action: InputAction) -> Option<(GamePhase, GamePhase)> {
    let from = state.phase;
    let next = transition(from, state.runner.state(), action);

    match next.command {
        Command::None => {}
        Command::Jump => state.runner.jump(),
        Command::SetRunner => state.runner.set_state(next.runner),
        Command::ToggleDebug => state.show_hitboxes = !state.show_hitboxes,
        Command::Restart => state.reset_for_new_game(),
    }
    state.phase = next.phase;

    (from != next.phase).then_some((from, next.phase))
}
