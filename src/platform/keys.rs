//! Terminal key binding
//!
//! Space/Up/W confirm, Down/S duck, D toggles the debug overlay, P pauses,
//! Q/Esc/Ctrl-C quit.
//!
//! Terminals that support the keyboard enhancement protocol report real
//! release events. Classic terminals only report presses (key repeat shows up
//! as more presses), so confirm gets a release immediately after its press
//! and a held duck key counts as released once its presses stop arriving.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::InputAction;

/// How long a duck key stays held without a fresh press. Longer than the
/// usual OS delay before key repeat kicks in.
pub const DOWN_HOLD_WINDOW: Duration = Duration::from_millis(550);

/// What a key event means to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Quit,
    Actions(Vec<InputAction>),
}

impl KeyOutcome {
    fn none() -> Self {
        KeyOutcome::Actions(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Confirm,
    Down,
    Debug,
    Pause,
    Quit,
}

fn classify(event: &KeyEvent) -> Option<Key> {
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Key::Confirm)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Debug),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        _ => None,
    }
}

/// Turns key events into input actions
#[derive(Debug, Clone)]
pub struct KeyBinder {
    release_events: bool,
    /// Last press of a duck key while ducking
    down_seen: Option<Instant>,
}

impl KeyBinder {
    /// `release_events` says whether the terminal reports key releases
    pub fn new(release_events: bool) -> Self {
        Self {
            release_events,
            down_seen: None,
        }
    }

    pub fn map(&mut self, event: KeyEvent, now: Instant) -> KeyOutcome {
        let Some(key) = classify(&event) else {
            return KeyOutcome::none();
        };

        let actions = match (key, event.kind) {
            (Key::Quit, KeyEventKind::Press) => return KeyOutcome::Quit,

            (Key::Confirm, KeyEventKind::Press) if self.release_events => {
                vec![InputAction::ConfirmPressed]
            }
            (Key::Confirm, KeyEventKind::Press) => {
                vec![InputAction::ConfirmPressed, InputAction::ConfirmReleased]
            }
            (Key::Confirm, KeyEventKind::Release) => vec![InputAction::ConfirmReleased],

            (Key::Down, KeyEventKind::Press) if self.release_events => {
                vec![InputAction::DownPressed]
            }
            (Key::Down, KeyEventKind::Press) => {
                let first = self.down_seen.is_none();
                self.down_seen = Some(now);
                if first {
                    vec![InputAction::DownPressed]
                } else {
                    Vec::new()
                }
            }
            (Key::Down, KeyEventKind::Release) => {
                self.down_seen = None;
                vec![InputAction::DownReleased]
            }

            (Key::Debug, KeyEventKind::Press) => vec![InputAction::DebugToggle],
            (Key::Pause, KeyEventKind::Press) => vec![InputAction::PauseToggle],

            _ => Vec::new(),
        };
        KeyOutcome::Actions(actions)
    }

    /// Release a duck key that has gone quiet. Call periodically when the
    /// terminal doesn't report releases.
    pub fn expire(&mut self, now: Instant) -> Option<InputAction> {
        let seen = self.down_seen?;
        if now.saturating_duration_since(seen) > DOWN_HOLD_WINDOW {
            self.down_seen = None;
            Some(InputAction::DownReleased)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn actions(outcome: KeyOutcome) -> Vec<InputAction> {
        match outcome {
            KeyOutcome::Actions(actions) => actions,
            KeyOutcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut binder = KeyBinder::new(true);
        let now = Instant::now();
        assert_eq!(binder.map(press(KeyCode::Char('q')), now), KeyOutcome::Quit);
        assert_eq!(binder.map(press(KeyCode::Esc), now), KeyOutcome::Quit);
        let ctrl_c = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert_eq!(binder.map(ctrl_c, now), KeyOutcome::Quit);
    }

    #[test]
    fn test_confirm_with_release_events() {
        let mut binder = KeyBinder::new(true);
        let now = Instant::now();
        assert_eq!(
            actions(binder.map(press(KeyCode::Char(' ')), now)),
            vec![InputAction::ConfirmPressed]
        );
        assert_eq!(
            actions(binder.map(release(KeyCode::Char(' ')), now)),
            vec![InputAction::ConfirmReleased]
        );
    }

    #[test]
    fn test_confirm_without_release_events() {
        let mut binder = KeyBinder::new(false);
        assert_eq!(
            actions(binder.map(press(KeyCode::Up), Instant::now())),
            vec![InputAction::ConfirmPressed, InputAction::ConfirmReleased]
        );
    }

    #[test]
    fn test_held_duck_expires_without_release_events() {
        let mut binder = KeyBinder::new(false);
        let start = Instant::now();
        assert_eq!(
            actions(binder.map(press(KeyCode::Down), start)),
            vec![InputAction::DownPressed]
        );

        // Key repeat keeps it held
        let repeat = start + Duration::from_millis(400);
        assert!(actions(binder.map(press(KeyCode::Down), repeat)).is_empty());
        assert_eq!(binder.expire(repeat + Duration::from_millis(100)), None);

        assert_eq!(
            binder.expire(repeat + DOWN_HOLD_WINDOW + Duration::from_millis(1)),
            Some(InputAction::DownReleased)
        );
        assert_eq!(binder.expire(repeat + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_toggles_and_unbound_keys() {
        let mut binder = KeyBinder::new(true);
        let now = Instant::now();
        assert_eq!(
            actions(binder.map(press(KeyCode::Char('d')), now)),
            vec![InputAction::DebugToggle]
        );
        assert_eq!(
            actions(binder.map(press(KeyCode::Char('P')), now)),
            vec![InputAction::PauseToggle]
        );
        assert!(actions(binder.map(release(KeyCode::Char('p')), now)).is_empty());
        assert!(actions(binder.map(press(KeyCode::Char('x')), now)).is_empty());
    }
}
