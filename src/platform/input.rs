//! Input queue between the input thread and the game loop
//!
//! Producers push actions as they happen; the loop drains everything pending
//! once at the start of each tick.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::sim::InputAction;

/// Create a connected sender/queue pair
pub fn channel() -> (InputSender, InputQueue) {
    let (tx, rx) = mpsc::channel();
    (InputSender { tx }, InputQueue { rx })
}

/// Producer side. Clone one per input source.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputAction>,
}

impl InputSender {
    /// Queue an action. Returns false once the loop has gone away.
    pub fn send(&self, action: InputAction) -> bool {
        self.tx.send(action).is_ok()
    }
}

/// Consumer side, owned by the loop
#[derive(Debug)]
pub struct InputQueue {
    rx: Receiver<InputAction>,
}

impl InputQueue {
    /// Everything queued since the last drain, oldest first. Never blocks.
    pub fn drain(&self) -> Vec<InputAction> {
        self.rx.try_iter().collect()
    }
}
