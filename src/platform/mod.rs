//! Platform layer
//!
//! Everything between the physical keyboard and the simulation:
//! - `input`: queue carrying actions from the input thread to the loop thread
//! - `keys`: terminal key binding

pub mod input;
pub mod keys;

pub use input::{InputQueue, InputSender, channel};
pub use keys::{KeyBinder, KeyOutcome};
