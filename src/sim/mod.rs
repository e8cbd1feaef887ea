//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One step per tick; wall time only drives the shield and pickup timers
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the entity collections)
//! - No rendering, audio, or platform dependencies

pub mod collision;
pub mod entity;
pub mod hitbox;
pub mod input;
pub mod obstacles;
pub mod runner;
pub mod scenery;
pub mod score;
pub mod shield;
pub mod state;
pub mod tick;

pub use collision::{any_overlap, first_overlap};
pub use entity::{EntityKind, ObstacleKind, PickupKind, WorldEntity};
pub use hitbox::Hitbox;
pub use input::{InputAction, Transition, apply_input, transition};
pub use obstacles::ObstacleManager;
pub use runner::{Runner, RunnerState};
pub use scenery::{Clouds, Land};
pub use score::{Score, format_digits};
pub use shield::Shield;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
