//! Dino Runner - A side-scrolling reflex game
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (runner physics, obstacles, shield, score, phases)
//! - `game_loop`: Dedicated loop thread driving the simulation at a fixed rate
//! - `highscores`: Append-only score ledger on disk
//! - `renderer`: Render surface interface and a terminal implementation
//! - `audio`: Fire-and-forget sound effects
//! - `platform`: Input queue and key binding
//! - `settings`: Player preferences and layout configuration

pub mod audio;
pub mod game_loop;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::GameLoop;
pub use highscores::{Ledger, LedgerError, LedgerRecord};
pub use settings::{Layout, Settings};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Simulation ticks per second
    pub const TICK_RATE_HZ: u32 = 100;
    /// Shortest sleep between ticks, even when a frame overruns
    pub const MIN_TICK_SLEEP: Duration = Duration::from_millis(1);
    /// Sleep used while the game-over screen is up (debounces key spam)
    pub const GAME_OVER_SLEEP: Duration = Duration::from_millis(1000);

    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 500.0;
    pub const GROUND_Y: f32 = 380.0;

    /// Horizontal scroll speed at game start (pixels per tick, negative = leftward)
    pub const STARTING_SPEED: f32 = -5.0;
    /// Added to the scroll speed every in-progress tick
    pub const SPEED_RAMP: f32 = -0.0002;

    /// Vertical acceleration (pixels per tick²)
    pub const GRAVITY: f32 = 0.4;
    /// Initial vertical velocity of a jump
    pub const JUMP_VELOCITY: f32 = -12.0;

    /// Runner geometry
    pub const RUNNER_X: f32 = 60.0;
    pub const RUNNER_WIDTH: f32 = 44.0;
    pub const RUNNER_HEIGHT: f32 = 47.0;
    pub const RUNNER_DUCK_WIDTH: f32 = 59.0;
    pub const RUNNER_DUCK_HEIGHT: f32 = 30.0;
    /// Hitbox shrink on every side relative to the sprite bounds
    pub const RUNNER_HITBOX_INSET: f32 = 4.0;

    /// Intro countdown start value, drained by the scroll speed each tick
    pub const INTRO_COUNTDOWN: f32 = 1000.0;

    /// Score added per in-progress tick
    pub const SCORE_INCREMENT: f64 = 0.1;
    /// Score cue fires when crossing a multiple of this
    pub const SCORE_CUE_INTERVAL: f64 = 100.0;
    /// Number of digits on the score display
    pub const SCORE_DIGITS: usize = 5;

    /// Shield power-up
    pub const SHIELD_DURATION: Duration = Duration::from_secs(5);
    pub const SHIELD_SPAWN_INTERVAL: Duration = Duration::from_secs(30);
    pub const SHIELD_SIZE: f32 = 40.0;
    /// Pickups appear this far past the right edge
    pub const SHIELD_SPAWN_OFFSET: f32 = 50.0;

    /// Obstacle sizes (width, height)
    pub const SMALL_CACTUS_SIZE: (f32, f32) = (17.0, 35.0);
    pub const LARGE_CACTUS_SIZE: (f32, f32) = (25.0, 50.0);
    pub const BIRD_SIZE: (f32, f32) = (42.0, 30.0);
    /// Gap between the ground and a bird's underside: a ducking runner fits, a standing one does not
    pub const BIRD_CLEARANCE: f32 = 32.0;
    /// Horizontal spacing between consecutive obstacles
    pub const OBSTACLE_GAP_MIN: f32 = 350.0;
    pub const OBSTACLE_GAP_MAX: f32 = 700.0;
    /// Probability (0-1) that a spawned obstacle is a bird
    pub const BIRD_CHANCE: f64 = 0.2;

    /// Background clouds
    pub const CLOUD_COUNT: usize = 4;
    pub const CLOUD_SIZE: (f32, f32) = (46.0, 14.0);
    pub const CLOUD_MIN_Y: f32 = 40.0;
    pub const CLOUD_MAX_Y: f32 = 180.0;
    /// Clouds scroll at this fraction of the world speed
    pub const CLOUD_PARALLAX: f32 = 0.125;

    /// Screen shake after a fatal collision
    pub const SCREEN_SHAKE_DURATION: Duration = Duration::from_millis(500);
    /// Full spread of the shake offset on each axis (pixels)
    pub const SCREEN_SHAKE_INTENSITY: f32 = 20.0;

    /// Width of one repeating ground tile
    pub const LAND_TILE_WIDTH: f32 = WORLD_WIDTH;
}
