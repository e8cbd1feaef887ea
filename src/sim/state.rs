//! Game state and core simulation types
//!
//! Everything the loop thread mutates between ticks lives in `GameState`.

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::WorldEntity;
use super::obstacles::ObstacleManager;
use super::runner::Runner;
use super::scenery::{Clouds, Land};
use super::score::Score;
use super::shield::Shield;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Title screen, waiting for the first confirm
    Start,
    /// Opening jump and countdown before the first run
    Intro,
    /// Active gameplay (the only phase that advances the score)
    InProgress,
    /// Run ended, waiting for confirm to restart
    Over,
    /// Frozen mid-run
    Paused,
}

impl GamePhase {
    pub const ALL: [GamePhase; 5] = [
        GamePhase::Start,
        GamePhase::Intro,
        GamePhase::InProgress,
        GamePhase::Over,
        GamePhase::Paused,
    ];
}

/// Things that happened during a tick, for side effects outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Score crossed a multiple of 100
    ScoreMilestone,
    /// A shield pickup entered the world
    ShieldSpawned,
    /// The runner picked up a shield
    ShieldCollected,
    /// The runner hit an obstacle without a shield
    GameOver { score: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Shared scroll speed (pixels per tick, negative = leftward)
    pub speed: f32,
    /// Counts down to the end of the intro
    pub intro_countdown: f32,
    /// The intro opens with one automatic jump
    pub intro_jump_pending: bool,
    /// Debug overlay: hitbox outlines and speed readout
    pub show_hitboxes: bool,
    pub runner: Runner,
    pub obstacles: ObstacleManager,
    /// Shield pickups currently scrolling through the world
    pub pickups: Vec<WorldEntity>,
    pub shield: Shield,
    /// In-progress time since the last pickup spawned
    pub since_shield_spawn: Duration,
    pub score: Score,
    pub land: Land,
    pub clouds: Clouds,
    /// Shake time left after a fatal collision
    pub screen_shake: Duration,
    /// Current shake displacement, zero when not shaking
    pub shake_offset: Vec2,
    shake_rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh state on the title screen
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            phase: GamePhase::Start,
            speed: STARTING_SPEED,
            intro_countdown: INTRO_COUNTDOWN,
            intro_jump_pending: true,
            show_hitboxes: false,
            runner: Runner::new(),
            obstacles: ObstacleManager::new(seed),
            pickups: Vec::new(),
            shield: Shield::new(SHIELD_DURATION),
            since_shield_spawn: Duration::ZERO,
            score: Score::new(high_score),
            land: Land::default(),
            clouds: Clouds::new(seed.wrapping_add(1)),
            screen_shake: Duration::ZERO,
            shake_offset: Vec2::ZERO,
            shake_rng: Pcg32::seed_from_u64(seed.wrapping_add(2)),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a shield pickup at the right edge
    pub fn spawn_shield_pickup(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.pickups.push(WorldEntity::shield_pickup(id));
        id
    }

    /// Time left before the next pickup spawns
    pub fn time_until_next_shield(&self) -> Duration {
        SHIELD_SPAWN_INTERVAL.saturating_sub(self.since_shield_spawn)
    }

    /// Start shaking the screen
    pub fn trigger_shake(&mut self) {
        self.screen_shake = SCREEN_SHAKE_DURATION;
        self.roll_shake_offset();
    }

    /// Count the shake down and pick a fresh displacement while it lasts
    pub fn update_shake(&mut self, elapsed: Duration) {
        if self.screen_shake.is_zero() {
            return;
        }
        self.screen_shake = self.screen_shake.saturating_sub(elapsed);
        if self.screen_shake.is_zero() {
            self.shake_offset = Vec2::ZERO;
        } else {
            self.roll_shake_offset();
        }
    }

    fn roll_shake_offset(&mut self) {
        let half = SCREEN_SHAKE_INTENSITY / 2.0;
        self.shake_offset = Vec2::new(
            self.shake_rng.random_range(-half..half),
            self.shake_rng.random_range(-half..half),
        );
    }

    /// Clear everything transient for a new run. The high score survives.
    pub fn reset_for_new_game(&mut self) {
        self.speed = STARTING_SPEED;
        self.score.reset();
        self.obstacles.clear();
        self.runner.reset();
        self.clouds.clear();
        self.land.reset();
        self.shield.reset();
        self.pickups.clear();
        self.since_shield_spawn = Duration::ZERO;
        self.screen_shake = Duration::ZERO;
        self.shake_offset = Vec2::ZERO;
    }
}
