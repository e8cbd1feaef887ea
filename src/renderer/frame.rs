//! Render snapshot
//!
//! A `Frame` is captured from the game state at the end of every tick and
//! handed to the render surface. It owns copies of everything drawn, so the
//! surface never sees the live state.

use glam::Vec2;

use crate::consts::INTRO_COUNTDOWN;
use crate::sim::{EntityKind, GamePhase, GameState, Hitbox, ObstacleKind, PickupKind, RunnerState};

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    SmallCactus,
    LargeCactus,
    Bird,
    ShieldPickup,
}

impl From<EntityKind> for SpriteKind {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Obstacle(ObstacleKind::SmallCactus) => SpriteKind::SmallCactus,
            EntityKind::Obstacle(ObstacleKind::LargeCactus) => SpriteKind::LargeCactus,
            EntityKind::Obstacle(ObstacleKind::Bird) => SpriteKind::Bird,
            EntityKind::Pickup(PickupKind::Shield) => SpriteKind::ShieldPickup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub bounds: Hitbox,
}

/// Extra information drawn while hitboxes are toggled on
#[derive(Debug, Clone, PartialEq)]
pub struct DebugOverlay {
    /// World speed rounded to three decimals
    pub speed_text: String,
    /// Runner hitbox first, then obstacles
    pub hitboxes: Vec<Hitbox>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub phase: GamePhase,
    pub runner_state: RunnerState,
    pub runner_bounds: Hitbox,
    /// Obstacles, then pickups
    pub sprites: Vec<Sprite>,
    /// Top-left corners
    pub clouds: Vec<Vec2>,
    pub land_offset: f32,
    pub score_digits: String,
    pub high_score_digits: String,
    pub show_high_score: bool,
    /// Score blink
    pub score_visible: bool,
    /// Whole seconds of shield left, when active
    pub shield_secs: Option<u64>,
    pub next_shield_secs: u64,
    /// Title opacity, fading out over the intro
    pub intro_alpha: f32,
    pub debug: Option<DebugOverlay>,
    /// Whole-scene displacement in world pixels
    pub shake: Vec2,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let obstacles = state.obstacles.obstacles();
        let sprites = obstacles
            .iter()
            .chain(&state.pickups)
            .map(|entity| Sprite {
                kind: entity.kind.into(),
                bounds: entity.hitbox(),
            })
            .collect();

        let debug = state.show_hitboxes.then(|| DebugOverlay {
            speed_text: format!("SPEED_X: {:.3}", state.speed),
            hitboxes: std::iter::once(state.runner.hitbox())
                .chain(obstacles.iter().map(|o| o.hitbox()))
                .collect(),
        });

        let shield_secs = state
            .shield
            .is_active()
            .then(|| state.shield.remaining_time().as_secs_f32().ceil() as u64);

        Self {
            phase: state.phase,
            runner_state: state.runner.state(),
            runner_bounds: state.runner.bounds(),
            sprites,
            clouds: state.clouds.positions().to_vec(),
            land_offset: state.land.offset(),
            score_digits: state.score.display(),
            high_score_digits: state.score.high_display(),
            show_high_score: state.score.high_score() > 0,
            score_visible: state.score.digits_visible(state.phase),
            shield_secs,
            next_shield_secs: state.time_until_next_shield().as_secs(),
            intro_alpha: (state.intro_countdown / INTRO_COUNTDOWN).clamp(0.0, 1.0),
            debug,
            shake: state.shake_offset,
        }
    }
}
