//! World entities that scroll with the terrain
//!
//! Obstacles and pickups share the same geometry; the kind tag decides how
//! the loop treats an overlap with the runner.

use glam::Vec2;

use super::hitbox::Hitbox;
use crate::consts::*;

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    SmallCactus,
    LargeCactus,
    /// Flies low enough to hit a standing runner, high enough to duck under
    Bird,
}

impl ObstacleKind {
    pub fn size(&self) -> Vec2 {
        let (w, h) = match self {
            ObstacleKind::SmallCactus => SMALL_CACTUS_SIZE,
            ObstacleKind::LargeCactus => LARGE_CACTUS_SIZE,
            ObstacleKind::Bird => BIRD_SIZE,
        };
        Vec2::new(w, h)
    }

    /// Top edge when spawned
    pub fn spawn_y(&self) -> f32 {
        let height = self.size().y;
        match self {
            ObstacleKind::Bird => GROUND_Y - BIRD_CLEARANCE - height,
            _ => GROUND_Y - height,
        }
    }
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Shield,
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Obstacle(ObstacleKind),
    Pickup(PickupKind),
}

/// An obstacle or pickup in the world
#[derive(Debug, Clone, PartialEq)]
pub struct WorldEntity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl WorldEntity {
    /// Obstacle placed with its left edge at `x`
    pub fn obstacle(id: u32, kind: ObstacleKind, x: f32) -> Self {
        Self {
            id,
            kind: EntityKind::Obstacle(kind),
            pos: Vec2::new(x, kind.spawn_y()),
            size: kind.size(),
        }
    }

    /// Shield pickup just past the right edge of the world, resting on the ground
    pub fn shield_pickup(id: u32) -> Self {
        Self {
            id,
            kind: EntityKind::Pickup(PickupKind::Shield),
            pos: Vec2::new(WORLD_WIDTH + SHIELD_SPAWN_OFFSET, GROUND_Y - SHIELD_SIZE),
            size: Vec2::splat(SHIELD_SIZE),
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::from_min_size(self.pos, self.size)
    }

    /// Scroll by the world speed (negative = leftward)
    pub fn advance(&mut self, speed: f32) {
        self.pos.x += speed;
    }

    /// True once the right edge has passed the left side of the screen
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, EntityKind::Obstacle(_))
    }
}
