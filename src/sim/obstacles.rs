//! Obstacle spawning and scrolling
//!
//! Obstacles enter at the right edge once the previous one has opened up a
//! randomly chosen gap, scroll left at the world speed, and are dropped once
//! fully off-screen. The collection stays in insertion order, so the last
//! element is always the rightmost obstacle.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision;
use super::entity::{ObstacleKind, WorldEntity};
use super::hitbox::Hitbox;
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct ObstacleManager {
    obstacles: Vec<WorldEntity>,
    rng: Pcg32,
    /// Distance from the right edge the last obstacle must travel before the next spawns
    next_gap: f32,
    next_id: u32,
}

impl ObstacleManager {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_gap: OBSTACLE_GAP_MIN,
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[WorldEntity] {
        &self.obstacles
    }

    /// Scroll, prune, and spawn for one tick
    pub fn update(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.advance(speed);
        }
        self.obstacles.retain(|o| !o.is_off_screen());

        let room_for_next = match self.obstacles.last() {
            Some(last) => last.hitbox().right() < WORLD_WIDTH - self.next_gap,
            None => true,
        };
        if room_for_next {
            self.spawn();
        }
    }

    fn spawn(&mut self) {
        let kind = if self.rng.random_bool(BIRD_CHANCE) {
            ObstacleKind::Bird
        } else if self.rng.random_bool(0.5) {
            ObstacleKind::SmallCactus
        } else {
            ObstacleKind::LargeCactus
        };
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(WorldEntity::obstacle(id, kind, WORLD_WIDTH));
        self.next_gap = self.rng.random_range(OBSTACLE_GAP_MIN..OBSTACLE_GAP_MAX);
    }

    /// Whether any obstacle overlaps the given hitbox
    pub fn is_collision(&self, hitbox: &Hitbox) -> bool {
        collision::any_overlap(hitbox, &self.obstacles)
    }

    /// Remove every obstacle (new game)
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.next_gap = OBSTACLE_GAP_MIN;
    }

    /// Place an obstacle directly (scripted scenarios and tests)
    pub fn insert(&mut self, kind: ObstacleKind, x: f32) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(WorldEntity::obstacle(id, kind, x));
        id
    }
}
