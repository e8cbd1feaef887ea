//! Background layers: the ground strip and drifting clouds
//!
//! Neither layer collides with anything. They share the world speed so the
//! terrain, clouds, obstacles and pickups all move together.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Repeating ground texture, tracked as a scroll offset within one tile
#[derive(Debug, Clone, Default)]
pub struct Land {
    offset: f32,
}

impl Land {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn update(&mut self, speed: f32) {
        let offset = (self.offset + speed).rem_euclid(LAND_TILE_WIDTH);
        // f32 rounding can land exactly on the tile width
        self.offset = if offset >= LAND_TILE_WIDTH { 0.0 } else { offset };
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }
}

/// Parallax cloud layer
#[derive(Debug, Clone)]
pub struct Clouds {
    /// Top-left corners
    clouds: Vec<Vec2>,
    rng: Pcg32,
}

impl Clouds {
    pub fn new(seed: u64) -> Self {
        let mut layer = Self {
            clouds: Vec::with_capacity(CLOUD_COUNT),
            rng: Pcg32::seed_from_u64(seed),
        };
        layer.scatter();
        layer
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.clouds
    }

    pub fn update(&mut self, speed: f32) {
        for cloud in &mut self.clouds {
            cloud.x += speed * CLOUD_PARALLAX;
        }
        self.clouds.retain(|c| c.x + CLOUD_SIZE.0 >= 0.0);
        while self.clouds.len() < CLOUD_COUNT {
            let x = WORLD_WIDTH + self.rng.random_range(0.0..WORLD_WIDTH / 2.0);
            let y = self.rng.random_range(CLOUD_MIN_Y..CLOUD_MAX_Y);
            self.clouds.push(Vec2::new(x, y));
        }
    }

    /// Drop every cloud and scatter a fresh set across the sky
    pub fn clear(&mut self) {
        self.clouds.clear();
        self.scatter();
    }

    fn scatter(&mut self) {
        for _ in 0..CLOUD_COUNT {
            let x = self.rng.random_range(0.0..WORLD_WIDTH);
            let y = self.rng.random_range(CLOUD_MIN_Y..CLOUD_MAX_Y);
            self.clouds.push(Vec2::new(x, y));
        }
    }
}
