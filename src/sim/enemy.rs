//! Enemy bugs crossing the board left to right

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use crate::consts::{BOARD_WIDTH, ENEMY_LANE_OFFSET, ENEMY_LANES, ROW_STEP};
use crate::tuning::Tuning;

pub const ENEMY_SPRITE: &str = "enemy-bug";

/// A bug that walks right and wraps back off-screen left
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub piece: Piece,
    /// Difficulty tier this enemy was created for (>= 1)
    pub level: u32,
    /// Horizontal speed in px/s, fixed for the enemy's lifetime
    pub velocity: f32,
}

impl Enemy {
    pub fn new(level: u32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let level = level.max(1);
        let raw = rng.random::<f32>() * level as f32 * tuning.enemy_speed_per_level;
        let velocity = raw.clamp(tuning.enemy_min_speed, tuning.enemy_max_speed);
        let mut enemy = Self {
            piece: Piece::default(),
            level,
            velocity,
        };
        enemy.respawn(rng);
        enemy
    }

    /// Advance by `velocity * dt`, wrapping once past the right edge
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        self.piece.pos.x += self.velocity * dt;
        if self.piece.pos.x > BOARD_WIDTH {
            self.respawn(rng);
        }
    }

    /// Random off-screen-left start (further out at higher levels) in a random lane
    pub fn respawn(&mut self, rng: &mut impl Rng) {
        let x = -(rng.random::<f32>() * self.level as f32) - self.piece.width;
        let lane = rng.random_range(0..ENEMY_LANES);
        let y = lane as f32 * ROW_STEP + ENEMY_LANE_OFFSET;
        self.piece.set_pos(Vec2::new(x, y));
    }

    /// Lane index the enemy currently walks in
    pub fn lane(&self) -> u32 {
        ((self.piece.pos.y - ENEMY_LANE_OFFSET) / ROW_STEP).round() as u32
    }
}

/// Enemies for a level: floor(sqrt(level)) bugs
pub fn spawn_enemies(level: u32, tuning: &Tuning, rng: &mut impl Rng) -> Vec<Enemy> {
    let count = f64::from(level).sqrt().floor() as u32;
    (0..count).map(|_| Enemy::new(level, tuning, rng)).collect()
}
