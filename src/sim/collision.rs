//! Collision detection
//!
//! Only the player's center point is tested, never its full tile: a hit is the
//! center lying strictly inside another entity's hitbox. This keeps near misses
//! forgiving.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::item::Item;
use crate::consts::{COL_STEP, ITEM_ROW_OFFSET, ROW_STEP};

/// Half-size of an item's pickup box around its center
pub const ITEM_HIT_HALF: f32 = 10.0;

/// Axis-aligned rectangle in board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Square box of half-size `half` centered on `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self::new(
            center.x - half,
            center.x + half,
            center.y - half,
            center.y + half,
        )
    }

    /// Strict containment; points on an edge do not count
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.left < p.x && self.right > p.x && self.top < p.y && self.bottom > p.y
    }
}

/// Pickup box for an item
pub fn item_hitbox(item: &Item) -> Bounds {
    Bounds::around(item.center, ITEM_HIT_HALF)
}

/// Body of the bug, ignoring the transparent part of the tile
pub fn enemy_hitbox(enemy: &Enemy) -> Bounds {
    let p = enemy.piece.pos;
    Bounds::new(p.x + 10.0, p.x + 90.0, p.y + 110.0, p.y + 130.0)
}

/// Box an item would occupy if spawned into a grid cell
pub fn cell_spawn_box(row: usize, col: usize) -> Bounds {
    let x = col as f32 * COL_STEP;
    let y = row as f32 * ROW_STEP + ITEM_ROW_OFFSET;
    Bounds::new(x + 40.0, x + 60.0, y + 123.0, y + 143.0)
}
