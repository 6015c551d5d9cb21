//! Placement primitive shared by every board entity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PIECE_HEIGHT, PIECE_WIDTH};

/// Position and size of a sprite tile on the board.
///
/// Negative coordinates are allowed and mean "off-board / not yet visible".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Default for Piece {
    /// Parked just off the top-left corner
    fn default() -> Self {
        Self::at(Vec2::new(-PIECE_WIDTH, -PIECE_HEIGHT))
    }
}

impl Piece {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            width: PIECE_WIDTH,
            height: PIECE_HEIGHT,
        }
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Point at a fixed offset inside the tile
    #[inline]
    pub fn offset(&self, (dx, dy): (f32, f32)) -> Vec2 {
        self.pos + Vec2::new(dx, dy)
    }
}
