//! Gem Crossing - A Frogger-style crossing game with collectibles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Board dimensions (canvas pixels)
    pub const BOARD_WIDTH: f32 = 505.0;
    pub const BOARD_HEIGHT: f32 = 606.0;

    /// Every piece occupies one sprite tile
    pub const PIECE_WIDTH: f32 = 101.0;
    pub const PIECE_HEIGHT: f32 = 171.0;

    /// Grid step for one player move
    pub const COL_STEP: f32 = 101.0;
    pub const ROW_STEP: f32 = 83.0;

    /// Item grid (the stone rows the player crosses)
    pub const BOARD_ROWS: usize = 3;
    pub const BOARD_COLS: usize = 5;
    /// Y of the first item row
    pub const ITEM_ROW_OFFSET: f32 = 50.0;

    /// Number of enemy lanes and the Y of the first lane
    pub const ENEMY_LANES: u32 = 3;
    pub const ENEMY_LANE_OFFSET: f32 = 63.0;

    /// Player start cell sits this far above the bottom edge
    pub const PLAYER_START_MARGIN: f32 = 60.0;

    /// Collision center offsets within a piece tile
    pub const PLAYER_CENTER_OFFSET: (f32, f32) = (50.0, 140.0);
    pub const ITEM_CENTER_OFFSET: (f32, f32) = (50.0, 133.0);

    /// Life ceiling for the player
    pub const MAX_LIFE: i32 = 100;

    /// Suggested frame delta when the host has no previous timestamp
    pub const DEFAULT_DT: f32 = 1.0 / 60.0;
    /// Largest delta a host should feed into one tick
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Convert an item-grid cell to its board slot index
#[inline]
pub fn cell_index(row: usize, col: usize) -> usize {
    row * consts::BOARD_COLS + col
}
