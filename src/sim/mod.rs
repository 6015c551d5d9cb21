//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta supplied by the host
//! - Seeded RNG only
//! - Stable iteration order (board cells row-major, enemies by spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod item;
pub mod piece;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Bounds, cell_spawn_box, enemy_hitbox, item_hitbox};
pub use enemy::{ENEMY_SPRITE, Enemy, spawn_enemies};
pub use item::{Item, ItemKind, ItemTemplate};
pub use piece::Piece;
pub use player::{Direction, PLAYER_SPRITES, Player};
pub use spawner::{WeightedTable, max_items, shift_key_weight};
pub use state::{Board, GamePhase, GameState, PointAnimation, PointColor};
pub use tick::{
    InputEvent, TickInput, check_player_gets_item, check_player_hits_enemy, handle_input,
    remove_expired_items, spawn_items, tick, update_items, update_point_animations,
};
