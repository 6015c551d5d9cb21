//! The player piece: grid movement, life and sprite unlocks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use crate::consts::*;

/// Selectable player skins, in unlock order
pub const PLAYER_SPRITES: [&str; 5] = [
    "char-boy",
    "char-cat-girl",
    "char-horn-girl",
    "char-pink-girl",
    "char-princess-girl",
];

/// One-cell move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Pixel offset of one grid step
    pub fn step(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -ROW_STEP),
            Direction::Down => Vec2::new(0.0, ROW_STEP),
            Direction::Left => Vec2::new(-COL_STEP, 0.0),
            Direction::Right => Vec2::new(COL_STEP, 0.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub piece: Piece,
    /// Collision point, always derived from `piece.pos`
    pub center: Vec2,
    /// Can go negative after a hit until the next `reset`
    pub life: i32,
    pub alive: bool,
    /// Number of skins available for selection (1..=PLAYER_SPRITES.len())
    pub unlocked_sprites: usize,
    /// Index into `PLAYER_SPRITES`
    pub sprite: usize,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let mut player = Self {
            piece: Piece::default(),
            center: Vec2::ZERO,
            life: MAX_LIFE,
            alive: true,
            unlocked_sprites: 1,
            sprite: 0,
        };
        player.reset();
        player
    }

    /// Bottom-center start cell
    pub fn start_pos() -> Vec2 {
        Vec2::new(
            BOARD_WIDTH / 2.0 - PIECE_WIDTH / 2.0,
            BOARD_HEIGHT - PIECE_HEIGHT - PLAYER_START_MARGIN,
        )
    }

    /// Back to the start cell. This is also where death is decided.
    pub fn reset(&mut self) {
        self.piece.set_pos(Self::start_pos());
        self.update_center();
        if self.life <= 0 {
            self.life = 0;
            self.alive = false;
        }
    }

    pub fn update(&mut self) {
        self.update_center();
    }

    pub fn update_center(&mut self) {
        self.center = self.piece.offset(PLAYER_CENTER_OFFSET);
    }

    /// Move one cell; each axis is dropped if it would leave the board
    pub fn step(&mut self, dir: Direction) {
        let mut delta = dir.step();
        let next = self.piece.pos + delta;
        if next.x < 0.0 || next.x + self.piece.width > BOARD_WIDTH {
            delta.x = 0.0;
        }
        if next.y < 0.0 || next.y + self.piece.height > BOARD_HEIGHT {
            delta.y = 0.0;
        }
        self.piece.pos += delta;
        self.update_center();
    }

    /// Add life, never above the ceiling. No floor is applied here.
    pub fn heal(&mut self, amount: i32) {
        self.life = (self.life + amount).min(MAX_LIFE);
    }

    pub fn damage(&mut self, amount: i32) {
        self.life -= amount;
    }

    /// Unlock the next skin; false once every skin is available
    pub fn unlock_sprite(&mut self) -> bool {
        if self.unlocked_sprites < PLAYER_SPRITES.len() {
            self.unlocked_sprites += 1;
            true
        } else {
            false
        }
    }

    /// Pick an unlocked skin; false for locked or out-of-range codes
    pub fn select_sprite(&mut self, index: usize) -> bool {
        if index < self.unlocked_sprites.min(PLAYER_SPRITES.len()) {
            self.sprite = index;
            true
        } else {
            false
        }
    }

    pub fn sprite_id(&self) -> &'static str {
        PLAYER_SPRITES[self.sprite.min(PLAYER_SPRITES.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_player_at_start() {
        let player = Player::new();
        assert_eq!(player.piece.pos, Vec2::new(202.0, 375.0));
        assert_eq!(player.center, Vec2::new(252.0, 515.0));
        assert_eq!(player.life, 100);
        assert!(player.alive);
        assert_eq!(player.unlocked_sprites, 1);
        assert_eq!(player.sprite_id(), "char-boy");
    }

    #[test]
    fn test_step_updates_center_immediately() {
        let mut player = Player::new();
        player.step(Direction::Up);
        assert_eq!(player.piece.pos, Vec2::new(202.0, 292.0));
        assert_eq!(player.center, Vec2::new(252.0, 432.0));
        player.step(Direction::Left);
        assert_eq!(player.center, Vec2::new(151.0, 432.0));
    }

    #[test]
    fn test_step_rejected_at_edges() {
        let mut player = Player::new();
        // Start row is the bottom row
        player.step(Direction::Down);
        assert_eq!(player.piece.pos, Player::start_pos());

        player.step(Direction::Right);
        player.step(Direction::Right);
        assert_eq!(player.piece.pos.x, 404.0);
        player.step(Direction::Right);
        assert_eq!(player.piece.pos.x, 404.0);

        for _ in 0..10 {
            player.step(Direction::Up);
        }
        assert_eq!(player.piece.pos.y, 43.0);
    }

    #[test]
    fn test_heal_clamps_only_at_ceiling() {
        let mut player = Player::new();
        player.heal(10);
        assert_eq!(player.life, 100);
        player.heal(-120);
        assert_eq!(player.life, -20);
        assert!(player.alive);
        player.reset();
        assert_eq!(player.life, 0);
        assert!(!player.alive);
    }

    #[test]
    fn test_sprite_unlock_and_select() {
        let mut player = Player::new();
        assert!(!player.select_sprite(1));
        assert!(player.unlock_sprite());
        assert!(player.select_sprite(1));
        assert_eq!(player.sprite_id(), "char-cat-girl");
        for _ in 0..3 {
            assert!(player.unlock_sprite());
        }
        assert!(!player.unlock_sprite());
        assert_eq!(player.unlocked_sprites, 5);
        assert!(!player.select_sprite(5));
        assert!(player.select_sprite(4));
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_moves_stay_on_board(moves in proptest::collection::vec(direction(), 0..64)) {
            let mut player = Player::new();
            for dir in moves {
                player.step(dir);
                let p = player.piece.pos;
                prop_assert!(p.x >= 0.0 && p.x <= BOARD_WIDTH - PIECE_WIDTH);
                prop_assert!(p.y >= 0.0 && p.y <= BOARD_HEIGHT - PIECE_HEIGHT);
                prop_assert_eq!(player.center, p + Vec2::new(50.0, 140.0));
            }
        }

        #[test]
        fn prop_reset_clamps_life(start in -50i32..=100, hits in proptest::collection::vec(-30i32..120, 0..8)) {
            let mut player = Player::new();
            player.life = start;
            for hit in hits {
                if hit >= 0 {
                    player.damage(hit);
                } else {
                    player.heal(-hit);
                }
                player.reset();
                prop_assert!(player.life >= 0 && player.life <= 100);
                prop_assert_eq!(player.alive, player.life > 0);
                if !player.alive {
                    break;
                }
            }
        }
    }
}
