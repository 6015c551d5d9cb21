//! Game state and session lifecycle
//!
//! `GameState` owns every entity of a session. The per-frame pipeline lives in
//! `tick`; the phase transitions live here so each one is a single call.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, spawn_enemies};
use super::item::{Item, ItemTemplate};
use super::player::Player;
use super::spawner::WeightedTable;
use crate::cell_index;
use crate::consts::{BOARD_COLS, BOARD_ROWS};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Playing,
    /// Level cleared, waiting for the player to pick a skin
    LevelUp,
    /// Player ran out of life; only a restart is accepted
    GameOver,
}

/// Color of floating score text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointColor {
    /// Points gained
    Green,
    /// Life change
    Red,
}

impl PointColor {
    pub fn css(self) -> &'static str {
        match self {
            PointColor::Green => "green",
            PointColor::Red => "red",
        }
    }
}

/// Floating "+5" text shown where an item was collected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointAnimation {
    pub text: String,
    pub color: PointColor,
    pub pos: Vec2,
    /// Countdown; the animation is dropped at <= 0
    pub time_remaining: f32,
    /// Horizontal drift direction (+1 right, -1 left)
    pub direction: f32,
}

impl PointAnimation {
    /// Drift up and sideways; false once the countdown has run out
    pub fn update(&mut self, dt: f32, speed: f32, decay: f32) -> bool {
        if self.time_remaining <= 0.0 {
            return false;
        }
        self.pos.x += speed * self.direction * dt;
        self.pos.y -= speed * dt;
        self.time_remaining -= decay * dt;
        true
    }
}

/// Item grid, one slot per cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    slots: Vec<Option<Item>>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            slots: vec![None; BOARD_ROWS * BOARD_COLS],
        }
    }
}

impl Board {
    pub fn get(&self, row: usize, col: usize) -> Option<&Item> {
        if row >= BOARD_ROWS || col >= BOARD_COLS {
            return None;
        }
        self.slots.get(cell_index(row, col))?.as_ref()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Item> {
        if row >= BOARD_ROWS || col >= BOARD_COLS {
            return None;
        }
        self.slots.get_mut(cell_index(row, col))?.as_mut()
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    /// Put an item into an empty cell; returns false if the cell is taken
    pub fn place(&mut self, row: usize, col: usize, item: Item) -> bool {
        if row >= BOARD_ROWS || col >= BOARD_COLS {
            return false;
        }
        let Some(slot) = self.slots.get_mut(cell_index(row, col)) else {
            return false;
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(item);
        true
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().flatten()
    }

    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.slots.iter_mut().flatten()
    }

    /// Drop inactive items and return how many active ones remain
    pub fn remove_expired(&mut self) -> usize {
        let mut remaining = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|item| !item.active) {
                *slot = None;
            }
            if slot.is_some() {
                remaining += 1;
            }
        }
        remaining
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the session RNG started from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Current level (starts at 1)
    pub level: u32,
    /// Points earned in the current level
    pub level_score: i32,
    /// Points earned in the whole game
    pub game_score: i32,
    /// Seconds of star bonus left (> 0 means active)
    pub bonus_time: f32,
    /// Live spawn table; weights drift as keys are collected
    pub items: Vec<ItemTemplate>,
    pub weighted: WeightedTable,
    pub player: Player,
    /// Ordered as spawned
    pub enemies: Vec<Enemy>,
    pub board: Board,
    pub point_animations: Vec<PointAnimation>,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            items: tuning.items.clone(),
            weighted: WeightedTable::default(),
            tuning,
            phase: GamePhase::Playing,
            level: 1,
            level_score: 0,
            game_score: 0,
            bonus_time: 0.0,
            player: Player::new(),
            enemies: Vec::new(),
            board: Board::default(),
            point_animations: Vec::new(),
        };
        state.reset_to_level_one();
        state
    }

    /// Fresh level-one game with a new player. The RNG keeps running.
    pub fn reset_to_level_one(&mut self) {
        self.player = Player::new();
        self.phase = GamePhase::Playing;
        self.level = 1;
        self.level_score = 0;
        self.game_score = 0;
        self.bonus_time = 0.0;
        self.items = self.tuning.items.clone();
        self.rebuild_weighted_list();
        self.board.clear();
        self.point_animations.clear();
        self.reset_enemies();
    }

    pub fn reset_enemies(&mut self) {
        self.enemies = spawn_enemies(self.level, &self.tuning, &mut self.rng);
    }

    pub fn rebuild_weighted_list(&mut self) {
        self.weighted = WeightedTable::build(&self.items);
    }

    /// Points needed to finish the current level
    pub fn next_level(&self) -> u32 {
        self.tuning.next_level(self.level)
    }

    /// Level progress in [0, 1] for the HUD bar
    pub fn level_progress(&self) -> f32 {
        let goal = self.next_level().max(1) as f32;
        (self.level_score.max(0) as f32 / goal).min(1.0)
    }

    pub fn bonus_active(&self) -> bool {
        self.bonus_time > 0.0
    }

    /// Playing -> LevelUp
    pub fn level_up(&mut self) {
        self.level_score = 0;
        self.level += 1;
        self.reset_enemies();
        self.player.reset();
        self.phase = GamePhase::LevelUp;
        log::info!(
            "Level {} reached (score {}), {} enemies",
            self.level,
            self.game_score,
            self.enemies.len()
        );
    }

    /// LevelUp -> Playing once a valid skin is picked
    pub fn choose_sprite(&mut self, index: usize) -> bool {
        if self.phase != GamePhase::LevelUp || !self.player.select_sprite(index) {
            return false;
        }
        self.phase = GamePhase::Playing;
        log::debug!("Selected skin {}", self.player.sprite_id());
        true
    }

    /// Playing -> GameOver when the last reset found the player dead
    pub fn check_game_over(&mut self) -> bool {
        if self.phase == GamePhase::Playing && !self.player.alive {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over at level {} with score {}",
                self.level,
                self.game_score
            );
            return true;
        }
        false
    }

    /// GameOver -> Playing at level one
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.reset_to_level_one();
        log::info!("Game restarted");
        true
    }
}
