//! Per-frame simulation tick
//!
//! Advances the session by one frame delta. Within a Playing tick the order is
//! fixed: movement, item pickups, lifetimes and animations, expiry, one spawn
//! attempt, enemy hits, then the phase checks. Pickups must resolve before the
//! board occupancy is recounted for spawning.

use glam::Vec2;
use rand::Rng;

use super::collision::{cell_spawn_box, enemy_hitbox, item_hitbox};
use super::item::{Item, ItemKind};
use super::player::{Direction, PLAYER_SPRITES};
use super::spawner::{max_items, shift_key_weight};
use super::state::{GamePhase, GameState, PointAnimation, PointColor};
use crate::consts::{BOARD_COLS, BOARD_ROWS};

/// A discrete input from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Arrow keys
    Move(Direction),
    /// Digit keys 0-5 on the level-up screen
    Select(u8),
    /// Space bar on the game-over screen
    Restart,
}

/// Inputs collected since the previous tick, applied in order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

/// Apply one input event. Events that make no sense in the current phase are
/// ignored; returns whether the event did anything.
pub fn handle_input(state: &mut GameState, event: InputEvent) -> bool {
    match (state.phase, event) {
        (GamePhase::Playing, InputEvent::Move(dir)) if state.player.alive => {
            let before = state.player.piece.pos;
            state.player.step(dir);
            state.player.piece.pos != before
        }
        (GamePhase::LevelUp, InputEvent::Select(index)) => state.choose_sprite(index as usize),
        (GamePhase::GameOver, InputEvent::Restart) => state.restart(),
        _ => false,
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    for event in &input.events {
        handle_input(state, *event);
    }

    match state.phase {
        GamePhase::Playing => tick_playing(state, dt),
        GamePhase::LevelUp => {
            // Combat and spawning wait for the skin choice; the board keeps ageing
            state.player.update();
            update_items(state, dt);
            update_point_animations(state, dt);
            remove_expired_items(state);
        }
        GamePhase::GameOver => {}
    }
}

fn tick_playing(state: &mut GameState, dt: f32) {
    for enemy in &mut state.enemies {
        enemy.update(dt, &mut state.rng);
    }
    state.player.update();

    check_player_gets_item(state);
    update_items(state, dt);
    update_point_animations(state, dt);
    let on_board = remove_expired_items(state);
    spawn_items(state, on_board);
    check_player_hits_enemy(state);

    if state.check_game_over() {
        return;
    }

    if state.level_score >= state.next_level() as i32 {
        state.level_up();
    }

    if state.bonus_time > 0.0 {
        state.bonus_time -= dt;
    }
}

/// Count down every item's lifetime
pub fn update_items(state: &mut GameState, dt: f32) {
    for item in state.board.items_mut() {
        item.update(dt);
    }
}

/// Drop expired/collected items; returns the number still active
pub fn remove_expired_items(state: &mut GameState) -> usize {
    state.board.remove_expired()
}

/// Drift floating score text and drop finished ones
pub fn update_point_animations(state: &mut GameState, dt: f32) {
    let speed = state.tuning.point_animation_speed;
    let decay = state.tuning.point_animation_decay;
    state
        .point_animations
        .retain_mut(|anim| anim.update(dt, speed, decay));
}

/// Snapshot of a collected item, taken before its effects are applied
#[derive(Debug, Clone, Copy)]
struct Pickup {
    kind: ItemKind,
    points: i32,
    life: i32,
    center: Vec2,
}

/// Collect every active item under the player's center
pub fn check_player_gets_item(state: &mut GameState) -> usize {
    let mut collected = 0;
    for row in 0..BOARD_ROWS {
        for col in 0..BOARD_COLS {
            let center = state.player.center;
            let Some(item) = state.board.get_mut(row, col) else {
                continue;
            };
            if !item.active || !item_hitbox(item).contains_point(center) {
                continue;
            }
            item.collect();
            let pickup = Pickup {
                kind: item.kind,
                points: item.points,
                life: item.life,
                center: item.center,
            };
            apply_pickup(state, pickup);
            collected += 1;
        }
    }
    collected
}

fn apply_pickup(state: &mut GameState, pickup: Pickup) {
    state.game_score += pickup.points;
    state.level_score += pickup.points;
    state.player.heal(pickup.life);

    let time = state.tuning.point_animation_time;
    if pickup.points > 0 {
        state.point_animations.push(PointAnimation {
            text: format!("+ {}", pickup.points),
            color: PointColor::Green,
            pos: pickup.center + Vec2::new(20.0, 0.0),
            time_remaining: time,
            direction: 1.0,
        });
    }
    if pickup.life != 0 {
        let text = if pickup.life < 0 {
            pickup.life.to_string()
        } else {
            format!("+ {}", pickup.life)
        };
        state.point_animations.push(PointAnimation {
            text,
            color: PointColor::Red,
            pos: pickup.center - Vec2::new(20.0, 0.0),
            time_remaining: time,
            direction: -1.0,
        });
    }

    match pickup.kind {
        ItemKind::Key => {
            if state.player.unlock_sprite() {
                shift_key_weight(&mut state.items, state.tuning.key_weight_shift);
                state.rebuild_weighted_list();
                log::info!(
                    "Unlocked skin {} of {}",
                    state.player.unlocked_sprites,
                    PLAYER_SPRITES.len()
                );
            }
        }
        ItemKind::Obstacle => state.player.reset(),
        ItemKind::Star => {
            state.bonus_time = state.level as f32;
            log::info!("Bonus level for {}s", state.bonus_time);
        }
        _ => {}
    }

    log::debug!(
        "Collected {:?}: {:+} points, {:+} life",
        pickup.kind,
        pickup.points,
        pickup.life
    );
}

/// Try to put one new item on the board; returns true if one was placed
pub fn spawn_items(state: &mut GameState, on_board: usize) -> bool {
    let bonus = state.bonus_active();
    if on_board >= max_items(state.level, bonus, &state.tuning) {
        return false;
    }

    let row = state.rng.random_range(0..BOARD_ROWS);
    let col = state.rng.random_range(0..BOARD_COLS);
    if state.board.is_occupied(row, col)
        || cell_spawn_box(row, col).contains_point(state.player.center)
    {
        return false;
    }

    let chance = state.tuning.spawn_chance(state.level, bonus);
    if state.rng.random::<f32>() >= chance {
        return false;
    }

    let Some(index) = state.weighted.pick(&mut state.rng) else {
        return false;
    };
    let Some(template) = state.items.get(index) else {
        return false;
    };
    let item = Item::spawn(template, row, col);
    log::debug!("Spawned {:?} at ({}, {})", item.kind, row, col);
    state.board.place(row, col, item)
}

/// Damage and send home the player for every enemy touching its center
pub fn check_player_hits_enemy(state: &mut GameState) -> usize {
    let damage = i32::try_from(state.level)
        .unwrap_or(i32::MAX)
        .min(state.tuning.max_enemy_damage);
    let mut hits = 0;
    for enemy in &state.enemies {
        if enemy_hitbox(enemy).contains_point(state.player.center) {
            state.player.damage(damage);
            state.player.reset();
            hits += 1;
            log::debug!("Hit by enemy for {} damage, life {}", damage, state.player.life);
        }
    }
    hits
}
