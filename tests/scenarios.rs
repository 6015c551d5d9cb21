//! End-to-end gameplay scenarios driven through `tick`

use gem_crossing::consts::DEFAULT_DT;
use gem_crossing::sim::{
    Direction, Enemy, GamePhase, GameState, InputEvent, Item, ItemKind, Player, TickInput,
    remove_expired_items, tick,
};
use gem_crossing::{Tuning, cell_index};
use glam::Vec2;

const DT: f32 = DEFAULT_DT;

/// Player parked on the bottom item row (row 2, column 2) with no enemies
fn session(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    state.enemies.clear();
    let mut input = TickInput::default();
    input.push(InputEvent::Move(Direction::Up));
    input.push(InputEvent::Move(Direction::Up));
    tick(&mut state, &input, 0.0);
    assert_eq!(state.player.center, Vec2::new(252.0, 349.0));
    state
}

fn drop_item(state: &mut GameState, kind: ItemKind) {
    let template = state
        .items
        .iter()
        .find(|t| t.kind == kind)
        .cloned()
        .expect("kind in table");
    assert!(state.board.place(2, 2, Item::spawn(&template, 2, 2)));
}

#[test]
fn obstacle_pickup_at_level_one() {
    let mut state = session(1);
    assert_eq!(state.level, 1);
    assert_eq!(state.player.life, 100);

    drop_item(&mut state, ItemKind::Obstacle);
    tick(&mut state, &TickInput::default(), DT);

    assert_eq!(state.game_score, -5);
    assert_eq!(state.player.life, 95);
    assert_eq!(state.player.piece.pos, Player::start_pos());
    assert_eq!(state.phase, GamePhase::Playing);
}

#[test]
fn enemy_hit_at_level_ten_ends_game() {
    let mut state = session(2);
    state.level = 10;
    state.player.life = 3;

    let mut enemy = Enemy::new(10, &state.tuning, &mut state.rng);
    enemy.piece.pos = Vec2::new(200.0, 229.0);
    enemy.velocity = 30.0;
    state.enemies.push(enemy);

    tick(&mut state, &TickInput::default(), DT);

    assert_eq!(state.player.life, 0);
    assert!(!state.player.alive);
    assert_eq!(state.phase, GamePhase::GameOver);

    // Frozen until restarted
    let score = state.game_score;
    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.game_score, score);
    assert_eq!(state.phase, GamePhase::GameOver);

    let mut input = TickInput::default();
    input.push(InputEvent::Restart);
    tick(&mut state, &input, DT);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.level, 1);
    assert!(state.player.alive);
}

#[test]
fn keys_unlock_skins_up_to_cap() {
    let mut state = session(3);
    assert_eq!(state.player.unlocked_sprites, 1);
    let key_weight = |s: &GameState| {
        s.items
            .iter()
            .find(|t| t.kind == ItemKind::Key)
            .map(|t| t.weight)
            .unwrap_or_default()
    };

    for expected in 2..=5 {
        drop_item(&mut state, ItemKind::Key);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.unlocked_sprites, expected);
        // Keys give no points, so the player never leaves the cell
        assert_eq!(state.player.center, Vec2::new(252.0, 349.0));
    }
    let capped_weight = key_weight(&state);
    let capped_len = state.weighted.len();
    assert!((capped_weight - 0.005).abs() < 1e-9);

    for _ in 0..2 {
        drop_item(&mut state, ItemKind::Key);
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.unlocked_sprites, 5);
    }
    assert_eq!(key_weight(&state), capped_weight);
    assert_eq!(state.weighted.len(), capped_len);
}

#[test]
fn level_up_then_pick_unlocked_skin() {
    let mut state = session(4);
    drop_item(&mut state, ItemKind::Key);
    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.player.unlocked_sprites, 2);

    state.level_score = 1;
    state.board.clear();
    drop_item(&mut state, ItemKind::BlueGem);
    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.phase, GamePhase::LevelUp);
    assert_eq!(state.level, 2);
    assert_eq!(state.next_level(), 22);

    let mut input = TickInput::default();
    input.push(InputEvent::Select(5));
    input.push(InputEvent::Select(2));
    tick(&mut state, &input, DT);
    assert_eq!(state.phase, GamePhase::LevelUp);

    input.clear();
    input.push(InputEvent::Select(1));
    tick(&mut state, &input, DT);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.player.sprite_id(), "char-cat-girl");
}

#[test]
fn expiry_cleanup_is_idempotent() {
    let mut state = GameState::new(5);
    state.enemies.clear();
    state.level = 5;
    for _ in 0..300 {
        tick(&mut state, &TickInput::default(), DT);
    }
    let first = remove_expired_items(&mut state);
    let second = remove_expired_items(&mut state);
    assert_eq!(first, second);
    assert!(first <= 5);
}

#[test]
fn board_cells_do_not_alias() {
    let mut seen = std::collections::HashSet::new();
    for row in 0..3 {
        for col in 0..5 {
            assert!(seen.insert(cell_index(row, col)));
        }
    }
    assert_eq!(seen.len(), 15);
}

#[test]
fn custom_tuning_drives_session() {
    let tuning = Tuning::from_json(r#"{ "late_item_cap": 2, "late_item_cap_level": 1 }"#)
        .expect("valid tuning");
    let mut state = GameState::with_tuning(6, tuning);
    state.enemies.clear();
    state.level = 4;
    for _ in 0..600 {
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.board.items().count() <= 2);
    }
}
