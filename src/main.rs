//! Gem Crossing entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use gem_crossing::Tuning;
    use gem_crossing::consts::*;
    use gem_crossing::sim::{
        Direction, GamePhase, GameState, InputEvent, PLAYER_SPRITES, TickInput, tick,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::with_tuning(seed, tuning),
                ctx,
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// Run one simulation tick with the inputs gathered since the last frame
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            let before = self.state.phase;
            tick(&mut self.state, &self.input, dt);
            self.input.clear();
            if self.state.phase != before {
                log::info!("Phase {:?} -> {:?}", before, self.state.phase);
            }
        }

        /// Placeholder shapes; sprites are drawn by the page when available
        fn render(&self) {
            let ctx = &self.ctx;
            let state = &self.state;
            ctx.clear_rect(0.0, 0.0, BOARD_WIDTH as f64, BOARD_HEIGHT as f64);

            // Stone rows and grass
            ctx.set_fill_style_str("#9a9a9a");
            ctx.fill_rect(
                0.0,
                (ITEM_ROW_OFFSET + ROW_STEP) as f64,
                BOARD_WIDTH as f64,
                (ROW_STEP * BOARD_ROWS as f32) as f64,
            );
            ctx.set_fill_style_str("#5fa55a");
            ctx.fill_rect(
                0.0,
                (ITEM_ROW_OFFSET + ROW_STEP * (BOARD_ROWS as f32 + 1.0)) as f64,
                BOARD_WIDTH as f64,
                (ROW_STEP * 2.0) as f64,
            );

            for item in state.board.items().filter(|i| i.visible()) {
                ctx.set_fill_style_str(item.kind.color());
                ctx.begin_path();
                let _ = ctx.arc(item.center.x as f64, item.center.y as f64, 14.0, 0.0, TAU);
                ctx.fill();
            }

            ctx.set_fill_style_str("#c0392b");
            for enemy in &state.enemies {
                let p = enemy.piece.pos;
                ctx.fill_rect(p.x as f64 + 10.0, p.y as f64 + 95.0, 80.0, 45.0);
            }

            ctx.set_fill_style_str("#2e6bd1");
            let c = state.player.center;
            ctx.fill_rect(c.x as f64 - 20.0, c.y as f64 - 40.0, 40.0, 50.0);

            ctx.set_font("bold 24px Arial");
            ctx.set_text_align("center");
            for anim in &state.point_animations {
                ctx.set_fill_style_str(anim.color.css());
                let _ = ctx.fill_text(&anim.text, anim.pos.x as f64, anim.pos.y as f64);
            }

            match state.phase {
                GamePhase::LevelUp => {
                    self.banner("blue", &format!("Level {}", state.level), "Choose avatar number below");
                    ctx.set_font("bold 36px Arial");
                    ctx.set_fill_style_str("blue");
                    for i in 0..state.player.unlocked_sprites.min(PLAYER_SPRITES.len()) {
                        let x = i as f64 * COL_STEP as f64 + 50.0;
                        let _ = ctx.fill_text(&i.to_string(), x, 495.0);
                    }
                }
                GamePhase::GameOver => {
                    self.banner("red", "Game Over", "Press SPACE BAR to play again");
                }
                GamePhase::Playing => {}
            }
        }

        fn banner(&self, color: &str, title: &str, subtitle: &str) {
            let ctx = &self.ctx;
            let cx = BOARD_WIDTH as f64 / 2.0;
            let cy = BOARD_HEIGHT as f64 / 2.0;
            ctx.set_text_align("center");
            ctx.set_font("bold 60px Arial");
            ctx.set_fill_style_str(color);
            let _ = ctx.fill_text(title, cx, cy);
            ctx.set_font("bold 24px Arial");
            ctx.set_fill_style_str("magenta");
            let _ = ctx.fill_text(subtitle, cx, cy + 50.0);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = &self.state;
            let fields = [
                ("#hud-life .hud-value", state.player.life.to_string()),
                ("#hud-level .hud-value", state.level.to_string()),
                ("#hud-score .hud-value", state.game_score.to_string()),
                (
                    "#hud-next .hud-value",
                    format!("{} / {}", state.level_score, state.next_level()),
                ),
            ];
            for (selector, text) in fields {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(&text));
                }
            }
            if let Some(el) = document.get_element_by_id("hud-progress") {
                let width = format!("width: {:.0}%", state.level_progress() * 100.0);
                let _ = el.set_attribute("style", &width);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gem Crossing starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(BOARD_WIDTH as u32);
        canvas.set_height(BOARD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Tuning::load(), ctx)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Gem Crossing running!");
    }

    fn key_to_event(key: &str) -> Option<InputEvent> {
        let event = match key {
            "ArrowUp" => InputEvent::Move(Direction::Up),
            "ArrowDown" => InputEvent::Move(Direction::Down),
            "ArrowLeft" => InputEvent::Move(Direction::Left),
            "ArrowRight" => InputEvent::Move(Direction::Right),
            " " => InputEvent::Restart,
            digit => {
                let n = digit.parse::<u8>().ok().filter(|n| *n <= 5)?;
                InputEvent::Select(n)
            }
        };
        Some(event)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(input) = key_to_event(event.key().as_str()) {
                event.prevent_default();
                game.borrow_mut().input.push(input);
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                DEFAULT_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gem Crossing (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play in the browser");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match gem_crossing::Tuning::load_from_path(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                gem_crossing::Tuning::default()
            }
        },
        None => gem_crossing::Tuning::default(),
    };

    demo::run(tuning, 0x5eed, 60 * 120);
}

/// Scripted headless run: hop up and down the stone rows, pick the newest skin
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use gem_crossing::Tuning;
    use gem_crossing::consts::DEFAULT_DT;
    use gem_crossing::sim::{Direction, GamePhase, GameState, InputEvent, TickInput, tick};

    const PATTERN: [Direction; 8] = [
        Direction::Up,
        Direction::Up,
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Down,
    ];

    pub fn run(tuning: Tuning, seed: u64, frames: u32) {
        let mut state = GameState::with_tuning(seed, tuning);
        let mut input = TickInput::default();
        let mut games = 1;

        for frame in 0..frames {
            input.clear();
            match state.phase {
                GamePhase::Playing if frame % 20 == 0 => {
                    let dir = PATTERN[(frame / 20) as usize % PATTERN.len()];
                    input.push(InputEvent::Move(dir));
                }
                GamePhase::LevelUp => {
                    input.push(InputEvent::Select((state.player.unlocked_sprites - 1) as u8));
                }
                GamePhase::GameOver => {
                    println!(
                        "Game {} over: level {}, score {}",
                        games, state.level, state.game_score
                    );
                    games += 1;
                    input.push(InputEvent::Restart);
                }
                _ => {}
            }
            tick(&mut state, &input, DEFAULT_DT);
        }

        println!(
            "After {} frames: game {}, level {}, score {}, life {}, skins {}",
            frames,
            games,
            state.level,
            state.game_score,
            state.player.life,
            state.player.unlocked_sprites
        );
    }
}
