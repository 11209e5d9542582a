//! Cup Shuffle entry point
//!
//! The browser build exposes the engine to the page's 3D scene and drives it
//! from `requestAnimationFrame`. The native build plays a few headless rounds.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use cup_shuffle::Tuning;
    use cup_shuffle::consts::FRAME_MS;
    use cup_shuffle::sim::{CupPose, Game, GameEvent, GamePhase, PickHit};

    /// Everything the scene needs to draw one frame
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct FrameSnapshot {
        phase: GamePhase,
        level: u8,
        accepts_input: bool,
        cups: Vec<CupPose>,
        events: Vec<GameEvent>,
    }

    fn snapshot_json(game: &mut Game) -> String {
        let snapshot = FrameSnapshot {
            phase: game.phase(),
            level: game.level(),
            accepts_input: game.accepts_input(),
            cups: game.views().copied().collect(),
            events: game.drain_events(),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|e| {
            log::error!("Snapshot encode failed: {e}");
            String::from("{}")
        })
    }

    fn js_error(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Game handle for the host page
    #[wasm_bindgen]
    pub struct WebGame {
        game: Rc<RefCell<Game>>,
    }

    #[wasm_bindgen]
    impl WebGame {
        /// Optional JSON overrides for [`Tuning`]
        #[wasm_bindgen(constructor)]
        pub fn new(tuning_json: Option<String>) -> Result<WebGame, JsValue> {
            let tuning = match tuning_json {
                Some(json) => Tuning::from_json(&json).map_err(js_error)?,
                None => Tuning::default(),
            };
            let seed = js_sys::Date::now() as u64;
            log::info!("Game initialized with seed: {}", seed);
            Ok(WebGame {
                game: Rc::new(RefCell::new(Game::with_tuning(seed, tuning))),
            })
        }

        pub fn new_game(&self) -> bool {
            self.game.borrow_mut().new_game()
        }

        pub fn play(&self) -> bool {
            self.game.borrow_mut().play()
        }

        /// `hits_json`: `[{"cup": 1}, {"cup": 1, "tokenMarker": true}]`,
        /// nearest first
        pub fn pick(&self, hits_json: &str) -> Result<bool, JsValue> {
            let hits: Vec<PickHit> = serde_json::from_str(hits_json).map_err(js_error)?;
            Ok(self.game.borrow_mut().on_pick(&hits))
        }

        /// Advance one frame manually and return its snapshot
        pub fn tick(&self, dt_ms: f64) -> String {
            let mut game = self.game.borrow_mut();
            game.tick(dt_ms);
            snapshot_json(&mut game)
        }

        /// Drive the game from `requestAnimationFrame`, handing each frame's
        /// snapshot JSON to `render`
        pub fn run(&self, render: js_sys::Function) {
            request_animation_frame(self.game.clone(), Rc::new(render), 0.0);
            log::info!("Cup Shuffle running!");
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, render: Rc<js_sys::Function>, last_time: f64) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, render, last_time, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, render: Rc<js_sys::Function>, last_time: f64, time: f64) {
        let dt = if last_time > 0.0 { time - last_time } else { FRAME_MS };

        let snapshot = {
            let mut g = game.borrow_mut();
            g.tick(dt);
            snapshot_json(&mut g)
        };
        if let Err(e) = render.call1(&JsValue::NULL, &JsValue::from_str(&snapshot)) {
            log::warn!("Render callback failed: {:?}", e);
        }

        request_animation_frame(game, render, time);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Cup Shuffle starting...");
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5EED);
    log::info!("Cup Shuffle (native) starting with seed {seed}");
    headless::play_rounds(seed, 5);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use cup_shuffle::consts::{CUP_COUNT, FRAME_MS};
    use cup_shuffle::sim::{Game, GamePhase, pick_at};

    /// Upper bound on frames per phase before giving up
    const MAX_FRAMES: u32 = 100_000;

    fn settle(game: &mut Game) -> bool {
        for _ in 0..MAX_FRAMES {
            if !game.phase().is_animating() {
                return true;
            }
            game.tick(FRAME_MS);
        }
        false
    }

    fn report(game: &mut Game) {
        for event in game.drain_events() {
            println!("  {event:?}");
        }
    }

    /// Play `rounds` rounds with a guessing player at 60 Hz
    pub fn play_rounds(seed: u64, rounds: u32) {
        let mut game = Game::new(seed);
        let mut player = Pcg32::seed_from_u64(seed.wrapping_add(1));
        report(&mut game);

        for round in 1..=rounds {
            println!("Round {round} (level {})", game.level());
            game.play();
            if !settle(&mut game) || game.phase() != GamePhase::AwaitingInput {
                log::error!("Round {round} stalled in {:?}", game.phase());
                return;
            }

            let slot = player.random_range(0..CUP_COUNT);
            let x = game.tuning().cup_spacing * slot as f64;
            let poses: Vec<_> = game.views().copied().collect();
            game.on_pick(&pick_at(&poses, x));
            if !settle(&mut game) {
                log::error!("Round {round} never resolved");
                return;
            }
            report(&mut game);
        }

        let state = game.state();
        println!(
            "Won {} of {} rounds, finished at level {}",
            state.wins,
            state.rounds,
            game.level()
        );
    }
}
