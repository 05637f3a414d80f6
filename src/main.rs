//! Star Dodge entry point
//!
//! The wasm host wires the simulation to the page: keyboard and gamepad
//! capture, HUD text, overlay visibility, the shop controls, and the
//! animation-frame loop with its clamped delta time. Canvas painting is
//! handled by the page's own renderer reading the state after each tick.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlCanvasElement, HtmlSelectElement};

    use star_dodge::consts::*;
    use star_dodge::shop;
    use star_dodge::sim::{
        tick, Difficulty, GameEvent, GamepadAxes, TickInput, WorldConfig, WorldState,
    };
    use star_dodge::Progress;

    /// Session state owned by the event closures and the frame loop
    struct Game {
        state: WorldState,
        progress: Progress,
        input: TickInput,
        last_time: f64,
        // Edge detection for gamepad buttons
        start_held: bool,
        pause_held: bool,
    }

    impl Game {
        fn new(config: WorldConfig, seed: u64, progress: Progress) -> Self {
            let mut state = WorldState::new(config, seed);
            state.best = progress.best;
            state.wallet_stars = progress.wallet_stars;
            state.player.shape = progress.selected_character.clone();
            state.player.colour = progress.colour.clone();

            Self {
                state,
                progress,
                input: TickInput::default(),
                last_time: 0.0,
                start_held: false,
                pause_held: false,
            }
        }

        /// Take one gamepad snapshot: axes into the input, buttons as
        /// edge-triggered start/pause.
        fn poll_gamepad(&mut self) {
            let pads = web_sys::window().and_then(|w| w.navigator().get_gamepads().ok());
            let pad = pads
                .map(|p| p.get(0))
                .and_then(|v| v.dyn_into::<web_sys::Gamepad>().ok());

            let Some(pad) = pad else {
                self.input.gamepad = GamepadAxes::default();
                self.start_held = false;
                self.pause_held = false;
                return;
            };

            let axes = pad.axes();
            let x = axes.get(0).as_f64().unwrap_or(0.0) as f32;
            let y = axes.get(1).as_f64().unwrap_or(0.0) as f32;
            self.input.gamepad = GamepadAxes::from_raw(x, y);

            let pressed = |index: u32| {
                pad.buttons()
                    .get(index)
                    .dyn_into::<web_sys::GamepadButton>()
                    .ok()
                    .map(|b| b.pressed())
                    .unwrap_or(false)
            };

            let start = pressed(0);
            if start && !self.start_held {
                self.state.start();
            }
            self.start_held = start;

            let pause = pressed(9);
            if pause && !self.pause_held {
                self.state.toggle_pause();
            }
            self.pause_held = pause;
        }

        /// Apply the tick's notifications to storage and the log
        fn drain_events(&mut self) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::WalletCredited(_) | GameEvent::WalletDebited(_) => {
                        self.progress.wallet_stars = self.state.wallet_stars;
                        self.progress.save();
                    }
                    GameEvent::EffectStarted(effect) => {
                        log::debug!("effect started: {effect:?}");
                    }
                    GameEvent::GameOver { score, best, new_best } => {
                        if new_best {
                            self.progress.best = best;
                        }
                        self.progress.save();
                        log::info!("run over: score {score}, best {best}");
                    }
                }
            }
        }

        /// Push the state snapshot into the HUD text nodes
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&(self.state.score as u32).to_string()));
            }
            if let Some(el) = document.get_element_by_id("best") {
                el.set_text_content(Some(&self.state.best.to_string()));
            }
            if let Some(el) = document.get_element_by_id("stars") {
                el.set_text_content(Some(&self.state.wallet_stars.to_string()));
            }
        }

        /// Show/hide the start and game-over overlays
        fn update_overlays(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("startUi") {
                let visible = !self.state.running && !self.state.game_over;
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }

            if let Some(el) = document.get_element_by_id("gameOverUi") {
                if self.state.game_over {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("finalScore") {
                        score_el.set_text_content(Some(&(self.state.score as u32).to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("finalBest") {
                        best_el.set_text_content(Some(&self.state.best.to_string()));
                    }
                    if let Some(run_el) = document.get_element_by_id("finalRunStars") {
                        run_el.set_text_content(Some(&self.state.run_stars.to_string()));
                    }
                    if let Some(wallet_el) = document.get_element_by_id("finalWalletStars") {
                        wallet_el.set_text_content(Some(&self.state.wallet_stars.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Star Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // The play field takes the canvas's attribute size; the page owns
        // the element and the painting.
        let config = document
            .get_element_by_id("game")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .map(|canvas| WorldConfig {
                width: canvas.width() as f32,
                height: canvas.height() as f32,
                ..Default::default()
            })
            .unwrap_or_default();

        let progress = Progress::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed, progress)));

        log::info!("Session seed: {seed}");

        setup_keyboard(game.clone());
        setup_run_controls(&document, game.clone());
        setup_shop_controls(&document, game.clone());

        request_animation_frame(game);

        log::info!("Star Dodge running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                let mut g = game.borrow_mut();

                match key.as_str() {
                    "enter" | " " => {
                        g.state.start();
                        event.prevent_default();
                    }
                    "p" => {
                        g.state.toggle_pause();
                        event.prevent_default();
                    }
                    "r" => {
                        g.state.started_once = false;
                        g.state.reset(true);
                        event.prevent_default();
                    }
                    _ => {
                        if g.input.keys.set(&key, true) {
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                game.borrow_mut().input.keys.set(&key, false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_run_controls(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().state.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.state.started_once = false;
                g.state.reset(true);
                g.state.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("backBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.state.started_once = false;
                g.state.reset(true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = document.get_element_by_id("difficulty") {
            let game = game.clone();
            let select: HtmlSelectElement = match select.dyn_into() {
                Ok(s) => s,
                Err(_) => return,
            };
            let select_ref = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(difficulty) = Difficulty::from_str(&select_ref.value()) {
                    game.borrow_mut().state.set_difficulty(difficulty);
                }
            });
            let _ =
                select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_shop_controls(document: &Document, game: Rc<RefCell<Game>>) {
        // Switching shape only takes effect for shapes already owned; the
        // buy button handles the rest.
        if let Some(select) = select_by_id(document, "characterSelect") {
            let game = game.clone();
            let select_ref = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let id = select_ref.value();
                let mut g = game.borrow_mut();
                if g.progress.is_character_unlocked(&id) {
                    g.state.player.shape = id.clone();
                    g.progress.selected_character = id;
                    g.progress.save();
                }
            });
            let _ =
                select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = select_by_id(document, "colourSelect") {
            let game = game.clone();
            let select_ref = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let id = select_ref.value();
                let mut g = game.borrow_mut();
                g.state.player.colour = id.clone();
                g.progress.colour = id;
                g.progress.save();
            });
            let _ =
                select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = select_by_id(document, "backdropSelect") {
            let game = game.clone();
            let select_ref = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let id = select_ref.value();
                let mut g = game.borrow_mut();
                if g.progress.is_backdrop_unlocked(&id) {
                    g.progress.backdrop = id;
                    g.progress.save();
                }
            });
            let _ =
                select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let (Some(btn), Some(select)) = (
            document.get_element_by_id("buyBtn"),
            select_by_id(document, "characterSelect"),
        ) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let id = select.value();
                let mut g = game.borrow_mut();
                let g = &mut *g;
                let outcome = shop::purchase_character(&mut g.progress, &mut g.state, &id);
                if outcome == shop::PurchaseOutcome::Unlocked {
                    g.state.player.shape = id.clone();
                    g.progress.selected_character = id;
                    g.progress.save();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let (Some(btn), Some(select)) = (
            document.get_element_by_id("buyBackdropBtn"),
            select_by_id(document, "backdropSelect"),
        ) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let id = select.value();
                let mut g = game.borrow_mut();
                let g = &mut *g;
                let outcome = shop::purchase_backdrop(&mut g.progress, &mut g.state, &id);
                if outcome == shop::PurchaseOutcome::Unlocked {
                    g.progress.backdrop = id;
                    g.progress.save();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn select_by_id(document: &Document, id: &str) -> Option<HtmlSelectElement> {
        document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
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

            // Clamp so a backgrounded tab cannot produce a huge jump
            let dt = if g.last_time > 0.0 {
                (((time - g.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                MAX_FRAME_DT
            };
            g.last_time = time;

            g.poll_gamepad();
            let input = g.input;
            tick(&mut g.state, &input, dt);
            g.drain_events();

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
                g.update_overlays(&document);
            }
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
    use star_dodge::sim::{tick, TickInput, WorldConfig, WorldState};

    env_logger::init();
    log::info!("Star Dodge (native) starting...");
    log::info!("The playable build targets wasm32; running a headless smoke simulation");

    let mut state = WorldState::new(WorldConfig::default(), 0xD0D6E);
    state.start();
    state.player.effects.shield = f32::INFINITY;

    let input = TickInput::default();
    for _ in 0..600 {
        tick(&mut state, &input, 1.0 / 60.0);
    }

    println!(
        "10 s survived: score {}, {} hazards on field, {} stars up for grabs",
        state.score as u32,
        state.hazards.len(),
        state.stars.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
