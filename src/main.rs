//! DOM Invaders entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use dom_invaders::Settings;
    use dom_invaders::platform::dom::{AlertNotifier, DomFactory, DomPresenter, DomScoreboard};
    use dom_invaders::sim::{GameState, KeyCommand, handle_key, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        presenter: DomPresenter,
        /// A frame callback is scheduled
        looping: bool,
    }

    impl Game {
        /// Run one frame and push its changes to the page
        fn frame(&mut self, time: f64) {
            tick(&mut self.state, time);
            self.presenter.present(&mut self.state);
        }

        /// Apply one key-down event
        fn key_down(&mut self, key: &str, repeat: bool) {
            if let Some(command) = KeyCommand::from_key(key) {
                handle_key(&mut self.state, command, repeat);
                self.presenter.present(&mut self.state);
            }
        }

        /// Start over after the session ended
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.presenter.present(&mut self.state);
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let (settings, load_error) = match Settings::load() {
            Ok(settings) => (settings, None),
            Err(e) => (Settings::default(), Some(e)),
        };
        let level = settings.log_level().unwrap_or(log::Level::Info);
        console_log::init_with_level(level).expect("Failed to init logger");
        if let Some(e) = load_error {
            log::warn!("Ignoring stored settings: {}", e);
        }

        log::info!("DOM Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let board = document
            .get_element_by_id("game-board")
            .expect("no #game-board element");
        let score = document
            .get_element_by_id("score")
            .expect("no #score element");

        // The simulation spawns its own player sprite
        if let Some(static_player) = document.get_element_by_id("player") {
            static_player.remove();
        }

        let mut presenter = DomPresenter::new(
            DomFactory::new(document.clone(), board),
            DomScoreboard::new(score),
            AlertNotifier::new(window.clone()),
        );

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(settings, seed);
        presenter.present(&mut state);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            presenter,
            looping: false,
        }));

        setup_input_handlers(game.clone());
        start_loop(game);

        log::info!("DOM Invaders running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = event.key();
            if key == " " {
                // Keep the page from scrolling
                event.prevent_default();
            }

            let ended = game.borrow().state.is_ended();
            if ended && key == "Enter" {
                game.borrow_mut().restart(js_sys::Date::now() as u64);
                start_loop(game.clone());
                return;
            }
            game.borrow_mut().key_down(&key, event.repeat());
        });
        if let Err(e) =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to install keydown listener: {:?}", e);
        }
        closure.forget();
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.looping {
                return;
            }
            g.looping = true;
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let ended = {
            let mut g = game.borrow_mut();
            g.frame(time);
            g.state.is_ended()
        };

        // No further frames once the session is over
        if ended {
            game.borrow_mut().looping = false;
            return;
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
    use dom_invaders::Settings;
    use dom_invaders::platform::headless::headless_presenter;
    use dom_invaders::sim::{GameState, tick};

    let (settings, load_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    let level = settings
        .log_level()
        .unwrap_or(log::Level::Info)
        .to_level_filter();
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    if let Some(e) = load_error {
        log::warn!("Ignoring stored settings: {}", e);
    }
    log::info!("DOM Invaders (native) starting...");
    log::info!("Native mode runs a headless session - build for wasm32 to play in a browser");

    // Simulated 60 Hz frame clock
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    let mut state = GameState::new(settings, 0x5EED);
    let (mut presenter, board) = headless_presenter();
    presenter.present(&mut state);

    let mut frame = 0;
    while state.is_running() && frame < MAX_FRAMES {
        frame += 1;
        tick(&mut state, frame as f64 * FRAME_MS);
        presenter.present(&mut state);
    }

    let board = board.borrow();
    match state.outcome() {
        Some(outcome) => log::info!(
            "Session finished after {} frames: {:?}, score {}",
            frame,
            outcome,
            state.score
        ),
        None => log::info!("Frame cap reached with {} sprites live", board.sprites.len()),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
