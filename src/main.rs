//! Canyon Dash entry point
//!
//! Handles platform-specific initialization and runs the frame loop. All
//! gameplay lives in the library; this file only wires DOM events into the
//! input record and schedules ticks.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use canyon_dash::Settings;
    use canyon_dash::input::InputState;
    use canyon_dash::render::{self, CanvasSurface};
    use canyon_dash::sim::{GameState, GameStatus, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        surface: CanvasSurface,
        settings: Settings,
        // Overlay toggling happens on status transitions
        last_status: GameStatus,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(viewport: Vec2, ctx: CanvasRenderingContext2d, seed: u64) -> Self {
            Self {
                state: GameState::new(viewport, seed),
                input: InputState::default(),
                surface: CanvasSurface::new(ctx),
                settings: Settings::load(),
                last_status: GameStatus::Playing,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn playing(&self) -> bool {
            self.state.status == GameStatus::Playing
        }

        /// One display frame: tick, track status and FPS, draw.
        fn frame(&mut self, time: f64) {
            tick(&mut self.state, &mut self.input);

            if self.state.status != self.last_status {
                if self.state.status == GameStatus::GameOver {
                    show_controls(false);
                    log::info!("run over: score {}", self.state.score);
                }
                self.last_status = self.state.status;
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }

            self.surface
                .clear(self.state.viewport.x, self.state.viewport.y);
            render::draw_frame(&self.state, &self.settings, &mut self.surface);
            if self.settings.show_fps {
                render::draw_fps(self.fps, &mut self.surface);
            }
        }

        /// Fresh run after game over.
        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state.reset(seed);
            self.input = InputState::default();
            self.last_status = GameStatus::Playing;
            log::info!("run restarted with seed {seed}");
        }

        /// A resize resets the run against the new viewport.
        fn resize(&mut self, viewport: Vec2) {
            let seed = js_sys::Date::now() as u64;
            self.state.resize(viewport, seed);
            self.input = InputState::default();
            self.last_status = GameStatus::Playing;
        }
    }

    /// Toggle the on-screen control overlay.
    fn show_controls(visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Ok(Some(controls)) = document.query_selector(".controls") {
            if let Ok(controls) = controls.dyn_into::<HtmlElement>() {
                let display = if visible { "block" } else { "none" };
                let _ = controls.style().set_property("display", display);
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Canyon Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context request failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            Vec2::new(width as f32, height as f32),
            ctx,
            seed,
        )));

        log::info!("Game initialized with seed: {seed}");

        setup_keyboard(game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_restart(game.clone());
        setup_resize(canvas.clone(), game.clone());

        show_controls(true);
        request_animation_frame(game);

        log::info!("Canyon Dash running!");
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        // Reschedule unconditionally: a bad frame is skipped, not fatal
        request_animation_frame(game);
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Presses only register mid-run; the restart tap is separate
                if g.playing() {
                    g.input.key_down(&event.key());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire one touch button to press/release actions on the input record.
    fn setup_touch_button(
        document: &web_sys::Document,
        game: &Rc<RefCell<Game>>,
        id: &str,
        press: fn(&mut InputState),
        release: fn(&mut InputState),
    ) {
        let Some(button) = document.get_element_by_id(id) else {
            log::warn!("touch button #{id} missing; keyboard only");
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.playing() {
                    press(&mut g.input);
                }
            });
            let _ = button
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                release(&mut game.borrow_mut().input);
            });
            let _ = button
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        setup_touch_button(
            document,
            &game,
            "leftBtn",
            |input| input.left = true,
            |input| input.left = false,
        );
        setup_touch_button(
            document,
            &game,
            "rightBtn",
            |input| input.right = true,
            |input| input.right = false,
        );
        setup_touch_button(
            document,
            &game,
            "jumpBtn",
            InputState::press_jump,
            InputState::release_jump,
        );
    }

    /// Any tap or click on the game-over screen starts a fresh run.
    fn setup_restart(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if !g.playing() {
                    g.restart();
                    show_controls(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if !g.playing() {
                    event.prevent_default();
                    g.restart();
                    show_controls(true);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|w| w.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(600.0);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);

            game.borrow_mut()
                .resize(Vec2::new(width as f32, height as f32));
            show_controls(true);
            log::info!("resized to {width}x{height}, run reset");
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;

    use canyon_dash::input::InputState;
    use canyon_dash::sim::{GameState, GameStatus, tick};

    env_logger::init();
    log::info!("Canyon Dash (native) starting...");
    log::info!("Native mode is a headless smoke run - build for wasm32 for the playable game");

    // Run right and jump periodically for a few hundred ticks
    let mut state = GameState::new(Vec2::new(1280.0, 720.0), 42);
    let mut input = InputState {
        right: true,
        ..Default::default()
    };

    let mut ticks = 0u32;
    for n in 0u32..600 {
        if n % 45 == 0 {
            input.press_jump();
        } else {
            input.release_jump();
        }
        tick(&mut state, &mut input);
        ticks = n + 1;
        if state.status == GameStatus::GameOver {
            break;
        }
    }

    println!(
        "smoke run: {} ticks, score {}, hp {}, x {:.0}, camera {:.0}",
        ticks, state.score, state.player.hp, state.player.pos.x, state.camera.x
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main; this satisfies the bin target
}
