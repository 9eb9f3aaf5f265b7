//! Fruit Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use fruit_catch::Game;
    use fruit_catch::input::InputEvent;
    use fruit_catch::platform::{
        CanvasSurface, DomOverlay, SpriteStore, load_sprites, load_tuning, now, resize_canvas,
    };
    use fruit_catch::sim::Playfield;

    type SharedGame = Rc<RefCell<Game<DomOverlay>>>;
    type SharedSurface = Rc<RefCell<CanvasSurface>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Fruit Catch starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        let sprites: SpriteStore = Rc::new(RefCell::new(HashMap::new()));
        let surface = match CanvasSurface::new(&canvas, sprites.clone()) {
            Ok(surface) => Rc::new(RefCell::new(surface)),
            Err(e) => {
                log::error!("Cannot create drawing surface: {}", e);
                return;
            }
        };

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let playfield = Playfield::new(canvas.width() as f32, canvas.height() as f32);
        let overlay = DomOverlay::new(&document, canvas.clone());
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, playfield, overlay)));

        log::info!("Game initialized with seed: {}", seed);

        load_sprites(&document, game.clone(), sprites);

        resize_canvas(&canvas, surface.borrow().context(), &mut game.borrow_mut());
        setup_resize_handler(&canvas, game.clone(), surface.clone());
        setup_input_handlers(&canvas, game.clone());
        setup_start_buttons(game.clone());

        request_animation_frame(game, surface);

        log::info!("Fruit Catch running!");
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: SharedGame, surface: SharedSurface) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            resize_canvas(&canvas, surface.borrow().context(), &mut game.borrow_mut());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: SharedGame) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down / up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().push_input(InputEvent::KeyDown(event.key()));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().push_input(InputEvent::KeyUp(event.key()));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - keyup events are lost while unfocused
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().release_keys();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - basket follows the cursor
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                game.borrow_mut().push_input(InputEvent::PointerMove { x });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(game: SharedGame) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["startBtn", "playAgain"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{} not found", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start(now());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: SharedGame, surface: SharedSurface) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, surface, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: SharedGame, surface: SharedSurface, time: f64) {
        // Errors are logged inside; the loop always continues
        game.borrow_mut().frame(time, &mut *surface.borrow_mut());
        request_animation_frame(game, surface);
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
    log::info!("Fruit Catch (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session with a pointer-following autopilot
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use fruit_catch::Game;
    use fruit_catch::input::InputEvent;
    use fruit_catch::renderer::{DrawCmd, RenderError, Surface};
    use fruit_catch::sim::Playfield;
    use fruit_catch::tuning::Tuning;
    use fruit_catch::ui::HeadlessOverlay;

    /// Counts draw commands instead of drawing
    #[derive(Default)]
    struct CountingSurface {
        commands: usize,
    }

    impl Surface for CountingSurface {
        fn draw(&mut self, _cmd: &DrawCmd) -> Result<(), RenderError> {
            self.commands += 1;
            Ok(())
        }
    }

    /// Frame interval of a 60Hz display, in ms
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Stop after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut game = Game::new(
            seed,
            Tuning::default(),
            Playfield::new(960.0, 640.0),
            HeadlessOverlay::default(),
        );
        let mut surface = CountingSurface::default();

        let mut time = 0.0;
        game.start(time);
        let mut frames = 0;
        while game.is_running() && frames < MAX_FRAMES {
            // Chase the lowest fruit
            let target = game
                .state
                .fruits
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|f| f.pos.x + f.size / 2.0);
            if let Some(x) = target {
                game.push_input(InputEvent::PointerMove { x });
            }

            time += FRAME_MS;
            game.frame(time, &mut surface);
            frames += 1;
        }

        let hud = &game.overlay().hud;
        log::info!(
            "Demo finished after {:.1}s: score {}, lives {}, spawn interval {}ms, {} draw commands",
            time / 1000.0,
            hud.score,
            hud.lives,
            game.state.spawn_interval,
            surface.commands
        );
        println!("Final score: {}", hud.score);
    }
}
