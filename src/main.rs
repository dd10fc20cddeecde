//! Pot Climb entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use pot_climb::Settings;
    use pot_climb::consts::*;
    use pot_climb::sim::{FixedStep, GamePhase, GameState, InputEvent, InputQueue, SimEvent, tick};

    // The page draws each frame from the JSON snapshot
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (typeof window.renderFrame === 'function') {
                window.renderFrame(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputQueue,
        clock: FixedStep,
        last_time: f64,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            let state = GameState::new(seed, width, height, Settings::load());
            let last_phase = state.phase;
            Self {
                state,
                input: InputQueue::new(),
                clock: FixedStep::new(),
                last_time: 0.0,
                last_phase,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let steps = self.clock.advance(dt);
            // Queued input belongs to the first tick of the frame
            let events = self.input.drain();
            for step in 0..steps {
                let batch: &[InputEvent] = if step == 0 { &events } else { &[] };
                tick(&mut self.state, batch);
            }
            if steps == 0 && !events.is_empty() {
                // Keep input for the next frame that actually ticks
                for event in events {
                    self.input.push(event);
                }
            }

            for event in self.state.drain_events() {
                match event {
                    SimEvent::GameOver { height } => {
                        log::info!("Fell after climbing {}m", height.floor())
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        /// Hand the current frame to the page's draw hook
        fn render(&self) {
            match self.state.snapshot().to_json() {
                Ok(json) => present_frame(&json),
                Err(e) => log::warn!("Snapshot error: {}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let hud = self.state.hud();
            if let Some(el) = document.get_element_by_id("height") {
                el.set_text_content(Some(&format!("Height: {}m", hud.height_m)));
            }
            if let Some(el) = document.get_element_by_id("time") {
                el.set_text_content(Some(&format!("Time: {}s", hud.time_s)));
            }

            if self.state.phase != self.last_phase {
                self.last_phase = self.state.phase;
                show_panel(&document, "menu", self.state.phase == GamePhase::Menu);
                show_panel(&document, "game-over", self.state.phase == GamePhase::GameOver);
                if self.state.phase == GamePhase::GameOver {
                    if let Some(el) = document.get_element_by_id("final-height") {
                        el.set_text_content(Some(&hud.height_m.to_string()));
                    }
                    if let Some(el) = document.get_element_by_id("final-time") {
                        el.set_text_content(Some(&hud.time_s.to_string()));
                    }
                }
            }
        }
    }

    fn show_panel(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if visible {
                el.class_list().remove_1("hidden")
            } else {
                el.class_list().add_1("hidden")
            };
        }
    }

    /// Pointer position relative to the canvas
    fn canvas_point(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32) {
        let rect = canvas.get_bounding_client_rect();
        (
            (event.client_x() as f64 - rect.left()) as f32,
            (event.client_y() as f64 - rect.top()) as f32,
        )
    }

    /// Match the canvas backing store to the window
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (f32, f32) {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        (width as f32, height as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Pot Climb starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = fit_canvas(&window, &canvas);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, width, height)));
        log::info!("Seed {}", seed);

        setup_input(&window, &canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_resize(&window, &canvas, game.clone())?;

        request_animation_frame(game);
        Ok(())
    }

    fn setup_input(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse move
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = canvas_point(&canvas, &event);
                game.borrow_mut().input.push(InputEvent::PointerMove { x, y });
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse down
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let (x, y) = canvas_point(&canvas, &event);
                game.borrow_mut().input.push(InputEvent::PointerDown { x, y });
            });
            window.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.push(InputEvent::PointerUp);
            });
            window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().input.push(InputEvent::Jump);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let actions: [(&str, fn(&mut Game)); 3] = [
            ("startButton", |g| {
                g.input.clear();
                g.clock.reset();
                g.state.start();
            }),
            ("restartButton", |g| {
                g.input.clear();
                g.clock.reset();
                g.state.restart();
            }),
            ("quitButton", |g| g.state.show_menu()),
        ];

        for (id, action) in actions {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{} missing", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Keep the click from also reaching the hammer
                event.stop_propagation();
                action(&mut game.borrow_mut());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window_clone = window.clone();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let (width, height) = fit_canvas(&window_clone, &canvas);
            game.borrow_mut().state.resize(width, height);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
                SIM_DT
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
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pot Climb (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    let settings = Settings::load();
    match settings.to_json() {
        Ok(json) => log::debug!("Tuning: {}", json),
        Err(e) => log::warn!("Could not dump tuning: {}", e),
    }
    demo::run(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
use pot_climb::Settings;

/// Scripted headless run: hop off the platform, hook the nearest ledge, then let go
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use pot_climb::Settings;
    use pot_climb::sim::{FixedStep, GamePhase, GameState, InputEvent, InputQueue, tick};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 30;

    pub fn run(settings: Settings) {
        let mut state = GameState::new(42, 800.0, 600.0, settings);
        let mut input = InputQueue::new();
        let mut clock = FixedStep::new();
        state.start();

        for frame in 0..MAX_FRAMES {
            script(frame, &state, &mut input);

            let steps = clock.advance(FRAME_DT + 1e-6);
            let events = input.drain();
            for step in 0..steps {
                let batch: &[InputEvent] = if step == 0 { &events } else { &[] };
                tick(&mut state, batch);
            }
            for event in state.drain_events() {
                log::info!("frame {}: {:?}", frame, event);
            }

            if state.phase == GamePhase::GameOver {
                break;
            }
        }

        let hud = state.hud();
        log::info!(
            "Demo finished in phase {:?}: height {}m, time {}s",
            state.phase,
            hud.height_m,
            hud.time_s
        );
        match state.snapshot().to_json() {
            Ok(json) => log::debug!("Final snapshot: {}", json),
            Err(e) => log::warn!("Snapshot error: {}", e),
        }
    }

    /// Input script keyed on frame number
    fn script(frame: u32, state: &GameState, input: &mut InputQueue) {
        let Some(target) = state.terrain.iter().nth(1).map(|r| r.center()) else {
            return;
        };
        match frame {
            30 => input.push(InputEvent::Jump),
            31..=40 => input.push(InputEvent::PointerMove {
                x: target.x,
                y: target.y,
            }),
            41 => input.push(InputEvent::PointerDown {
                x: target.x,
                y: target.y,
            }),
            120 => input.push(InputEvent::PointerUp),
            _ => {}
        }
    }
}
