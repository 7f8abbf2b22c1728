//! Butterfly Meadow entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use butterfly_meadow::consts::*;
    use butterfly_meadow::platform::InputCollector;
    use butterfly_meadow::renderer::CanvasRenderer;
    use butterfly_meadow::sim::{GameEvent, GamePhase, GameState, Screen, tick};
    use butterfly_meadow::{Settings, Tuning, WingColor, WorldSize};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputCollector,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        accumulator: f32,
        last_time: f64,
        /// The live 1 Hz countdown interval, if any
        interval: Option<CountdownInterval>,
    }

    /// A running `setInterval` and the callback it owns. Dropped only after
    /// the interval is cleared.
    struct CountdownInterval {
        handle: i32,
        generation: u64,
        _callback: Closure<dyn FnMut()>,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.sample();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            if substeps == MAX_SUBSTEPS {
                // Fell behind; drop the backlog instead of spiralling
                self.accumulator = 0.0;
            }
        }

        fn render(&self, time: f64) {
            if let Err(e) = self.renderer.render(&self.state, time) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Convert client coordinates to canvas pixels
        fn canvas_point(&self, client_x: i32, client_y: i32) -> glam::Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let scale_x = if rect.width() > 0.0 {
                self.canvas.width() as f64 / rect.width()
            } else {
                1.0
            };
            let scale_y = if rect.height() > 0.0 {
                self.canvas.height() as f64 / rect.height()
            } else {
                1.0
            };
            glam::Vec2::new(
                ((client_x as f64 - rect.left()) * scale_x) as f32,
                ((client_y as f64 - rect.top()) * scale_y) as f32,
            )
        }

        fn pointer_down(&mut self, client_x: i32, client_y: i32) {
            if self.state.phase != GamePhase::Playing {
                return;
            }
            let pos = self.canvas_point(client_x, client_y);
            let action = self.input.pointer_down(pos, self.state.player.center());
            log::debug!("Pointer down at {:?}: {:?}", pos, action);
        }

        fn pointer_move(&mut self, client_x: i32, client_y: i32) {
            if self.state.phase != GamePhase::Playing || self.input.drag().is_none() {
                return;
            }
            let pos = self.canvas_point(client_x, client_y);
            self.input.pointer_move(pos.x);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.state.hud();
            let fields = [
                ("level-display", hud.level),
                ("score-display", hud.score),
                ("target-score", hud.target_score),
                ("timer-display", hud.time_left),
            ];
            for (id, value) in fields {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&value.to_string()));
                }
            }
        }
    }

    fn current_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Hide every screen except `screen`
    fn show_screen(document: &Document, screen: Screen) {
        for other in Screen::ALL {
            if let Some(el) = document.get_element_by_id(&format!("{}-screen", other.id())) {
                let _ = if other == screen {
                    el.class_list().remove_1("hidden")
                } else {
                    el.class_list().add_1("hidden")
                };
            }
        }
    }

    fn set_html(document: &Document, id: &str, html: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_inner_html(html);
        }
    }

    fn handle_event(document: &Document, event: &GameEvent) {
        match event {
            GameEvent::Screen(screen) => show_screen(document, *screen),
            GameEvent::LevelComplete {
                level,
                score,
                time_left,
                bonus,
            } => set_html(
                document,
                "win-stats",
                &format!(
                    "<p>Level {} Complete!</p><p>Flowers Collected: {}</p>\
                     <p>Time Remaining: {}s</p><p>Bonus Points: {}</p>",
                    level, score, time_left, bonus
                ),
            ),
            GameEvent::GameOver {
                level,
                score,
                target_score,
            } => set_html(
                document,
                "gameover-stats",
                &format!(
                    "<p>Level Reached: {}</p><p>Flowers Collected: {} / {}</p>\
                     <p>Keep trying! You can do it!</p>",
                    level, score, target_score
                ),
            ),
            GameEvent::FlowerCollected { .. } | GameEvent::BeeHit { .. } => {}
        }
    }

    /// Push queued events to the DOM and keep the countdown interval in step
    /// with the session: cancel before start, never two alive at once.
    fn sync(game: &Rc<RefCell<Game>>) {
        let Some(document) = current_document() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };

        let arm = {
            let mut g = game.borrow_mut();
            for event in g.state.drain_events() {
                handle_event(&document, &event);
            }
            g.update_hud(&document);

            let running = g.state.countdown.is_running();
            let generation = g.state.countdown.generation();
            let stale = match &g.interval {
                Some(interval) => !running || interval.generation != generation,
                None => false,
            };
            if stale {
                if let Some(interval) = g.interval.take() {
                    window.clear_interval_with_handle(interval.handle);
                }
            }
            if running && g.interval.is_none() {
                Some(generation)
            } else {
                None
            }
        };

        if let Some(generation) = arm {
            arm_countdown(game, &window, generation);
        }
    }

    fn arm_countdown(game: &Rc<RefCell<Game>>, window: &web_sys::Window, generation: u64) {
        // The frame loop syncs the DOM, so the callback never clears itself
        let weak: Weak<RefCell<Game>> = Rc::downgrade(game);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = weak.upgrade() {
                game.borrow_mut().state.countdown_fired(generation);
            }
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1000,
        ) {
            Ok(handle) => {
                game.borrow_mut().interval = Some(CountdownInterval {
                    handle,
                    generation,
                    _callback: closure,
                });
            }
            Err(e) => log::error!("Failed to start countdown: {:?}", e),
        }
    }

    fn world_for_window(window: &web_sys::Window) -> WorldSize {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        WorldSize::from_window(w as f32, h as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Butterfly Meadow starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let world = world_for_window(&window);
        canvas.set_width(world.width as u32);
        canvas.set_height(world.height as u32);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, world, Tuning::default(), settings),
            input: InputCollector::new(),
            renderer: CanvasRenderer::new(ctx),
            canvas: canvas.clone(),
            accumulator: 0.0,
            last_time: 0.0,
            interval: None,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_character_select(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_keyboard(&window, game.clone());
        setup_pointer(&canvas, game.clone());
        setup_resize(&window, game.clone());

        show_screen(&document, Screen::Start);
        request_animation_frame(game);

        log::info!("Butterfly Meadow running!");
        Ok(())
    }

    fn setup_character_select(document: &Document, game: Rc<RefCell<Game>>) {
        let Ok(buttons) = document.query_selector_all(".character-btn") else {
            return;
        };
        let current = game.borrow().state.settings.wing_color;
        for i in 0..buttons.length() {
            let Some(btn) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let color = btn
                .get_attribute("data-color")
                .and_then(|c| WingColor::from_str(&c));
            if color == Some(current) {
                let _ = btn.class_list().add_1("selected");
            }

            let game = game.clone();
            let clicked = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let Some(color) = color else {
                    return;
                };
                if let Some(document) = current_document() {
                    if let Ok(all) = document.query_selector_all(".character-btn") {
                        for j in 0..all.length() {
                            let item = all.item(j).and_then(|n| n.dyn_into::<Element>().ok());
                            if let Some(el) = item {
                                let _ = el.class_list().remove_1("selected");
                            }
                        }
                    }
                }
                let _ = clicked.class_list().add_1("selected");

                let mut g = game.borrow_mut();
                let mut settings = g.state.settings.clone();
                settings.wing_color = color;
                settings.save();
                g.state.apply_settings(settings);
                log::info!("Wing colour: {}", color.as_str());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let actions: [(&str, fn(&mut GameState)); 5] = [
            ("start-btn", GameState::start_level),
            ("next-level-btn", GameState::next_level),
            ("restart-btn", GameState::restart),
            ("retry-btn", GameState::retry),
            ("menu-btn", GameState::menu),
        ];
        for (id, action) in actions {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    g.input.clear();
                    g.accumulator = 0.0;
                    action(&mut g.state);
                }
                sync(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        // Keys released while unfocused never report keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_down(touch.client_x(), touch.client_y());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer_move(touch.client_x(), touch.client_y());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.pointer_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse mirrors touch for desktop testing
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_down(event.client_x(), event.client_y());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_move(event.client_x(), event.client_y());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let world = world_for_window(&window);
            let mut g = game.borrow_mut();
            g.canvas.set_width(world.width as u32);
            g.canvas.set_height(world.height as u32);
            g.state.resize(world);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
            g.render(time);
        }
        sync(&game);

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: a simple bot chases flowers until the level ends
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use butterfly_meadow::consts::SIM_DT;
    use butterfly_meadow::platform::InputCollector;
    use butterfly_meadow::sim::{GameEvent, GamePhase, GameState, tick};
    use butterfly_meadow::{Settings, Tuning, WorldSize};

    env_logger::init();
    log::info!("Butterfly Meadow (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let level = args.next().and_then(|s| s.parse().ok()).unwrap_or(1u32).max(1);
    let tuning = match std::env::var("MEADOW_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path).map(|json| Tuning::from_json(&json)) {
            Ok(Ok(tuning)) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Ok(Err(e)) => {
                log::warn!("Bad tuning file {}: {}", path, e);
                Tuning::default()
            }
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let mut state = GameState::new(seed, WorldSize::default(), tuning, Settings::load());
    state.level = level;
    state.start_level();
    let mut input = InputCollector::new();

    // Two minutes of simulated time is more than any level's clock
    let max_ticks = (120.0 / SIM_DT) as u64;
    let mut ticks = 0;
    while state.phase == GamePhase::Playing && ticks < max_ticks {
        steer_bot(&mut input, &state);
        let sample = input.sample();
        tick(&mut state, &sample);
        state.advance_clock(SIM_DT);
        ticks += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::BeeHit { time_left } => log::info!("Stung! {}s left", time_left),
                other => log::debug!("{:?}", other),
            }
        }
    }

    println!(
        "seed {} level {}: {:?} with {}/{} flowers, {}s left after {} ticks",
        seed, state.level, state.phase, state.score, state.target_score, state.time_left, ticks
    );
}

/// Head for the nearest flower, jumping when it is above
#[cfg(not(target_arch = "wasm32"))]
fn steer_bot(
    input: &mut butterfly_meadow::platform::InputCollector,
    state: &butterfly_meadow::sim::GameState,
) {
    use butterfly_meadow::consts::FLOWER_SIZE;

    input.clear();
    let me = state.player.center();
    let nearest = state
        .flowers
        .iter()
        .filter(|f| !f.collected)
        .map(|f| f.pos + glam::Vec2::splat(FLOWER_SIZE / 2.0))
        .min_by(|a, b| {
            a.distance_squared(me)
                .partial_cmp(&b.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let Some(target) = nearest else {
        return;
    };

    if target.x < me.x - 5.0 {
        input.key_down("ArrowLeft");
    } else if target.x > me.x + 5.0 {
        input.key_down("ArrowRight");
    }
    if target.y < state.player.pos.y {
        input.key_down(" ");
    }
}
