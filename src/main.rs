//! Lane Dash entry point
//!
//! On the web this wires the DOM controls, the frame loop and the 1 Hz clock to
//! the simulation and hands each frame to the page's 3D renderer. Natively it
//! runs a headless autopilot session and logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent};

    use lane_dash::audio::AudioManager;
    use lane_dash::consts::*;
    use lane_dash::sim::{Direction, FrameInput, GamePhase, GameState, frame, tick_second};
    use lane_dash::ui::{Controls, Hud, pause_label};
    use lane_dash::input::KeyCommand;
    use lane_dash::{DirectionPad, RenderSnapshot, Settings, Tuning};

    /// Global function the page defines to draw a frame
    const RENDER_HOOK: &str = "laneDashRender";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        pad: DirectionPad,
        settings: Settings,
        audio: AudioManager,
        last_time: Option<f64>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                state: GameState::with_tuning(seed, tuning),
                pad: DirectionPad::new(),
                settings,
                audio,
                last_time: None,
            }
        }

        fn input(&self) -> FrameInput {
            FrameInput {
                direction: self.pad.direction(),
                autopilot: self.settings.autopilot,
            }
        }

        /// Run one simulation frame and route its events
        fn update(&mut self, dt: f32) {
            let input = self.input();
            frame(&mut self.state, &input, dt.min(MAX_FRAME_DT));
            self.flush_events();
        }

        fn flush_events(&mut self) {
            let events = self.state.drain_events();
            self.audio.handle_events(&events);
            self.audio.sync_music(self.state.phase);
        }

        fn start(&mut self) {
            self.audio.resume();
            self.state.start();
            self.flush_events();
        }

        fn toggle_pause(&mut self) {
            self.state.toggle_pause();
            self.flush_events();
        }

        fn reset(&mut self) {
            self.state.reset();
            self.pad.release();
            self.flush_events();
        }

        /// Hand the frame to the page renderer, if it has registered one
        fn render(&self) {
            let Some(window) = web_sys::window() else { return };
            let Ok(hook) = js_sys::Reflect::get(&window, &JsValue::from_str(RENDER_HOOK)) else {
                return;
            };
            let Ok(hook) = hook.dyn_into::<js_sys::Function>() else {
                return;
            };

            match RenderSnapshot::capture(&self.state).to_json() {
                Ok(json) => {
                    if let Err(e) = hook.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::warn!("Render hook failed: {:?}", e);
                    }
                }
                Err(e) => log::warn!("Failed to serialize frame: {}", e),
            }
        }

        /// Update HUD elements and control visibility in the DOM
        fn update_hud(&self, document: &Document) {
            let hud = Hud::from_state(&self.state);
            set_text(document, "hud-lives", &hud.lives);
            set_text(document, "hud-time", &hud.time);
            set_text(document, "hud-passed", &hud.passed);
            set_text(document, "hud-level", &hud.level);

            if let Some(el) = document.get_element_by_id("message") {
                match &hud.message {
                    Some(text) => {
                        el.set_text_content(Some(text));
                        let _ = el.set_attribute("class", "message");
                    }
                    None => {
                        el.set_text_content(None);
                        let _ = el.set_attribute("class", "message hidden");
                    }
                }
            }

            let controls = Controls::for_phase(self.state.phase);
            set_visible(document, "btn-start", controls.start);
            set_visible(document, "btn-pause", controls.pause_toggle);
            set_visible(document, "btn-reset", controls.reset);
            set_text(document, "btn-pause", pause_label(self.state.phase));
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Attach a listener for the lifetime of the page
    fn listen<F>(target: &Element, event: &str, handler: F)
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Raw JSON from a `data-*` attribute on `<body>`
    fn body_json(document: &Document, attr: &str) -> Option<String> {
        document.body()?.get_attribute(attr)
    }

    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = body_json(document, "data-tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    fn load_settings(document: &Document) -> Settings {
        let Some(json) = body_json(document, "data-settings") else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring settings overrides: {}", e);
            Settings::default()
        })
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64 ^ js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            load_tuning(&document),
            load_settings(&document),
        )));
        log::info!("Game initialized with seed: {}", seed);

        setup_session_buttons(&document, game.clone());
        setup_direction_pad(&document, game.clone());
        setup_keyboard(&document, game.clone());
        setup_auto_pause(&document, game.clone());
        setup_second_clock(game.clone());

        game.borrow().update_hud(&document);
        request_animation_frame(game);

        log::info!("Lane Dash running!");
    }

    fn setup_session_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("btn-start") {
            let game = game.clone();
            listen(&btn, "click", move |_| game.borrow_mut().start());
        }
        if let Some(btn) = document.get_element_by_id("btn-pause") {
            let game = game.clone();
            listen(&btn, "click", move |_| game.borrow_mut().toggle_pause());
        }
        if let Some(btn) = document.get_element_by_id("btn-reset") {
            listen(&btn, "click", move |_| game.borrow_mut().reset());
        }
    }

    /// Hold-to-steer controls: press asserts, release or leaving clears
    fn setup_direction_pad(document: &Document, game: Rc<RefCell<Game>>) {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let id = format!("btn-{}", direction.as_str());
            let Some(btn) = document.get_element_by_id(&id) else {
                log::warn!("Missing direction control #{}", id);
                continue;
            };

            for event in ["mousedown", "touchstart"] {
                let game = game.clone();
                listen(&btn, event, move |e| {
                    e.prevent_default();
                    game.borrow_mut().pad.press(direction);
                });
            }
            for event in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
                let game = game.clone();
                listen(&btn, event, move |_| game.borrow_mut().pad.release());
            }
        }
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(root) = document.document_element() else { return };

        {
            let game = game.clone();
            listen(&root, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else { return };
                let Some(command) = KeyCommand::from_key(&event.key()) else { return };
                // Stop a focused button from also seeing Space/Enter as a click
                event.prevent_default();

                let mut g = game.borrow_mut();
                let phase = g.state.phase;
                match command {
                    KeyCommand::Steer(direction) => g.pad.press(direction),
                    KeyCommand::StartOrReset => match phase {
                        GamePhase::NotStarted => g.start(),
                        GamePhase::GameOver => g.reset(),
                        _ => {}
                    },
                    KeyCommand::TogglePause => g.toggle_pause(),
                    KeyCommand::ToggleAutopilot => {
                        g.settings.autopilot = !g.settings.autopilot;
                        log::info!("Autopilot: {}", g.settings.autopilot);
                    }
                    KeyCommand::ToggleMute => {
                        g.settings.muted = !g.settings.muted;
                        let settings = g.settings.clone();
                        g.audio.apply_settings(&settings);
                    }
                }
            });
        }

        listen(&root, "keyup", move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else { return };
            if Direction::from_key(&event.key()).is_some() {
                game.borrow_mut().pad.release();
            }
        });
    }

    /// Pause when the tab is hidden (tab switch, minimize)
    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() != web_sys::VisibilityState::Hidden {
                return;
            }
            let mut g = game.borrow_mut();
            if g.settings.pause_on_hidden && g.state.phase == GamePhase::Running {
                g.toggle_pause();
                g.pad.release();
                log::info!("Auto-paused (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// The elapsed-seconds clock ticks forever; the simulation gates its effect
    fn setup_second_clock(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut()>::new(move || {
            tick_second(&mut game.borrow_mut().state);
        });
        if window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                SECOND_TICK_MS,
            )
            .is_err()
        {
            log::warn!("Failed to start the elapsed-time clock");
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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
            let dt = match g.last_time {
                Some(last) => ((time - last) / 1000.0) as f32,
                None => FRAME_DT,
            };
            g.last_time = Some(time);

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
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
    env_logger::init();
    log::info!("Lane Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x1a2e_da54);
    headless::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use lane_dash::consts::FRAME_DT;
    use lane_dash::sim::{FrameInput, GameEvent, GameState, frame, tick_second};

    /// Give up after ten minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    pub fn run(seed: u64) {
        let mut state = GameState::new(seed);
        state.start();

        let input = FrameInput {
            autopilot: true,
            ..Default::default()
        };
        let frames_per_second = (1.0 / FRAME_DT).round() as u32;

        for n in 1..=MAX_FRAMES {
            frame(&mut state, &input, FRAME_DT);
            if n % frames_per_second == 0 {
                tick_second(&mut state);
            }

            for event in state.drain_events() {
                match event {
                    GameEvent::LevelUp { level } => {
                        log::info!("[{:>4}s] level {}", state.elapsed_seconds, level)
                    }
                    GameEvent::Collision { position } => log::info!(
                        "[{:>4}s] crash at x={:.2} ({} lives left)",
                        state.elapsed_seconds,
                        position.x,
                        state.lives
                    ),
                    _ => {}
                }
            }

            if state.phase.is_game_over() {
                break;
            }
        }

        println!(
            "seed {}: {:?} after {}s - {} obstacles passed, level {}, {} lives left",
            seed,
            state.outcome,
            state.elapsed_seconds,
            state.obstacles_passed,
            state.current_level().number(),
            state.lives
        );
    }
}
