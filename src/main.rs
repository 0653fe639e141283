//! Datapad Starfield entry point
//!
//! Wires the simulation to the page on wasm; runs a headless session natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use datapad_starfield::sim::SimEvent;

/// Report simulation events on the log
fn log_event(event: &SimEvent) {
    match event {
        SimEvent::CombatStarted => log::info!("Combat simulation started"),
        SimEvent::CombatEnded { score } => {
            log::info!("Combat simulation terminated, final score {}", score)
        }
        SimEvent::WarpEngaged => log::info!("Hyperspace engaged"),
        SimEvent::WarpDisengaged { relocated } => {
            log::info!("Dropped out of hyperspace, {} stars re-formed", relocated)
        }
        SimEvent::EnemyDestroyed { pos, score } => {
            log::debug!("Enemy down at ({:.0}, {:.0}), score {}", pos.x, pos.y, score)
        }
        SimEvent::MeteorTriggered => log::debug!("Meteor"),
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent,
        Window,
    };

    use datapad_starfield::effects::{
        FLICKER_INTERVAL_MS, SCRAMBLE_INTERVAL_MS, TILT_RESET, TextScramble, UI_FLASH_MS,
        UI_FLASH_SHADOW, combat_button_label, status_flicker, tilt_transform,
    };
    use datapad_starfield::nav::{LinkAction, ScrollAnimation};
    use datapad_starfield::render::{canvas, compose};
    use datapad_starfield::sim::{FrameInput, SimState, tick};
    use datapad_starfield::{SetupError, Settings};

    const CANVAS_ID: &str = "space-canvas";
    const COMBAT_BUTTON_ID: &str = "start-sim-btn";
    const FALLBACK_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Canvas starfield holding all simulation state
    struct Starfield {
        state: SimState,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        input: FrameInput,
        last_time: f64,
        /// `.btn-content` of the combat button, if the page has one
        button_label: Option<Element>,
        /// Combat state the label currently shows
        shown_combat: Option<bool>,
    }

    impl Starfield {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                FALLBACK_FRAME_MS
            };
            self.last_time = time;

            let events = tick(&mut self.state, &self.input, dt);
            self.input.clear();
            for event in &events {
                super::log_event(event);
            }

            let cmds = compose(&self.state, &self.settings);
            canvas::paint(&self.ctx, &cmds);

            self.sync_button_label();
        }

        fn sync_button_label(&mut self) {
            let active = self.state.mode.game_active;
            if self.shown_combat == Some(active) {
                return;
            }
            if let Some(label) = &self.button_label {
                label.set_text_content(Some(combat_button_label(active)));
            }
            self.shown_combat = Some(active);
        }

        /// Match the canvas to the window and queue the new size
        fn fit_to_window(&mut self, window: &Window) {
            let size = window_size(window);
            self.canvas.set_width(size.x as u32);
            self.canvas.set_height(size.y as u32);
            self.input.resize = Some(size);
        }
    }

    type Shared = Rc<RefCell<Starfield>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        if let Err(e) = start() {
            log::warn!("Datapad disabled: {}", e);
            return;
        }

        log::info!("IMPERIAL DATAPAD SYSTEM v2.5 :: INITIALIZED");
    }

    fn start() -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        let starfield = match create_starfield(&window, &document) {
            Ok(starfield) => {
                let starfield = Rc::new(RefCell::new(starfield));
                setup_pointer(&window, starfield.clone());
                setup_resize(&window, starfield.clone());
                setup_combat_button(&document, starfield.clone());
                request_animation_frame(starfield.clone());
                Some(starfield)
            }
            Err(e) => {
                log::warn!("Starfield disabled: {}", e);
                None
            }
        };

        let effects_seed = js_sys::Date::now() as u64 ^ 0x5eed;
        let rng = Rc::new(RefCell::new(Pcg32::seed_from_u64(effects_seed)));
        setup_text_scramble(&window, &document, rng.clone());
        setup_status_flicker(&window, &document, rng);
        setup_ui_buttons(&window, &document, starfield.clone());
        setup_links(&window, &document, starfield);
        setup_card_tilt(&document);

        Ok(())
    }

    fn create_starfield(window: &Window, document: &Document) -> Result<Starfield, SetupError> {
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(SetupError::MissingElement { id: CANVAS_ID })?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SetupError::WrongElementType {
                id: CANVAS_ID,
                expected: "canvas",
            })?;

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(SetupError::NoContext2d)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::NoContext2d)?;

        let size = window_size(window);
        canvas.set_width(size.x as u32);
        canvas.set_height(size.y as u32);

        let settings = Settings::load();
        settings.save();
        let seed = js_sys::Date::now() as u64;
        let state = SimState::new(seed, size, &settings);
        log::info!(
            "Starfield initialized: {} stars ({} quality), {}x{}, seed {}",
            state.stars.len(),
            settings.quality.as_str(),
            size.x,
            size.y,
            state.seed
        );

        let button_label = document
            .get_element_by_id(COMBAT_BUTTON_ID)
            .and_then(|btn| btn.query_selector(".btn-content").ok().flatten());

        Ok(Starfield {
            state,
            settings,
            canvas,
            ctx,
            input: FrameInput::default(),
            last_time: 0.0,
            button_label,
            shown_combat: None,
        })
    }

    fn window_size(window: &Window) -> Vec2 {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        Vec2::new(
            read(window.inner_width()) as f32,
            read(window.inner_height()) as f32,
        )
    }

    fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
        let Ok(list) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect()
    }

    fn request_animation_frame(starfield: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            starfield.borrow_mut().frame(time);
            request_animation_frame(starfield);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer(window: &Window, starfield: Shared) {
        // Pointer position (crosshair and laser origin)
        {
            let starfield = starfield.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                starfield.borrow_mut().input.pointer =
                    Some(Vec2::new(event.client_x() as f32, event.client_y() as f32));
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Primary action fires while combat is running
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let at = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let mut s = starfield.borrow_mut();
                s.input.pointer = Some(at);
                s.input.shots.push(at);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &Window, starfield: Shared) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            starfield.borrow_mut().fit_to_window(&window_clone);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_combat_button(document: &Document, starfield: Shared) {
        let Some(btn) = document.get_element_by_id(COMBAT_BUTTON_ID) else {
            log::info!("No combat button, minigame unavailable");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            starfield.borrow_mut().input.toggle_combat = true;
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_warp(starfield: &Option<Shared>) {
        if let Some(starfield) = starfield {
            starfield.borrow_mut().input.engage_warp = true;
        }
    }

    /// Hologram buttons and nav items flash the page and jump to hyperspace
    fn setup_ui_buttons(window: &Window, document: &Document, starfield: Option<Shared>) {
        for btn in query_all(document, ".hologram-btn, .nav-item") {
            if btn.id() == COMBAT_BUTTON_ID {
                continue;
            }
            let starfield = starfield.clone();
            let window = window.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(body) = document.body() {
                    let _ = body.style().set_property("text-shadow", UI_FLASH_SHADOW);
                    let reset = Closure::once_into_js(move || {
                        let _ = body.style().set_property("text-shadow", "none");
                    });
                    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        reset.unchecked_ref(),
                        UI_FLASH_MS,
                    );
                }
                request_warp(&starfield);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_links(window: &Window, document: &Document, starfield: Option<Shared>) {
        for link in query_all(document, "a") {
            let starfield = starfield.clone();
            let window = window.clone();
            let document = document.clone();
            let link_clone = link.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let href = link_clone.get_attribute("href").unwrap_or_default();
                let action = LinkAction::classify(&href);
                if let LinkAction::ScrollTo(id) = &action {
                    event.prevent_default();
                    let Some(target) = document.get_element_by_id(id) else {
                        return;
                    };
                    let start = window.scroll_y().unwrap_or(0.0);
                    let top = target.get_bounding_client_rect().top() + start;
                    animate_scroll(window.clone(), ScrollAnimation::new(start, top));
                }
                if action.engages_warp() {
                    request_warp(&starfield);
                }
            });
            let _ =
                link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn animate_scroll(window: Window, mut anim: ScrollAnimation) {
        let window_clone = window.clone();
        let closure = Closure::once(move |time: f64| {
            let (pos, done) = anim.sample(time);
            window_clone.scroll_to_with_x_and_y(0.0, pos);
            if !done {
                animate_scroll(window_clone, anim);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Running scramble for one element
    #[derive(Default)]
    struct ScrambleSlot {
        scramble: Option<TextScramble>,
        interval: Option<i32>,
    }

    fn setup_text_scramble(window: &Window, document: &Document, rng: Rc<RefCell<Pcg32>>) {
        for target in query_all(document, ".glitch-text") {
            let original = target.inner_text();
            let slot = Rc::new(RefCell::new(ScrambleSlot::default()));

            // Interval body, shared by every hover on this element
            let step = {
                let slot = slot.clone();
                let target = target.clone();
                let window = window.clone();
                let rng = rng.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    let mut slot = slot.borrow_mut();
                    let Some(scramble) = slot.scramble.as_mut() else {
                        return;
                    };
                    let (text, done) = scramble.next_frame(&mut *rng.borrow_mut());
                    target.set_inner_text(&text);
                    if done {
                        if let Some(handle) = slot.interval.take() {
                            window.clear_interval_with_handle(handle);
                        }
                        slot.scramble = None;
                    }
                });
                let function = closure.as_ref().unchecked_ref::<js_sys::Function>().clone();
                closure.forget();
                function
            };

            let window = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut slot = slot.borrow_mut();
                if let Some(handle) = slot.interval.take() {
                    window.clear_interval_with_handle(handle);
                }
                slot.scramble = Some(TextScramble::new(&original));
                slot.interval = window
                    .set_interval_with_callback_and_timeout_and_arguments_0(
                        &step,
                        SCRAMBLE_INTERVAL_MS,
                    )
                    .ok();
            });
            let _ = target
                .add_event_listener_with_callback("mouseover", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_status_flicker(window: &Window, document: &Document, rng: Rc<RefCell<Pcg32>>) {
        let items = query_all(document, ".status-item");
        if items.is_empty() {
            return;
        }
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut rng = rng.borrow_mut();
            for item in &items {
                if let Some(opacity) = status_flicker(&mut *rng) {
                    let _ = item.style().set_property("opacity", &opacity.to_string());
                }
            }
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            FLICKER_INTERVAL_MS,
        );
        closure.forget();
    }

    fn setup_card_tilt(document: &Document) {
        for card in query_all(document, ".hologram-card") {
            {
                let card_clone = card.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    let rect = card_clone.get_bounding_client_rect();
                    let x = event.client_x() as f64 - rect.left();
                    let y = event.client_y() as f64 - rect.top();
                    let transform = tilt_transform(x, y, rect.width(), rect.height());
                    let _ = card_clone.style().set_property("transform", &transform);
                });
                let _ = card.add_event_listener_with_callback(
                    "mousemove",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
            {
                let card_clone = card.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let _ = card_clone.style().set_property("transform", TILT_RESET);
                });
                let _ = card.add_event_listener_with_callback(
                    "mouseleave",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Datapad Starfield (native) starting...");
    log::info!("Native mode has no canvas - running a headless session");

    headless_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted idle -> hyperspace -> combat run, reported on the log
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use datapad_starfield::Settings;
    use datapad_starfield::render::compose;
    use datapad_starfield::sim::{FrameInput, SimState, tick};
    use glam::Vec2;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let settings = Settings::load();
    let mut state = SimState::new(0xda7a_9ad, Vec2::new(1280.0, 720.0), &settings);
    let mut draw_calls = 0usize;

    let script = |frame: u32| -> FrameInput {
        match frame {
            120 => FrameInput {
                engage_warp: true,
                ..Default::default()
            },
            300 => FrameInput {
                toggle_combat: true,
                ..Default::default()
            },
            301..=1199 if frame % 12 == 0 => {
                // Sweep the crosshair along the bottom and keep firing
                let at = Vec2::new((frame * 37 % 1280) as f32, 650.0);
                FrameInput {
                    pointer: Some(at),
                    shots: vec![at],
                    ..Default::default()
                }
            }
            1200 => FrameInput {
                toggle_combat: true,
                ..Default::default()
            },
            _ => FrameInput::default(),
        }
    };

    for frame in 0..1500 {
        let input = script(frame);
        for event in tick(&mut state, &input, FRAME_MS) {
            log_event(&event);
        }
        draw_calls += compose(&state, &settings).len();
    }

    log::info!(
        "Session done: {} frames, {:.1}s simulated, {} draw commands",
        state.clock.frame,
        state.clock.now_ms / 1000.0,
        draw_calls
    );
}
