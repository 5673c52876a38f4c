//! Gravity Flip entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gravity_flip::Game;
    use gravity_flip::persistence::LocalStore;
    use gravity_flip::platform::RawInput;
    use gravity_flip::renderer::{HeadlessRenderer, RenderState};
    use gravity_flip::sim::Gravity;
    use gravity_flip::tuning::Tuning;
    use gravity_flip::ui::{InfoTopic, Overlay};

    /// Game plus whatever can draw it
    struct App {
        game: Game<LocalStore>,
        /// WebGPU renderer, if the browser gave us one
        gpu: Option<RenderState>,
        /// Used when WebGPU is unavailable so the HUD still runs
        fallback: HeadlessRenderer,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            match self.gpu.as_mut() {
                Some(gpu) => self.game.frame(time, gpu),
                None => self.game.frame(time, &mut self.fallback),
            };
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let hud = self.game.hud();

            set_text(document, "speedLabel", &hud.speed_label());
            set_text(document, "scoreLabel", &hud.score_label());
            set_text(document, "bestLabel", &hud.best_label());

            // Mirror the playfield styling from gravity; never the other way round
            if let Some(el) = document.get_element_by_id("playfield") {
                let flipped = self.game.state().player.gravity == Gravity::Ceiling;
                let _ = el.class_list().toggle_with_force("flipped", flipped);
            }

            let pause = hud.pause_control();
            if let Some(btn) = document.get_element_by_id("pauseButton") {
                let _ = btn.class_list().toggle_with_force("is-paused", pause.paused);
                let _ = btn.set_attribute("aria-label", pause.label);
            }
            if let Some(icon) = document.query_selector(".hud-pause-icon").ok().flatten() {
                icon.set_text_content(Some(pause.icon));
            }

            if let Some(overlay_el) = document.get_element_by_id("overlay") {
                match hud.overlay() {
                    Some(overlay) => {
                        set_text(document, "overlayTitle", &overlay.title);
                        set_subtitle(document, &overlay);
                        set_text(document, "overlayButton", &overlay.button);
                        let _ = overlay_el.class_list().remove_1("hidden");
                    }
                    None => {
                        let _ = overlay_el.class_list().add_1("hidden");
                    }
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    /// Score line plus the optional hint, rebuilt only when the text changes
    fn set_subtitle(document: &Document, overlay: &Overlay) {
        let Some(el) = document.get_element_by_id("overlaySubtitle") else {
            return;
        };
        let wanted = format!("{}{}", overlay.subtitle, overlay.hint.as_deref().unwrap_or(""));
        if el.text_content().as_deref() == Some(wanted.as_str()) {
            return;
        }

        el.set_text_content(None);
        if let Ok(line) = document.create_element("div") {
            line.set_class_name("overlay-score");
            line.set_text_content(Some(overlay.subtitle.as_str()));
            let _ = el.append_child(&line);
        }
        if let Some(hint) = &overlay.hint {
            if let Ok(line) = document.create_element("div") {
                let _ = line.set_attribute("style", "font-size: 0.8rem; color: #cbd5e1");
                line.set_text_content(Some(hint.as_str()));
                let _ = el.append_child(&line);
            }
        }
    }

    /// Fill and show the help popup
    fn open_info(document: &Document, topic: InfoTopic) {
        let panel = topic.panel();
        set_text(document, "infoTitle", panel.title);
        if let Some(list) = document.get_element_by_id("infoList") {
            list.set_text_content(None);
            for item in panel.items {
                if let Ok(li) = document.create_element("li") {
                    li.set_text_content(Some(*item));
                    let _ = list.append_child(&li);
                }
            }
        }
        if let Some(popup) = document.get_element_by_id("infoPopup") {
            let _ = popup.class_list().remove_1("hidden");
        }
    }

    async fn init_gpu(canvas: &HtmlCanvasElement, tuning: &Tuning) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("adapter: {}", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
            (tuning.track_width, tuning.track_height),
        )
        .await
        .map_err(|e| e.to_string())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Gravity Flip starting...");

        let Some(window) = web_sys::window() else {
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

        let tuning = Tuning::load();

        // Backing store at device resolution; CSS controls the displayed size
        let dpr = window.device_pixel_ratio();
        canvas.set_width((tuning.track_width as f64 * dpr) as u32);
        canvas.set_height((tuning.track_height as f64 * dpr) as u32);

        let gpu = match init_gpu(&canvas, &tuning).await {
            Ok(gpu) => Some(gpu),
            Err(e) => {
                log::error!("WebGPU unavailable, running without graphics: {}", e);
                None
            }
        };

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(tuning, seed, LocalStore),
            gpu,
            fallback: HeadlessRenderer::default(),
        }));
        log::info!("Game initialized with seed: {}", seed);

        app.borrow().update_hud(&document);

        setup_input_handlers(&canvas, &document, app.clone());
        setup_buttons(&document, app.clone());
        setup_info_popup(&document);
        setup_auto_pause(&document, app.clone());

        // Start game loop
        request_animation_frame(app);

        log::info!("Gravity Flip running!");
    }

    /// Route a raw event into the game; returns whether to suppress the default
    fn dispatch(app: &Rc<RefCell<App>>, raw: RawInput) -> bool {
        app.borrow_mut().game.handle_input(&raw).prevent_default
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, document: &Document, app: Rc<RefCell<App>>) {
        // Mouse down on the play area
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if dispatch(&app, RawInput::PointerDown { button: event.button() }) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start on the play area
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if dispatch(&app, RawInput::TouchStart) {
                    event.prevent_default();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if dispatch(&app, RawInput::Key(event.code())) {
                    event.prevent_default();
                }
            });
            if let Some(window) = document.default_view() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("pauseButton") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&app, RawInput::PauseControl);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("overlayButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                dispatch(&app, RawInput::OverlayButton);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_info_popup(document: &Document) {
        if let Ok(tabs) = document.query_selector_all(".tab-button") {
            for i in 0..tabs.length() {
                let Some(tab) = tabs.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let Some(topic) = tab
                    .get_attribute("data-info")
                    .and_then(|key| InfoTopic::from_key(&key))
                else {
                    log::warn!("Tab button without a known data-info key");
                    continue;
                };
                let document = document.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    open_info(&document, topic);
                });
                let _ = tab.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(close) = document.query_selector(".info-close").ok().flatten() {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(popup) = document.get_element_by_id("infoPopup") {
                    let _ = popup.class_list().add_1("hidden");
                }
            });
            let _ = close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, app: Rc<RefCell<App>>) {
        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                    && dispatch_focus_lost(&app)
                {
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        if let Some(window) = document.default_view() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if dispatch_focus_lost(&app) {
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn dispatch_focus_lost(app: &Rc<RefCell<App>>) -> bool {
        app.borrow_mut()
            .game
            .handle_input(&RawInput::FocusLost)
            .action
            .is_some()
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.frame(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                a.update_hud(&document);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gravity_flip::Game;
    use gravity_flip::consts::{FRAME_MS, MAX_HEADLESS_FRAMES};
    use gravity_flip::persistence::FileStore;
    use gravity_flip::platform::Action;
    use gravity_flip::renderer::HeadlessRenderer;
    use gravity_flip::sim::GameEvent;
    use gravity_flip::tuning::Tuning;
    use gravity_flip::ui::{InfoTopic, Overlay};

    env_logger::init();
    log::info!("Gravity Flip (native) starting headless demo...");
    log::info!("Graphics require the web build - run with `trunk serve`");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut game = Game::new(Tuning::load(), seed, FileStore::new("."));
    game.set_autopilot(true);
    game.queue(Action::Start);

    let mut renderer = HeadlessRenderer::default();
    let mut time = 0.0;
    for _ in 0..MAX_HEADLESS_FRAMES {
        let events = game.frame(time, &mut renderer);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::Crashed { .. }))
        {
            break;
        }
        time += FRAME_MS;
    }

    let hud = game.hud();
    log::info!(
        "Demo finished after {} frames ({} vertices in last frame)",
        renderer.frames,
        renderer.last_vertex_count
    );
    println!(
        "{}   {}   {}",
        hud.score_label(),
        hud.best_label(),
        hud.speed_label()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
