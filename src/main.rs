//! Water Glass entry point
//!
//! On the web this wires the session to the DOM, Web Audio and the
//! `deviceorientation` stream. Natively it plays a scripted session and logs it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, HtmlElement};

    use water_glass::audio::{AudioManager, Cue};
    use water_glass::sim::{
        Orientation, SensorStatus, SessionEvent, SessionState, generate_bubbles, tick,
    };
    use water_glass::{QualityPreset, SensorError, Settings};

    // Capability checks that web-sys can't express (static methods on event classes)
    #[wasm_bindgen(inline_js = "
        export function orientation_supported() {
            return typeof window.DeviceOrientationEvent !== 'undefined';
        }

        export function needs_sensor_permission() {
            return typeof DeviceMotionEvent !== 'undefined'
                && typeof DeviceMotionEvent.requestPermission === 'function';
        }

        export function request_sensor_permission() {
            return DeviceMotionEvent.requestPermission();
        }
    ")]
    extern "C" {
        fn orientation_supported() -> bool;
        fn needs_sensor_permission() -> bool;
        fn request_sensor_permission() -> js_sys::Promise;
    }

    /// Toast display time (ms)
    const MESSAGE_MS: i32 = 2000;
    /// Hint display time before it fades (ms)
    const HINT_MS: i32 = 3000;

    fn html_document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("no document")
    }

    fn element(document: &Document, id: &str) -> Option<HtmlElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_style(el: &HtmlElement, prop: &str, value: &str) {
        let _ = el.style().set_property(prop, value);
    }

    fn set_timeout(ms: i32, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
        closure.forget();
    }

    /// Elements updated every frame
    struct Dom {
        document: Document,
        water: Option<HtmlElement>,
        glass: Option<HtmlElement>,
        splash: Option<HtmlElement>,
        level_text: Option<HtmlElement>,
        tilt_text: Option<HtmlElement>,
        drank_text: Option<HtmlElement>,
        message: Option<HtmlElement>,
    }

    impl Dom {
        fn lookup() -> Self {
            let document = html_document();
            Self {
                water: element(&document, "water"),
                glass: element(&document, "glassContainer"),
                splash: element(&document, "splash"),
                level_text: element(&document, "waterLevel"),
                tilt_text: element(&document, "tiltAngle"),
                drank_text: element(&document, "drankAmount"),
                message: element(&document, "message"),
                document,
            }
        }
    }

    /// App instance holding all state
    struct App {
        state: SessionState,
        settings: Settings,
        audio: AudioManager,
        dom: Dom,
        /// Reused droplet elements, one per live particle
        droplets: Vec<HtmlElement>,
        /// Bumped per toast so an old timer doesn't hide a newer message
        message_id: Rc<Cell<u32>>,
    }

    impl App {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut state = SessionState::new(seed);
            state.particle_cap = settings.max_particles();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            Self {
                state,
                settings,
                audio,
                dom: Dom::lookup(),
                droplets: Vec::new(),
                message_id: Rc::new(Cell::new(0)),
            }
        }

        /// Route queued session events to audio and toasts
        fn dispatch_events(&mut self) {
            for event in self.state.take_events() {
                match event {
                    SessionEvent::DrinkingStarted => {
                        if self.state.sound_enabled {
                            self.audio.start_drinking_tone();
                        }
                    }
                    SessionEvent::DrinkingStopped => self.audio.stop_drinking_tone(),
                    SessionEvent::WaterEmpty => {
                        self.audio.stop_drinking_tone();
                        if self.state.sound_enabled {
                            self.audio.play(Cue::Empty);
                        }
                        self.show_message("All gone! 🎉");
                    }
                    SessionEvent::Refilled => {
                        if self.state.sound_enabled {
                            self.audio.play(Cue::Pour);
                        }
                        self.show_message("Glass refilled! 💧");
                    }
                }
            }
        }

        fn show_message(&mut self, text: &str) {
            let Some(el) = self.dom.message.clone() else { return };
            let id = self.message_id.get().wrapping_add(1);
            self.message_id.set(id);
            el.set_text_content(Some(text));
            set_style(&el, "display", "block");

            let latest = self.message_id.clone();
            set_timeout(MESSAGE_MS, move || {
                if latest.get() == id {
                    set_style(&el, "display", "none");
                }
            });
        }

        /// Push the current state into the DOM
        fn render(&mut self) {
            let tilt = self.state.visual_tilt();
            let readout = self.state.readout();

            if let Some(water) = &self.dom.water {
                set_style(water, "height", &format!("{}%", self.state.level));
                set_style(water, "transform", &format!("rotate({}deg)", tilt.surface_deg));
                set_style(water, "background", self.state.level_band().css_gradient());
            }
            if let Some(glass) = &self.dom.glass {
                set_style(glass, "transform", &format!("rotate({}deg)", tilt.glass_deg));
            }
            if let Some(el) = &self.dom.level_text {
                el.set_text_content(Some(&format!("{}%", readout.level_percent)));
            }
            if let Some(el) = &self.dom.tilt_text {
                el.set_text_content(Some(&format!("{}°", readout.tilt_deg)));
            }
            if let Some(el) = &self.dom.drank_text {
                el.set_text_content(Some(&format!("{}ml", readout.consumed_ml)));
            }

            self.render_droplets();
        }

        fn render_droplets(&mut self) {
            let Some(splash) = self.dom.splash.clone() else { return };

            while self.droplets.len() < self.state.particles.len() {
                let Some(el) = self
                    .dom
                    .document
                    .create_element("div")
                    .ok()
                    .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };
                el.set_class_name("splash-particle");
                let _ = splash.append_child(&el);
                self.droplets.push(el);
            }

            for (i, el) in self.droplets.iter().enumerate() {
                let Some(p) = self.state.particles.get(i) else {
                    set_style(el, "display", "none");
                    continue;
                };
                set_style(el, "display", "block");
                set_style(el, "width", &format!("{}px", p.size));
                set_style(el, "height", &format!("{}px", p.size));
                set_style(el, "left", &format!("{}%", p.pos.x));
                set_style(el, "top", &format!("{}%", p.pos.y));
                set_style(el, "opacity", &p.opacity.max(0.0).to_string());
                set_style(
                    el,
                    "transform",
                    &format!("rotate({}deg) scale({})", p.rotation, p.scale),
                );
                set_style(el, "background", &p.tint.css_gradient());
            }
        }

        fn spawn_bubbles(&mut self) {
            let Some(container) = element(&self.dom.document, "bubbles") else {
                return;
            };
            for bubble in generate_bubbles(&mut self.state.rng, self.settings.bubble_count()) {
                let Some(el) = self
                    .dom
                    .document
                    .create_element("div")
                    .ok()
                    .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                else {
                    return;
                };
                el.set_class_name("bubble");
                set_style(&el, "width", &format!("{}px", bubble.size_px));
                set_style(&el, "height", &format!("{}px", bubble.size_px));
                set_style(&el, "left", &format!("{}%", bubble.left_pct));
                set_style(&el, "bottom", &format!("{}%", bubble.bottom_pct));
                set_style(&el, "animation-duration", &format!("{}s", bubble.duration_s));
                set_style(&el, "animation-delay", &format!("{}s", bubble.delay_s));
                let _ = container.append_child(&el);
            }
        }
    }

    /// Ask for sensor access where the platform requires it (iOS 13+)
    async fn request_sensors() -> Result<(), SensorError> {
        if needs_sensor_permission() {
            let result = JsFuture::from(request_sensor_permission())
                .await
                .map_err(|e| SensorError::Request(format!("{:?}", e)))?;
            if result.as_string().as_deref() != Some("granted") {
                return Err(SensorError::PermissionDenied);
            }
        }
        if !orientation_supported() {
            return Err(SensorError::Unsupported);
        }
        Ok(())
    }

    /// Apply `?quality=low|medium|high` and remember it
    fn settings_from_url(mut settings: Settings) -> Settings {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let requested = search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.strip_prefix("quality="))
            .find_map(QualityPreset::from_str);
        if let Some(quality) = requested {
            if quality != settings.quality {
                settings.quality = quality;
                settings.save();
                log::info!("Quality set to {}", quality.as_str());
            }
        }
        settings
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Water Glass starting...");

        let settings = settings_from_url(Settings::load());
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, settings)));
        log::info!("Session created with seed: {}", seed);

        app.borrow_mut().spawn_bubbles();
        app.borrow_mut().render();

        setup_buttons(app.clone());
        setup_hint();

        request_animation_frame(app);

        log::info!("Water Glass ready");
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let document = html_document();

        // Start: request sensors, then leave the start screen
        if let Some(btn) = element(&document, "startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let app = app.clone();
                let document = html_document();
                if let Some(el) = element(&document, "loading") {
                    set_style(&el, "display", "flex");
                }
                app.borrow().audio.resume();

                wasm_bindgen_futures::spawn_local(async move {
                    let status = match request_sensors().await {
                        Ok(()) => SensorStatus::Available,
                        Err(e) => {
                            log::warn!("Sensors unavailable: {}", e);
                            if let Some(window) = web_sys::window() {
                                let _ = window.alert_with_message(e.user_message());
                            }
                            SensorStatus::Unavailable
                        }
                    };

                    // A second click can land while the first permission
                    // prompt is still open; only the first start listens.
                    let started = app.borrow_mut().state.start(status);
                    if started && status == SensorStatus::Available {
                        setup_orientation(app.clone());
                    }

                    let document = html_document();
                    if let Some(el) = element(&document, "startScreen") {
                        set_style(&el, "display", "none");
                    }
                    if let Some(el) = element(&document, "app") {
                        set_style(&el, "display", "block");
                    }
                    if let Some(el) = element(&document, "loading") {
                        set_style(&el, "display", "none");
                    }
                });
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Reset
        if let Some(btn) = element(&document, "resetBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.state.reset();
                a.dispatch_events();
                a.render();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Sound toggle
        if let Some(btn) = element(&document, "toggleSound") {
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let on = a.state.toggle_sound();
                if !on {
                    a.audio.stop_drinking_tone();
                }
                if let Some(icon) = btn_clone.query_selector(".btn-icon").ok().flatten() {
                    icon.set_text_content(Some(if on { "🔊" } else { "🔇" }));
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_orientation(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure =
            Closure::<dyn FnMut(_)>::new(move |event: web_sys::DeviceOrientationEvent| {
                let sample = Orientation::from_readings(event.beta(), event.gamma());
                let mut a = app.borrow_mut();
                a.state.handle_orientation(sample, js_sys::Date::now());
                a.dispatch_events();
            });
        let _ = window.add_event_listener_with_callback_and_bool(
            "deviceorientation",
            closure.as_ref().unchecked_ref(),
            true,
        );
        closure.forget();
        log::info!("Listening for device orientation");
    }

    /// Fade the tilt hint out after a few seconds
    fn setup_hint() {
        set_timeout(HINT_MS, || {
            let Some(hint) = element(&html_document(), "hint") else { return };
            set_style(&hint, "transition", "opacity 0.5s");
            set_style(&hint, "opacity", "0");
            set_timeout(500, move || set_style(&hint, "display", "none"));
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            // Same clock as orientation samples
            tick(&mut a.state, js_sys::Date::now());
            a.dispatch_events();
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use water_glass::Tuning;

    env_logger::init();
    log::info!("Water Glass (native) starting...");
    log::info!("The interactive glass runs in the browser - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("{} - using default tuning", e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    demo::run(tuning);
}

/// Scripted headless session
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use water_glass::Tuning;
    use water_glass::sim::{Orientation, SensorStatus, SessionState, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// (seconds to hold, beta, gamma)
    const SCRIPT: &[(f64, f32, f32)] = &[
        (1.0, 10.0, 0.0),
        (3.0, -40.0, 4.0),
        (2.0, -20.0, -6.0),
        (25.0, -80.0, 2.0),
        (1.0, 0.0, 0.0),
    ];

    pub fn run(tuning: Tuning) {
        let mut state = SessionState::with_tuning(0x5EED, tuning);
        state.start(SensorStatus::Available);

        let mut now = 0.0;
        for &(hold_secs, beta, gamma) in SCRIPT {
            println!("\nTilting to beta {:>6.1}°, gamma {:>5.1}°", beta, gamma);
            state.handle_orientation(Orientation::new(beta, gamma), now);
            report_events(&mut state, now);

            let end = now + hold_secs * 1000.0;
            let mut next_report = now + 1000.0;
            while now < end {
                now += FRAME_MS;
                tick(&mut state, now);
                report_events(&mut state, now);
                if now >= next_report {
                    let readout = state.readout();
                    let tilt = state.visual_tilt();
                    println!(
                        "  t={:>5.1}s level {:>3}%  drank {:>3} ml  surface {:>4.1}°  splashes {:>2}",
                        now / 1000.0,
                        readout.level_percent,
                        readout.consumed_ml,
                        tilt.surface_deg,
                        state.particles.len()
                    );
                    next_report += 1000.0;
                }
            }
        }

        println!("\nDrank {} ml, refilling", state.consumed_ml);
        state.reset();
        report_events(&mut state, now);
    }

    fn report_events(state: &mut SessionState, now: f64) {
        for event in state.take_events() {
            println!("  t={:>5.1}s event {:?}", now / 1000.0, event);
        }
    }
}
