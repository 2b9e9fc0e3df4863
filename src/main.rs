//! Whack Hole entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use whack_hole::Settings;
    use whack_hole::platform::{DeviceEvent, InputQueue};
    use whack_hole::renderer::{RenderState, Viewport, hole_vertices};
    use whack_hole::sim::{FrameOutcome, Game, SessionSummary, run_frame};

    /// Game instance holding all state
    struct App {
        game: Game,
        settings: Settings,
        queue: InputQueue,
        render_state: Option<RenderState>,
        last_time: f64,
        /// Canvas size in CSS pixels, for mapping mouse positions onto the field
        client_size: (f32, f32),
    }

    impl App {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                game: Game::from_settings(&settings, seed),
                queue: InputQueue::new(settings.max_events_per_frame),
                settings,
                render_state: None,
                last_time: 0.0,
                client_size: (1.0, 1.0),
            }
        }

        /// Scale a CSS-pixel mouse position to field pixels (still y down)
        fn to_field(&self, x: i32, y: i32) -> (i32, i32) {
            let sx = self.settings.field_width as f32 / self.client_size.0.max(1.0);
            let sy = self.settings.field_height as f32 / self.client_size.1.max(1.0);
            ((x as f32 * sx) as i32, (y as f32 * sy) as i32)
        }

        /// Run one frame of input and simulation
        fn update(&mut self, time: f64) -> FrameOutcome {
            let delta_ms = if self.last_time > 0.0 {
                (time - self.last_time).max(0.0) as u64
            } else {
                0
            };
            self.last_time = time;

            let input = self.queue.drain(self.settings.field_height);
            run_frame(&mut self.game, &input, delta_ms)
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = hole_vertices(self.game.holes().holes());
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.game.score().to_string()));
            }
            if let Some(el) = document.query_selector("#hud-time .hud-value").ok().flatten() {
                el.set_text_content(Some(&whack_hole::format_hms(
                    self.game.session().elapsed_ms,
                )));
            }
        }
    }

    fn show_summary(summary: &SessionSummary) {
        web_sys::console::log_1(&summary.to_string().into());
        let document = web_sys::window().and_then(|w| w.document());
        if let Some(el) = document.and_then(|d| d.get_element_by_id("summary")) {
            el.set_text_content(Some(&format!(
                "Score {}  Time {}",
                summary.score,
                summary.elapsed_hms()
            )));
            let _ = el.set_attribute("class", "");
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Whack Hole starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let viewport = Viewport::new(settings.field_width, settings.field_height);
        let app = Rc::new(RefCell::new(App::new(settings, seed)));
        app.borrow_mut().client_size = (client_w as f32, client_h as f32);

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, viewport).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Whack Hole running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Primary button
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut a = app.borrow_mut();
                let (x, y) = a.to_field(event.offset_x(), event.offset_y());
                a.queue.push(DeviceEvent::PrimaryDown { x, y });
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(window) = web_sys::window() else {
            return;
        };

        // Escape
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    app.borrow_mut().queue.push(DeviceEvent::Escape);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page teardown
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().queue.push(DeviceEvent::Quit);
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        let outcome = {
            let mut a = app.borrow_mut();
            let outcome = a.update(time);
            a.render();
            a.update_hud();
            outcome
        };

        match outcome {
            FrameOutcome::Continue => request_animation_frame(app),
            FrameOutcome::Finished(summary) => {
                log::info!("Session finished: {}", summary);
                show_summary(&summary);
            }
            FrameOutcome::Quit => log::info!("Whack Hole stopped"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use whack_hole::Settings;

    env_logger::init();
    log::info!("Whack Hole (native) starting...");
    log::info!("Native mode plays a headless autoplay session - run with `trunk serve` to play");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(clock_seed);

    if let Some(summary) = headless::run(&settings, seed) {
        println!("{summary}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use whack_hole::Settings;
    use whack_hole::sim::{
        AutoplayProfile, Autoplayer, FrameOutcome, Game, SessionSummary, run_frame,
    };

    /// Play a whole session with the autoplayer on a simulated frame clock
    pub fn run(settings: &Settings, seed: u64) -> Option<SessionSummary> {
        let mut game = Game::from_settings(settings, seed);
        let mut player = Autoplayer::new(seed.wrapping_add(1), AutoplayProfile::default());
        log::info!("Headless session with seed {}", seed);

        let frame_ms = settings.frame_ms();
        let mut clock = 0.0_f64;
        let mut last_ms = 0_u64;

        loop {
            clock += frame_ms;
            let now_ms = clock as u64;
            let delta_ms = now_ms - last_ms;
            last_ms = now_ms;

            let input = player.plan(&game);
            match run_frame(&mut game, &input, delta_ms) {
                FrameOutcome::Continue => {}
                FrameOutcome::Finished(summary) => return Some(summary),
                FrameOutcome::Quit => return None,
            }
        }
    }
}
