//! Crewmate entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use crewmate::BootError;
    use crewmate::audio::AudioManager;
    use crewmate::consts::*;
    use crewmate::platform::{KeyValueStore, LocalStore, MemoryStore, Viewport};
    use crewmate::prefs::Preferences;
    use crewmate::renderer::{RenderState, SpriteAtlas, tessellate};
    use crewmate::sim::{FrameInput, GameEvent, SceneManager, Session};
    use crewmate::ui::{NameInput, TextLayer};

    /// Game instance holding all state
    struct Game {
        scenes: SceneManager,
        atlas: SpriteAtlas,
        render_state: Option<RenderState>,
        audio: AudioManager,
        store: Box<dyn KeyValueStore>,
        text: TextLayer,
        name_input: NameInput,
        document: Document,
        canvas: HtmlCanvasElement,
        viewport: Viewport,
        input: FrameInput,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        /// Fit canvas and text layer to the window
        fn fit(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(SCREEN_WIDTH as f64);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(SCREEN_HEIGHT as f64);
            self.viewport = Viewport::fit(w as f32, h as f32);

            let size = self.viewport.size();
            let style = self.canvas.style();
            let _ = style.set_property("left", &format!("{}px", self.viewport.offset.x));
            let _ = style.set_property("top", &format!("{}px", self.viewport.offset.y));
            let _ = style.set_property("width", &format!("{}px", size.x));
            let _ = style.set_property("height", &format!("{}px", size.y));

            let dpr = window.device_pixel_ratio() as f32;
            let (pw, ph) = ((size.x * dpr) as u32, (size.y * dpr) as u32);
            self.canvas.set_width(pw);
            self.canvas.set_height(ph);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(pw, ph);
            }

            self.text.fit(&self.viewport);
            self.name_input.fit(&self.viewport);
            log::debug!("Viewport fitted: {:?}", self.viewport);
        }

        /// Convert a client-space pointer position to logical coordinates
        fn logical_pointer(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let css = Vec2::new(client_x as f32 - rect.left() as f32, client_y as f32 - rect.top() as f32);
            self.viewport.to_logical(css)
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.input.name_text = self.name_input.value();
                let input = self.input.clone();
                self.scenes.tick(&input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
                self.handle_events();
            }
        }

        /// Apply side effects requested by the simulation
        fn handle_events(&mut self) {
            for event in self.scenes.drain_events() {
                match event {
                    GameEvent::PlaySound(effect) => self.audio.play(effect),
                    GameEvent::SavePreferences => {
                        if let Err(e) = self.scenes.session.prefs.save(self.store.as_mut()) {
                            log::warn!("Failed to save preferences: {e}");
                        }
                    }
                    GameEvent::LoadTexture(key) => self.atlas.load(key),
                    GameEvent::HideLoadingScreen => {
                        if let Some(loading) = self.document.get_element_by_id("loading") {
                            loading.remove();
                        }
                    }
                    GameEvent::SceneChanged(id) => log::debug!("Scene changed: {id:?}"),
                    GameEvent::ShowNameInput {
                        value,
                        center,
                        width,
                    } => self
                        .name_input
                        .show(&self.document, &value, center, width, &self.viewport),
                    GameEvent::HideNameInput => self.name_input.hide(),
                    GameEvent::VolumeChanged(volume) => self.audio.set_volume(volume),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let list = self.scenes.draw();
            if let Some(ref mut render_state) = self.render_state {
                let vertices = tessellate(&list, &self.atlas);
                match render_state.render(&vertices, list.background) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            self.text.sync(&list.labels, &self.viewport);
        }
    }

    /// Red banner with the error text, shown on uncaught errors and panics
    pub fn show_error_overlay(message: &str, line: Option<u32>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(div) = document.create_element("div") else {
            return;
        };
        let text = match line {
            Some(line) => format!("Error: {message} (line {line})"),
            None => format!("Error: {message}"),
        };
        div.set_text_content(Some(&text));
        let _ = div.set_attribute(
            "style",
            "position:fixed;top:0;left:0;right:0;padding:12px;background:#c0392b;color:#fff;\
             font-family:monospace;white-space:pre-wrap;z-index:10000;",
        );
        if let Some(body) = document.body() {
            let _ = body.append_child(&div);
        }
    }

    fn install_error_handlers(window: &web_sys::Window) {
        std::panic::set_hook(Box::new(|info| {
            console_error_panic_hook::hook(info);
            let line = info.location().map(|l| l.line());
            show_error_overlay(&info.to_string(), line);
        }));

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::ErrorEvent| {
            let line = event.lineno();
            show_error_overlay(&event.message(), (line > 0).then_some(line));
        });
        let _ = window.add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{e}; preferences will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() -> Result<(), BootError> {
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Crewmate starting...");

        let window = web_sys::window().ok_or(BootError::NoWindow)?;
        install_error_handlers(&window);
        let document = window.document().ok_or(BootError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(BootError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| BootError::WrongElementType("canvas"))?;

        let store = open_store();
        let prefs = Preferences::load(store.as_ref());
        log::info!("Loaded preferences for '{}'", prefs.player_name);
        let audio = AudioManager::new(prefs.volume);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let scenes = SceneManager::new(Session::new(prefs, seed));
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            scenes,
            atlas: SpriteAtlas::new(),
            render_state: None,
            audio,
            store,
            text: TextLayer::attach(&document)?,
            name_input: NameInput::default(),
            document: document.clone(),
            canvas: canvas.clone(),
            viewport: Viewport::default(),
            input: FrameInput::default(),
            accumulator: 0.0,
            last_time: 0.0,
        }));
        game.borrow_mut().fit();

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| BootError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| BootError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height) = (canvas.width(), canvas.height());
        let render_state = RenderState::new(surface, &adapter, width, height).await?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_window_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Crewmate running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Pointer down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let p = g.logical_pointer(event.client_x(), event.client_y());
                g.input.pointer = Some(p);
                g.input.pointer_pressed = true;
                g.input.pointer_held = true;
                g.input.touch = event.pointer_type() == "touch";
                // Browsers only allow audio after a user gesture
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let p = g.logical_pointer(event.client_x(), event.client_y());
                g.input.pointer = Some(p);
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up anywhere ends the press
        for name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let p = g.logical_pointer(event.client_x(), event.client_y());
                g.input.pointer = Some(p);
                g.input.pointer_released = true;
                g.input.pointer_held = false;
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if g.name_input.is_focused(&g.document) && code != "Escape" {
                    return;
                }
                let handled = match code.as_str() {
                    "ArrowUp" | "KeyW" => {
                        g.input.up = true;
                        true
                    }
                    "ArrowDown" | "KeyS" => {
                        g.input.down = true;
                        true
                    }
                    "ArrowLeft" | "KeyA" => {
                        g.input.left = true;
                        true
                    }
                    "ArrowRight" | "KeyD" => {
                        g.input.right = true;
                        true
                    }
                    "Space" => {
                        if !event.repeat() {
                            g.input.space = true;
                        }
                        true
                    }
                    "KeyK" => {
                        if !event.repeat() {
                            g.input.kill_key = true;
                        }
                        true
                    }
                    "Escape" => {
                        g.input.escape = true;
                        true
                    }
                    "F11" => {
                        toggle_fullscreen(&g.document);
                        true
                    }
                    _ => false,
                };
                if handled {
                    event.prevent_default();
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowUp" | "KeyW" => g.input.up = false,
                    "ArrowDown" | "KeyS" => g.input.down = false,
                    "ArrowLeft" | "KeyA" => g.input.left = false,
                    "ArrowRight" | "KeyD" => g.input.right = false,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn toggle_fullscreen(document: &Document) {
        if document.fullscreen_element().is_some() {
            document.exit_fullscreen();
        } else if let Some(root) = document.document_element() {
            if let Err(e) = root.request_fullscreen() {
                log::warn!("Fullscreen request failed: {:?}", e);
            }
        }
    }

    fn setup_window_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Resize re-fits the canvas and text layer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit();
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    g.audio.suspend();
                    g.input.release_all();
                    log::info!("Page hidden; audio suspended");
                } else {
                    g.audio.resume();
                    g.last_time = 0.0;
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {e}");
        wasm_game::show_error_overlay(&e.to_string(), None);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Crewmate (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the scenes through a short scripted session without a window
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use crewmate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SIM_DT};
    use crewmate::platform::MemoryStore;
    use crewmate::prefs::Preferences;
    use crewmate::renderer::{SpriteAtlas, tessellate};
    use crewmate::sim::scene::local_lobby::build_roster;
    use crewmate::sim::{FrameInput, GameEvent, Scene, SceneId, SceneManager, Session};

    let store = MemoryStore::new();
    let prefs = Preferences::load(&store);
    let mut scenes = SceneManager::new(Session::new(prefs, 42));
    let mut atlas = SpriteAtlas::new();
    let pump = |scenes: &mut SceneManager, atlas: &mut SpriteAtlas| {
        for event in scenes.drain_events() {
            match event {
                GameEvent::LoadTexture(key) => atlas.load(key),
                GameEvent::PlaySound(effect) => log::info!("Sound: {effect:?}"),
                other => log::debug!("Event: {other:?}"),
            }
        }
    };

    let idle = FrameInput::default();
    for _ in 0..600 {
        if scenes.current() != SceneId::Preload {
            break;
        }
        scenes.tick(&idle, SIM_DT);
        pump(&mut scenes, &mut atlas);
    }
    log::info!("Preload finished with {} textures built", atlas.len());

    let name = scenes.session.prefs.player_name.clone();
    scenes.session.players = build_roster(&name);
    scenes.session.local_player = scenes.session.players.first().map(|p| p.id);
    scenes.goto(SceneId::Map);
    pump(&mut scenes, &mut atlas);

    let walking = FrameInput {
        right: true,
        down: true,
        ..Default::default()
    };
    let mut vertex_total = 0;
    for frame in 0..300 {
        let input = if frame == 150 {
            FrameInput {
                space: true,
                ..Default::default()
            }
        } else {
            walking.clone()
        };
        scenes.tick(&input, SIM_DT);
        pump(&mut scenes, &mut atlas);
        vertex_total += tessellate(&scenes.draw(), &atlas).len();
    }

    if let Scene::Map(map) = scenes.scene() {
        for c in map.characters.all() {
            log::info!(
                "{:>8} at ({:>6.1}, {:>6.1}) {:?}",
                c.name,
                c.position.x,
                c.position.y,
                c.state
            );
        }
    }
    println!(
        "Headless demo complete: {} frames, {:.0} vertices/frame average, screen {}x{}",
        300,
        vertex_total as f32 / 300.0,
        SCREEN_WIDTH,
        SCREEN_HEIGHT
    );
}
