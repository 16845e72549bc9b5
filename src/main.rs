//! Birthday Room entry point
//!
//! Web: exports the `Stage` the page mounts for overlay effects and
//! spawn/celebration calls. Native: runs a headless ladder run against a
//! recording surface.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    use birthday_room::consts::*;
    use birthday_room::fx::celebration::Anchor;
    use birthday_room::persistence::{KeyValueStore, LocalStore, MemoryStore, ProgressPatch};
    use birthday_room::platform::{AnimationFrameScheduler, EventBinding, now_ms};
    use birthday_room::renderer::CanvasSurface;
    use birthday_room::{FxError, ParticleEngine, Progress, Settings};

    type Engine = ParticleEngine<CanvasSurface, AnimationFrameScheduler>;

    /// Overlay canvas element id
    const CANVAS_ID: &str = "fx-canvas";
    /// Element whose rect anchors ladder celebrations
    const CLIMBER_ID: &str = "ladder-climber";

    /// Store used when LocalStorage is blocked; progress then lasts one visit
    enum PageStore {
        Local(LocalStore),
        Memory(MemoryStore),
    }

    impl PageStore {
        fn open() -> Self {
            match LocalStore::open() {
                Some(store) => PageStore::Local(store),
                None => {
                    log::warn!("LocalStorage unavailable - progress will not persist");
                    PageStore::Memory(MemoryStore::new())
                }
            }
        }
    }

    impl KeyValueStore for PageStore {
        fn get(&self, key: &str) -> Result<Option<String>, birthday_room::StorageError> {
            match self {
                PageStore::Local(s) => s.get(key),
                PageStore::Memory(s) => s.get(key),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), birthday_room::StorageError> {
            match self {
                PageStore::Local(s) => s.set(key, value),
                PageStore::Memory(s) => s.set(key, value),
            }
        }

        fn remove(&mut self, key: &str) -> Result<(), birthday_room::StorageError> {
            match self {
                PageStore::Local(s) => s.remove(key),
                PageStore::Memory(s) => s.remove(key),
            }
        }
    }

    /// State the page calls act on
    struct Page {
        engine: Rc<RefCell<Engine>>,
        store: PageStore,
        settings: Settings,
    }

    impl Page {
        fn count(&self, requested: Option<u32>, default: usize) -> usize {
            self.settings
                .effect_count(requested.map_or(default, |c| c as usize))
        }

        /// Climb one rung; returns the step reached
        fn climb(&mut self, anchor: Anchor) -> u32 {
            let progress = Progress::load(&self.store);
            if progress.is_complete() {
                return progress.current_step;
            }
            let step = progress.current_step + 1;
            if let Err(e) = Progress::mark_step_complete(&mut self.store, step) {
                log::error!("Failed to save step {}: {}", step, e);
            }
            if step == LADDER_STEPS {
                if let Err(e) = Progress::mark_game_complete(&mut self.store, now_ms()) {
                    log::error!("Failed to save completion: {}", e);
                }
            }
            let settings = &self.settings;
            self.engine
                .borrow_mut()
                .celebrate_ladder_step(step, anchor, |n| settings.effect_count(n));
            step
        }

        fn save(&mut self, patch: ProgressPatch) {
            if let Err(e) = Progress::save(&mut self.store, patch) {
                log::error!("Failed to save progress: {}", e);
            }
        }
    }

    fn climber_anchor() -> Option<Anchor> {
        let document = web_sys::window()?.document()?;
        let rect = document.get_element_by_id(CLIMBER_ID)?.get_bounding_client_rect();
        Some(Anchor::from_rect(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }

    /// Effects overlay handed to the page by `Stage.mount()`. Calling
    /// `free()` stops the loop, clears the canvas and removes the listeners.
    #[wasm_bindgen]
    pub struct Stage {
        page: Rc<RefCell<Page>>,
        _resize: EventBinding,
        _keys: EventBinding,
    }

    #[wasm_bindgen]
    impl Stage {
        /// Bind to the overlay canvas and start the frame loop
        pub fn mount() -> Result<Stage, JsValue> {
            let stage = Self::try_mount().map_err(|e| {
                log::error!("Particle effects disabled: {}", e);
                JsValue::from_str(&e.to_string())
            })?;
            Ok(stage)
        }

        pub fn firework(&self, x: f32, y: f32, count: Option<u32>) {
            let page = self.page.borrow();
            let n = page.count(count, FIREWORK_COUNT);
            page.engine.borrow_mut().create_firework(x, y, n);
        }

        pub fn confetti(&self, x: f32, y: f32, count: Option<u32>) {
            let page = self.page.borrow();
            let n = page.count(count, CONFETTI_COUNT);
            page.engine.borrow_mut().create_confetti(x, y, n);
        }

        pub fn spark(&self, x: f32, y: f32, count: Option<u32>) {
            let page = self.page.borrow();
            let n = page.count(count, SPARK_COUNT);
            page.engine.borrow_mut().create_spark(x, y, n);
        }

        /// Skip button: wipe the overlay
        pub fn clear_effects(&self) {
            self.page.borrow().engine.borrow_mut().clear();
        }

        /// Countdown reached zero
        pub fn midnight(&self) {
            let page = self.page.borrow();
            let settings = &page.settings;
            page.engine
                .borrow_mut()
                .celebrate_midnight(|n| settings.effect_count(n));
        }

        /// Climb one ladder step; returns the step reached (0 without a climber)
        pub fn climb_ladder(&self) -> u32 {
            let Some(anchor) = climber_anchor() else {
                log::warn!("No #{} element to anchor the climb", CLIMBER_ID);
                return 0;
            };
            self.page.borrow_mut().climb(anchor)
        }

        pub fn reset_ladder(&self) {
            if let Err(e) = Progress::reset(&mut self.page.borrow_mut().store) {
                log::error!("Failed to reset progress: {}", e);
            }
        }

        pub fn ladder_step(&self) -> u32 {
            Progress::load(&self.page.borrow().store).current_step
        }

        /// Returns true the first time a gift is opened
        pub fn open_gift(&self, id: &str) -> bool {
            Progress::open_gift(&mut self.page.borrow_mut().store, id).unwrap_or_else(|e| {
                log::error!("Failed to save gift {}: {}", id, e);
                false
            })
        }

        pub fn cut_cake(&self) {
            self.page.borrow_mut().save(ProgressPatch {
                cake_cut: Some(true),
                ..Default::default()
            });
        }

        pub fn blow_candles(&self) {
            self.page.borrow_mut().save(ProgressPatch {
                candles_blown: Some(true),
                ..Default::default()
            });
        }
    }

    impl Stage {
        fn try_mount() -> Result<Self, FxError> {
            let surface = CanvasSurface::from_element_id(CANVAS_ID)?;
            let seed = js_sys::Date::now() as u64;
            let engine = Rc::new(RefCell::new(Engine::with_seed(
                surface,
                AnimationFrameScheduler::new(),
                seed,
            )));

            // Frame callback holds a weak handle; the engine owns the callback
            {
                let weak = Rc::downgrade(&engine);
                let on_frame = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                    if let Some(engine) = weak.upgrade() {
                        engine.borrow_mut().on_frame(time);
                    }
                });
                engine.borrow_mut().scheduler_mut().set_callback(on_frame);
            }

            let weak = Rc::downgrade(&engine);
            let resize = EventBinding::window("resize", move |_event| {
                if let Some(engine) = weak.upgrade() {
                    engine.borrow_mut().handle_resize();
                }
            })
            .ok_or_else(|| FxError::SurfaceUnavailable("no window for resize events".to_string()))?;

            let store = PageStore::open();
            let settings = Settings::load(&store);
            let page = Rc::new(RefCell::new(Page {
                engine: Rc::clone(&engine),
                store,
                settings,
            }));

            let weak = Rc::downgrade(&page);
            let keys = EventBinding::window("keydown", move |event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                if !matches!(event.key().as_str(), "ArrowUp" | " ") {
                    return;
                }
                event.prevent_default();
                let (Some(page), Some(anchor)) = (weak.upgrade(), climber_anchor()) else {
                    return;
                };
                page.borrow_mut().climb(anchor);
            })
            .ok_or_else(|| FxError::SurfaceUnavailable("no window for key events".to_string()))?;

            engine.borrow_mut().start();
            log::info!("Effects stage mounted (seed {})", seed);

            Ok(Self {
                page,
                _resize: resize,
                _keys: keys,
            })
        }
    }

    impl Drop for Stage {
        fn drop(&mut self) {
            let page = self.page.borrow();
            let mut engine = page.engine.borrow_mut();
            engine.stop();
            engine.clear();
            log::info!("Effects stage unmounted");
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Birthday Room ready - call Stage.mount() to start effects");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_page::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Birthday Room (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web page");

    headless_ladder_run();
}

/// Climb the whole ladder against an in-memory surface and store
#[cfg(not(target_arch = "wasm32"))]
fn headless_ladder_run() {
    use birthday_room::consts::{LADDER_STEPS, NOMINAL_FRAME_MS};
    use birthday_room::fx::celebration::Anchor;
    use birthday_room::persistence::MemoryStore;
    use birthday_room::platform::{ManualScheduler, now_ms};
    use birthday_room::renderer::RecordingSurface;
    use birthday_room::{ParticleEngine, Progress};

    let mut store = MemoryStore::new();
    let mut engine = ParticleEngine::new(RecordingSurface::new(1280, 720), ManualScheduler::new());
    engine.start();

    let frame_ms = NOMINAL_FRAME_MS as f64;
    let mut now = 0.0;
    let mut peak = 0;

    for step in 1..=LADDER_STEPS {
        let anchor = Anchor::from_rect(620.0, 680.0 - step as f32 * 30.0, 40.0, 40.0);
        engine.celebrate_ladder_step(step, anchor, |n| n);
        if let Err(e) = Progress::mark_step_complete(&mut store, step) {
            log::error!("{}", e);
        }

        // Half a second of frames between rungs
        for _ in 0..30 {
            engine.step_frame(now);
            now += frame_ms;
            peak = peak.max(engine.len());
        }
    }
    if let Err(e) = Progress::mark_game_complete(&mut store, now_ms()) {
        log::error!("{}", e);
    }

    while !engine.is_empty() || engine.pending_cues() > 0 {
        engine.step_frame(now);
        now += frame_ms;
    }
    engine.stop();

    let progress = Progress::load(&store);
    println!("Ladder complete: {}", progress.is_complete());
    println!("Frames rendered: {}", engine.frames_rendered());
    println!("Peak particles: {}", peak);
    println!("Surface blank at end: {}", engine.surface().is_blank());
}
