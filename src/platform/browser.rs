//! Browser frame pacing and viewport events

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameId, FrameScheduler};

/// `requestAnimationFrame` scheduler. The callback is installed once the
/// owning engine is behind an `Rc`.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    callback: Option<Closure<dyn FnMut(f64)>>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the closure invoked on every frame (receives the rAF timestamp)
    pub fn set_callback(&mut self, callback: Closure<dyn FnMut(f64)>) {
        self.callback = Some(callback);
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) -> Option<FrameId> {
        let callback = self.callback.as_ref()?;
        let window = web_sys::window()?;
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => Some(FrameId(id as u32)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(id.0 as i32);
        }
    }
}

/// Window event listener, removed when dropped
pub struct EventBinding {
    window: web_sys::Window,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventBinding {
    /// Listen for `event` on the window; `None` without a window
    pub fn window(
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Option<Self> {
        let window = web_sys::window()?;
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        if let Err(e) =
            window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to listen for {}: {:?}", event, e);
            return None;
        }
        Some(Self {
            window,
            event,
            closure,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        log::debug!("{} listener removed", self.event);
    }
}
