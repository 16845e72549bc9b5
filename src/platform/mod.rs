//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame pacing (requestAnimationFrame on web, manual stepping elsewhere)
//! - Window event listeners (resize, keyboard)
//! - Wall-clock time

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod manual;

#[cfg(target_arch = "wasm32")]
pub use browser::{AnimationFrameScheduler, EventBinding};
pub use manual::ManualScheduler;

/// Handle for a requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u32);

/// Host frame pacing: one callback per request, cancellable until it fires
pub trait FrameScheduler {
    /// Ask for one frame callback; `None` if the host cannot schedule
    fn request_frame(&mut self) -> Option<FrameId>;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, id: FrameId);
}

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
