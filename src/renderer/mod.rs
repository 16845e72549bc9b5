//! Drawing-surface abstraction
//!
//! The engine draws through `Surface`, so the same simulation renders to a
//! browser Canvas 2D context or to an in-memory recording for tests and the
//! native demo.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

use crate::fx::particle::Color;

/// A 2D surface the particle engine owns while it runs
pub trait Surface {
    /// Pixel dimensions (width, height)
    fn size(&self) -> (u32, u32);

    /// Resize the backing store to the hosting viewport
    fn sync_to_viewport(&mut self);

    /// Blank the whole surface
    fn clear(&mut self);

    /// Filled circle at `center` with the given opacity (0-1)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    /// Filled square of side `side` rotated by `rotation` radians about its center
    fn fill_square(&mut self, center: Vec2, side: f32, rotation: f32, color: Color, alpha: f32);
}
