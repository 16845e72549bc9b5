//! Birthday Room - particle effects for an interactive birthday page
//!
//! Core modules:
//! - `fx`: Particle engine (spawn, integrate, draw, frame loop, cues)
//! - `renderer`: Drawing-surface abstraction (Canvas 2D on web, recording surface elsewhere)
//! - `platform`: Frame scheduling and viewport binding (requestAnimationFrame on web)
//! - `persistence`: Key-value stores and the visitor's progress record
//! - `settings`: Effect preferences

pub mod error;
pub mod fx;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;

pub use error::{FxError, StorageError};
pub use fx::{ParticleEngine, ParticleKind};
pub use persistence::Progress;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    use crate::fx::particle::Color;

    /// Maximum live particles; the oldest is evicted to admit a new one
    pub const MAX_PARTICLES: usize = 250;

    /// Milliseconds in one nominal frame (~60 fps)
    pub const NOMINAL_FRAME_MS: f32 = 16.0;
    /// Largest elapsed time a single frame may integrate (tab switches, breakpoints)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// Downward acceleration per nominal frame
    pub const GRAVITY: f32 = 0.3;
    /// Horizontal velocity multiplier per update
    pub const AIR_DAMPING: f32 = 0.99;
    /// Life lost per nominal frame for a particle with lifespan 1
    pub const LIFE_DECAY: f32 = 0.016;
    /// Confetti rotation (radians) per unit of horizontal velocity
    pub const CONFETTI_SPIN: f32 = 0.1;

    /// Default spawn counts
    pub const FIREWORK_COUNT: usize = 80;
    pub const CONFETTI_COUNT: usize = 30;
    pub const SPARK_COUNT: usize = 10;

    /// Firework palette (champagne, gold, bronze, lavender)
    pub const FIREWORK_COLORS: [Color; 4] = [
        Color::rgb(0xF4E4C1),
        Color::rgb(0xE8B86D),
        Color::rgb(0xD4A574),
        Color::rgb(0x9B7EBD),
    ];
    /// Confetti palette (firework palette plus night blue)
    pub const CONFETTI_COLORS: [Color; 5] = [
        Color::rgb(0xF4E4C1),
        Color::rgb(0xE8B86D),
        Color::rgb(0xD4A574),
        Color::rgb(0x9B7EBD),
        Color::rgb(0x4A5B8C),
    ];
    pub const SPARK_COLOR: Color = Color::rgb(0xF4E4C1);

    /// Ladder game length
    pub const LADDER_STEPS: u32 = 20;
    /// Every n-th step gets a confetti burst
    pub const MILESTONE_INTERVAL: u32 = 5;
}

/// Unit vector for an angle (radians)
#[inline]
pub fn direction(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Angle of a vector in [-π, π]
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}
