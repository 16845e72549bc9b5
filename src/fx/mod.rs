//! Particle effects module
//!
//! Everything that moves on the overlay lives here. The simulation is kept
//! free of browser types:
//! - Drawing goes through the `Surface` trait
//! - Frame pacing goes through the `FrameScheduler` trait
//! - Randomness comes from an injected `Rng`

pub mod celebration;
pub mod cues;
pub mod engine;
pub mod particle;

pub use celebration::{ladder_step, midnight};
pub use cues::{Cue, CueSheet, Effect};
pub use engine::ParticleEngine;
pub use particle::{Color, Particle, ParticleKind};
