//! Particle engine
//!
//! Owns a bounded particle pool, one drawing surface and one frame
//! scheduler. Each frame callback runs update then draw, then asks the
//! scheduler for the next frame.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::celebration::{self, Anchor};
use super::cues::{CueSheet, Effect};
use super::particle::{Color, Particle, ParticleKind};
use crate::consts::*;
use crate::direction;
use crate::platform::{FrameId, FrameScheduler, ManualScheduler};
use crate::renderer::Surface;

/// Particle simulation bound to one surface for its whole lifetime
pub struct ParticleEngine<S, P, R = Pcg32> {
    surface: S,
    scheduler: P,
    rng: R,
    /// Insertion order: oldest at the front
    particles: VecDeque<Particle>,
    cues: CueSheet,
    running: bool,
    /// Outstanding frame request, if any
    pending: Option<FrameId>,
    /// Timestamp of the previous frame callback; `None` until the first one
    last_time: Option<f64>,
    frames: u64,
}

impl<S: Surface, P: FrameScheduler> ParticleEngine<S, P, Pcg32> {
    /// Engine with an entropy-seeded generator
    pub fn new(surface: S, scheduler: P) -> Self {
        Self::with_rng(surface, scheduler, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Engine with a reproducible generator
    pub fn with_seed(surface: S, scheduler: P, seed: u64) -> Self {
        Self::with_rng(surface, scheduler, Pcg32::seed_from_u64(seed))
    }
}

impl<S: Surface, P: FrameScheduler, R: Rng> ParticleEngine<S, P, R> {
    /// Bind to `surface`, sizing it to the current viewport
    pub fn with_rng(mut surface: S, scheduler: P, rng: R) -> Self {
        surface.sync_to_viewport();
        let (w, h) = surface.size();
        log::debug!("Particle engine bound to {}x{} surface", w, h);

        Self {
            surface,
            scheduler,
            rng,
            particles: VecDeque::with_capacity(MAX_PARTICLES),
            cues: CueSheet::new(),
            running: false,
            pending: None,
            last_time: None,
            frames: 0,
        }
    }

    // === Spawning ===

    /// Radial burst: `count` particles evenly spaced around a full circle
    pub fn create_firework(&mut self, x: f32, y: f32, count: usize) {
        let origin = Vec2::new(x, y);
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed: f32 = self.rng.random_range(2.0..5.0);
            let size = self.rng.random_range(2.0..5.0);
            let color = self.pick(&FIREWORK_COLORS);
            self.push(Particle::new(
                ParticleKind::Firework,
                origin,
                direction(angle) * speed,
                size,
                color,
            ));
        }
    }

    /// Upward spray of tumbling squares
    pub fn create_confetti(&mut self, x: f32, y: f32, count: usize) {
        let origin = Vec2::new(x, y);
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random_range(-4.0..4.0),
                self.rng.random_range(-15.0..-5.0),
            );
            let size = self.rng.random_range(4.0..10.0);
            let color = self.pick(&CONFETTI_COLORS);
            self.push(Particle::new(ParticleKind::Confetti, origin, vel, size, color));
        }
    }

    /// Small burst in random directions
    pub fn create_spark(&mut self, x: f32, y: f32, count: usize) {
        let origin = Vec2::new(x, y);
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..TAU);
            let speed: f32 = self.rng.random_range(1.0..3.0);
            let size = self.rng.random_range(2.0..4.0);
            self.push(Particle::new(
                ParticleKind::Spark,
                origin,
                direction(angle) * speed,
                size,
                SPARK_COLOR,
            ));
        }
    }

    /// Run a spawn operation by effect, `None` count meaning the default
    pub fn spawn(&mut self, effect: Effect, pos: Vec2, count: Option<usize>) {
        let count = count.unwrap_or(effect.default_count());
        match effect {
            Effect::Firework => self.create_firework(pos.x, pos.y, count),
            Effect::Confetti => self.create_confetti(pos.x, pos.y, count),
            Effect::Spark => self.create_spark(pos.x, pos.y, count),
        }
    }

    /// Admit one particle, evicting the oldest when full
    pub fn push(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.pop_front();
        }
        self.particles.push_back(particle);
    }

    fn pick(&mut self, palette: &[Color]) -> Color {
        palette[self.rng.random_range(0..palette.len())]
    }

    // === Choreography ===

    /// Ladder reaction for reaching `step` (see `celebration::ladder_step`).
    /// `count` maps each burst's default size to the size to spawn.
    pub fn celebrate_ladder_step(
        &mut self,
        step: u32,
        anchor: Anchor,
        count: impl Fn(usize) -> usize,
    ) {
        let viewport = self.surface.size();
        celebration::ladder_step(&mut self.cues, step, anchor, viewport, count, &mut self.rng);
    }

    /// Staggered fireworks around the viewport centre
    pub fn celebrate_midnight(&mut self, count: impl Fn(usize) -> usize) {
        let viewport = self.surface.size();
        celebration::midnight(&mut self.cues, viewport, count, &mut self.rng);
    }

    // === Simulation ===

    /// Advance every particle by `delta_ms` and drop the dead ones
    pub fn update(&mut self, delta_ms: f32) {
        let dt = delta_ms / NOMINAL_FRAME_MS;
        for particle in self.particles.iter_mut() {
            particle.integrate(dt);
        }
        self.particles.retain(Particle::is_alive);
    }

    /// Repaint the surface, oldest particle first
    pub fn draw(&mut self) {
        self.surface.clear();
        for p in self.particles.iter().filter(|p| p.is_alive()) {
            match p.kind {
                ParticleKind::Confetti => {
                    self.surface
                        .fill_square(p.pos, p.size, p.spin(), p.color, p.alpha())
                }
                ParticleKind::Firework | ParticleKind::Spark => {
                    self.surface.fill_circle(p.pos, p.size, p.color, p.alpha())
                }
            }
        }
    }

    // === Lifecycle ===

    /// Begin the frame loop
    pub fn start(&mut self) {
        if self.running {
            log::warn!("Particle engine already running");
            return;
        }
        self.last_time = None;
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Host refused a frame request; engine not started");
            return;
        }
        self.running = true;
        log::debug!("Particle engine started");
    }

    /// Halt the frame loop; particles stay on screen as they are
    pub fn stop(&mut self) {
        self.running = false;
        self.last_time = None;
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        log::debug!("Particle engine stopped ({} particles frozen)", self.particles.len());
    }

    /// Empty the pool, drop queued cues and blank the surface
    pub fn clear(&mut self) {
        self.particles.clear();
        self.cues.clear();
        self.surface.clear();
        log::debug!("Particle engine cleared");
    }

    /// Frame callback body. The first frame after `start` only records the
    /// timestamp; physics resumes from the second.
    pub fn on_frame(&mut self, now_ms: f64) {
        if !self.running || self.pending.take().is_none() {
            return;
        }

        match self.last_time.replace(now_ms) {
            None => {
                for cue in self.cues.advance(0.0) {
                    self.spawn(cue.effect, cue.pos, Some(cue.count));
                }
            }
            Some(last) => {
                let delta = (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS);
                for cue in self.cues.advance(delta) {
                    self.spawn(cue.effect, cue.pos, Some(cue.count));
                }
                self.update(delta as f32);
            }
        }

        self.draw();
        self.frames += 1;
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Host refused a frame request; engine stopped");
            self.running = false;
            self.last_time = None;
        }
    }

    /// Resize the surface to the hosting viewport
    pub fn handle_resize(&mut self) {
        self.surface.sync_to_viewport();
        let (w, h) = self.surface.size();
        log::debug!("Surface resized to {}x{}", w, h);
    }

    // === Accessors ===

    /// Live particles, oldest first
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames that ran update + draw
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn pending_cues(&self) -> usize {
        self.cues.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &P {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut P {
        &mut self.scheduler
    }
}

impl<S: Surface, R: Rng> ParticleEngine<S, ManualScheduler, R> {
    /// Fire the outstanding frame request at `now_ms`, if there is one
    pub fn step_frame(&mut self, now_ms: f64) -> bool {
        if self.scheduler.fire().is_none() {
            return false;
        }
        self.on_frame(now_ms);
        true
    }
}
