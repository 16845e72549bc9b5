//! Delayed spawn cues
//!
//! Choreographed effects ("confetti 200 ms after the spark") are queued here
//! and released by the frame loop, so they pause with the engine and vanish
//! on `clear`.

use glam::Vec2;

use crate::consts::{CONFETTI_COUNT, FIREWORK_COUNT, SPARK_COUNT};

/// Which spawn operation a cue triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Firework,
    Confetti,
    Spark,
}

impl Effect {
    /// Particles spawned when no count is given
    pub fn default_count(self) -> usize {
        match self {
            Effect::Firework => FIREWORK_COUNT,
            Effect::Confetti => CONFETTI_COUNT,
            Effect::Spark => SPARK_COUNT,
        }
    }
}

/// One deferred spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    pub effect: Effect,
    pub pos: Vec2,
    pub count: usize,
}

impl Cue {
    pub fn new(effect: Effect, pos: Vec2, count: usize) -> Self {
        Self { effect, pos, count }
    }
}

#[derive(Debug, Clone)]
struct Pending {
    due_ms: f64,
    cue: Cue,
}

/// Cues ordered by due time, ties broken by scheduling order
#[derive(Debug, Clone, Default)]
pub struct CueSheet {
    clock_ms: f64,
    pending: Vec<Pending>,
}

impl CueSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `cue` to fire once `delay_ms` of frame time has elapsed
    pub fn schedule(&mut self, delay_ms: f64, cue: Cue) {
        let due_ms = self.clock_ms + delay_ms.max(0.0);
        let at = self
            .pending
            .iter()
            .position(|p| p.due_ms > due_ms)
            .unwrap_or(self.pending.len());
        self.pending.insert(at, Pending { due_ms, cue });
    }

    /// Advance the cue clock and drain every cue that is now due
    pub fn advance(&mut self, elapsed_ms: f64) -> Vec<Cue> {
        self.clock_ms += elapsed_ms.max(0.0);
        let due = self
            .pending
            .iter()
            .take_while(|p| p.due_ms <= self.clock_ms)
            .count();
        self.pending.drain(..due).map(|p| p.cue).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
