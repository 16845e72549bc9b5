//! Choreographed bursts for page moments
//!
//! Each helper only queues cues; the engine's frame loop spawns them.

use glam::Vec2;
use rand::Rng;

use super::cues::{Cue, CueSheet, Effect};
use crate::consts::{LADDER_STEPS, MILESTONE_INTERVAL};

/// Screen rectangle of the element that triggered a celebration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub center: Vec2,
    /// Top edge (y) of the element
    pub top: f32,
}

impl Anchor {
    pub fn from_rect(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(left + width / 2.0, top + height / 2.0),
            top,
        }
    }
}

/// Delay before milestone confetti follows the step spark
const MILESTONE_DELAY_MS: f64 = 200.0;
/// Delay before the finale fireworks start
const FINALE_DELAY_MS: f64 = 500.0;
const FINALE_SPACING_MS: f64 = 150.0;
const FINALE_BURSTS: usize = 3;
/// Horizontal scatter of finale fireworks around the viewport centre
const FINALE_SPREAD: f32 = 300.0;

const MIDNIGHT_BURSTS: usize = 5;
const MIDNIGHT_SPACING_MS: f64 = 120.0;
const MIDNIGHT_SPREAD: Vec2 = Vec2::new(400.0, 300.0);

/// Queue `effect` at `pos` sized by `count`; a burst scaled to nothing is dropped
fn queue(
    sheet: &mut CueSheet,
    delay_ms: f64,
    effect: Effect,
    pos: Vec2,
    count: &impl Fn(usize) -> usize,
) {
    let n = count(effect.default_count());
    if n > 0 {
        sheet.schedule(delay_ms, Cue::new(effect, pos, n));
    }
}

/// Reaction to reaching ladder `step`: a spark on the climber, confetti on
/// milestones, and fireworks across the upper third when the top is reached.
///
/// `count` maps each burst's default particle count to the one to spawn
/// (`|n| n` for full size, `|n| settings.effect_count(n)` to follow presets).
pub fn ladder_step(
    sheet: &mut CueSheet,
    step: u32,
    anchor: Anchor,
    viewport: (u32, u32),
    count: impl Fn(usize) -> usize,
    rng: &mut impl Rng,
) {
    queue(sheet, 0.0, Effect::Spark, anchor.center, &count);

    if step > 0 && step % MILESTONE_INTERVAL == 0 {
        let top = Vec2::new(anchor.center.x, anchor.top);
        queue(sheet, MILESTONE_DELAY_MS, Effect::Confetti, top, &count);
    }

    if step == LADDER_STEPS {
        let (w, h) = (viewport.0 as f32, viewport.1 as f32);
        for i in 0..FINALE_BURSTS {
            let x = w / 2.0 + (rng.random::<f32>() - 0.5) * FINALE_SPREAD;
            let delay = FINALE_DELAY_MS + i as f64 * FINALE_SPACING_MS;
            queue(sheet, delay, Effect::Firework, Vec2::new(x, h / 3.0), &count);
        }
    }
}

/// Midnight burst: staggered fireworks scattered around the viewport centre
pub fn midnight(
    sheet: &mut CueSheet,
    viewport: (u32, u32),
    count: impl Fn(usize) -> usize,
    rng: &mut impl Rng,
) {
    let centre = Vec2::new(viewport.0 as f32 / 2.0, viewport.1 as f32 / 2.0);
    for i in 0..MIDNIGHT_BURSTS {
        let jitter = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
        let pos = centre + jitter * MIDNIGHT_SPREAD;
        queue(sheet, i as f64 * MIDNIGHT_SPACING_MS, Effect::Firework, pos, &count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CONFETTI_COUNT, SPARK_COUNT};
    use crate::settings::{QualityPreset, Settings};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn full(n: usize) -> usize {
        n
    }

    fn anchor() -> Anchor {
        Anchor::from_rect(100.0, 400.0, 40.0, 60.0)
    }

    #[test]
    fn test_anchor_from_rect() {
        let a = anchor();
        assert_eq!(a.center, Vec2::new(120.0, 430.0));
        assert_eq!(a.top, 400.0);
    }

    #[test]
    fn test_plain_step_is_one_spark() {
        let mut sheet = CueSheet::new();
        let mut rng = Pcg32::seed_from_u64(1);
        ladder_step(&mut sheet, 3, anchor(), (800, 600), full, &mut rng);

        let cues = sheet.advance(10_000.0);
        let spark = Cue::new(Effect::Spark, Vec2::new(120.0, 430.0), SPARK_COUNT);
        assert_eq!(cues, vec![spark]);
    }

    #[test]
    fn test_milestone_adds_confetti_at_top() {
        let mut sheet = CueSheet::new();
        let mut rng = Pcg32::seed_from_u64(1);
        ladder_step(&mut sheet, 10, anchor(), (800, 600), full, &mut rng);

        assert_eq!(sheet.advance(0.0).len(), 1);
        assert!(sheet.advance(199.0).is_empty());
        let confetti = sheet.advance(1.0);
        let expected = Cue::new(Effect::Confetti, Vec2::new(120.0, 400.0), CONFETTI_COUNT);
        assert_eq!(confetti, vec![expected]);
    }

    #[test]
    fn test_final_step_fireworks() {
        let mut sheet = CueSheet::new();
        let mut rng = Pcg32::seed_from_u64(7);
        ladder_step(&mut sheet, LADDER_STEPS, anchor(), (800, 600), full, &mut rng);

        // spark + milestone confetti + finale
        assert_eq!(sheet.len(), 2 + FINALE_BURSTS);
        let all = sheet.advance(10_000.0);
        let fireworks: Vec<_> = all.iter().filter(|c| c.effect == Effect::Firework).collect();
        assert_eq!(fireworks.len(), FINALE_BURSTS);
        for cue in fireworks {
            assert!((cue.pos.y - 200.0).abs() < 1e-4);
            assert!(cue.pos.x >= 250.0 && cue.pos.x <= 550.0);
        }
    }

    #[test]
    fn test_midnight_is_staggered() {
        let mut sheet = CueSheet::new();
        let mut rng = Pcg32::seed_from_u64(3);
        midnight(&mut sheet, (1000, 800), full, &mut rng);

        assert_eq!(sheet.advance(0.0).len(), 1);
        assert_eq!(sheet.advance(120.0).len(), 1);
        let rest = sheet.advance(1000.0);
        assert_eq!(rest.len(), MIDNIGHT_BURSTS - 2);
        for cue in rest {
            assert!((cue.pos.x - 500.0).abs() <= 200.0);
            assert!((cue.pos.y - 400.0).abs() <= 150.0);
        }
    }

    #[test]
    fn test_low_preset_scales_finale() {
        let low = Settings::from_preset(QualityPreset::Low);
        let mut sheet = CueSheet::new();
        let mut rng = Pcg32::seed_from_u64(7);
        ladder_step(
            &mut sheet,
            LADDER_STEPS,
            anchor(),
            (800, 600),
            |n| low.effect_count(n),
            &mut rng,
        );

        let all = sheet.advance(10_000.0);
        assert_eq!(all.len(), 2 + FINALE_BURSTS);
        for cue in &all {
            let expected = match cue.effect {
                Effect::Spark => 3,
                Effect::Confetti => 8,
                Effect::Firework => 20,
            };
            assert_eq!(cue.count, expected, "{:?}", cue.effect);
        }
    }

    #[test]
    fn test_disabled_particles_queue_nothing() {
        let off = Settings {
            particles: false,
            ..Settings::default()
        };
        let mut sheet = CueSheet::new();
        let mut rng = Pcg32::seed_from_u64(3);
        let scale = |n: usize| off.effect_count(n);
        ladder_step(&mut sheet, LADDER_STEPS, anchor(), (800, 600), scale, &mut rng);
        midnight(&mut sheet, (1000, 800), scale, &mut rng);
        assert!(sheet.is_empty());
    }
}
