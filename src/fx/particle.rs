//! Particle record and color token

use glam::Vec2;

use crate::consts::{AIR_DAMPING, CONFETTI_SPIN, GRAVITY, LIFE_DECAY};

/// Opaque RGB color token (0xRRGGBB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }

    /// CSS hex notation, e.g. `#F4E4C1`
    pub fn to_css(self) -> String {
        format!("#{:06X}", self.0)
    }
}

/// Particle kind - selects draw shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Tumbling square, rotated by horizontal velocity
    Confetti,
    /// Filled circle from a radial burst
    Firework,
    /// Small filled circle
    Spark,
}

/// A single transient particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity in units per nominal frame
    pub vel: Vec2,
    /// Remaining life: 1 = just spawned, <= 0 = dead
    pub life: f32,
    /// Total lifespan (> 0), sets the decay rate
    pub lifespan: f32,
    pub color: Color,
    /// Circle radius, or square side for confetti
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Fresh particle with full life and unit lifespan
    pub fn new(kind: ParticleKind, pos: Vec2, vel: Vec2, size: f32, color: Color) -> Self {
        Self {
            pos,
            vel,
            life: 1.0,
            lifespan: 1.0,
            color,
            size,
            kind,
        }
    }

    /// Advance by `dt` nominal frames
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel.y += GRAVITY * dt;
        self.vel.x *= AIR_DAMPING;
        self.life -= (1.0 / self.lifespan) * LIFE_DECAY * dt;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Draw opacity (remaining life, clamped for the surface)
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    /// Confetti tilt in radians
    #[inline]
    pub fn spin(&self) -> f32 {
        self.vel.x * CONFETTI_SPIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_css() {
        assert_eq!(Color::rgb(0xF4E4C1).to_css(), "#F4E4C1");
        assert_eq!(Color::rgb(0x00000A).to_css(), "#00000A");
        // Alpha bits are not part of the token
        assert_eq!(Color::rgb(0xFF9B7EBD).to_css(), "#9B7EBD");
    }

    #[test]
    fn test_one_nominal_frame() {
        let mut p = Particle::new(
            ParticleKind::Spark,
            Vec2::new(10.0, 20.0),
            Vec2::new(2.0, 0.0),
            3.0,
            Color::rgb(0xFFFFFF),
        );
        p.integrate(1.0);

        assert!((p.pos.x - 12.0).abs() < 1e-6);
        assert!((p.pos.y - 20.0).abs() < 1e-6);
        assert!((p.vel.y - 0.3).abs() < 1e-6);
        assert!((p.vel.x - 1.98).abs() < 1e-6);
        assert!((p.life - 0.984).abs() < 1e-6);
    }

    #[test]
    fn test_short_lifespan_decays_faster() {
        let mut slow = Particle::new(
            ParticleKind::Firework,
            Vec2::ZERO,
            Vec2::ZERO,
            2.0,
            Color::rgb(0),
        );
        let mut fast = slow.clone();
        fast.lifespan = 0.5;

        slow.integrate(1.0);
        fast.integrate(1.0);
        assert!(fast.life < slow.life);
        assert!(((1.0 - fast.life) - 2.0 * (1.0 - slow.life)).abs() < 1e-6);
    }

    #[test]
    fn test_spin_follows_horizontal_velocity() {
        let p = Particle::new(
            ParticleKind::Confetti,
            Vec2::ZERO,
            Vec2::new(-3.0, -8.0),
            6.0,
            Color::rgb(0),
        );
        assert!((p.spin() + 0.3).abs() < 1e-6);
    }
}
