//! Cosmetic particles
//!
//! Particles never affect gameplay, but gameplay events (explosions,
//! missile exhaust) decide when they spawn.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::polar_to_cartesian;

/// Palette slot, resolved to real colours by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Fire,
    Ember,
    Spark,
    Smoke,
}

/// Particles in one explosion
pub const EXPLOSION_PARTICLES: usize = 20;
/// Explosion particle lifetime (ticks)
const EXPLOSION_LIFETIME: u32 = 60;
/// Smoke puff lifetime (ticks)
const SMOKE_LIFETIME: u32 = 30;
/// Per-tick velocity damping
const PARTICLE_DRAG: f32 = 0.98;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    pub size: f32,
    /// Ticks lived
    pub age: u32,
    /// Ticks to live
    pub lifetime: u32,
}

impl Particle {
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel *= PARTICLE_DRAG;
        self.age += 1;
    }

    pub fn is_dead(&self) -> bool {
        self.age > self.lifetime
    }

    /// Remaining opacity, 1 at birth fading to 0
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age as f32 / self.lifetime.max(1) as f32).max(0.0)
    }
}

/// Radial burst of fire-coloured particles
pub fn explosion(pos: Vec2, rng: &mut impl Rng) -> Vec<Particle> {
    const PALETTE: [ParticleColor; 3] =
        [ParticleColor::Fire, ParticleColor::Ember, ParticleColor::Spark];

    (0..EXPLOSION_PARTICLES)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / EXPLOSION_PARTICLES as f32;
            let speed = rng.random_range(120.0..420.0);
            Particle {
                pos,
                vel: polar_to_cartesian(speed, angle),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
                size: rng.random_range(3.0..8.0),
                age: 0,
                lifetime: EXPLOSION_LIFETIME,
            }
        })
        .collect()
}

/// A single stationary smoke puff (missile exhaust)
pub fn smoke(pos: Vec2) -> Particle {
    Particle {
        pos,
        vel: Vec2::ZERO,
        color: ParticleColor::Smoke,
        size: 3.0,
        age: 0,
        lifetime: SMOKE_LIFETIME,
    }
}
