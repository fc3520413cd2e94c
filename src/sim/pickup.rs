//! Pickups dropped by destroyed enemies

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Armor,
    FireRate,
    Shield,
}

/// Cumulative drop weights, rolled against a uniform [0, 1)
const KIND_TABLE: [(f32, PickupKind); 4] = [
    (0.4, PickupKind::Health),
    (0.7, PickupKind::Armor),
    (0.9, PickupKind::FireRate),
    (1.0, PickupKind::Shield),
];

impl PickupKind {
    /// Map a uniform roll in [0, 1) onto the weighted table
    pub fn from_roll(roll: f32) -> Self {
        KIND_TABLE
            .iter()
            .find(|(upper, _)| roll < *upper)
            .map(|&(_, kind)| kind)
            .unwrap_or(PickupKind::Shield)
    }
}

pub const PICKUP_SIZE: f32 = 10.0;
pub const MAGNET_RADIUS: f32 = 150.0;
/// Pull speed inside the magnet radius (px/s)
pub const MAGNET_SPEED: f32 = 300.0;
/// Fraction of max health restored by a health pickup
pub const HEALTH_RESTORE_FRACTION: f32 = 0.25;
/// Armor added by an armor pickup
pub const ARMOR_BONUS: f32 = 5.0;
/// Fire-rate boost duration (ms)
pub const FIRE_RATE_BOOST_MS: f64 = 10_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: f32,
    pub magnet_radius: f32,
    /// Random phase for the renderer's bobbing animation
    pub bob_phase: f32,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2, bob_phase: f32) -> Self {
        Self {
            kind,
            pos,
            size: PICKUP_SIZE,
            magnet_radius: MAGNET_RADIUS,
            bob_phase,
        }
    }

    /// Random kind from the drop table
    pub fn random(pos: Vec2, rng: &mut impl Rng) -> Self {
        let kind = PickupKind::from_roll(rng.random());
        Self::new(kind, pos, rng.random_range(0.0..std::f32::consts::TAU))
    }

    /// Drift toward the player when in magnet range.
    /// Returns true once close enough to be collected.
    pub fn update(&mut self, dt: f32, player_pos: Vec2, player_size: f32) -> bool {
        let to_player = player_pos - self.pos;
        let dist = to_player.length();
        if dist < self.magnet_radius && dist > 0.0 {
            let step = (MAGNET_SPEED * dt).min(dist);
            self.pos += to_player / dist * step;
        }
        dist < player_size + self.size
    }
}
