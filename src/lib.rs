//! Sky Ace - A top-down arcade dogfighting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight, AI, projectiles, waves, collisions)
//! - `camera`: Deadzone-follow camera with screen shake
//! - `upgrades`: Hangar economy (upgrade ledger and derived player stats)
//! - `snapshot`: Read-only views handed to renderers and the HUD
//! - `platform`: Input sources that produce the per-tick control signal
//! - `session`: Frame driver wiring input, simulation and renderer together

pub mod camera;
pub mod error;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod upgrades;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::CommandError;
pub use session::Session;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Ticks per simulated second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Max simulation ticks per rendered frame (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Soft world bounds: the playfield is [-E, E] on both axes
    pub const WORLD_HALF_EXTENT: f32 = 3000.0;
    /// Fraction of the bounds-normal velocity kept after hitting the edge
    pub const WALL_RESTITUTION: f32 = 0.5;

    /// Player hull radius
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Heading change rate at zero thrust (radians per second)
    pub const BASE_TURN_RATE: f32 = 2.8;
    /// Extra turn rate at full thrust (radians per second)
    pub const THRUST_TURN_BONUS: f32 = 1.6;
    /// Forward acceleration at full thrust (px/s²)
    pub const THRUST_ACCEL: f32 = 420.0;
    /// Per-tick velocity multiplier
    pub const PLAYER_DRAG: f32 = 0.985;
    /// Powered aircraft can't hover
    pub const PLAYER_MIN_SPEED: f32 = 90.0;
    /// Health regen pauses this long after a hit (ms)
    pub const REGEN_DELAY_MS: f64 = 5000.0;
    /// Health regained per second once regen kicks in
    pub const REGEN_PER_SECOND: f32 = 30.0;
    /// Invulnerability window length (ms)
    pub const INVULNERABLE_MS: f64 = 2000.0;
    /// Special weapon charge ceiling
    pub const MAX_SPECIAL_CHARGE: f32 = 100.0;
    /// Charge gained per kill
    pub const SPECIAL_CHARGE_PER_KILL: f32 = 10.0;
    /// Shake applied when the player takes a hit
    pub const PLAYER_HIT_SHAKE: f32 = 10.0;

    /// Body contact damage dealt to the player per tick of overlap
    pub const CONTACT_DAMAGE_TO_PLAYER: f32 = 20.0;
    /// Body contact damage dealt to the enemy per tick of overlap
    pub const CONTACT_DAMAGE_TO_ENEMY: f32 = 50.0;
    /// Enemies only open fire inside this distance
    pub const ENEMY_ENGAGE_RANGE: f32 = 600.0;
    /// Chance an enemy drops a pickup on death
    pub const PICKUP_DROP_CHANCE: f32 = 0.2;

    /// Spawn ring radius around the player (always off-screen)
    pub const SPAWN_RING_RADIUS: f32 = 800.0;
    /// Ticks between enemy spawns (one per second)
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;
    /// Wave quota = base + wave * increment
    pub const WAVE_QUOTA_BASE: u32 = 5;
    pub const WAVE_QUOTA_PER_WAVE: u32 = 3;
}

/// Normalized angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    polar_to_cartesian(1.0, angle)
}

/// Bearing (radians) from `from` to `to`
#[inline]
pub fn bearing(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(-5.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert_eq!(normalize_angle(0.25), 0.25);
    }

    #[test]
    fn test_bearing() {
        let b = bearing(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((b - PI / 2.0).abs() < 1e-6);
    }
}
