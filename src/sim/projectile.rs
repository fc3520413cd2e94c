//! Bullets, homing missiles and bombs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::state::EntityId;
use crate::{bearing, heading_vector, normalize_angle};

pub const BULLET_SPEED: f32 = 720.0;
pub const BULLET_SIZE: f32 = 4.0;
pub const BULLET_LIFETIME_MS: f64 = 2000.0;

pub const MISSILE_SPEED: f32 = 480.0;
/// Fraction of the bearing error corrected per tick
pub const MISSILE_TURN_FRACTION: f32 = 0.1;
pub const MISSILE_DAMAGE: f32 = 50.0;
pub const MISSILE_SIZE: f32 = 6.0;
pub const MISSILE_LIFETIME_MS: f64 = 5000.0;
/// Explosion size when a missile connects
pub const MISSILE_BLAST_SIZE: f32 = 30.0;

pub const BOMB_DRIFT: Vec2 = Vec2::new(0.0, 120.0);
pub const BOMB_DAMAGE: f32 = 30.0;
pub const BOMB_SIZE: f32 = 8.0;
pub const BOMB_BLAST_RADIUS: f32 = 100.0;
pub const BOMB_ARM_DELAY_MS: f64 = 500.0;
/// Bombs blow on their own this long after release
pub const BOMB_FUSE_MS: f64 = 4000.0;

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub owner: Owner,
    pub size: f32,
    /// Sim clock at creation (ms)
    pub created_at: f64,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, damage: f32, owner: Owner, now: f64) -> Self {
        Self {
            pos,
            vel: heading_vector(angle) * BULLET_SPEED,
            damage,
            owner,
            size: BULLET_SIZE,
            created_at: now,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.created_at > BULLET_LIFETIME_MS
    }
}

/// Homing missile with a weak reference to its target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomingMissile {
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    /// Target id, resolved against the live enemy list every tick
    pub target: Option<EntityId>,
    pub damage: f32,
    pub size: f32,
    pub created_at: f64,
}

impl HomingMissile {
    pub fn new(pos: Vec2, heading: f32, target: Option<EntityId>, now: f64) -> Self {
        Self {
            pos,
            heading,
            speed: MISSILE_SPEED,
            target,
            damage: MISSILE_DAMAGE,
            size: MISSILE_SIZE,
            created_at: now,
        }
    }

    pub fn vel(&self) -> Vec2 {
        heading_vector(self.heading) * self.speed
    }

    /// Where the target is, if it is still alive
    pub fn target_position(&self, enemies: &[Enemy]) -> Option<Vec2> {
        let id = self.target?;
        enemies
            .iter()
            .find(|e| e.id == id && !e.is_dead())
            .map(|e| e.pos)
    }

    /// Proportional heading correction toward `target`; ballistic when `None`
    pub fn steer(&mut self, target: Option<Vec2>) {
        if let Some(target) = target {
            let error = normalize_angle(bearing(self.pos, target) - self.heading);
            self.heading = normalize_angle(self.heading + error * MISSILE_TURN_FRACTION);
        }
    }

    pub fn update(&mut self, dt: f32, enemies: &[Enemy]) {
        let target = self.target_position(enemies);
        if target.is_none() {
            // Target gone: drop the reference and fly straight
            self.target = None;
        }
        self.steer(target);
        self.pos += self.vel() * dt;
    }

    pub fn is_expired(&self, now: f64) -> bool {
        now - self.created_at > MISSILE_LIFETIME_MS
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub size: f32,
    pub blast_radius: f32,
    pub armed: bool,
    pub created_at: f64,
}

impl Bomb {
    pub fn new(pos: Vec2, now: f64) -> Self {
        Self {
            pos,
            vel: BOMB_DRIFT,
            damage: BOMB_DAMAGE,
            size: BOMB_SIZE,
            blast_radius: BOMB_BLAST_RADIUS,
            armed: false,
            created_at: now,
        }
    }

    /// Drift, arm, and report whether the bomb goes off this tick
    pub fn update(&mut self, dt: f32, now: f64, player_pos: Vec2) -> bool {
        self.pos += self.vel * dt;
        let age = now - self.created_at;
        if age > BOMB_ARM_DELAY_MS {
            self.armed = true;
        }
        if !self.armed {
            return false;
        }
        self.pos.distance(player_pos) < self.blast_radius || age > BOMB_FUSE_MS
    }

    /// Damage dealt to something `dist` away from the blast centre
    pub fn falloff_damage(&self, dist: f32) -> f32 {
        if dist >= self.blast_radius {
            0.0
        } else {
            self.damage * (1.0 - dist / self.blast_radius)
        }
    }
}
