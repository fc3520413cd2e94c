//! Enemy aircraft
//!
//! Stats are a pure function of the archetype, which never changes after
//! construction.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ai::{SteeringInput, steer};
use super::projectile::{Bomb, Bullet, Owner};
use super::state::EntityId;
use crate::consts::ENEMY_ENGAGE_RANGE;
use crate::{bearing, heading_vector, normalize_angle};

/// Enemy behavioural/stat class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Rookie,
    Scout,
    Fighter,
    Veteran,
    Bomber,
    Elite,
    Ace,
}

/// Fixed per-archetype numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeStats {
    pub max_health: f32,
    /// Cruise speed (px/s)
    pub speed: f32,
    pub size: f32,
    pub fire_interval_ms: f64,
    pub damage: f32,
    pub credits: u32,
    /// 0..1, higher means tighter shots
    pub accuracy: f32,
}

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Archetype::Rookie,
        Archetype::Scout,
        Archetype::Fighter,
        Archetype::Veteran,
        Archetype::Bomber,
        Archetype::Elite,
        Archetype::Ace,
    ];

    pub fn stats(self) -> ArchetypeStats {
        let (max_health, speed, size, fire_interval_ms, damage, credits, accuracy) = match self {
            Archetype::Rookie => (20.0, 90.0, 14.0, 2000.0, 4.0, 5, 0.30),
            Archetype::Scout => (30.0, 120.0, 15.0, 1500.0, 5.0, 10, 0.50),
            Archetype::Fighter => (60.0, 150.0, 18.0, 800.0, 8.0, 25, 0.60),
            Archetype::Veteran => (100.0, 160.0, 20.0, 700.0, 10.0, 40, 0.75),
            Archetype::Bomber => (150.0, 60.0, 25.0, 2000.0, 15.0, 50, 0.50),
            Archetype::Elite => (200.0, 170.0, 21.0, 600.0, 11.0, 75, 0.85),
            Archetype::Ace => (300.0, 180.0, 22.0, 500.0, 12.0, 100, 0.95),
        };
        ArchetypeStats {
            max_health,
            speed,
            size,
            fire_interval_ms,
            damage,
            credits,
            accuracy,
        }
    }

    /// Bullets per trigger pull
    pub fn volley(self) -> usize {
        match self {
            Archetype::Elite | Archetype::Ace => 3,
            _ => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Rookie => "rookie",
            Archetype::Scout => "scout",
            Archetype::Fighter => "fighter",
            Archetype::Veteran => "veteran",
            Archetype::Bomber => "bomber",
            Archetype::Elite => "elite",
            Archetype::Ace => "ace",
        }
    }
}

/// Aim error scale; the spread width is AIM_ERROR / accuracy
pub const AIM_ERROR: f32 = 0.1;
/// Angle between bullets in a volley
const VOLLEY_SPREAD: f32 = 0.2;
/// Sideways gap between bullets in a volley (px)
const VOLLEY_OFFSET: f32 = 8.0;
/// Roll smoothing factor toward target
const ROLL_SMOOTHING: f32 = 0.1;
/// Heading delta per tick that maps to full bank
const ROLL_GAIN: f32 = 8.0;

/// What an enemy fired this tick
#[derive(Debug, Clone)]
pub enum Shot {
    Bullets(Vec<Bullet>),
    Bomb(Bomb),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub archetype: Archetype,
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f32,
    /// Cosmetic bank value in [-1, 1]
    pub roll: f32,
    pub health: f32,
    pub max_health: f32,
    /// Ticks since spawn
    pub ai_timer: u32,
    /// Sim clock of the last shot (ms)
    pub last_fired: f64,
}

impl Enemy {
    pub fn new(id: EntityId, archetype: Archetype, pos: Vec2) -> Self {
        let stats = archetype.stats();
        Self {
            id,
            archetype,
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            roll: 0.0,
            health: stats.max_health,
            max_health: stats.max_health,
            ai_timer: 0,
            last_fired: f64::NEG_INFINITY,
        }
    }

    #[inline]
    pub fn stats(&self) -> ArchetypeStats {
        self.archetype.stats()
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.stats().size
    }

    /// Marked for removal at the end of the tick
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Returns true if this hit was the killing blow
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health -= amount;
        self.is_dead()
    }

    /// Steer, move, bank and maybe shoot at the player
    pub fn update(
        &mut self,
        dt: f32,
        now: f64,
        player_pos: Vec2,
        rng: &mut impl Rng,
    ) -> Option<Shot> {
        let stats = self.stats();
        self.ai_timer += 1;

        self.vel = steer(&SteeringInput {
            archetype: self.archetype,
            pos: self.pos,
            vel: self.vel,
            speed: stats.speed,
            target: player_pos,
            timer: self.ai_timer,
            roll: rng.random(),
        });
        self.pos += self.vel * dt;

        let new_heading = bearing(self.pos, player_pos);
        let delta = normalize_angle(new_heading - self.heading);
        let roll_target = (delta * ROLL_GAIN).clamp(-1.0, 1.0);
        self.roll += (roll_target - self.roll) * ROLL_SMOOTHING;
        self.heading = new_heading;

        if self.pos.distance(player_pos) < ENEMY_ENGAGE_RANGE {
            self.fire(now, rng)
        } else {
            None
        }
    }

    /// Rate-limited trigger pull
    pub fn fire(&mut self, now: f64, rng: &mut impl Rng) -> Option<Shot> {
        let stats = self.stats();
        if now - self.last_fired < stats.fire_interval_ms {
            return None;
        }
        self.last_fired = now;

        if self.archetype == Archetype::Bomber {
            return Some(Shot::Bomb(Bomb::new(self.pos, now)));
        }

        let count = self.archetype.volley();
        let half_error = AIM_ERROR / stats.accuracy / 2.0;
        let side = heading_vector(self.heading + std::f32::consts::FRAC_PI_2);
        let bullets = (0..count)
            .map(|i| {
                let slot = if count > 1 { i as f32 - 1.0 } else { 0.0 };
                let error = rng.random_range(-half_error..=half_error);
                Bullet::new(
                    self.pos + side * slot * VOLLEY_OFFSET,
                    self.heading + slot * VOLLEY_SPREAD + error,
                    stats.damage,
                    Owner::Enemy,
                    now,
                )
            })
            .collect();
        Some(Shot::Bullets(bullets))
    }
}
