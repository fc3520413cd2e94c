//! Player aircraft: flight model, guns, special weapon and damage
//!
//! The plane is always under power. It can throttle down but never hover,
//! so speed is held inside [PLAYER_MIN_SPEED, max_speed] every tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::pickup::{ARMOR_BONUS, FIRE_RATE_BOOST_MS, HEALTH_RESTORE_FRACTION, PickupKind};
use super::projectile::{Bullet, HomingMissile, Owner};
use super::state::EntityId;
use crate::consts::*;
use crate::upgrades::{MIN_FIRE_INTERVAL_MS, PlayerStats};
use crate::{heading_vector, normalize_angle};

/// Sideways distance of each gun from the nose
const GUN_OFFSET: f32 = 15.0;
/// Each gun toes in this much toward the centre line
const GUN_CONVERGENCE: f32 = 0.03;
/// Uniform jitter applied per bullet (total width)
const GUN_JITTER: f32 = 0.1;
/// Angle between missiles in a salvo
const MISSILE_FAN_STEP: f32 = 0.3;
/// Fire interval reduction while the fire-rate buff is active (ms)
const FIRE_RATE_BOOST_REDUCTION: f64 = 20.0;
/// Per-tick roll smoothing toward the bank target
const ROLL_SMOOTHING: f32 = 0.15;

/// Temporary buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    FireRateBoost,
}

/// A buff with an expiry on the sim clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEffect {
    pub kind: EffectKind,
    pub expires_at: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Nose direction (radians)
    pub heading: f32,
    /// Cosmetic bank in [-1, 1]
    pub roll: f32,
    /// Signed turn rate applied this tick (rad/s), feeds the bank
    pub turn_rate: f32,
    /// Throttle in [0, 1]
    pub thrust: f32,
    pub size: f32,

    pub health: f32,
    pub max_health: f32,
    pub armor: f32,
    pub max_speed: f32,
    pub damage: f32,
    /// Gun interval before buffs (ms)
    pub fire_interval_ms: f64,
    pub missile_level: u32,

    pub last_fired: f64,
    pub special_charge: f32,
    pub last_hit: f64,
    pub invulnerable: bool,
    pub invulnerable_since: f64,
    pub effects: Vec<TimedEffect>,
}

impl Player {
    pub fn new(stats: &PlayerStats) -> Self {
        let mut player = Self {
            pos: Vec2::ZERO,
            vel: Vec2::new(PLAYER_MIN_SPEED, 0.0),
            heading: 0.0,
            roll: 0.0,
            turn_rate: 0.0,
            thrust: 0.5,
            size: PLAYER_SIZE,
            health: 0.0,
            max_health: 0.0,
            armor: 0.0,
            max_speed: 0.0,
            damage: 0.0,
            fire_interval_ms: 0.0,
            missile_level: 0,
            last_fired: f64::NEG_INFINITY,
            special_charge: 0.0,
            last_hit: f64::NEG_INFINITY,
            invulnerable: false,
            invulnerable_since: 0.0,
            effects: Vec::new(),
        };
        player.apply_stats(stats);
        player.health = player.max_health;
        player
    }

    /// Refit after a hangar purchase. Health only grows when max health does.
    pub fn apply_stats(&mut self, stats: &PlayerStats) {
        if stats.max_health > self.max_health {
            self.health = stats.max_health;
        }
        self.max_health = stats.max_health;
        self.health = self.health.min(self.max_health);
        self.armor = stats.armor;
        self.max_speed = stats.max_speed;
        self.damage = stats.damage;
        self.fire_interval_ms = stats.fire_interval_ms;
        self.missile_level = stats.missile_level;
    }

    /// Current turn rate at the given direction (rad/s)
    fn turn_speed(&self) -> f32 {
        BASE_TURN_RATE + THRUST_TURN_BONUS * self.thrust
    }

    /// Rotate the nose; `direction` is -1, 0 or 1
    pub fn turn(&mut self, direction: i8, dt: f32) {
        let dir = direction.signum() as f32;
        self.turn_rate = dir * self.turn_speed();
        self.heading = normalize_angle(self.heading + self.turn_rate * dt);
    }

    pub fn adjust_thrust(&mut self, delta: f32) {
        self.thrust = (self.thrust + delta).clamp(0.0, 1.0);
    }

    pub fn is_buffed(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Gun interval including any active buff
    pub fn effective_fire_interval(&self) -> f64 {
        if self.is_buffed(EffectKind::FireRateBoost) {
            (self.fire_interval_ms - FIRE_RATE_BOOST_REDUCTION).max(MIN_FIRE_INTERVAL_MS)
        } else {
            self.fire_interval_ms
        }
    }

    /// Add or refresh a timed buff
    pub fn grant_effect(&mut self, kind: EffectKind, expires_at: f64) {
        match self.effects.iter_mut().find(|e| e.kind == kind) {
            Some(effect) => effect.expires_at = effect.expires_at.max(expires_at),
            None => self.effects.push(TimedEffect { kind, expires_at }),
        }
    }

    pub fn grant_invulnerability(&mut self, now: f64) {
        self.invulnerable = true;
        self.invulnerable_since = now;
    }

    /// Advance flight physics and timers by one tick
    pub fn tick(&mut self, dt: f32, now: f64) {
        let forward = heading_vector(self.heading);

        self.vel += forward * THRUST_ACCEL * self.thrust * dt;
        self.vel *= PLAYER_DRAG;

        let speed = self.vel.length();
        if speed < PLAYER_MIN_SPEED {
            self.vel = forward * PLAYER_MIN_SPEED;
        } else if speed > self.max_speed {
            self.vel = self.vel / speed * self.max_speed;
        }

        self.pos += self.vel * dt;
        self.bounce_off_bounds();

        // Bank follows the turn rate, purely for looks
        let max_rate = BASE_TURN_RATE + THRUST_TURN_BONUS;
        let roll_target = (self.turn_rate / max_rate).clamp(-1.0, 1.0);
        self.roll += (roll_target - self.roll) * ROLL_SMOOTHING;

        if now - self.last_hit > REGEN_DELAY_MS {
            self.health = (self.health + REGEN_PER_SECOND * dt).min(self.max_health);
        }

        if self.invulnerable && now - self.invulnerable_since > INVULNERABLE_MS {
            self.invulnerable = false;
        }

        self.effects.retain(|e| e.expires_at > now);
    }

    /// Clamp into the world rectangle and bounce inelastically
    fn bounce_off_bounds(&mut self) {
        let e = WORLD_HALF_EXTENT;
        if self.pos.x.abs() > e {
            self.pos.x = self.pos.x.clamp(-e, e);
            self.vel.x = -self.vel.x * WALL_RESTITUTION;
        }
        if self.pos.y.abs() > e {
            self.pos.y = self.pos.y.clamp(-e, e);
            self.vel.y = -self.vel.y * WALL_RESTITUTION;
        }
    }

    pub fn nose(&self) -> Vec2 {
        self.pos + heading_vector(self.heading) * self.size
    }

    /// Fire both guns if the cooldown allows
    pub fn fire(&mut self, now: f64, rng: &mut impl Rng) -> Option<[Bullet; 2]> {
        if now - self.last_fired < self.effective_fire_interval() {
            return None;
        }
        self.last_fired = now;

        let nose = self.nose();
        let left = heading_vector(self.heading - std::f32::consts::FRAC_PI_2);
        let mut gun = |side: f32| {
            let jitter = (rng.random::<f32>() - 0.5) * GUN_JITTER;
            // Left gun (side = 1) toes right and vice versa
            let angle = self.heading + side * GUN_CONVERGENCE + jitter;
            Bullet::new(nose + left * side * GUN_OFFSET, angle, self.damage, Owner::Player, now)
        };
        Some([gun(1.0), gun(-1.0)])
    }

    /// Charged, unlocked and fired: a fan of missiles at the nearest enemy
    pub fn fire_special(&mut self, enemies: &[Enemy], now: f64) -> Option<Vec<HomingMissile>> {
        if self.special_charge < MAX_SPECIAL_CHARGE || self.missile_level == 0 {
            return None;
        }
        self.special_charge = 0.0;

        let target = nearest_enemy(self.pos, enemies);
        let count = 2 + self.missile_level;
        let missiles = (0..count)
            .map(|i| {
                let angle = self.heading + (i as f32 - count as f32 / 2.0) * MISSILE_FAN_STEP;
                HomingMissile::new(self.pos, angle, target, now)
            })
            .collect();
        Some(missiles)
    }

    pub fn add_special_charge(&mut self, amount: f32) {
        self.special_charge = (self.special_charge + amount).min(MAX_SPECIAL_CHARGE);
    }

    /// Apply a hit. Returns the damage actually taken, `None` while invulnerable.
    pub fn take_damage(&mut self, amount: f32, now: f64) -> Option<f32> {
        if self.invulnerable {
            return None;
        }
        let actual = (amount - self.armor).max(1.0);
        self.health = (self.health - actual).max(0.0);
        self.last_hit = now;
        Some(actual)
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    pub fn collect(&mut self, kind: PickupKind, now: f64) {
        match kind {
            PickupKind::Health => {
                self.health =
                    (self.health + self.max_health * HEALTH_RESTORE_FRACTION).min(self.max_health);
            }
            PickupKind::Armor => self.armor += ARMOR_BONUS,
            PickupKind::FireRate => {
                self.grant_effect(EffectKind::FireRateBoost, now + FIRE_RATE_BOOST_MS)
            }
            PickupKind::Shield => self.grant_invulnerability(now),
        }
    }
}

/// Nearest live enemy by Euclidean distance; ties go to the earlier one
pub fn nearest_enemy(from: Vec2, enemies: &[Enemy]) -> Option<EntityId> {
    let mut best: Option<(EntityId, f32)> = None;
    for enemy in enemies.iter().filter(|e| !e.is_dead()) {
        let d = from.distance_squared(enemy.pos);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((enemy.id, d));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Archetype;
    use crate::upgrades::UpgradeLedger;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> Player {
        Player::new(&UpgradeLedger::default().player_stats())
    }

    #[test]
    fn test_new_player_from_stats() {
        let p = player();
        assert_eq!(p.health, 100.0);
        assert_eq!(p.armor, 10.0);
        assert_eq!(p.special_charge, 0.0);
    }

    #[test]
    fn test_armor_floor() {
        let mut p = player();
        // armor 10 vs 5 damage still costs 1 health
        assert_eq!(p.take_damage(5.0, 0.0), Some(1.0));
        assert_eq!(p.health, 99.0);
        assert_eq!(p.take_damage(30.0, 0.0), Some(20.0));
        assert_eq!(p.health, 79.0);
    }

    #[test]
    fn test_invulnerable_ignores_damage() {
        let mut p = player();
        p.grant_invulnerability(0.0);
        assert_eq!(p.take_damage(500.0, 10.0), None);
        assert_eq!(p.health, 100.0);
    }

    #[test]
    fn test_health_clamps_at_zero() {
        let mut p = player();
        p.take_damage(1000.0, 0.0);
        assert_eq!(p.health, 0.0);
        assert!(p.is_destroyed());
    }

    #[test]
    fn test_invulnerability_expires() {
        let mut p = player();
        p.grant_invulnerability(0.0);
        p.tick(1.0 / 60.0, 1999.0);
        assert!(p.invulnerable);
        p.tick(1.0 / 60.0, 2001.0);
        assert!(!p.invulnerable);
    }

    #[test]
    fn test_regen_waits_for_delay() {
        let mut p = player();
        p.take_damage(50.0, 1000.0);
        let hurt = p.health;
        p.tick(1.0 / 60.0, 3000.0);
        assert_eq!(p.health, hurt);
        p.tick(1.0, 6001.0);
        assert!((p.health - (hurt + REGEN_PER_SECOND)).abs() < 1e-3);
    }

    #[test]
    fn test_turn_scales_with_thrust() {
        let mut slow = player();
        slow.thrust = 0.0;
        slow.turn(1, 0.1);
        let mut fast = player();
        fast.thrust = 1.0;
        fast.turn(1, 0.1);
        assert!(fast.heading > slow.heading);
        assert!((slow.heading - BASE_TURN_RATE * 0.1).abs() < 1e-5);

        fast.turn(0, 0.1);
        assert_eq!(fast.turn_rate, 0.0);
    }

    #[test]
    fn test_thrust_clamps() {
        let mut p = player();
        p.adjust_thrust(5.0);
        assert_eq!(p.thrust, 1.0);
        p.adjust_thrust(-7.0);
        assert_eq!(p.thrust, 0.0);
    }

    #[test]
    fn test_min_speed_along_heading() {
        let mut p = player();
        p.thrust = 0.0;
        p.vel = Vec2::ZERO;
        p.heading = std::f32::consts::FRAC_PI_2;
        p.tick(1.0 / 60.0, 0.0);
        assert!((p.vel.length() - PLAYER_MIN_SPEED).abs() < 1e-3);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn test_wall_bounce() {
        let mut p = player();
        p.pos = Vec2::new(WORLD_HALF_EXTENT - 1.0, 0.0);
        p.vel = Vec2::new(200.0, 0.0);
        p.thrust = 1.0;
        p.tick(1.0 / 60.0, 0.0);
        assert_eq!(p.pos.x, WORLD_HALF_EXTENT);
        assert!(p.vel.x < 0.0);
    }

    #[test]
    fn test_fire_cooldown_and_pair() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = player();
        let pair = p.fire(1000.0, &mut rng).expect("first shot fires");
        assert_eq!(pair[0].owner, Owner::Player);
        // Guns straddle the nose symmetrically
        let mid = (pair[0].pos + pair[1].pos) / 2.0;
        assert!(mid.distance(p.nose()) < 1e-3);
        assert!(p.fire(1000.0 + p.fire_interval_ms - 1.0, &mut rng).is_none());
        assert!(p.fire(1000.0 + p.fire_interval_ms, &mut rng).is_some());
    }

    #[test]
    fn test_fire_rate_buff_expires() {
        let mut p = player();
        let base = p.effective_fire_interval();
        p.collect(PickupKind::FireRate, 0.0);
        assert_eq!(p.effective_fire_interval(), base - 20.0);
        p.tick(1.0 / 60.0, 9_999.0);
        assert!(p.is_buffed(EffectKind::FireRateBoost));
        p.tick(1.0 / 60.0, 10_000.0);
        assert_eq!(p.effective_fire_interval(), base);
    }

    #[test]
    fn test_health_pickup_restores_quarter() {
        let mut p = player();
        p.health = 50.0;
        p.collect(PickupKind::Health, 0.0);
        assert_eq!(p.health, 75.0);

        p.health = 90.0;
        p.collect(PickupKind::Health, 0.0);
        assert_eq!(p.health, p.max_health);
    }

    #[test]
    fn test_armor_pickup_stacks() {
        let mut p = player();
        let base = p.armor;
        p.collect(PickupKind::Armor, 0.0);
        p.collect(PickupKind::Armor, 0.0);
        assert_eq!(p.armor, base + 2.0 * ARMOR_BONUS);
    }

    #[test]
    fn test_shield_pickup_blocks_damage() {
        let mut p = player();
        p.collect(PickupKind::Shield, 1_000.0);
        assert!(p.invulnerable);
        assert_eq!(p.take_damage(50.0, 1_500.0), None);
        assert_eq!(p.health, p.max_health);

        p.tick(1.0 / 60.0, 1_000.0 + INVULNERABLE_MS + 1.0);
        assert!(!p.invulnerable);
        assert!(p.take_damage(50.0, 3_100.0).is_some());
    }

    #[test]
    fn test_buff_expiry_restores_upgraded_interval() {
        let mut ledger = UpgradeLedger::default();
        let mut p = Player::new(&ledger.player_stats());
        p.collect(PickupKind::FireRate, 0.0);

        let mut credits = 1000;
        ledger.purchase(crate::upgrades::UpgradeKind::FireRate, &mut credits);
        p.apply_stats(&ledger.player_stats());
        let upgraded = ledger.player_stats().fire_interval_ms;
        assert_eq!(p.effective_fire_interval(), upgraded - FIRE_RATE_BOOST_REDUCTION);

        p.tick(1.0 / 60.0, 10_000.0);
        assert_eq!(p.effective_fire_interval(), upgraded);
    }

    #[test]
    fn test_special_requires_charge_and_unlock() {
        let enemies = vec![Enemy::new(3, Archetype::Rookie, Vec2::new(100.0, 0.0))];
        let mut p = player();
        p.special_charge = MAX_SPECIAL_CHARGE;
        assert!(p.fire_special(&enemies, 0.0).is_none(), "locked");

        p.missile_level = 2;
        p.special_charge = 50.0;
        assert!(p.fire_special(&enemies, 0.0).is_none(), "not charged");

        p.special_charge = MAX_SPECIAL_CHARGE;
        let salvo = p.fire_special(&enemies, 0.0).expect("fires");
        assert_eq!(salvo.len(), 4);
        assert!(salvo.iter().all(|m| m.target == Some(3)));
        assert_eq!(p.special_charge, 0.0);
    }

    #[test]
    fn test_nearest_enemy_tie_breaks_by_order() {
        let enemies = vec![
            Enemy::new(1, Archetype::Rookie, Vec2::new(0.0, 50.0)),
            Enemy::new(2, Archetype::Rookie, Vec2::new(50.0, 0.0)),
            Enemy::new(3, Archetype::Rookie, Vec2::new(500.0, 0.0)),
        ];
        assert_eq!(nearest_enemy(Vec2::ZERO, &enemies), Some(1));
        assert_eq!(nearest_enemy(Vec2::ZERO, &[]), None);
    }

    #[test]
    fn test_refit_keeps_damage_taken() {
        let mut ledger = UpgradeLedger::default();
        let mut p = Player::new(&ledger.player_stats());
        p.take_damage(40.0, 0.0);
        let mut credits = 1000;
        ledger.purchase(crate::upgrades::UpgradeKind::Armor, &mut credits);
        p.apply_stats(&ledger.player_stats());
        assert_eq!(p.armor, 20.0);
        assert_eq!(p.health, 70.0);

        ledger.purchase(crate::upgrades::UpgradeKind::MaxHealth, &mut credits);
        p.apply_stats(&ledger.player_stats());
        assert_eq!(p.health, 200.0);
    }

    proptest! {
        #[test]
        fn prop_damage_floor(amount in 0.0f32..200.0, armor in 0.0f32..100.0) {
            let mut p = player();
            p.armor = armor;
            let before = p.health;
            p.take_damage(amount, 0.0);
            let expected = (before - (amount - armor).max(1.0)).max(0.0);
            prop_assert!((p.health - expected).abs() < 1e-4);
        }

        #[test]
        fn prop_speed_envelope(
            heading in -3.1f32..3.1,
            thrust in 0.0f32..=1.0,
            vx in -400.0f32..400.0,
            vy in -400.0f32..400.0,
            ticks in 1usize..30,
        ) {
            let mut p = player();
            p.heading = heading;
            p.thrust = thrust;
            p.vel = Vec2::new(vx, vy);
            for _ in 0..ticks {
                p.tick(SIM_DT, 0.0);
                let speed = p.vel.length();
                prop_assert!(speed >= PLAYER_MIN_SPEED - 1e-3);
                prop_assert!(speed <= p.max_speed + 1e-3);
            }
        }
    }
}
