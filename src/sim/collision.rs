//! Collision detection and damage resolution
//!
//! Runs once per tick after all motion, in a fixed order:
//! 1. player bullets vs enemies
//! 2. missiles vs enemies
//! 3. enemy bullets vs player
//! 4. enemy bodies vs player
//!
//! Every check is a plain distance test with no spatial partitioning. Each
//! projectile hits at most one enemy: the first in collection order.
//! Enemies that die here are only marked (health <= 0) and get skipped by
//! later checks; the state removes them in its end-of-tick reap pass.
//! Consumed projectiles are removed by walking the list backwards, so a
//! removal never shifts an element that has not been visited yet.

use glam::Vec2;

use super::enemy::Enemy;
use super::projectile::{Bullet, HomingMissile, Owner};
use super::state::EntityId;
use crate::consts::{CONTACT_DAMAGE_TO_ENEMY, CONTACT_DAMAGE_TO_PLAYER};

/// Side effects the caller applies after the pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Raw damage amounts against the player, in resolution order
    pub player_hits: Vec<f32>,
    /// Where missiles detonated
    pub missile_impacts: Vec<Vec2>,
    /// Enemies whose health crossed zero during this pass
    pub killed: Vec<EntityId>,
}

/// Index of the first live enemy within `radius(enemy)` of `pos`
fn first_hit(pos: Vec2, enemies: &[Enemy], radius: impl Fn(&Enemy) -> f32) -> Option<usize> {
    enemies
        .iter()
        .position(|e| !e.is_dead() && e.pos.distance(pos) < radius(e))
}

pub fn resolve(
    player_pos: Vec2,
    player_size: f32,
    bullets: &mut Vec<Bullet>,
    missiles: &mut Vec<HomingMissile>,
    enemies: &mut [Enemy],
) -> CollisionReport {
    let mut report = CollisionReport::default();

    // 1. Player bullets vs enemies
    for i in (0..bullets.len()).rev() {
        let bullet = &bullets[i];
        if bullet.owner != Owner::Player {
            continue;
        }
        if let Some(idx) = first_hit(bullet.pos, enemies, |e| e.size()) {
            let enemy = &mut enemies[idx];
            if enemy.take_damage(bullet.damage) {
                report.killed.push(enemy.id);
            }
            bullets.remove(i);
        }
    }

    // 2. Missiles vs enemies
    for i in (0..missiles.len()).rev() {
        let missile = &missiles[i];
        if let Some(idx) = first_hit(missile.pos, enemies, |e| e.size() + missile.size) {
            let enemy = &mut enemies[idx];
            if enemy.take_damage(missile.damage) {
                report.killed.push(enemy.id);
            }
            report.missile_impacts.push(missile.pos);
            missiles.remove(i);
        }
    }

    // 3. Enemy bullets vs player
    for i in (0..bullets.len()).rev() {
        let bullet = &bullets[i];
        if bullet.owner == Owner::Enemy && bullet.pos.distance(player_pos) < player_size {
            report.player_hits.push(bullet.damage);
            bullets.remove(i);
        }
    }

    // 4. Body contact: both sides take damage, nobody is consumed
    for enemy in enemies.iter_mut().filter(|e| !e.is_dead()) {
        if enemy.pos.distance(player_pos) < player_size + enemy.size() {
            report.player_hits.push(CONTACT_DAMAGE_TO_PLAYER);
            if enemy.take_damage(CONTACT_DAMAGE_TO_ENEMY) {
                report.killed.push(enemy.id);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Archetype;

    const PLAYER_SIZE: f32 = 20.0;
    const FAR: Vec2 = Vec2::new(5000.0, 5000.0);

    fn player_bullet(pos: Vec2, damage: f32) -> Bullet {
        Bullet::new(pos, 0.0, damage, Owner::Player, 0.0)
    }

    #[test]
    fn test_first_hit_wins() {
        let mut enemies = vec![
            Enemy::new(1, Archetype::Fighter, Vec2::new(0.0, 0.0)),
            Enemy::new(2, Archetype::Fighter, Vec2::new(5.0, 0.0)),
        ];
        let mut bullets = vec![player_bullet(Vec2::new(2.0, 0.0), 10.0)];
        let mut missiles = Vec::new();

        resolve(FAR, PLAYER_SIZE, &mut bullets, &mut missiles, &mut enemies);

        assert!(bullets.is_empty());
        assert_eq!(enemies[0].health, 50.0);
        assert_eq!(enemies[1].health, 60.0);
    }

    #[test]
    fn test_consumption_does_not_skip_neighbours() {
        let mut enemies = vec![Enemy::new(1, Archetype::Ace, Vec2::ZERO)];
        let mut bullets = vec![
            player_bullet(Vec2::new(1.0, 0.0), 10.0),
            player_bullet(Vec2::new(900.0, 0.0), 10.0),
            player_bullet(Vec2::new(2.0, 0.0), 10.0),
            player_bullet(Vec2::new(3.0, 0.0), 10.0),
        ];
        let mut missiles = Vec::new();

        resolve(FAR, PLAYER_SIZE, &mut bullets, &mut missiles, &mut enemies);

        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].pos.x, 900.0);
        assert_eq!(enemies[0].health, 270.0);
    }

    #[test]
    fn test_dead_enemy_not_hit_again() {
        let mut enemies = vec![
            Enemy::new(1, Archetype::Rookie, Vec2::ZERO),
            Enemy::new(2, Archetype::Rookie, Vec2::new(6.0, 0.0)),
        ];
        // Two lethal bullets overlapping both rookies
        let mut bullets = vec![
            player_bullet(Vec2::new(3.0, 0.0), 25.0),
            player_bullet(Vec2::new(3.0, 0.0), 25.0),
        ];
        let mut missiles = Vec::new();

        let report = resolve(FAR, PLAYER_SIZE, &mut bullets, &mut missiles, &mut enemies);

        assert!(bullets.is_empty());
        assert!(enemies.iter().all(|e| e.is_dead()));
        assert_eq!(report.killed.len(), 2);
    }

    #[test]
    fn test_missile_radius_includes_missile_size() {
        let mut enemies = vec![Enemy::new(1, Archetype::Scout, Vec2::ZERO)];
        let mut bullets = Vec::new();
        // Scout size 15 + missile size 6 = 21
        let mut missiles = vec![HomingMissile::new(Vec2::new(20.0, 0.0), 0.0, None, 0.0)];

        let report = resolve(FAR, PLAYER_SIZE, &mut bullets, &mut missiles, &mut enemies);

        assert!(missiles.is_empty());
        assert_eq!(report.missile_impacts, vec![Vec2::new(20.0, 0.0)]);
        assert_eq!(report.killed, vec![1]);
    }

    #[test]
    fn test_enemy_bullets_hit_player_only() {
        let mut enemies = vec![Enemy::new(1, Archetype::Scout, Vec2::new(5.0, 0.0))];
        let mut bullets = vec![
            Bullet::new(Vec2::new(5.0, 0.0), 0.0, 5.0, Owner::Enemy, 0.0),
            Bullet::new(Vec2::new(500.0, 0.0), 0.0, 5.0, Owner::Enemy, 0.0),
        ];
        let mut missiles = Vec::new();
        let player = Vec2::new(500.0, 0.0);

        let report = resolve(player, PLAYER_SIZE, &mut bullets, &mut missiles, &mut enemies);

        assert_eq!(report.player_hits, vec![5.0]);
        assert_eq!(bullets.len(), 1);
        assert_eq!(enemies[0].health, 30.0, "enemy fire never hurts enemies");
    }

    #[test]
    fn test_contact_damage_both_ways_repeats() {
        let mut enemies = vec![Enemy::new(1, Archetype::Ace, Vec2::new(30.0, 0.0))];
        let mut bullets = Vec::new();
        let mut missiles = Vec::new();

        for _ in 0..2 {
            let report = resolve(
                Vec2::ZERO,
                PLAYER_SIZE,
                &mut bullets,
                &mut missiles,
                &mut enemies,
            );
            assert_eq!(report.player_hits, vec![CONTACT_DAMAGE_TO_PLAYER]);
        }
        assert_eq!(enemies.len(), 1);
        assert_eq!(enemies[0].health, 300.0 - 2.0 * CONTACT_DAMAGE_TO_ENEMY);
    }
}
