//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use rand::Rng;

use super::collision;
use super::enemy::Shot;
use super::particle;
use super::projectile::MISSILE_BLAST_SIZE;
use super::state::{GameEvent, GamePhase, GameState};

/// Chance per tick that a missile leaves a smoke puff
const MISSILE_TRAIL_CHANCE: f32 = 0.3;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// -1 turns left (counter-clockwise on screen), 1 turns right
    pub turn: i8,
    /// Throttle change to apply this tick
    pub thrust_delta: f32,
    /// Guns held down
    pub fire: bool,
    /// Special weapon trigger
    pub special: bool,
    /// Input came from a mouse/keyboard rather than touch
    pub is_pointer_device: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.pointer_device = input.is_pointer_device;

    // World is frozen outside of active play
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.clock_ms += dt as f64 * 1000.0;
    let now = state.clock_ms;

    // Player control
    state.player.turn(input.turn, dt);
    state.player.adjust_thrust(input.thrust_delta);
    state.player.tick(dt, now);

    if input.fire {
        if let Some(pair) = state.player.fire(now, &mut state.rng) {
            state.bullets.extend(pair);
            state.emit(GameEvent::Shoot);
        }
    }
    if input.special {
        if let Some(salvo) = state.player.fire_special(&state.enemies, now) {
            let count = salvo.len();
            state.missiles.extend(salvo);
            state.emit(GameEvent::MissileLaunch { count });
        }
    }

    // Enemies steer and shoot
    let player_pos = state.player.pos;
    for enemy in state.enemies.iter_mut().filter(|e| !e.is_dead()) {
        match enemy.update(dt, now, player_pos, &mut state.rng) {
            Some(Shot::Bullets(bullets)) => state.bullets.extend(bullets),
            Some(Shot::Bomb(bomb)) => state.bombs.push(bomb),
            None => {}
        }
    }

    // Projectiles
    for bullet in &mut state.bullets {
        bullet.update(dt);
    }
    state.bullets.retain(|b| !b.is_expired(now));

    let mut trail = Vec::new();
    for missile in &mut state.missiles {
        missile.update(dt, &state.enemies);
        if state.rng.random::<f32>() < MISSILE_TRAIL_CHANCE {
            trail.push(particle::smoke(missile.pos));
        }
    }
    state.missiles.retain(|m| !m.is_expired(now));
    state.push_particles(trail);

    let mut detonated = Vec::new();
    state.bombs.retain_mut(|bomb| {
        if bomb.update(dt, now, player_pos) {
            detonated.push(bomb.clone());
            false
        } else {
            true
        }
    });
    for bomb in detonated {
        let damage = bomb.falloff_damage(bomb.pos.distance(state.player.pos));
        state.spawn_explosion(bomb.pos, bomb.blast_radius);
        // A blast out of reach does nothing, not even the armor-floor point
        if damage > 0.0 {
            state.damage_player(damage);
        }
    }

    // Pickups
    let (player_pos, player_size) = (state.player.pos, state.player.size);
    let mut collected = Vec::new();
    state.pickups.retain_mut(|pickup| {
        if pickup.update(dt, player_pos, player_size) {
            collected.push(pickup.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        state.player.collect(kind, now);
        state.emit(GameEvent::PickupCollected(kind));
    }

    for p in &mut state.particles {
        p.update(dt);
    }
    state.particles.retain(|p| !p.is_dead());

    // Spawning
    if state.wave.on_tick() {
        let id = state.next_entity_id();
        if let Some(enemy) = state.wave.spawn_enemy(id, state.player.pos, &mut state.rng) {
            state.enemies.push(enemy);
        }
    }

    // Collisions, then apply what they caused
    let report = collision::resolve(
        state.player.pos,
        state.player.size,
        &mut state.bullets,
        &mut state.missiles,
        &mut state.enemies,
    );
    for damage in report.player_hits {
        state.damage_player(damage);
    }
    for pos in report.missile_impacts {
        state.spawn_explosion(pos, MISSILE_BLAST_SIZE);
    }

    state.reap_dead_enemies();

    if state.phase == GamePhase::Playing && state.wave.is_complete(state.enemies.len()) {
        state.phase = GamePhase::WaveComplete;
        state.wave_cleared = true;
        log::info!(
            "Wave {} complete: {} kills, {} credits",
            state.wave.wave,
            state.wave.wave_kills,
            state.credits
        );
        state.emit(GameEvent::WaveComplete(state.wave.wave));
    }

    let shake_scale = state.settings.shake_scale();
    state
        .camera
        .update(state.player.pos, shake_scale, &mut state.rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::commands::Command;
    use crate::sim::enemy::{Archetype, Enemy};
    use crate::sim::pickup::{ARMOR_BONUS, Pickup, PickupKind};
    use crate::sim::projectile::{Bomb, Bullet, Owner};
    use glam::Vec2;

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.apply(Command::Start).unwrap();
        state
    }

    #[test]
    fn test_frozen_outside_playing() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.clock_ms, 0.0);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_pickup_on_player_is_collected() {
        let mut state = started(77);
        state.take_events();
        let armor = state.player.armor;
        state
            .pickups
            .push(Pickup::new(PickupKind::Armor, state.player.pos, 0.0));

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.pickups.is_empty());
        assert_eq!(state.player.armor, armor + ARMOR_BONUS);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::PickupCollected(PickupKind::Armor))
        );
    }

    #[test]
    fn test_wave_one_clears_after_quota() {
        let mut state = started(2024);
        assert_eq!(state.wave.remaining_to_spawn, 8);

        // Shoot down every enemy the moment it shows up
        for _ in 0..60 * 10 {
            for enemy in &mut state.enemies {
                enemy.health = 0.0;
            }
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase != GamePhase::Playing {
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::WaveComplete);
        assert!(state.wave_cleared);
        assert_eq!(state.wave.wave_kills, 8);
        assert_eq!(state.kills, 8);
        assert!(state.enemies.is_empty());
        assert!(state.credits >= 8 * 5);
        assert!(state.take_events().contains(&GameEvent::WaveComplete(1)));
    }

    #[test]
    fn test_armor_soaks_light_hits() {
        let mut state = started(1);
        let pos = state.player.pos;
        state
            .bullets
            .push(Bullet::new(pos, 0.0, 5.0, Owner::Enemy, state.clock_ms));

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.player.health, 99.0);
        assert!(state.bullets.is_empty());
        assert!(state.camera.shake > 0.0);
    }

    #[test]
    fn test_guns_respect_cooldown() {
        let mut state = started(3);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        // 150 ms interval at 60 Hz: a pair every 9 ticks, starting on the first
        for _ in 0..18 {
            tick(&mut state, &input, SIM_DT);
        }
        let shots = state
            .take_events()
            .iter()
            .filter(|e| **e == GameEvent::Shoot)
            .count();
        assert_eq!(shots, 2);
        assert_eq!(state.bullets.len(), 4);
    }

    #[test]
    fn test_special_salvo() {
        let mut state = started(4);
        state.player.missile_level = 1;
        state.player.special_charge = MAX_SPECIAL_CHARGE;
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, Archetype::Bomber, Vec2::new(2000.0, 0.0)));

        let input = TickInput {
            special: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        assert_eq!(state.missiles.len(), 3);
        assert!(state.missiles.iter().all(|m| m.target == Some(id)));
        assert!(
            state
                .take_events()
                .contains(&GameEvent::MissileLaunch { count: 3 })
        );
    }

    #[test]
    fn test_bomb_blast_hurts_with_falloff() {
        let mut state = started(5);
        let pos = state.player.pos;
        state.bombs.push(Bomb::new(pos, state.clock_ms - 1000.0));

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(state.bombs.is_empty());
        // ~30 at point blank, minus 10 armor
        assert!(state.player.health > 79.5 && state.player.health < 81.5);
    }

    #[test]
    fn test_shot_down_ends_run() {
        let mut state = started(6);
        state.player.health = 1.0;
        state.player.armor = 0.0;
        let pos = state.player.pos;
        state
            .bullets
            .push(Bullet::new(pos, 0.0, 10.0, Owner::Enemy, state.clock_ms));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_pointer_flag_tracks_input() {
        let mut state = GameState::new(8);
        let touch = TickInput {
            is_pointer_device: false,
            ..Default::default()
        };
        tick(&mut state, &touch, SIM_DT);
        assert!(!state.pointer_device);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = started(99999);
        let mut state2 = started(99999);

        let inputs = [
            TickInput {
                turn: 1,
                fire: true,
                ..Default::default()
            },
            TickInput {
                thrust_delta: 0.05,
                fire: true,
                ..Default::default()
            },
            TickInput {
                turn: -1,
                special: true,
                ..Default::default()
            },
        ];

        for i in 0..900 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(format!("{:?}", state1), format!("{:?}", state2));
        assert!(state1.time_ticks > 0);
    }
}
