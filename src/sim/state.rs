//! Game state and core simulation types
//!
//! `GameState` is the one context object every subsystem works through. It
//! owns every entity collection exclusively; renderers and UI only ever see
//! snapshots of it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Archetype, Enemy};
use super::particle::{self, Particle};
use super::pickup::{Pickup, PickupKind};
use super::player::Player;
use super::projectile::{Bomb, Bullet, HomingMissile};
use super::wave::WaveDirector;
use crate::camera::Camera;
use crate::consts::*;
use crate::settings::Settings;
use crate::upgrades::{UpgradeKind, UpgradeLedger};

/// Stable entity identifier, never reused within a session
pub type EntityId = u32;

/// Top-level game phase. The world only advances in `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    Menu,
    /// Upgrade shop
    Hangar,
    /// Active gameplay
    Playing,
    /// Wave cleared, waiting for the player to continue
    WaveComplete,
    /// Player shot down
    GameOver,
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Shoot,
    MissileLaunch { count: usize },
    PlayerHit { damage: f32 },
    EnemyDestroyed { archetype: Archetype, credits: u32 },
    Explosion { pos: Vec2, size: f32 },
    PickupCollected(PickupKind),
    Upgrade { kind: UpgradeKind, level: u32 },
    WaveStarted(u32),
    WaveComplete(u32),
    GameOver { wave: u32, kills: u32 },
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulation clock (ms); every timer compares against this
    pub clock_ms: f64,
    pub credits: u32,
    /// Kills across the whole run
    pub kills: u32,
    /// Set when the last wave ended in a clear, so the next launch advances
    pub wave_cleared: bool,
    /// Whether the last input came from a pointer device (desktop)
    pub pointer_device: bool,
    pub upgrades: UpgradeLedger,
    pub wave: WaveDirector,
    pub player: Player,
    /// Live collections, in spawn order
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub missiles: Vec<HomingMissile>,
    pub bombs: Vec<Bomb>,
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub camera: Camera,
    pub settings: Settings,
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a new game state with the given seed, sitting at the menu
    pub fn new(seed: u64) -> Self {
        let upgrades = UpgradeLedger::default();
        let player = Player::new(&upgrades.player_stats());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            time_ticks: 0,
            clock_ms: 0.0,
            credits: 0,
            kills: 0,
            wave_cleared: false,
            pointer_device: true,
            upgrades,
            wave: WaveDirector::default(),
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            missiles: Vec::new(),
            bombs: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            camera: Camera::default(),
            settings: Settings::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drain events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Enemies alive plus enemies still queued for this wave
    pub fn remaining_enemies(&self) -> u32 {
        self.enemies.len() as u32 + self.wave.remaining_to_spawn
    }

    /// Fresh plane, empty sky. Credits, ledger and wave number survive.
    pub(crate) fn reset_arena(&mut self) {
        self.player = Player::new(&self.upgrades.player_stats());
        self.enemies.clear();
        self.bullets.clear();
        self.missiles.clear();
        self.bombs.clear();
        self.pickups.clear();
        self.particles.clear();
        self.camera.snap_to(self.player.pos);
    }

    /// Kick off the current wave number
    pub(crate) fn begin_wave(&mut self) {
        self.wave_cleared = false;
        self.wave.start_wave();
        self.emit(GameEvent::WaveStarted(self.wave.wave));
        self.phase = GamePhase::Playing;
    }

    /// Route a hit through armor/invulnerability, shake the camera and
    /// end the run when the hull gives out
    pub fn damage_player(&mut self, amount: f32) {
        let Some(taken) = self.player.take_damage(amount, self.clock_ms) else {
            return;
        };
        self.camera.set_shake(PLAYER_HIT_SHAKE);
        self.emit(GameEvent::PlayerHit { damage: taken });

        if self.player.is_destroyed() && self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            log::info!(
                "Shot down on wave {} with {} kills, {} credits banked",
                self.wave.wave,
                self.kills,
                self.credits
            );
            self.emit(GameEvent::GameOver {
                wave: self.wave.wave,
                kills: self.kills,
            });
        }
    }

    /// Cosmetic burst plus camera shake proportional to its size
    pub fn spawn_explosion(&mut self, pos: Vec2, size: f32) {
        let burst = particle::explosion(pos, &mut self.rng);
        self.push_particles(burst);
        self.camera.add_shake(size / 10.0);
        self.emit(GameEvent::Explosion { pos, size });
    }

    /// Add particles, dropping the oldest past the settings budget
    pub(crate) fn push_particles(&mut self, particles: impl IntoIterator<Item = Particle>) {
        let budget = self.settings.particle_budget();
        if budget == 0 {
            return;
        }
        self.particles.extend(particles);
        if self.particles.len() > budget {
            let excess = self.particles.len() - budget;
            self.particles.drain(..excess);
        }
    }

    /// Remove enemies marked dead this tick and pay out for each
    ///
    /// Order of the survivors is preserved.
    pub(crate) fn reap_dead_enemies(&mut self) {
        if !self.enemies.iter().any(|e| e.is_dead()) {
            return;
        }
        let (dead, alive): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut self.enemies)
            .into_iter()
            .partition(|e| e.is_dead());
        self.enemies = alive;
        for enemy in dead {
            self.on_enemy_destroyed(&enemy);
        }
    }

    fn on_enemy_destroyed(&mut self, enemy: &Enemy) {
        let stats = enemy.stats();
        self.credits += stats.credits;
        self.kills += 1;
        self.wave.record_kill();
        self.player.add_special_charge(SPECIAL_CHARGE_PER_KILL);
        self.spawn_explosion(enemy.pos, stats.size * 2.0);

        if self.rng.random::<f32>() < PICKUP_DROP_CHANCE {
            let pickup = Pickup::random(enemy.pos, &mut self.rng);
            self.pickups.push(pickup);
        }

        log::debug!(
            "{} #{} destroyed (+{} credits)",
            enemy.archetype.as_str(),
            enemy.id,
            stats.credits
        );
        self.emit(GameEvent::EnemyDestroyed {
            archetype: enemy.archetype,
            credits: stats.credits,
        });
    }
}
