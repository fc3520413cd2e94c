//! Wave director: spawn quota, cadence, placement and archetype mix

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Archetype, Enemy};
use super::state::EntityId;
use crate::consts::*;
use crate::polar_to_cartesian;

/// Archetype weights that apply from `from_wave` onward
#[derive(Debug, Clone, Copy)]
pub struct SpawnBand {
    pub from_wave: u32,
    /// Relative weights, same order as `Archetype::ALL`
    pub weights: [u32; 7],
}

/// Wave-bracketed archetype mix. Bands widen toward tougher pilots.
//                                        rook scout fight  vet bomb elite ace
#[rustfmt::skip]
pub const SPAWN_BANDS: [SpawnBand; 5] = [
    SpawnBand { from_wave: 1, weights: [60, 40, 0, 0, 0, 0, 0] },
    SpawnBand { from_wave: 3, weights: [30, 40, 30, 0, 0, 0, 0] },
    SpawnBand { from_wave: 5, weights: [15, 30, 30, 10, 15, 0, 0] },
    SpawnBand { from_wave: 8, weights: [5, 20, 25, 20, 15, 10, 5] },
    SpawnBand { from_wave: 12, weights: [0, 10, 20, 25, 15, 18, 12] },
];

/// Band in force for `wave`
pub fn band_for_wave(wave: u32) -> &'static SpawnBand {
    SPAWN_BANDS
        .iter()
        .rev()
        .find(|band| wave >= band.from_wave)
        .unwrap_or(&SPAWN_BANDS[0])
}

/// Map a uniform roll in [0, 1) onto the band's weighted archetypes
pub fn archetype_for_roll(wave: u32, roll: f32) -> Archetype {
    let band = band_for_wave(wave);
    let total: u32 = band.weights.iter().sum();
    debug_assert!(total > 0, "spawn band for wave {wave} has no weight");
    let mut pick = roll * total as f32;
    for (archetype, &weight) in Archetype::ALL.iter().zip(&band.weights) {
        if weight == 0 {
            continue;
        }
        if pick < weight as f32 {
            return *archetype;
        }
        pick -= weight as f32;
    }
    // Float slop at roll ≈ 1.0: fall back to the last weighted archetype
    Archetype::ALL
        .iter()
        .zip(&band.weights)
        .rev()
        .find(|&(_, &w)| w > 0)
        .map(|(a, _)| *a)
        .unwrap_or(Archetype::Rookie)
}

/// Total spawn quota for a wave
pub fn quota_for_wave(wave: u32) -> u32 {
    WAVE_QUOTA_BASE + wave * WAVE_QUOTA_PER_WAVE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveDirector {
    /// Current wave (1-based)
    pub wave: u32,
    /// Kills credited during this wave
    pub wave_kills: u32,
    /// Enemies still to spawn this wave
    pub remaining_to_spawn: u32,
    /// Ticks since the wave started
    pub spawn_timer: u32,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self {
            wave: 1,
            wave_kills: 0,
            remaining_to_spawn: 0,
            spawn_timer: 0,
        }
    }
}

impl WaveDirector {
    pub fn start_wave(&mut self) {
        self.wave_kills = 0;
        self.spawn_timer = 0;
        self.remaining_to_spawn = quota_for_wave(self.wave);
        log::info!(
            "Wave {} started: {} enemies inbound",
            self.wave,
            self.remaining_to_spawn
        );
    }

    /// Advance the spawn clock. True when a spawn is due this tick.
    pub fn on_tick(&mut self) -> bool {
        self.spawn_timer += 1;
        self.remaining_to_spawn > 0 && self.spawn_timer.is_multiple_of(SPAWN_INTERVAL_TICKS)
    }

    /// Place a new enemy on the spawn ring around the player
    pub fn spawn_enemy(
        &mut self,
        id: EntityId,
        player_pos: Vec2,
        rng: &mut impl Rng,
    ) -> Option<Enemy> {
        if self.remaining_to_spawn == 0 {
            return None;
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let pos = player_pos + polar_to_cartesian(SPAWN_RING_RADIUS, angle);
        let archetype = archetype_for_roll(self.wave, rng.random());
        self.remaining_to_spawn -= 1;
        log::debug!(
            "Spawned {} #{} ({} left this wave)",
            archetype.as_str(),
            id,
            self.remaining_to_spawn
        );
        Some(Enemy::new(id, archetype, pos))
    }

    pub fn record_kill(&mut self) {
        self.wave_kills += 1;
    }

    /// Quota spent and the sky is clear
    pub fn is_complete(&self, live_enemies: usize) -> bool {
        self.remaining_to_spawn == 0 && live_enemies == 0
    }
}
