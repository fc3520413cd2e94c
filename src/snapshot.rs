//! Read-only views of the game state
//!
//! Renderers get a `FrameSnapshot` once per frame and the UI gets a
//! `HudSummary`. Neither can reach back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::camera::CameraTransform;
use crate::consts::MAX_SPECIAL_CHARGE;
use crate::sim::player::EffectKind;
use crate::sim::{
    Archetype, EntityId, GamePhase, GameState, Owner, ParticleColor, PickupKind,
};
use crate::upgrades::UpgradeKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSprite {
    pub pos: Vec2,
    pub heading: f32,
    pub roll: f32,
    pub thrust: f32,
    pub size: f32,
    /// Shield pickup active (renderer flickers the plane)
    pub invulnerable: bool,
    /// Fire-rate buff active
    pub boosted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySprite {
    pub id: EntityId,
    pub archetype: Archetype,
    pub pos: Vec2,
    pub heading: f32,
    pub roll: f32,
    pub size: f32,
    pub health_fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletSprite {
    pub pos: Vec2,
    pub angle: f32,
    pub size: f32,
    pub owner: Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissileSprite {
    pub pos: Vec2,
    pub heading: f32,
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BombSprite {
    pub pos: Vec2,
    pub size: f32,
    pub armed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupSprite {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub size: f32,
    pub bob_phase: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub color: ParticleColor,
    pub size: f32,
    pub alpha: f32,
}

/// Everything a renderer draws for one frame, in back-to-front order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub camera: CameraTransform,
    pub pickups: Vec<PickupSprite>,
    pub bullets: Vec<BulletSprite>,
    pub missiles: Vec<MissileSprite>,
    pub bombs: Vec<BombSprite>,
    pub enemies: Vec<EnemySprite>,
    pub player: PlayerSprite,
    pub particles: Vec<ParticleSprite>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            camera: state.camera.transform(),
            pickups: state
                .pickups
                .iter()
                .map(|p| PickupSprite {
                    kind: p.kind,
                    pos: p.pos,
                    size: p.size,
                    bob_phase: p.bob_phase,
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletSprite {
                    pos: b.pos,
                    angle: b.vel.y.atan2(b.vel.x),
                    size: b.size,
                    owner: b.owner,
                })
                .collect(),
            missiles: state
                .missiles
                .iter()
                .map(|m| MissileSprite {
                    pos: m.pos,
                    heading: m.heading,
                    size: m.size,
                })
                .collect(),
            bombs: state
                .bombs
                .iter()
                .map(|b| BombSprite {
                    pos: b.pos,
                    size: b.size,
                    armed: b.armed,
                })
                .collect(),
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemySprite {
                    id: e.id,
                    archetype: e.archetype,
                    pos: e.pos,
                    heading: e.heading,
                    roll: e.roll,
                    size: e.size(),
                    health_fraction: e.health_fraction(),
                })
                .collect(),
            player: PlayerSprite {
                pos: player.pos,
                heading: player.heading,
                roll: player.roll,
                thrust: player.thrust,
                size: player.size,
                invulnerable: player.invulnerable,
                boosted: player.is_buffed(EffectKind::FireRateBoost),
            },
            particles: state
                .particles
                .iter()
                .map(|p| ParticleSprite {
                    pos: p.pos,
                    color: p.color,
                    size: p.size,
                    alpha: p.alpha(),
                })
                .collect(),
        }
    }

    /// Sprite count, for logging
    pub fn sprite_count(&self) -> usize {
        self.pickups.len()
            + self.bullets.len()
            + self.missiles.len()
            + self.bombs.len()
            + self.enemies.len()
            + 1
            + self.particles.len()
    }
}

/// One line of the hangar shop
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpgradeRow {
    pub kind: UpgradeKind,
    pub name: &'static str,
    pub level: u32,
    pub next_cost: u32,
    pub affordable: bool,
}

/// Numbers the overlay UI displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSummary {
    /// 0..=100
    pub health_pct: f32,
    /// Current armor against the armor the upgrade level grants, 0..=100
    pub armor_pct: f32,
    /// Special weapon charge, 0..=100
    pub special_pct: f32,
    pub wave: u32,
    pub credits: u32,
    pub kills: u32,
    /// Enemies alive plus still to spawn
    pub remaining: u32,
    pub phase: GamePhase,
    /// Show on-screen controls (no pointer device seen)
    pub touch_controls: bool,
    pub upgrades: Vec<UpgradeRow>,
}

impl HudSummary {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        let armor_level = state.upgrades.level(UpgradeKind::Armor).max(1);
        let upgrades = UpgradeKind::ALL
            .iter()
            .map(|&kind| {
                let next_cost = state.upgrades.next_cost(kind);
                UpgradeRow {
                    kind,
                    name: kind.as_str(),
                    level: state.upgrades.level(kind),
                    next_cost,
                    affordable: state.credits >= next_cost,
                }
            })
            .collect();

        Self {
            health_pct: percent(player.health, player.max_health),
            armor_pct: percent(player.armor, 10.0 * armor_level as f32),
            special_pct: percent(player.special_charge, MAX_SPECIAL_CHARGE),
            wave: state.wave.wave,
            credits: state.credits,
            kills: state.kills,
            remaining: state.remaining_enemies(),
            phase: state.phase,
            touch_controls: !state.pointer_device,
            upgrades,
        }
    }
}

fn percent(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (value * 100.0 / max).clamp(0.0, 100.0)
}

/// Presentation backend that draws snapshots
pub trait Renderer {
    fn render(&mut self, frame: &FrameSnapshot);
}

/// Renderer that draws nothing; used by headless runs and tests
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &FrameSnapshot) {
        self.frames += 1;
        log::trace!(
            "frame {} tick {}: {} sprites",
            self.frames,
            frame.tick,
            frame.sprite_count()
        );
    }
}
