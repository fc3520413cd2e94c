//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod commands;
pub mod enemy;
pub mod particle;
pub mod pickup;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{CollisionReport, resolve};
pub use commands::Command;
pub use enemy::{Archetype, ArchetypeStats, Enemy, Shot};
pub use particle::{Particle, ParticleColor};
pub use pickup::{Pickup, PickupKind};
pub use player::{EffectKind, Player, TimedEffect};
pub use projectile::{Bomb, Bullet, HomingMissile, Owner};
pub use state::{EntityId, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use wave::{SPAWN_BANDS, SpawnBand, WaveDirector};
