//! Hangar economy
//!
//! Upgrade costs grow geometrically per level. Player stats are a pure
//! function of the ledger and get applied whenever a player is built or
//! refit in the hangar.

use serde::{Deserialize, Serialize};

/// Purchasable upgrade tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    MaxHealth,
    Armor,
    Speed,
    FireRate,
    Damage,
    Missiles,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::MaxHealth,
        UpgradeKind::Armor,
        UpgradeKind::Speed,
        UpgradeKind::FireRate,
        UpgradeKind::Damage,
        UpgradeKind::Missiles,
    ];

    fn index(self) -> usize {
        match self {
            UpgradeKind::MaxHealth => 0,
            UpgradeKind::Armor => 1,
            UpgradeKind::Speed => 2,
            UpgradeKind::FireRate => 3,
            UpgradeKind::Damage => 4,
            UpgradeKind::Missiles => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::MaxHealth => "Max Health",
            UpgradeKind::Armor => "Armor",
            UpgradeKind::Speed => "Speed",
            UpgradeKind::FireRate => "Fire Rate",
            UpgradeKind::Damage => "Damage",
            UpgradeKind::Missiles => "Missiles",
        }
    }
}

/// One upgrade track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub level: u32,
    pub base_cost: u32,
    pub multiplier: f64,
}

impl Upgrade {
    pub const fn new(level: u32, base_cost: u32, multiplier: f64) -> Self {
        Self {
            level,
            base_cost,
            multiplier,
        }
    }

    /// Price of the next level when the track sits at `level`
    ///
    /// `floor(base * multiplier^(level - 1))`. A locked track (level 0)
    /// unlocks for one step below the base price.
    pub fn cost_at(&self, level: u32) -> u32 {
        (self.base_cost as f64 * self.multiplier.powi(level as i32 - 1)).floor() as u32
    }

    /// Price of the next level from the current one
    pub fn next_cost(&self) -> u32 {
        self.cost_at(self.level)
    }
}

/// Levels and prices of every upgrade track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeLedger {
    tracks: [Upgrade; 6],
}

impl Default for UpgradeLedger {
    fn default() -> Self {
        Self {
            tracks: [
                Upgrade::new(1, 100, 1.5), // MaxHealth
                Upgrade::new(1, 100, 1.5), // Armor
                Upgrade::new(1, 100, 1.5), // Speed
                Upgrade::new(1, 100, 1.5), // FireRate
                Upgrade::new(1, 100, 1.5), // Damage
                Upgrade::new(0, 500, 1.3), // Missiles (locked until bought)
            ],
        }
    }
}

impl UpgradeLedger {
    pub fn get(&self, kind: UpgradeKind) -> &Upgrade {
        &self.tracks[kind.index()]
    }

    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self.get(kind).level
    }

    pub fn next_cost(&self, kind: UpgradeKind) -> u32 {
        self.get(kind).next_cost()
    }

    /// Buy one level of `kind`, paying out of `credits`.
    ///
    /// Atomic: either both the deduction and the level bump happen, or
    /// neither does. Returns the new level, or `None` when unaffordable.
    pub fn purchase(&mut self, kind: UpgradeKind, credits: &mut u32) -> Option<u32> {
        let cost = self.next_cost(kind);
        if *credits < cost {
            return None;
        }
        *credits -= cost;
        let track = &mut self.tracks[kind.index()];
        track.level += 1;
        Some(track.level)
    }

    /// Player stats implied by the current levels
    pub fn player_stats(&self) -> PlayerStats {
        PlayerStats::from_ledger(self)
    }
}

/// Player stats derived from upgrade levels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub max_health: f32,
    pub armor: f32,
    /// Top speed (px/s)
    pub max_speed: f32,
    /// Minimum time between gun shots (ms)
    pub fire_interval_ms: f64,
    /// Damage per bullet
    pub damage: f32,
    /// Missile track level (0 = special weapon locked)
    pub missile_level: u32,
}

/// Floor on the gun interval no matter how many upgrades are stacked
pub const MIN_FIRE_INTERVAL_MS: f64 = 50.0;

impl PlayerStats {
    pub fn from_ledger(ledger: &UpgradeLedger) -> Self {
        let lvl = |k| ledger.level(k) as f32;
        Self {
            max_health: 100.0 * lvl(UpgradeKind::MaxHealth),
            armor: 10.0 * lvl(UpgradeKind::Armor),
            max_speed: 150.0 + 30.0 * lvl(UpgradeKind::Speed),
            fire_interval_ms: (150.0 - 10.0 * ledger.level(UpgradeKind::FireRate) as f64)
                .max(MIN_FIRE_INTERVAL_MS),
            damage: 10.0 * lvl(UpgradeKind::Damage),
            missile_level: ledger.level(UpgradeKind::Missiles),
        }
    }
}
