//! AI pilot for demo/attract mode and headless runs
//!
//! Chases the nearest enemy, grabs pickups when the sky is quiet and keeps
//! clear of the world edge. Good enough to survive a few waves, not to win.

use glam::Vec2;

use super::{InputContext, InputSource, THRUST_STEP, steer_toward};
use crate::consts::{MAX_SPECIAL_CHARGE, WORLD_HALF_EXTENT};
use crate::sim::{GameState, TickInput};
use crate::{bearing, normalize_angle};

/// Distance from the world edge at which the autopilot turns back
const EDGE_MARGIN: f32 = 400.0;
/// Open fire when the target is this close...
const FIRE_RANGE: f32 = 550.0;
/// ...and within this much of the nose (radians)
const FIRE_CONE: f32 = 0.25;
/// Throttle back inside this range to avoid ramming
const CLOSE_RANGE: f32 = 220.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    /// Ticks flown, used to wander when there is nothing to chase
    ticks: u64,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where to fly and whether it is an enemy
    fn pick_target(&self, state: &GameState) -> Option<(Vec2, bool)> {
        let pos = state.player.pos;

        // Near the edge, head home first
        if pos.x.abs() > WORLD_HALF_EXTENT - EDGE_MARGIN
            || pos.y.abs() > WORLD_HALF_EXTENT - EDGE_MARGIN
        {
            return Some((Vec2::ZERO, false));
        }

        let nearest_enemy = state
            .enemies
            .iter()
            .filter(|e| !e.is_dead())
            .map(|e| (e.pos, pos.distance(e.pos)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let nearest_pickup = state
            .pickups
            .iter()
            .map(|p| (p.pos, pos.distance(p.pos)))
            .min_by(|a, b| a.1.total_cmp(&b.1));

        match (nearest_enemy, nearest_pickup) {
            // Pickup is closer than any threat: collect it first
            (Some((_, enemy_dist)), Some((pickup, pickup_dist)))
                if pickup_dist < enemy_dist / 2.0 =>
            {
                Some((pickup, false))
            }
            (Some((enemy, _)), _) => Some((enemy, true)),
            (None, Some((pickup, _))) => Some((pickup, false)),
            (None, None) => None,
        }
    }
}

impl InputSource for Autopilot {
    fn sample(&mut self, ctx: &InputContext) -> TickInput {
        self.ticks += 1;
        let state = ctx.state;
        let player = &state.player;

        let Some((target, hostile)) = self.pick_target(state) else {
            // Lazy figure-eight while waiting for the next spawn
            let turn = if (self.ticks / 180) % 2 == 0 { 1 } else { -1 };
            return TickInput {
                turn,
                thrust_delta: -THRUST_STEP,
                ..Default::default()
            };
        };

        let desired = bearing(player.pos, target);
        let off_nose = normalize_angle(desired - player.heading).abs();
        let dist = player.pos.distance(target);

        let thrust_delta = if hostile && dist < CLOSE_RANGE {
            -THRUST_STEP
        } else {
            THRUST_STEP
        };

        let fire = hostile && dist < FIRE_RANGE && off_nose < FIRE_CONE;
        let special = hostile
            && player.missile_level > 0
            && player.special_charge >= MAX_SPECIAL_CHARGE;

        TickInput {
            turn: steer_toward(player.heading, desired),
            thrust_delta,
            fire,
            special,
            is_pointer_device: true,
        }
    }
}
