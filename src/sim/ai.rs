//! Enemy steering policy
//!
//! Pure mapping from (self, target, timer, random roll) to a velocity.
//! The archetype is the whole state machine: there is no hidden AI state.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, PI};

use glam::Vec2;

use super::enemy::Archetype;
use crate::{bearing, heading_vector};

/// Scout bails out when the player gets this close
pub const SCOUT_RETREAT_RANGE: f32 = 160.0;
/// Fighter starts strafing inside this range
pub const FIGHTER_STRAFE_RANGE: f32 = 300.0;
/// Veteran standoff band
pub const VETERAN_MIN_RANGE: f32 = 240.0;
pub const VETERAN_MAX_RANGE: f32 = 420.0;
/// Bomber loiters inside this range
pub const BOMBER_LOITER_RANGE: f32 = 400.0;
/// Per-tick velocity multiplier while a bomber loiters
pub const BOMBER_LOITER_DRAG: f32 = 0.9;
/// Ace may break hard when the player is this close
pub const ACE_EVADE_RANGE: f32 = 180.0;
/// Per-tick chance of an evasive break
pub const ACE_EVADE_CHANCE: f32 = 0.02;
/// Speed multiplier during an evasive break
pub const ACE_EVADE_BOOST: f32 = 1.2;

/// Everything the policy looks at
#[derive(Debug, Clone, Copy)]
pub struct SteeringInput {
    pub archetype: Archetype,
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub target: Vec2,
    /// Ticks since spawn
    pub timer: u32,
    /// Uniform roll in [0, 1), drawn fresh each tick by the caller
    pub roll: f32,
}

/// Desired velocity for this tick
pub fn steer(input: &SteeringInput) -> Vec2 {
    let dist = input.pos.distance(input.target);
    let to_target = bearing(input.pos, input.target);
    let t = input.timer as f32;
    let speed = input.speed;

    let fly = |angle: f32| heading_vector(angle) * speed;
    let close = || fly(to_target);
    let retreat = || fly(to_target + PI);

    match input.archetype {
        Archetype::Rookie => close(),

        Archetype::Scout => {
            if dist < SCOUT_RETREAT_RANGE {
                retreat()
            } else {
                close()
            }
        }

        Archetype::Fighter => {
            if dist < FIGHTER_STRAFE_RANGE {
                fly(to_target + FRAC_PI_2 * (t * 0.05).sin())
            } else {
                close()
            }
        }

        Archetype::Veteran => {
            if dist > VETERAN_MAX_RANGE {
                close()
            } else if dist < VETERAN_MIN_RANGE {
                retreat()
            } else {
                fly(to_target + FRAC_PI_2)
            }
        }

        Archetype::Bomber => {
            if dist > BOMBER_LOITER_RANGE {
                close()
            } else {
                input.vel * BOMBER_LOITER_DRAG
            }
        }

        Archetype::Elite => fly(to_target + FRAC_PI_2 * (t * 0.035).sin()),

        Archetype::Ace => {
            if dist < ACE_EVADE_RANGE && input.roll < ACE_EVADE_CHANCE {
                // Low half of the roll breaks left, high half breaks right
                let side = if input.roll < ACE_EVADE_CHANCE / 2.0 { 1.0 } else { -1.0 };
                heading_vector(to_target + side * 0.6 * PI) * speed * ACE_EVADE_BOOST
            } else {
                fly(to_target + FRAC_PI_3 * (t * 0.1).sin())
            }
        }
    }
}
