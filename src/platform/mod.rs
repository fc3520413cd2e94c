//! Platform abstraction layer
//!
//! Turns raw device state into the per-tick `TickInput` the simulation
//! consumes. The simulation never knows which backend produced a signal.
//! - `input`: keyboard + mouse and single-stick touch
//! - `autopilot`: AI pilot for demo/attract mode

pub mod autopilot;
pub mod input;

pub use autopilot::Autopilot;
pub use input::{Key, KeyboardMouse, TouchStick};

use crate::camera::CameraTransform;
use crate::sim::{GameState, TickInput};

/// Throttle change per tick while a throttle control is held
pub const THRUST_STEP: f32 = 0.02;
/// Heading error below which pointer/stick steering stops turning (radians)
pub const STEER_DEADBAND: f32 = 0.05;

/// Read-only view an input source may consult while sampling
#[derive(Debug, Clone, Copy)]
pub struct InputContext<'a> {
    pub state: &'a GameState,
    /// Maps screen-space pointer positions into the world
    pub camera: CameraTransform,
}

impl<'a> InputContext<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            camera: state.camera.transform(),
        }
    }
}

/// Produces one normalized control signal per simulation tick
pub trait InputSource {
    fn sample(&mut self, ctx: &InputContext) -> TickInput;
}

/// Turn direction that swings `heading` toward `desired`
pub(crate) fn steer_toward(heading: f32, desired: f32) -> i8 {
    let error = crate::normalize_angle(desired - heading);
    if error.abs() < STEER_DEADBAND {
        0
    } else if error > 0.0 {
        1
    } else {
        -1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_steer_toward_shortest_way() {
        assert_eq!(steer_toward(0.0, 1.0), 1);
        assert_eq!(steer_toward(0.0, -1.0), -1);
        assert_eq!(steer_toward(0.0, 0.01), 0);
        // Across the ±π seam
        assert_eq!(steer_toward(PI - 0.1, -PI + 0.1), 1);
    }
}
