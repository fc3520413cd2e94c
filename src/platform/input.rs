//! Human input backends

use std::collections::HashSet;

use glam::Vec2;

use super::{InputContext, InputSource, THRUST_STEP, steer_toward};
use crate::bearing;
use crate::sim::TickInput;

/// Logical keys, independent of layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    TurnLeft,
    TurnRight,
    ThrottleUp,
    ThrottleDown,
    Fire,
    Special,
}

impl Key {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to a logical key
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "a" | "arrowleft" => Some(Key::TurnLeft),
            "d" | "arrowright" => Some(Key::TurnRight),
            "w" | "arrowup" => Some(Key::ThrottleUp),
            "s" | "arrowdown" => Some(Key::ThrottleDown),
            " " => Some(Key::Fire),
            "shift" => Some(Key::Special),
            _ => None,
        }
    }
}

/// Desktop controls: held keys, mouse buttons, optional pointer steering
#[derive(Debug, Default)]
pub struct KeyboardMouse {
    held: HashSet<Key>,
    mouse_fire: bool,
    /// Special is a press, not a hold
    special_pending: bool,
    /// Last pointer position in canvas pixels
    pointer: Option<Vec2>,
    /// Fly toward the pointer when no turn key is held
    pub pointer_steering: bool,
}

impl KeyboardMouse {
    pub fn new(pointer_steering: bool) -> Self {
        Self {
            pointer_steering,
            ..Default::default()
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if key == Key::Special && !self.held.contains(&key) {
            self.special_pending = true;
        }
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Button 0 is the gun, button 2 the special weapon
    pub fn mouse_button(&mut self, button: u8, down: bool) {
        match button {
            0 => self.mouse_fire = down,
            2 if down => self.special_pending = true,
            _ => {}
        }
    }

    pub fn mouse_move(&mut self, canvas_pos: Vec2) {
        self.pointer = Some(canvas_pos);
    }

    fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl InputSource for KeyboardMouse {
    fn sample(&mut self, ctx: &InputContext) -> TickInput {
        let player = &ctx.state.player;

        let mut turn = self.is_held(Key::TurnRight) as i8 - self.is_held(Key::TurnLeft) as i8;
        if turn == 0 && self.pointer_steering {
            if let Some(pointer) = self.pointer {
                let world = ctx.camera.origin + pointer;
                turn = steer_toward(player.heading, bearing(player.pos, world));
            }
        }

        let thrust_delta = match (self.is_held(Key::ThrottleUp), self.is_held(Key::ThrottleDown)) {
            (true, false) => THRUST_STEP,
            (false, true) => -THRUST_STEP,
            _ => 0.0,
        };

        TickInput {
            turn,
            thrust_delta,
            fire: self.mouse_fire || self.is_held(Key::Fire),
            special: std::mem::take(&mut self.special_pending),
            is_pointer_device: true,
        }
    }
}

/// Stick travel in pixels from centre to rim
pub const STICK_RADIUS: f32 = 45.0;
/// Fraction of stick travel ignored around the centre
pub const STICK_DEADZONE: f32 = 0.2;

/// Mobile controls: one virtual stick plus fire and special buttons
///
/// The stick points where the plane should fly and its deflection sets the
/// throttle.
#[derive(Debug, Default)]
pub struct TouchStick {
    /// Stick deflection in pixels from its centre
    stick: Option<Vec2>,
    fire: bool,
    special_pending: bool,
}

impl TouchStick {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stick_moved(&mut self, offset: Vec2) {
        self.stick = Some(offset.clamp_length_max(STICK_RADIUS));
    }

    pub fn stick_released(&mut self) {
        self.stick = None;
    }

    pub fn fire_button(&mut self, down: bool) {
        self.fire = down;
    }

    pub fn special_button(&mut self) {
        self.special_pending = true;
    }

    /// Deflection as a unit-range vector, `None` inside the deadzone
    fn deflection(&self) -> Option<Vec2> {
        let v = self.stick? / STICK_RADIUS;
        (v.length() > STICK_DEADZONE).then_some(v)
    }
}

impl InputSource for TouchStick {
    fn sample(&mut self, ctx: &InputContext) -> TickInput {
        let player = &ctx.state.player;
        let (turn, thrust_delta) = match self.deflection() {
            Some(v) => {
                let desired = v.y.atan2(v.x);
                let throttle = (v.length() - player.thrust).clamp(-THRUST_STEP, THRUST_STEP);
                (steer_toward(player.heading, desired), throttle)
            }
            None => (0, 0.0),
        };

        TickInput {
            turn,
            thrust_delta,
            fire: self.fire,
            special: std::mem::take(&mut self.special_pending),
            is_pointer_device: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::TurnLeft));
        assert_eq!(Key::from_name("D"), Some(Key::TurnRight));
        assert_eq!(Key::from_name(" "), Some(Key::Fire));
        assert_eq!(Key::from_name("Shift"), Some(Key::Special));
        assert_eq!(Key::from_name("q"), None);
    }

    #[test]
    fn test_keyboard_sample() {
        let state = GameState::new(1);
        let ctx = InputContext::new(&state);
        let mut kb = KeyboardMouse::new(false);

        kb.key_down(Key::TurnLeft);
        kb.key_down(Key::ThrottleUp);
        kb.mouse_button(0, true);
        let input = kb.sample(&ctx);
        assert_eq!(input.turn, -1);
        assert_eq!(input.thrust_delta, THRUST_STEP);
        assert!(input.fire);
        assert!(input.is_pointer_device);

        kb.key_down(Key::TurnRight);
        assert_eq!(kb.sample(&ctx).turn, 0);
    }

    #[test]
    fn test_special_fires_once_per_press() {
        let state = GameState::new(1);
        let ctx = InputContext::new(&state);
        let mut kb = KeyboardMouse::new(false);

        kb.key_down(Key::Special);
        kb.key_down(Key::Special); // key repeat
        assert!(kb.sample(&ctx).special);
        assert!(!kb.sample(&ctx).special);

        kb.mouse_button(2, true);
        assert!(kb.sample(&ctx).special);
    }

    #[test]
    fn test_pointer_steering() {
        let state = GameState::new(1);
        let ctx = InputContext::new(&state);
        let mut kb = KeyboardMouse::new(true);

        // Player sits at the view centre facing +x; pointer below centre
        let centre = ctx.camera.viewport / 2.0;
        kb.mouse_move(centre + Vec2::new(0.0, 200.0));
        assert_eq!(kb.sample(&ctx).turn, 1);
        kb.mouse_move(centre + Vec2::new(0.0, -200.0));
        assert_eq!(kb.sample(&ctx).turn, -1);
        kb.mouse_move(centre + Vec2::new(300.0, 0.0));
        assert_eq!(kb.sample(&ctx).turn, 0);
    }

    #[test]
    fn test_touch_stick() {
        let state = GameState::new(1);
        let ctx = InputContext::new(&state);
        let mut touch = TouchStick::new();

        let idle = touch.sample(&ctx);
        assert_eq!(idle.turn, 0);
        assert!(!idle.is_pointer_device);

        // Full deflection straight down: turn clockwise, open the throttle
        touch.stick_moved(Vec2::new(0.0, 200.0));
        let input = touch.sample(&ctx);
        assert_eq!(input.turn, 1);
        assert_eq!(input.thrust_delta, THRUST_STEP);

        // Inside the deadzone
        touch.stick_moved(Vec2::new(5.0, 0.0));
        assert_eq!(touch.sample(&ctx).thrust_delta, 0.0);

        touch.special_button();
        assert!(touch.sample(&ctx).special);
        assert!(!touch.sample(&ctx).special);
    }
}
