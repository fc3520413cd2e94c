//! Browser bridge
//!
//! JS owns the canvas, the DOM overlay and raw events. It forwards events
//! here, calls `frame` from `requestAnimationFrame`, and draws the JSON
//! snapshot it gets back.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::platform::{InputContext, InputSource, Key, KeyboardMouse, TouchStick};
use crate::session::Session;
use crate::settings::QualityPreset;
use crate::sim::{Command, TickInput};
use crate::snapshot::{FrameSnapshot, Renderer};
use crate::upgrades::UpgradeKind;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed (hot reload)
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Sky Ace starting...");
}

/// Whichever device touched the game last drives the plane
#[derive(Debug, Default)]
struct WebInput {
    pointer: KeyboardMouse,
    touch: TouchStick,
    using_touch: bool,
}

impl InputSource for WebInput {
    fn sample(&mut self, ctx: &InputContext) -> TickInput {
        if self.using_touch {
            self.touch.sample(ctx)
        } else {
            self.pointer.sample(ctx)
        }
    }
}

/// Keeps the last frame as JSON for the JS draw loop
#[derive(Debug, Default)]
struct JsonRenderer {
    last: String,
}

impl Renderer for JsonRenderer {
    fn render(&mut self, frame: &FrameSnapshot) {
        match serde_json::to_string(frame) {
            Ok(json) => self.last = json,
            Err(err) => log::warn!("Frame serialization failed: {err}"),
        }
    }
}

fn parse_command(name: &str) -> Option<Command> {
    let command = match name {
        "start" => Command::Start,
        "retry" => Command::Retry,
        "next_wave" => Command::NextWave,
        "open_hangar" => Command::OpenHangar,
        "return_to_menu" => Command::ReturnToMenu,
        other => {
            let kind = match other.strip_prefix("purchase:")? {
                "max_health" => UpgradeKind::MaxHealth,
                "armor" => UpgradeKind::Armor,
                "speed" => UpgradeKind::Speed,
                "fire_rate" => UpgradeKind::FireRate,
                "damage" => UpgradeKind::Damage,
                "missiles" => UpgradeKind::Missiles,
                _ => return None,
            };
            Command::Purchase(kind)
        }
    };
    Some(command)
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<WebInput, JsonRenderer>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64) -> WebGame {
        let mut input = WebInput::default();
        input.pointer.pointer_steering = true;
        WebGame {
            session: Session::new(seed as u64, input, JsonRenderer::default()),
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.session
            .state_mut()
            .camera
            .set_viewport(Vec2::new(width, height));
    }

    pub fn set_quality(&mut self, preset: &str) {
        match QualityPreset::from_str(preset) {
            Some(quality) => self.session.state_mut().settings.quality = quality,
            None => log::warn!("Unknown quality preset {preset:?}"),
        }
    }

    pub fn set_screen_shake(&mut self, enabled: bool) {
        self.session.state_mut().settings.screen_shake = enabled;
    }

    pub fn key_down(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            let input = self.session.input_mut();
            input.using_touch = false;
            input.pointer.key_down(key);
        }
    }

    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_name(name) {
            self.session.input_mut().pointer.key_up(key);
        }
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        let input = self.session.input_mut();
        input.using_touch = false;
        input.pointer.mouse_move(Vec2::new(x, y));
    }

    pub fn mouse_button(&mut self, button: u8, down: bool) {
        let input = self.session.input_mut();
        input.using_touch = false;
        input.pointer.mouse_button(button, down);
    }

    pub fn touch_stick(&mut self, dx: f32, dy: f32) {
        let input = self.session.input_mut();
        input.using_touch = true;
        input.touch.stick_moved(Vec2::new(dx, dy));
    }

    pub fn touch_release(&mut self) {
        self.session.input_mut().touch.stick_released();
    }

    pub fn touch_fire(&mut self, down: bool) {
        let input = self.session.input_mut();
        input.using_touch = true;
        input.touch.fire_button(down);
    }

    pub fn touch_special(&mut self) {
        let input = self.session.input_mut();
        input.using_touch = true;
        input.touch.special_button();
    }

    /// Advance by `elapsed_ms` of wall time; returns the frame as JSON
    pub fn frame(&mut self, elapsed_ms: f64) -> String {
        self.session.frame((elapsed_ms / 1000.0) as f32);
        self.session.renderer().last.clone()
    }

    pub fn command(&mut self, name: &str) -> Result<(), JsValue> {
        let command = parse_command(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown command {name}")))?;
        self.session
            .command(command)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn hud_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.hud())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Events since the last call, for audio cues
    pub fn events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events())
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }
}
