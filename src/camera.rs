//! Deadzone-follow camera with screen shake
//!
//! Only the renderer consumes the camera; gameplay never reads it back.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Deadzone half-extent as a fraction of the viewport
pub const DEADZONE_FRACTION: f32 = 0.15;
/// Shake amplitude ceiling
pub const MAX_SHAKE: f32 = 20.0;
/// Per-tick shake decay
const SHAKE_DECAY: f32 = 0.9;
/// Shake below this snaps to zero
const SHAKE_EPSILON: f32 = 0.1;

/// What a renderer needs to map world space onto the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTransform {
    /// World position of the top-left corner of the view (shake included)
    pub origin: Vec2,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl CameraTransform {
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.origin
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    /// World position the view is centred on (before shake)
    pub center: Vec2,
    pub viewport: Vec2,
    /// Current shake amplitude (px)
    pub shake: f32,
    /// Shake offset rolled for this tick
    pub shake_offset: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::new(1280.0, 720.0))
    }
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            center: Vec2::ZERO,
            viewport,
            shake: 0.0,
            shake_offset: Vec2::ZERO,
        }
    }

    /// Renderer reports a new canvas size
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport.max(Vec2::ONE);
    }

    /// Jump straight to `target` (new session)
    pub fn snap_to(&mut self, target: Vec2) {
        self.center = target;
        self.shake = 0.0;
        self.shake_offset = Vec2::ZERO;
    }

    /// Half-size of the central rectangle the subject may roam freely in
    pub fn deadzone(&self) -> Vec2 {
        self.viewport * DEADZONE_FRACTION
    }

    /// Stack shake from an explosion, capped
    pub fn add_shake(&mut self, amount: f32) {
        self.shake = (self.shake + amount).min(MAX_SHAKE);
    }

    /// Override shake (player hit)
    pub fn set_shake(&mut self, amount: f32) {
        self.shake = amount.clamp(0.0, MAX_SHAKE);
    }

    /// Follow `target` with a deadzone, roll this tick's shake and decay it
    pub fn update(&mut self, target: Vec2, shake_scale: f32, rng: &mut impl Rng) {
        let dz = self.deadzone();
        let delta = target - self.center;
        if delta.x > dz.x {
            self.center.x = target.x - dz.x;
        } else if delta.x < -dz.x {
            self.center.x = target.x + dz.x;
        }
        if delta.y > dz.y {
            self.center.y = target.y - dz.y;
        } else if delta.y < -dz.y {
            self.center.y = target.y + dz.y;
        }

        let amplitude = self.shake * shake_scale;
        self.shake_offset = if amplitude > 0.0 {
            Vec2::new(
                (rng.random::<f32>() - 0.5) * amplitude,
                (rng.random::<f32>() - 0.5) * amplitude,
            )
        } else {
            Vec2::ZERO
        };

        self.shake *= SHAKE_DECAY;
        if self.shake < SHAKE_EPSILON {
            self.shake = 0.0;
        }
    }

    pub fn transform(&self) -> CameraTransform {
        CameraTransform {
            origin: self.center - self.viewport / 2.0 + self.shake_offset,
            viewport: self.viewport,
        }
    }
}
