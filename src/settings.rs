//! Presentation preferences
//!
//! Session-only: nothing here touches gameplay tuning, and nothing is
//! written to disk.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 150,
            QualityPreset::Medium => 600,
            QualityPreset::High => 2000,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Screen shake on explosions/impacts
    pub screen_shake: bool,
    /// Particle effects (explosions, missile smoke)
    pub particles: bool,
    /// Reduced motion (damps shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            screen_shake: true,
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Particle budget, zero when particles are off
    pub fn particle_budget(&self) -> usize {
        if self.particles {
            self.quality.max_particles()
        } else {
            0
        }
    }

    /// Multiplier applied to camera shake amplitude
    pub fn shake_scale(&self) -> f32 {
        match (self.screen_shake, self.reduced_motion) {
            (false, _) => 0.0,
            (true, true) => 0.3,
            (true, false) => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_particle_budget() {
        let mut settings = Settings::default();
        assert_eq!(settings.particle_budget(), 600);
        settings.particles = false;
        assert_eq!(settings.particle_budget(), 0);
    }

    #[test]
    fn test_shake_scale() {
        let mut settings = Settings::default();
        assert_eq!(settings.shake_scale(), 1.0);
        settings.reduced_motion = true;
        assert!(settings.shake_scale() < 1.0);
        settings.screen_shake = false;
        assert_eq!(settings.shake_scale(), 0.0);
    }
}
