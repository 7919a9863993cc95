//! Player preferences
//!
//! Stored as one JSON blob next to the high score in the same key/value store.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Effects budget chosen by the player
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

    /// Case-insensitive name lookup, as typed in a query string or menu
    pub fn parse(name: &str) -> Option<Self> {
        [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High]
            .into_iter()
            .find(|preset| preset.as_str().eq_ignore_ascii_case(name))
            .or_else(|| name.eq_ignore_ascii_case("med").then_some(QualityPreset::Medium))
    }

    /// Live particle budget
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 500,
            QualityPreset::High => 2000,
        }
    }
}

/// Everything the options menu can change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Entity trails
    pub trails: bool,
    /// Particle effects (explosions, sparks, thrust)
    pub particles: bool,

    // === Simulation ===
    /// Step the world at a fixed 120 Hz instead of once per frame
    pub fixed_timestep: bool,

    // === Audio ===
    /// Volumes, each in [0, 1]
    pub master_volume: f32,
    pub sfx_volume: f32,
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            trails: true,
            particles: true,
            fixed_timestep: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "geoshooter-settings";

    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Particle cap handed to the world, zero when particles are off
    pub fn max_particles(&self) -> usize {
        if self.particles { self.quality.max_particles() } else { 0 }
    }

    /// Pull volumes back into range after loading hand-edited data
    pub fn sanitize(&mut self) {
        for vol in [&mut self.master_volume, &mut self.sfx_volume, &mut self.music_volume] {
            *vol = if vol.is_finite() { vol.clamp(0.0, 1.0) } else { 1.0 };
        }
    }

    /// Load settings, falling back to defaults when missing or unreadable
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.sanitize();
                    info!("Loaded settings ({} quality)", settings.quality.as_str());
                    settings
                }
                Err(e) => {
                    warn!("Ignoring corrupt settings: {e}");
                    Self::default()
                }
            },
            Ok(None) => {
                info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                warn!("Could not read settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings. Failures are logged and otherwise ignored.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not encode settings: {e}");
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => info!("Settings saved"),
            Err(e) => warn!("Could not save settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_particle_caps() {
        assert_eq!(Settings::from_preset(QualityPreset::Low).max_particles(), 100);
        assert_eq!(Settings::default().max_particles(), 500);
        let mut s = Settings::from_preset(QualityPreset::High);
        assert_eq!(s.max_particles(), 2000);
        s.particles = false;
        assert_eq!(s.max_particles(), 0);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::parse("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::parse("ultra"), None);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        let mut s = Settings::from_preset(QualityPreset::Low);
        s.fixed_timestep = true;
        s.save(&mut store);
        assert_eq!(Settings::load(&store), s);
    }

    #[test]
    fn test_corrupt_settings_fall_back() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_partial_settings_fill_defaults_and_clamp() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"quality":"High","master_volume":2.5}"#)
            .unwrap();
        let s = Settings::load(&store);
        assert_eq!(s.quality, QualityPreset::High);
        assert_eq!(s.master_volume, 1.0);
        assert!(s.particles);
    }
}
