//! Display preferences
//!
//! Persisted in LocalStorage as JSON; never holds game progress.

use serde::{Deserialize, Serialize};

use crate::consts::STAR_COUNT;

/// Upper bound for a custom star pool
pub const MAX_STAR_COUNT: usize = 5000;

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

    /// Star pool size for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 300,
            QualityPreset::Medium => STAR_COUNT,
            QualityPreset::High => 1200,
        }
    }
}

/// Starfield settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Explicit star count, overrides the preset
    pub star_count: Option<usize>,
    /// Idle shooting stars
    pub meteors: bool,
    /// Score readout during combat
    pub show_hud: bool,
    /// Crosshair at the pointer during combat
    pub show_crosshair: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            star_count: None,
            meteors: true,
            show_hud: true,
            show_crosshair: true,
        }
    }
}

impl Settings {
    /// Effective star pool size
    pub fn star_count(&self) -> usize {
        self.star_count
            .unwrap_or_else(|| self.quality.star_count())
            .clamp(1, MAX_STAR_COUNT)
    }

    /// Parse stored settings, clamping an out-of-range star count
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self::normalized)
    }

    fn normalized(mut self) -> Self {
        self.star_count = self.star_count.map(|n| n.clamp(1, MAX_STAR_COUNT));
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "datapad_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
