//! Visual settings and preferences
//!
//! Persisted in LocalStorage on the web; the native binary reads a JSON file.

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

    /// Maximum simultaneously active collision effects
    pub fn max_effects(&self) -> usize {
        match self {
            QualityPreset::Low => 4,
            QualityPreset::Medium => 16,
            QualityPreset::High => 48,
        }
    }

    /// Whether the blurred shadow glow is affordable
    pub fn shadow_glow(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Site color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }

    /// Resolve to a concrete theme given the platform's dark-mode flag
    pub fn resolve(&self, system_prefers_dark: bool) -> Theme {
        match self {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::System if system_prefers_dark => Theme::Dark,
            ThemePreference::System => Theme::Light,
        }
    }
}

/// Concrete theme used for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Hero background settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Ball motion trail
    pub trails: bool,
    /// Collision particle bursts
    pub particles: bool,
    /// Background grid
    pub grid: bool,
    /// Ball glow and paddle hit pulse
    pub glow: bool,

    // === Accessibility ===
    /// Reduced motion (no particles or trails)
    pub reduced_motion: bool,

    /// Color theme
    pub theme: ThemePreference,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            // Visual effects - all on by default
            trails: true,
            particles: true,
            grid: true,
            glow: true,

            // Accessibility
            reduced_motion: false,

            theme: ThemePreference::System,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the trail for performance
        if preset == QualityPreset::Low {
            self.trails = false;
        }
    }

    /// Effective particles (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Effective trails (respects reduced_motion)
    pub fn effective_trails(&self) -> bool {
        self.trails && !self.reduced_motion
    }

    /// Effective shadow glow (respects quality)
    pub fn effective_shadow_glow(&self) -> bool {
        self.glow && self.quality.shadow_glow()
    }

    /// Effective effect cap (0 disables emission)
    pub fn max_effects(&self) -> usize {
        if !self.effective_particles() {
            0
        } else {
            self.quality.max_effects()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "hero_pong_settings";

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

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_from_str() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
    }

    #[test]
    fn test_saved_json_reloads() {
        let mut settings = Settings::from_preset(QualityPreset::Low);
        settings.reduced_motion = true;
        settings.theme = ThemePreference::Light;
        let json = settings.to_json().unwrap();
        assert!(json.contains(r#""theme":"light""#));
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_reduced_motion_disables_particles_and_trails() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_effects(), 16);
        settings.reduced_motion = true;
        assert_eq!(settings.max_effects(), 0);
        assert!(!settings.effective_trails());
    }

    #[test]
    fn test_low_preset() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.trails);
        assert!(!settings.effective_shadow_glow());
        assert_eq!(settings.max_effects(), 4);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"quality":"High","theme":"dark"}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert_eq!(settings.theme, ThemePreference::Dark);
        assert!(settings.particles);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("{quality").is_err());
    }

    #[test]
    fn test_theme_resolution() {
        assert_eq!(ThemePreference::System.resolve(true), Theme::Dark);
        assert_eq!(ThemePreference::System.resolve(false), Theme::Light);
        assert_eq!(ThemePreference::Light.resolve(true), Theme::Light);
        assert_eq!(ThemePreference::from_str(" Dark "), Some(ThemePreference::Dark));
    }
}
