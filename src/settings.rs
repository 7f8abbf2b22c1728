//! Game settings and preferences
//!
//! Persisted in LocalStorage on the web build.

use serde::{Deserialize, Serialize};

/// Butterfly wing colour picked on the start screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WingColor {
    #[default]
    Purple,
    Pink,
    Blue,
    Rainbow,
}

impl WingColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            WingColor::Purple => "purple",
            WingColor::Pink => "pink",
            WingColor::Blue => "blue",
            WingColor::Rainbow => "rainbow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "purple" => Some(WingColor::Purple),
            "pink" => Some(WingColor::Pink),
            "blue" => Some(WingColor::Blue),
            "rainbow" => Some(WingColor::Rainbow),
            _ => None,
        }
    }

    /// Left and right wing fill colours
    pub fn wing_fills(&self) -> (&'static str, &'static str) {
        match self {
            WingColor::Purple => ("#9b59b6", "#8e44ad"),
            WingColor::Pink => ("#e91e63", "#c2185b"),
            WingColor::Blue => ("#3498db", "#2980b9"),
            WingColor::Rainbow => ("#ff0080", "#00ff80"),
        }
    }
}

/// How bee contact drains the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HazardPenalty {
    /// Every tick spent overlapping a bee costs time
    #[default]
    PerTick,
    /// Only the first tick of each continuous overlap costs time
    PerContact,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub wing_color: WingColor,
    pub hazard_penalty: HazardPenalty,

    // === Visual Effects ===
    /// Flower pickup bursts
    pub particles: bool,
    /// Cap on live particles
    pub max_particles: usize,
    /// Red flash when a bee hits
    pub hit_flash: bool,
    /// Reduced motion (no flashes, no flower bobbing)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wing_color: WingColor::Purple,
            hazard_penalty: HazardPenalty::PerTick,

            particles: true,
            max_particles: 500,
            hit_flash: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective hit flash (respects reduced_motion)
    pub fn effective_hit_flash(&self) -> bool {
        self.hit_flash && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "butterfly_meadow_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
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
            if let Ok(json) = serde_json::to_string(self) {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wing_color_names() {
        for color in [WingColor::Purple, WingColor::Pink, WingColor::Blue, WingColor::Rainbow] {
            assert_eq!(WingColor::from_str(color.as_str()), Some(color));
        }
        assert_eq!(WingColor::from_str("PINK"), Some(WingColor::Pink));
        assert_eq!(WingColor::from_str("green"), None);
    }

    #[test]
    fn test_reduced_motion_disables_flash() {
        let mut settings = Settings::default();
        assert!(settings.effective_hit_flash());
        settings.reduced_motion = true;
        assert!(!settings.effective_hit_flash());
    }

    #[test]
    fn test_particles_off_zero_cap() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), 500);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_unknown_saved_fields_ignored() {
        let json = r#"{ "wing_color": "Pink", "show_fps": true }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.wing_color, WingColor::Pink);
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let settings: Settings = serde_json::from_str(r#"{ "wing_color": "Blue" }"#).unwrap();
        assert_eq!(settings.wing_color, WingColor::Blue);
        assert_eq!(settings.hazard_penalty, HazardPenalty::PerTick);
        assert!(settings.particles);
    }
}
