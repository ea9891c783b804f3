//! Player preferences
//!
//! Kept in memory for the lifetime of the page; a fresh page starts from defaults.

use serde::{Deserialize, Serialize};

/// Audio and behaviour preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
    /// Pause automatically when the tab is hidden
    pub pause_on_hidden: bool,
    /// Let the car drive itself
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            pause_on_hidden: true,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Effective impact-sound volume
    pub fn sfx_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Effective background-music volume
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Read overrides from a JSON document (e.g. a `data-settings` attribute)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gains() {
        let mut settings = Settings::default();
        assert!((settings.sfx_gain() - 0.8).abs() < 1e-6);
        assert!((settings.music_gain() - 0.56).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.sfx_gain(), 0.0);
        assert_eq!(settings.music_gain(), 0.0);
    }

    #[test]
    fn test_partial_json() {
        let settings = Settings::from_json(r#"{ "muted": true, "autopilot": true }"#).unwrap();
        assert!(settings.muted);
        assert!(settings.autopilot);
        assert!(settings.pause_on_hidden);
        assert_eq!(settings.master_volume, 0.8);
    }
}
