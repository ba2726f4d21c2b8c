//! Game settings and tuning
//!
//! Everything data-driven lives here: body motion, gameplay timings,
//! camera follow, message banner and music. Loaded from JSON; missing
//! fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audio::MusicTuning;
use crate::camera::CameraTuning;
use crate::sim::{BodyTuning, GameplayTuning};
use crate::ui::UiTuning;

/// Error type for settings and level loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Parsed but semantically unusable.
    #[error("invalid: {0}")]
    Invalid(String),
}

/// All tuning for a play session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub body: BodyTuning,
    pub gameplay: GameplayTuning,
    pub camera: CameraTuning,
    pub ui: UiTuning,
    pub music: MusicTuning,
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Settings at {} not usable ({e})", path.as_ref().display());
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the solver or sequences cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let body = &self.body;
        if !(body.size.x > 0.0 && body.size.y > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "body size must be positive, got {:?}",
                body.size
            )));
        }
        if body.ground_check_padding < 0.0 {
            return Err(ConfigError::Invalid("ground_check_padding is negative".into()));
        }

        let timings = [
            ("death_delay", self.gameplay.death_delay),
            ("watchdog_timeout", self.gameplay.watchdog_timeout),
            ("respawn_grace", self.gameplay.respawn_grace),
            ("goal_duration", self.gameplay.goal_duration),
            ("fade_in_time", self.ui.fade_in_time),
            ("smooth_time", self.camera.smooth_time),
        ];
        if let Some((name, value)) = timings.iter().find(|(_, v)| v.is_nan() || *v < 0.0) {
            return Err(ConfigError::Invalid(format!("{name} must be >= 0, got {value}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.body.gravity, -60.0);
        assert_eq!(settings.body.max_solver_iters, 8);
        assert_eq!(settings.gameplay.completed_message, "Level complete!");
    }

    #[test]
    fn test_partial_document_overrides_fields() {
        let json = r#"{
            "body": { "jump_speed": 18.5, "max_substeps": 4 },
            "gameplay": { "reload_scene_on_death": true, "next_level": "level-2" }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.body.jump_speed, 18.5);
        assert_eq!(settings.body.max_substeps, 4);
        assert_eq!(settings.body.move_speed_x, 12.0);
        assert!(settings.gameplay.reload_scene_on_death);
        assert_eq!(settings.gameplay.next_level.as_deref(), Some("level-2"));
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut settings = Settings::default();
        settings.camera.x_offset = 3.5;
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(Settings::from_json("{ not json"), Err(ConfigError::Serde(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "body": { "size": [0.0, 1.0] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Settings::from_json(r#"{ "gameplay": { "death_delay": -1.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("death_delay"));
    }

    #[test]
    fn test_nan_timing_rejected() {
        let mut settings = Settings::default();
        settings.camera.smooth_time = f64::NAN;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("smooth_time"));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load_or_default("/nonexistent/box-runner/settings.json");
        assert_eq!(settings, Settings::default());
        assert!(matches!(
            Settings::load("/nonexistent/box-runner/settings.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
