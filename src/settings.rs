use serde::{Deserialize, Serialize};

use crate::components::media_controls::session::Artwork;
use crate::error::ControlError;

/// Tunables shared by both controllers. Every field falls back to its default
/// when missing from stored JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub seek_step_secs: f64,
    pub volume_step: f64,
    pub session_seek_offset_secs: f64,
    pub near_end_offset_secs: f64,
    pub message_timeout_ms: u32,
    pub speed_indicator_timeout_ms: u32,
    pub session_artist: String,
    pub session_album: String,
    pub audio_artwork: Vec<Artwork>,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            seek_step_secs: 5.0,
            volume_step: 0.1,
            session_seek_offset_secs: 10.0,
            near_end_offset_secs: 5.0,
            message_timeout_ms: 1000,
            speed_indicator_timeout_ms: 2000,
            session_artist: "Local Media Server".to_string(),
            session_album: "Media Library".to_string(),
            audio_artwork: vec![Artwork {
                src: "/static/favicon.svg".to_string(),
                sizes: "96x96".to_string(),
                mime_type: "image/svg+xml".to_string(),
            }],
        }
    }
}

impl PlayerSettings {
    pub fn from_json(raw: &str) -> Result<Self, ControlError> {
        let parsed: PlayerSettings = serde_json::from_str(raw)?;
        Ok(parsed.sanitized())
    }

    /// Replace non-finite or non-positive step sizes with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = PlayerSettings::default();
        if !positive(self.seek_step_secs) {
            self.seek_step_secs = defaults.seek_step_secs;
        }
        if !positive(self.volume_step) {
            self.volume_step = defaults.volume_step;
        }
        self.volume_step = self.volume_step.min(1.0);
        if !positive(self.session_seek_offset_secs) {
            self.session_seek_offset_secs = defaults.session_seek_offset_secs;
        }
        if !self.near_end_offset_secs.is_finite() || self.near_end_offset_secs < 0.0 {
            self.near_end_offset_secs = defaults.near_end_offset_secs;
        }
        self
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let settings = PlayerSettings::from_json("{}").unwrap();
        assert_eq!(settings, PlayerSettings::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let settings =
            PlayerSettings::from_json(r#"{"seek_step_secs": 10, "session_album": "Shows"}"#)
                .unwrap();
        assert_eq!(settings.seek_step_secs, 10.0);
        assert_eq!(settings.session_album, "Shows");
        assert_eq!(settings.volume_step, 0.1);
        assert_eq!(settings.message_timeout_ms, 1000);
    }

    #[test]
    fn bad_steps_are_replaced() {
        let settings =
            PlayerSettings::from_json(r#"{"seek_step_secs": -3, "volume_step": 0}"#).unwrap();
        assert_eq!(settings.seek_step_secs, 5.0);
        assert_eq!(settings.volume_step, 0.1);
    }

    #[test]
    fn malformed_json_is_a_settings_error() {
        let err = PlayerSettings::from_json("{not json").unwrap_err();
        assert!(matches!(err, ControlError::Settings(_)));
    }

    #[test]
    fn artwork_uses_type_key() {
        let settings = PlayerSettings::default();
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json["audio_artwork"][0]["type"], "image/svg+xml");
    }
}
