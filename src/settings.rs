//! Game settings
//!
//! Session timing, field size and hole layout. Loaded from LocalStorage on
//! the web, defaults on native.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::HoleSpec;

/// Errors produced while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of one session
    pub session_duration_ms: u64,
    /// Active window at the start of the session
    pub base_window_ms: u64,
    /// Target frame rate
    pub fps: u32,
    /// Play field size in pixels
    pub field_width: u32,
    pub field_height: u32,
    /// Clicks handled per frame
    pub max_events_per_frame: usize,
    /// Fixed seed; random when unset
    pub seed: Option<u64>,
    /// Hole layout in canonical field space
    pub layout: Vec<HoleSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_duration_ms: SESSION_DURATION_MS,
            base_window_ms: BASE_WINDOW_MS,
            fps: FPS,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            max_events_per_frame: MAX_EVENTS_PER_FRAME,
            seed: None,
            layout: Self::grid(GRID_COLUMNS, GRID_ROWS, HOLE_GAP, HOLE_SIZE, HOLE_GAP),
        }
    }
}

impl Settings {
    /// Regular grid of square holes, row by row from the bottom-left corner
    pub fn grid(columns: u32, rows: u32, margin: i32, size: i32, gap: i32) -> Vec<HoleSpec> {
        let step = size + gap;
        (0..rows as i32)
            .flat_map(|row| {
                (0..columns as i32)
                    .map(move |col| HoleSpec::new(margin + col * step, margin + row * step, size))
            })
            .collect()
    }

    /// Milliseconds per frame at the target rate
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.fps as f64
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.session_duration_ms == 0 {
            return Err(SettingsError::Invalid("session_duration_ms must be positive".into()));
        }
        if self.base_window_ms == 0 {
            return Err(SettingsError::Invalid("base_window_ms must be positive".into()));
        }
        if self.fps == 0 {
            return Err(SettingsError::Invalid("fps must be positive".into()));
        }
        if self.field_width == 0 || self.field_height == 0 {
            return Err(SettingsError::Invalid("field size must be positive".into()));
        }
        if let Some(i) = self.layout.iter().position(|h| h.size <= 0) {
            return Err(SettingsError::Invalid(format!("hole {i} has non-positive size")));
        }
        let overflows =
            |h: &HoleSpec| h.x.checked_add(h.size).is_none() || h.y.checked_add(h.size).is_none();
        if let Some(i) = self.layout.iter().position(overflows) {
            return Err(SettingsError::Invalid(format!("hole {i} extends past i32 range")));
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "whack_hole_settings";

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

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_matches_field() {
        let settings = Settings::default();
        assert_eq!(settings.layout.len(), 15);
        assert_eq!(settings.layout[0], HoleSpec::new(50, 50, 300));
        assert_eq!(settings.layout[4], HoleSpec::new(1450, 50, 300));
        assert_eq!(settings.layout[5], HoleSpec::new(50, 400, 300));
        assert_eq!(settings.layout[14], HoleSpec::new(1450, 750, 300));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let settings =
            Settings::from_json(r#"{"session_duration_ms": 1000, "seed": 7}"#).unwrap();
        assert_eq!(settings.session_duration_ms, 1000);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.base_window_ms, BASE_WINDOW_MS);
        assert_eq!(settings.layout.len(), 15);
    }

    #[test]
    fn test_from_json_custom_layout() {
        let settings =
            Settings::from_json(r#"{"layout": [{"x": 0, "y": 0, "size": 10}]}"#).unwrap();
        assert_eq!(settings.layout, vec![HoleSpec::new(0, 0, 10)]);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{"base_window_ms": 0}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"layout": [{"x": 0, "y": 0, "size": 0}]}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"layout": [{"x": 2147483000, "y": 0, "size": 1000}]}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"layout": [{"x": 0, "y": 2147483000, "size": 1000}]}"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_frame_ms() {
        let settings = Settings::default();
        assert!((settings.frame_ms() - 16.666).abs() < 0.01);
    }
}
