//! User preferences for the calculator window

use crate::engine::DEFAULT_MAX_DIGITS;
use serde::{Deserialize, Serialize};
use slowcore::storage::{self, StorageError};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Digits the entry accepts while typing (one more with a minus sign).
    pub max_digits: usize,
    pub window_width: f32,
    pub window_height: f32,
    /// Font file for the two displays; searched for by name when unset.
    pub display_font: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_digits: DEFAULT_MAX_DIGITS,
            window_width: 280.0,
            window_height: 400.0,
            display_font: None,
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        storage::config_dir("slowcalc").join("settings.json")
    }

    /// Load settings, falling back to defaults.
    ///
    /// A missing file is written out with defaults so there is something to
    /// edit; a corrupt one is left alone and logged.
    pub fn load_or_default(path: &Path) -> Self {
        Self::read(path, true)
    }

    /// Like [`Settings::load_or_default`] but never touches the disk.
    pub fn load(path: &Path) -> Self {
        Self::read(path, false)
    }

    fn read(path: &Path, write_defaults: bool) -> Self {
        match storage::load_json::<Settings>(path) {
            Ok(settings) => settings.sanitized(),
            Err(StorageError::NotFound(_)) => {
                let settings = Settings::default();
                if write_defaults {
                    if let Err(e) = storage::save_json(&settings, path) {
                        tracing::warn!(path = %path.display(), error = %e, "could not write default settings");
                    }
                }
                settings
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Settings::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        let defaults = Settings::default();
        self.max_digits = self.max_digits.clamp(1, 64);
        if !(self.window_width.is_finite() && self.window_width >= 160.0) {
            self.window_width = defaults.window_width;
        }
        if !(self.window_height.is_finite() && self.window_height >= 240.0) {
            self.window_height = defaults.window_height;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slowcalc").join("settings.json");

        let settings = Settings::load_or_default(&path);
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
    }

    #[test]
    fn test_plain_load_leaves_missing_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slowcalc").join("settings.json");

        assert_eq!(Settings::load(&path), Settings::default());
        assert!(!path.exists());
        assert!(!dir.path().join("slowcalc").exists());
    }

    #[test]
    fn test_plain_load_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "max_digits": 99 }"#).unwrap();

        assert_eq!(Settings::load(&path).max_digits, 64);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "max_digits": 10 }"#).unwrap();

        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.max_digits, 10);
        assert_eq!(settings.window_width, Settings::default().window_width);
        assert_eq!(settings.display_font, None);
    }

    #[test]
    fn test_corrupt_file_uses_defaults_and_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "max_digits = 10").unwrap();

        assert_eq!(Settings::load_or_default(&path), Settings::default());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "max_digits = 10");
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "max_digits": 0, "window_width": 10.0, "window_height": 900.0 }"#).unwrap();

        let settings = Settings::load_or_default(&path);
        assert_eq!(settings.max_digits, 1);
        assert_eq!(settings.window_width, Settings::default().window_width);
        assert_eq!(settings.window_height, 900.0);
    }
}
