/// Application configuration
///
/// Loaded once at startup from a JSON file. Every field has a default, so a
/// missing file or a partial file is fine; a malformed file is fatal.
///
/// The file is looked up at:
/// - `$HUE_VIEWER_CONFIG` if set
/// - Linux: ~/.config/hue-viewer/config.json
/// - macOS: ~/Library/Application Support/hue-viewer/config.json
/// - Windows: %APPDATA%\hue-viewer\config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::hue::HueShift;
use super::view::ViewConfig;
use crate::error::{Result, ViewerError};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "HUE_VIEWER_CONFIG";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Which asset to show
    pub view: ViewConfig,
    /// Directory the asset path is resolved against
    pub asset_root: PathBuf,
    /// Slider position at startup
    pub initial_hue: HueShift,
    /// Initial window size in logical pixels
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            asset_root: PathBuf::from("."),
            initial_hue: HueShift::default(),
            window_width: 1024.0,
            window_height: 768.0,
        }
    }
}

impl AppConfig {
    /// Load from the default location, falling back to defaults if absent
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific file, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path).map_err(|e| ViewerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::from_json(&json).map_err(|e| ViewerError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        log::info!("📁 Loaded config from {}", path.display());
        Ok(config)
    }

    /// Absolute path of the configured asset
    pub fn asset_path(&self) -> PathBuf {
        self.asset_root.join(self.view.asset_path())
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let mut path = dirs::config_dir()?;
        path.push("hue-viewer");
        path.push("config.json");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "view": { "x": 3 } }"#).unwrap();

        assert_eq!(config.view.name, "T2202-03");
        assert_eq!(config.view.x, 3);
        assert_eq!(config.view.y, 0);
        assert_eq!(config.asset_root, PathBuf::from("."));
        assert_eq!(config.window_width, 1024.0);
    }

    #[test]
    fn test_serialization() {
        let mut config = AppConfig::default();
        config.view = ViewConfig {
            name: "T9999-01".to_string(),
            x: 4,
            y: 5,
        };
        config.initial_hue = HueShift::new(0.25);

        let json = config.to_json().unwrap();
        let restored = AppConfig::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ViewerError::Config { .. }));
    }

    #[test]
    fn test_asset_path_is_under_root() {
        let mut config = AppConfig::default();
        config.asset_root = PathBuf::from("/srv/assets");
        assert_eq!(
            config.asset_path(),
            PathBuf::from("/srv/assets/T2202-03/x-0_T2202-03_1.1.png")
        );
    }
}
