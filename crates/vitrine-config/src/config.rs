//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewer/camera settings.
    pub viewer: ViewerConfig,
    /// Derivative quality streaming settings.
    pub quality: QualityConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewer and camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Viewer title shown in logs and window chrome.
    pub title: String,
    /// Vertical field of view in degrees.
    pub camera_fov_degrees: f32,
    /// Near clip plane distance.
    pub camera_near: f32,
    /// Far clip plane distance.
    pub camera_far: f32,
}

/// Derivative quality streaming configuration.
///
/// Zero means "use the built-in value" for every numeric field, so a
/// hand-edited config only needs the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityConfig {
    /// Largest supported texture edge in pixels (0 = probe the renderer).
    pub max_texture_size: u32,
    /// Frames between gated quality evaluations (0 = built-in 20).
    pub debounce_frames: u32,
    /// Maximum committed upgrades per tick (0 = built-in 2).
    pub max_upgrades_per_tick: u32,
    /// Maximum concurrent derivative fetches (0 = built-in 5).
    pub max_concurrent_loads: u32,
    /// Treat the device as mobile when estimating the texture budget.
    pub assume_mobile: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log a per-tick tier histogram.
    pub log_tier_histogram: bool,
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Vitrine Viewer".to_string(),
            camera_fov_degrees: 52.0,
            camera_near: 0.1,
            camera_far: 100.0,
        }
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            max_texture_size: 0,
            debounce_frames: 0,
            max_upgrades_per_tick: 0,
            max_concurrent_loads: 0,
            assume_mobile: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_tier_histogram: false,
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

/// File name of the config inside the config directory.
const CONFIG_FILE: &str = "config.ron";

impl Config {
    /// Load `config.ron` from the given directory, writing a default file
    /// first if none exists yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the config to `config.ron` in the given directory, creating the
    /// directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Encode)?;

        let path = config_dir.join(CONFIG_FILE);
        std::fs::create_dir_all(config_dir)
            .and_then(|()| std::fs::write(&path, serialized))
            .map_err(|source| ConfigError::Write { path, source })
    }

    /// Default config directory under the platform config root.
    pub fn default_dir() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|base| base.join("vitrine"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(!ron_str.is_empty());
        assert!(ron_str.contains("camera_far: 100.0"));
        assert!(ron_str.contains("assume_mobile: false"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        // Config missing the `quality` section entirely.
        let ron_str = "(viewer: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.quality, QualityConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.quality.max_texture_size = 8192;
        config.quality.assume_mobile = true;
        config.viewer.camera_far = 500.0;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    /// A corrupt on-disk file surfaces as a parse error naming the file.
    #[test]
    fn test_corrupt_file_reports_parse_error_with_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(format!("{err}").contains("config.ron"));
    }

    /// An existing but unreadable `config.ron` is a read error, not a
    /// silent fall back to defaults.
    #[test]
    fn test_unreadable_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory named like the config file defeats read_to_string.
        std::fs::create_dir(dir.path().join(CONFIG_FILE)).unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
