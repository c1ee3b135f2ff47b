//! Command-line argument parsing for the vitrine viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Vitrine viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "vitrine", about = "Vitrine 3D artifact viewer")]
pub struct CliArgs {
    /// Largest supported texture edge in pixels.
    #[arg(long)]
    pub max_texture_size: Option<u32>,

    /// Frames between gated quality evaluations.
    #[arg(long)]
    pub debounce_frames: Option<u32>,

    /// Treat the device as mobile when estimating the texture budget.
    #[arg(long)]
    pub assume_mobile: Option<bool>,

    /// Camera far clip distance.
    #[arg(long)]
    pub camera_far: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.max_texture_size {
            self.quality.max_texture_size = size;
        }
        if let Some(frames) = args.debounce_frames {
            self.quality.debounce_frames = frames;
        }
        if let Some(mobile) = args.assume_mobile {
            self.quality.assume_mobile = mobile;
        }
        if let Some(far) = args.camera_far {
            self.viewer.camera_far = far;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            max_texture_size: Some(8192),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.quality.max_texture_size, 8192);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults.
        assert_eq!(config.viewer.camera_far, 100.0);
        assert!(!config.quality.assume_mobile);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
