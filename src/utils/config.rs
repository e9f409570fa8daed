//! Configuration management for BVPlayer
//!
//! This module handles loading and managing application configuration
//! from various sources including config files and environment variables.

use crate::utils::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Window configuration
    pub window: WindowConfig,

    /// Playback configuration
    pub playback: PlaybackConfig,

    /// General application settings
    pub general: GeneralConfig,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial window width
    pub width: u32,

    /// Initial window height
    pub height: u32,

    /// Minimum window width enforced during edge resizing
    pub min_width: u32,

    /// Minimum window height enforced during edge resizing
    pub min_height: u32,

    /// Edge margin for resize hit testing, in pixels
    pub resize_margin: u32,

    /// Height of the custom titlebar strip
    pub chrome_height: u32,

    /// Width of each chrome button (minimize/maximize/close)
    pub control_size: u32,

    /// Start in fullscreen mode
    pub fullscreen: bool,

    /// Window title
    pub title: String,

    /// Always on top
    pub always_on_top: bool,
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0 - 1.0, linear gain)
    pub volume: f32,

    /// Volume step applied by keys and the mouse wheel
    pub volume_step: f32,

    /// Seek step in seconds
    pub seek_step: u64,

    /// Auto-play when media is loaded
    pub auto_play: bool,

    /// Remember playback position per file
    pub remember_position: bool,
}

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            min_width: 400,
            min_height: 300,
            resize_margin: 6,
            chrome_height: 32,
            control_size: 46,
            fullscreen: false,
            title: "BVPlayer".to_string(),
            always_on_top: false,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
            volume_step: 0.05,
            seek_step: 10,
            auto_play: true,
            remember_position: true,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from various sources
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. Default values
    /// 2. System config file (/etc/bvplayer/config.toml on Linux)
    /// 3. User config file (~/.config/bvplayer/config.toml on Linux)
    /// 4. Environment variables (BVPLAYER_* prefix)
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(system_path) = Self::system_config_path() {
            if system_path.exists() {
                config.merge_from_file(&system_path)?;
            }
        }

        if let Some(user_path) = Self::user_config_path() {
            if user_path.exists() {
                config.merge_from_file(&user_path)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        let path = Self::user_config_path()
            .ok_or_else(|| PlayerError::Config("Cannot determine user config path".to_string()))?;
        self.save_to(&path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlayerError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| PlayerError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml)
            .map_err(|e| PlayerError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Merge configuration from a TOML file
    pub fn merge_from_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PlayerError::Config(format!("Failed to read config file: {}", e)))?;

        let file_config: Config = toml::from_str(&contents)
            .map_err(|e| PlayerError::Config(format!("Failed to parse config file: {}", e)))?;

        *self = file_config;

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(width) = std::env::var("BVPLAYER_WINDOW_WIDTH") {
            self.window.width = width
                .parse()
                .map_err(|_| PlayerError::Config("Invalid BVPLAYER_WINDOW_WIDTH".to_string()))?;
        }

        if let Ok(height) = std::env::var("BVPLAYER_WINDOW_HEIGHT") {
            self.window.height = height
                .parse()
                .map_err(|_| PlayerError::Config("Invalid BVPLAYER_WINDOW_HEIGHT".to_string()))?;
        }

        if let Ok(volume) = std::env::var("BVPLAYER_VOLUME") {
            self.playback.volume = volume
                .parse()
                .map_err(|_| PlayerError::Config("Invalid BVPLAYER_VOLUME".to_string()))?;
        }

        if let Ok(log_level) = std::env::var("BVPLAYER_LOG_LEVEL") {
            self.general.log_level = log_level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(PlayerError::Config(
                "Window dimensions must be non-zero".to_string(),
            ));
        }

        if self.window.min_width > self.window.width || self.window.min_height > self.window.height
        {
            return Err(PlayerError::Config(
                "Minimum window size exceeds initial size".to_string(),
            ));
        }

        if self.window.resize_margin == 0 {
            return Err(PlayerError::Config(
                "Resize margin must be non-zero".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.volume) {
            return Err(PlayerError::Config(
                "Volume must be between 0.0 and 1.0".to_string(),
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.general.log_level.as_str()) {
            return Err(PlayerError::Config(format!(
                "Invalid log level '{}', must be one of: {:?}",
                self.general.log_level, valid_log_levels
            )));
        }

        Ok(())
    }

    /// Get system config file path
    fn system_config_path() -> Option<PathBuf> {
        #[cfg(target_os = "linux")]
        return Some(PathBuf::from("/etc/bvplayer/config.toml"));

        #[cfg(target_os = "windows")]
        return std::env::var("PROGRAMDATA")
            .ok()
            .map(|p| PathBuf::from(p).join("BVPlayer").join("config.toml"));

        #[cfg(target_os = "macos")]
        return Some(PathBuf::from(
            "/Library/Application Support/BVPlayer/config.toml",
        ));

        #[allow(unreachable_code)]
        None
    }

    /// Get user config file path
    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bvplayer").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.window.min_width, 400);
        assert_eq!(config.window.resize_margin, 6);
        assert!(!config.window.fullscreen);
        assert_eq!(config.playback.volume, 0.7);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());

        config.window.width = 1280;
        config.playback.volume = 1.5;
        assert!(config.validate().is_err());

        config.playback.volume = 0.5;
        config.general.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_size_validation() {
        let mut config = Config::default();
        config.window.min_width = 2000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml).unwrap();

        assert_eq!(config.window.width, deserialized.window.width);
        assert_eq!(config.playback.volume, deserialized.playback.volume);
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.window.width = 1024;
        config.playback.seek_step = 5;
        config.save_to(&path).unwrap();

        let mut loaded = Config::default();
        loaded.merge_from_file(&path).unwrap();
        assert_eq!(loaded.window.width, 1024);
        assert_eq!(loaded.playback.seek_step, 5);
    }
}
