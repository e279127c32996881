// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[video]` - Playback preferences (volume, mute, loop, rate)
//! - `[controls]` - Transport controls behavior (auto-hide delay)
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `PAWNET_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use pawnet_player::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.video.muted = Some(true);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::port::media::MountOptions;
use crate::domain::video::{ControlsHideDelay, PlaybackRate, Volume};
use crate::error::{Error, Result};
use crate::video_player::PlayerSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Video playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoConfig {
    /// Playback volume (0.0 to 1.0).
    #[serde(default = "default_volume", skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,

    /// Whether a freshly mounted player starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,

    /// Whether playback should loop.
    #[serde(
        default = "default_loop_enabled",
        skip_serializing_if = "Option::is_none"
    )]
    pub loop_enabled: Option<bool>,

    /// Playback rate multiplier; must be one of the presets.
    #[serde(
        default = "default_playback_rate",
        skip_serializing_if = "Option::is_none"
    )]
    pub playback_rate: Option<f64>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            muted: Some(false),
            loop_enabled: default_loop_enabled(),
            playback_rate: default_playback_rate(),
        }
    }
}

/// Transport controls settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// Idle time before controls hide during playback (milliseconds).
    #[serde(
        default = "default_hide_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub hide_delay_ms: Option<u64>,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: default_hide_delay_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Player configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Video playback settings.
    #[serde(default)]
    pub video: VideoConfig,

    /// Transport controls settings.
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl Config {
    /// Builds the preferences a controller is mounted with.
    ///
    /// Out-of-range values are clamped. A rate that is not a preset falls
    /// back to normal speed.
    pub fn player_settings(&self) -> PlayerSettings {
        let volume = Volume::new(self.video.volume.unwrap_or(DEFAULT_VOLUME));

        let requested_rate = self.video.playback_rate.unwrap_or(DEFAULT_PLAYBACK_RATE);
        let playback_rate = PlaybackRate::from_preset(requested_rate).unwrap_or_else(|err| {
            log::warn!("{}; using {}", err, PlaybackRate::default());
            PlaybackRate::default()
        });

        let hide_delay = ControlsHideDelay::from_millis(
            self.controls.hide_delay_ms.unwrap_or(DEFAULT_HIDE_DELAY_MS),
        );

        PlayerSettings {
            volume,
            playback_rate,
            hide_delay,
        }
    }

    /// Builds the mount options for a new player.
    pub fn mount_options(&self) -> MountOptions {
        MountOptions {
            loop_enabled: self.video.loop_enabled.unwrap_or(DEFAULT_LOOP_ENABLED),
            muted_by_default: self.video.muted.unwrap_or(false),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_volume() -> Option<f32> {
    Some(DEFAULT_VOLUME)
}

fn default_loop_enabled() -> Option<bool> {
    Some(DEFAULT_LOOP_ENABLED)
}

fn default_playback_rate() -> Option<f64> {
    Some(DEFAULT_PLAYBACK_RATE)
}

fn default_hide_delay_ms() -> Option<u64> {
    Some(DEFAULT_HIDE_DELAY_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("Ignoring {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Err(Error::Config(
        "Could not determine a config directory".to_string(),
    ))
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        let config = Config {
            video: VideoConfig {
                volume: Some(0.4),
                muted: Some(true),
                loop_enabled: Some(false),
                playback_rate: Some(1.5),
            },
            controls: ControlsConfig {
                hide_delay_ms: Some(4_000),
            },
        };

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[video]\nmuted = true\n").expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.video.muted, Some(true));
        assert_eq!(loaded.video.volume, Some(DEFAULT_VOLUME));
        assert_eq!(loaded.video.loop_enabled, Some(DEFAULT_LOOP_ENABLED));
        assert_eq!(loaded.controls.hide_delay_ms, Some(DEFAULT_HIDE_DELAY_MS));
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_on_invalid_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[video\nvolume = ")
            .expect("failed to write invalid toml");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_some());
    }

    #[test]
    fn load_with_override_without_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join(CONFIG_FILE);

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn player_settings_clamp_out_of_range_values() {
        let config = Config {
            video: VideoConfig {
                volume: Some(3.0),
                ..VideoConfig::default()
            },
            controls: ControlsConfig {
                hide_delay_ms: Some(10),
            },
        };

        let settings = config.player_settings();

        assert_eq!(settings.volume, Volume::FULL);
        assert_eq!(settings.hide_delay.as_millis(), MIN_HIDE_DELAY_MS);
    }

    #[test]
    fn player_settings_reject_non_preset_rate() {
        let config = Config {
            video: VideoConfig {
                playback_rate: Some(3.0),
                ..VideoConfig::default()
            },
            ..Config::default()
        };

        assert_eq!(
            config.player_settings().playback_rate,
            PlaybackRate::default()
        );
    }

    #[test]
    fn mount_options_follow_video_section() {
        let config = Config {
            video: VideoConfig {
                muted: Some(true),
                loop_enabled: Some(false),
                ..VideoConfig::default()
            },
            ..Config::default()
        };

        let options = config.mount_options();

        assert!(options.muted_by_default);
        assert!(!options.loop_enabled);
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.video.volume, Some(1.0));
        assert_eq!(config.video.muted, Some(false));
        assert_eq!(config.video.loop_enabled, Some(true));
        assert_eq!(config.video.playback_rate, Some(1.0));
        assert_eq!(config.controls.hide_delay_ms, Some(2_500));
    }
}
