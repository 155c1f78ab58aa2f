//! Settings persistence
//!
//! Carousel and display preferences stored as JSON in the platform config
//! directory. Missing sections fall back to their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::carousel::{CarouselConfig, DEFAULT_AUTOPLAY_PERIOD, GoToPolicy};
use crate::error::SettingsError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub carousel: CarouselSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselSettings {
    /// Milliseconds between automatic slide changes
    #[serde(default = "default_autoplay_period_ms")]
    pub autoplay_period_ms: u64,
    #[serde(default)]
    pub go_to_policy: GoToPolicy,
    /// Deck file to load instead of the built-in announcements
    #[serde(default)]
    pub deck_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Widest the banner may grow, in terminal columns
    #[serde(default = "default_width")]
    pub width: u16,
}

fn default_autoplay_period_ms() -> u64 {
    DEFAULT_AUTOPLAY_PERIOD.as_millis() as u64
}

fn default_width() -> u16 {
    72
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            autoplay_period_ms: default_autoplay_period_ms(),
            go_to_policy: GoToPolicy::default(),
            deck_path: None,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: default_width(),
        }
    }
}

impl CarouselSettings {
    pub fn to_config(&self) -> CarouselConfig {
        CarouselConfig {
            autoplay_period: Duration::from_millis(self.autoplay_period_ms),
            go_to_policy: self.go_to_policy,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("in", "civic", "CivicBanner")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from_file(&path).unwrap_or_else(|e| {
            warn!("Ignoring settings at {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        let path = Self::file_path().ok_or_else(|| {
            SettingsError::Io("Could not determine config directory".to_string())
        })?;
        self.save_to_file(&path)?;
        Ok(path)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }
}
