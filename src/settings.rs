//! Persisted player settings.
//!
//! Settings live in a small JSON file. Anything missing, unreadable or out
//! of range falls back to the built-in defaults so a damaged file never
//! stops the game from starting.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::game::constants::DEFAULT_ENEMY_COUNT;

pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mouse_sensitivity: f32,
    pub fov: f32,
    pub bg_volume: f32,
    pub fx_volume: f32,
    pub enemy_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1000.0,
            fov: 75.0,
            bg_volume: 0.5,
            fx_volume: 0.8,
            enemy_count: DEFAULT_ENEMY_COUNT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingKey {
    Sensitivity,
    Fov,
    BgVolume,
    FxVolume,
    Enemies,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::Sensitivity,
        SettingKey::Fov,
        SettingKey::BgVolume,
        SettingKey::FxVolume,
        SettingKey::Enemies,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "sensitivity" => Some(SettingKey::Sensitivity),
            "fov" => Some(SettingKey::Fov),
            "bg_volume" => Some(SettingKey::BgVolume),
            "fx_volume" => Some(SettingKey::FxVolume),
            "enemies" => Some(SettingKey::Enemies),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SettingKey::Sensitivity => "sensitivity",
            SettingKey::Fov => "fov",
            SettingKey::BgVolume => "bg_volume",
            SettingKey::FxVolume => "fx_volume",
            SettingKey::Enemies => "enemies",
        }
    }
}

impl Settings {
    /// Loads settings, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => settings,
            Err(Error::SettingsRead { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                info!("no settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            }
        }
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&text).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(settings.sanitized())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source: std::io::Error| Error::SettingsWrite {
            path: path.to_path_buf(),
            source,
        };
        let text = serde_json::to_string_pretty(self).map_err(|e| write_err(e.into()))?;
        fs::write(path, text).map_err(write_err)
    }

    /// Replaces out-of-range fields with their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            warn!("invalid mouse sensitivity {}, using default", self.mouse_sensitivity);
            self.mouse_sensitivity = defaults.mouse_sensitivity;
        }
        if !(self.fov.is_finite() && self.fov > 0.0 && self.fov < 180.0) {
            warn!("invalid fov {}, using default", self.fov);
            self.fov = defaults.fov;
        }
        if !(self.bg_volume.is_finite() && self.bg_volume >= 0.0) {
            warn!("invalid background volume {}, using default", self.bg_volume);
            self.bg_volume = defaults.bg_volume;
        }
        if !(self.fx_volume.is_finite() && self.fx_volume >= 0.0) {
            warn!("invalid effects volume {}, using default", self.fx_volume);
            self.fx_volume = defaults.fx_volume;
        }
        self
    }

    pub fn get(&self, key: SettingKey) -> String {
        match key {
            SettingKey::Sensitivity => self.mouse_sensitivity.to_string(),
            SettingKey::Fov => self.fov.to_string(),
            SettingKey::BgVolume => self.bg_volume.to_string(),
            SettingKey::FxVolume => self.fx_volume.to_string(),
            SettingKey::Enemies => self.enemy_count.to_string(),
        }
    }

    /// Applies a textual value. Returns `false` if it does not parse or is
    /// out of range, leaving the setting untouched.
    pub fn set(&mut self, key: SettingKey, value: &str) -> bool {
        let mut candidate = self.clone();
        let parsed = match key {
            SettingKey::Sensitivity => value.parse().map(|v| candidate.mouse_sensitivity = v).is_ok(),
            SettingKey::Fov => value.parse().map(|v| candidate.fov = v).is_ok(),
            SettingKey::BgVolume => value.parse().map(|v| candidate.bg_volume = v).is_ok(),
            SettingKey::FxVolume => value.parse().map(|v| candidate.fx_volume = v).is_ok(),
            SettingKey::Enemies => value.parse().map(|v| candidate.enemy_count = v).is_ok(),
        };

        if !parsed || candidate.clone().sanitized() != candidate {
            return false;
        }
        *self = candidate;
        true
    }
}
