// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! All fields are optional in the file; missing or invalid values fall back
//! to the defaults defined here.

use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Vitrine";

/// Maximum number of display items selected for a single gallery pass.
pub const DEFAULT_MAX_ITEMS: usize = 6;
/// Viewport width (px) separating the compact and wide layouts.
pub const DEFAULT_BREAKPOINT: f32 = 750.0;
/// Quiet period after the last carousel scroll event before the active
/// slide is recomputed from the scroll offset.
pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub theme_mode: Option<ThemeMode>,
    #[serde(default)]
    pub max_items: Option<usize>,
    #[serde(default)]
    pub breakpoint: Option<f32>,
    #[serde(default)]
    pub scroll_debounce_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: Some(ThemeMode::System),
            max_items: Some(DEFAULT_MAX_ITEMS),
            breakpoint: Some(DEFAULT_BREAKPOINT),
            scroll_debounce_ms: Some(DEFAULT_SCROLL_DEBOUNCE_MS),
        }
    }
}

impl Config {
    /// Effective display item cap, falling back to the default.
    #[must_use]
    pub fn max_items(&self) -> usize {
        self.max_items.unwrap_or(DEFAULT_MAX_ITEMS)
    }

    /// Effective layout breakpoint in pixels.
    #[must_use]
    pub fn breakpoint(&self) -> f32 {
        self.breakpoint.unwrap_or(DEFAULT_BREAKPOINT)
    }

    /// Effective scroll-settle debounce delay in milliseconds.
    #[must_use]
    pub fn scroll_debounce_ms(&self) -> u64 {
        self.scroll_debounce_ms
            .unwrap_or(DEFAULT_SCROLL_DEBOUNCE_MS)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

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
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            language: Some("pt-BR".to_string()),
            theme_mode: Some(ThemeMode::Dark),
            max_items: Some(4),
            breakpoint: Some(600.0),
            scroll_debounce_ms: Some(250),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.language, config.language);
        assert_eq!(loaded.theme_mode, config.theme_mode);
        assert_eq!(loaded.max_items, config.max_items);
        assert_eq!(loaded.breakpoint, config.breakpoint);
        assert_eq!(loaded.scroll_debounce_ms, config.scroll_debounce_ms);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.language.is_none());
    }

    #[test]
    fn default_config_caps_items_at_six() {
        let config = Config::default();
        assert_eq!(config.max_items(), 6);
        assert_eq!(config.breakpoint(), DEFAULT_BREAKPOINT);
        assert_eq!(config.scroll_debounce_ms(), DEFAULT_SCROLL_DEBOUNCE_MS);
    }

    #[test]
    fn accessors_fall_back_when_fields_missing() {
        let config = Config {
            language: None,
            theme_mode: None,
            max_items: None,
            breakpoint: None,
            scroll_debounce_ms: None,
        };
        assert_eq!(config.max_items(), DEFAULT_MAX_ITEMS);
        assert_eq!(config.breakpoint(), DEFAULT_BREAKPOINT);
        assert_eq!(config.scroll_debounce_ms(), DEFAULT_SCROLL_DEBOUNCE_MS);
    }
}
