//! Application configuration.
//!
//! # Responsibility
//! - Provide defaults for the notes file, autosave and logging.
//! - Apply `NOTEBOX_*` environment overrides with strict value parsing.
//! - Hold display preferences (theme, font size) for front ends.
//!
//! # Invariants
//! - Invalid override values are rejected, never silently ignored.
//! - `font_size` stays within `MIN_FONT_SIZE..=MAX_FONT_SIZE`.

use crate::logging::{default_log_level, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

/// Notes file used when no path is configured, relative to the working dir.
pub const DEFAULT_NOTES_FILE: &str = "notes.json";
pub const DEFAULT_FONT_SIZE: u16 = 12;
pub const MIN_FONT_SIZE: u16 = 6;
pub const MAX_FONT_SIZE: u16 = 72;

pub const ENV_NOTES_PATH: &str = "NOTEBOX_NOTES_PATH";
pub const ENV_AUTOSAVE: &str = "NOTEBOX_AUTOSAVE";
pub const ENV_LOG_LEVEL: &str = "NOTEBOX_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEBOX_LOG_DIR";
pub const ENV_THEME: &str = "NOTEBOX_THEME";
pub const ENV_FONT_SIZE: &str = "NOTEBOX_FONT_SIZE";

/// Configuration error for a single rejected setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Color scheme requested by the front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unsupported theme `{other}`; expected light|dark")),
        }
    }
}

/// Display preferences carried alongside the notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub theme: Theme,
    pub font_size: u16,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl DisplaySettings {
    pub fn change_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Sets the font size.
    ///
    /// # Errors
    /// - Returns `InvalidValue` when `size` is outside the supported range.
    pub fn change_font_size(&mut self, size: u16) -> Result<(), ConfigError> {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
            return Err(ConfigError::InvalidValue {
                key: ENV_FONT_SIZE,
                value: size.to_string(),
                reason: format!("font size must be within {MIN_FONT_SIZE}..={MAX_FONT_SIZE}"),
            });
        }
        self.font_size = size;
        Ok(())
    }
}

/// Effective application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Notes file read at startup and written at shutdown.
    pub notes_path: PathBuf,
    /// Save after every mutating action when enabled.
    pub autosave: bool,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; logging is off when unset.
    pub log_dir: Option<PathBuf>,
    pub display: DisplaySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notes_path: PathBuf::from(DEFAULT_NOTES_FILE),
            autosave: false,
            log_level: default_log_level().to_string(),
            log_dir: None,
            display: DisplaySettings::default(),
        }
    }
}

impl AppConfig {
    /// Builds config from defaults plus process environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds config from defaults plus overrides returned by `lookup`.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_NOTES_PATH) {
            config.notes_path = PathBuf::from(path);
        }
        if let Some(raw) = read(ENV_AUTOSAVE) {
            config.autosave = parse_bool(ENV_AUTOSAVE, &raw)?;
        }
        if let Some(raw) = read(ENV_LOG_LEVEL) {
            config.set_log_level(&raw)?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = read(ENV_THEME) {
            let theme = raw.parse::<Theme>().map_err(|reason| ConfigError::InvalidValue {
                key: ENV_THEME,
                value: raw.clone(),
                reason,
            })?;
            config.display.change_theme(theme);
        }
        if let Some(raw) = read(ENV_FONT_SIZE) {
            let size = raw.parse::<u16>().map_err(|err| ConfigError::InvalidValue {
                key: ENV_FONT_SIZE,
                value: raw.clone(),
                reason: err.to_string(),
            })?;
            config.display.change_font_size(size)?;
        }

        Ok(config)
    }

    /// Validates and stores a normalized log level.
    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        let normalized = normalize_level(level).map_err(|reason| ConfigError::InvalidValue {
            key: ENV_LOG_LEVEL,
            value: level.to_string(),
            reason,
        })?;
        self.log_level = normalized.to_string();
        Ok(())
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_string(),
            reason: "expected 1|true|yes|on or 0|false|no|off".to_string(),
        }),
    }
}
