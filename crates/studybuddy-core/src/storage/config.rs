//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Break reminder interval
//! - Distraction tracking behavior (auto-track, settle window)
//! - Insight rotation cadence
//! - Appearance (dark mode)
//!
//! Configuration is stored at `~/.config/studybuddy/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

use super::data_dir;

/// Default break reminder interval in minutes.
pub const DEFAULT_BREAK_INTERVAL_MIN: u64 = 10;

/// Break reminder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreaksConfig {
    /// Minutes of study time between break reminders.
    #[serde(default = "default_break_interval_min")]
    pub interval_min: u64,
}

/// Distraction tracking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Automatically start tracking with the timer (experimental).
    #[serde(default)]
    pub auto_track: bool,
    /// Settle window after tracker attachment, in milliseconds. Focus-loss
    /// events inside the window are discarded.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

/// Insight rotation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Seconds between quote/message rotations.
    #[serde(default = "default_rotation_secs")]
    pub rotation_secs: u64,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub dark_mode: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/studybuddy/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub breaks: BreaksConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub insights: InsightsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

// Default functions
fn default_break_interval_min() -> u64 {
    DEFAULT_BREAK_INTERVAL_MIN
}
fn default_settle_ms() -> u64 {
    crate::distraction::DEFAULT_SETTLE_MS
}
fn default_rotation_secs() -> u64 {
    30
}

impl Default for BreaksConfig {
    fn default() -> Self {
        Self {
            interval_min: default_break_interval_min(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            auto_track: false,
            settle_ms: default_settle_ms(),
        }
    }
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            rotation_secs: default_rotation_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { dark_mode: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            breaks: BreaksConfig::default(),
            tracking: TrackingConfig::default(),
            insights: InsightsConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        };

        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        if leaf.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let parent = match parent_path {
            Some(path) => {
                let mut current = root;
                for part in path.split('.') {
                    current = current
                        .get_mut(part)
                        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                }
                current
            }
            None => root,
        };

        let obj = parent
            .as_object_mut()
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let existing = obj
            .get(leaf)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|_| invalid("expected a boolean"))?,
            ),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid("cannot represent as number"))?
                } else {
                    return Err(invalid("expected a number"));
                }
            }
            _ => serde_json::Value::String(value.into()),
        };

        obj.insert(leaf.to_string(), new_value);
        Ok(())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/studybuddy"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing defaults when no config exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| ConfigError::ParseFailed(e.to_string())),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load config, using defaults");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key and persist. Returns an error if the key
    /// is unknown or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()?;
        Ok(())
    }

    /// The configured break interval in seconds.
    pub fn break_interval_secs(&self) -> u64 {
        self.breaks.interval_min.saturating_mul(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.breaks.interval_min, 10);
        assert_eq!(parsed.tracking.settle_ms, 500);
        assert_eq!(parsed.insights.rotation_secs, 30);
        assert!(!parsed.ui.dark_mode);
        assert!(!parsed.tracking.auto_track);
    }

    #[test]
    fn empty_toml_fills_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.breaks.interval_min, 10);
        assert_eq!(parsed.tracking.settle_ms, 500);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("breaks.interval_min").as_deref(), Some("10"));
        assert_eq!(cfg.get("ui.dark_mode").as_deref(), Some("false"));
        assert!(cfg.get("ui.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_json_value_by_path_updates_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "breaks.interval_min", "25").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "breaks.interval_min").unwrap(),
            &serde_json::Value::Number(25.into())
        );
    }

    #[test]
    fn set_json_value_by_path_updates_bool() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        Config::set_json_value_by_path(&mut json, "ui.dark_mode", "true").unwrap();
        assert_eq!(
            Config::get_json_value_by_path(&json, "ui.dark_mode").unwrap(),
            &serde_json::Value::Bool(true)
        );
    }

    #[test]
    fn set_json_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(Config::set_json_value_by_path(&mut json, "ui.nonexistent", "1").is_err());
        assert!(Config::set_json_value_by_path(&mut json, "nonexistent.key", "1").is_err());
    }

    #[test]
    fn set_json_value_by_path_rejects_invalid_type() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(Config::set_json_value_by_path(&mut json, "ui.dark_mode", "not_a_bool").is_err());
        assert!(
            Config::set_json_value_by_path(&mut json, "breaks.interval_min", "soon").is_err()
        );
    }

    #[test]
    fn break_interval_converts_to_seconds() {
        let mut cfg = Config::default();
        assert_eq!(cfg.break_interval_secs(), 600);
        cfg.breaks.interval_min = 1;
        assert_eq!(cfg.break_interval_secs(), 60);
    }
}
