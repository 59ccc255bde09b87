//! TOML-based application configuration.
//!
//! Stores user preferences for the timer and reminders at
//! `~/.config/companion/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError};

/// Pomodoro cycle defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_min")]
    pub work_min: u64,
    #[serde(default = "default_break_min")]
    pub break_min: u64,
    #[serde(default = "default_sessions")]
    pub sessions: u32,
}

/// Defaults applied when creating reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_interval_min")]
    pub default_interval_min: u32,
    #[serde(default = "default_true")]
    pub use_tts: bool,
    #[serde(default)]
    pub use_notif: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/companion/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
    /// Mirror logbook entries into the append-only CSV file.
    #[serde(default = "default_true")]
    pub logbook_csv: bool,
}

fn default_work_min() -> u64 {
    25
}
fn default_break_min() -> u64 {
    5
}
fn default_sessions() -> u32 {
    4
}
fn default_interval_min() -> u32 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_min: default_work_min(),
            break_min: default_break_min(),
            sessions: default_sessions(),
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            default_interval_min: default_interval_min(),
            use_tts: true,
            use_notif: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            reminders: ReminderConfig::default(),
            logbook_csv: true,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(match current {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a config value by dot-separated key, parsing the string to the
    /// existing value's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        let unknown = || ConfigError::ParseFailed(format!("unknown config key: {key}"));
        let mut json = serde_json::to_value(&*self)?;

        let mut parts = key.split('.').peekable();
        let mut current = &mut json;
        while let Some(part) = parts.next() {
            let obj = current.as_object_mut().ok_or_else(unknown)?;
            if parts.peek().is_none() {
                let existing = obj.get(part).ok_or_else(unknown)?;
                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                        serde_json::Value::Number(n.into())
                    }
                    _ => serde_json::Value::String(value.into()),
                };
                obj.insert(part.to_string(), new_value);
                *self = serde_json::from_value(json)?;
                return Ok(());
            }
            current = obj.get_mut(part).ok_or_else(unknown)?;
        }
        Err(unknown().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.timer.work_min, 25);
        assert_eq!(cfg.timer.break_min, 5);
        assert_eq!(cfg.timer.sessions, 4);
        assert_eq!(cfg.reminders.default_interval_min, 30);
        assert!(cfg.logbook_csv);
    }

    #[test]
    fn toml_round_trip() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.timer.work_min, cfg.timer.work_min);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: Config = toml::from_str("[timer]\nwork_min = 50\n").unwrap();
        assert_eq!(cfg.timer.work_min, 50);
        assert_eq!(cfg.timer.break_min, 5);
        assert_eq!(cfg.reminders.default_interval_min, 30);
    }

    #[test]
    fn get_and_set_by_dot_key() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("timer.work_min").as_deref(), Some("25"));
        cfg.set("timer.work_min", "45").unwrap();
        assert_eq!(cfg.timer.work_min, 45);
        cfg.set("reminders.use_tts", "false").unwrap();
        assert!(!cfg.reminders.use_tts);
        assert!(cfg.set("unknown.key", "1").is_err());
        assert!(cfg.set("timer.work_min", "abc").is_err());
    }
}
