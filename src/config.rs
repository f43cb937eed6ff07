//! # Runtime configuration.
//!
//! [`Settings`] holds the phase durations, the host tick cadence and the
//! history size. It is read from TOML, optionally overridden from the
//! environment, and validated before any controller is built.
//!
//! ```toml
//! tick_interval_ms = 200
//! history_capacity = 64
//!
//! [durations]
//! green = 30000
//! yellow = 3000
//! red_walk = 15000
//! red_flash = 5000
//! red_wait = 3000
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.
//!
//! Environment overrides (all in milliseconds except the history size):
//! `CROSSWALK_TICK_MS`, `CROSSWALK_GREEN_MS`, `CROSSWALK_YELLOW_MS`,
//! `CROSSWALK_RED_WALK_MS`, `CROSSWALK_RED_FLASH_MS`, `CROSSWALK_RED_WAIT_MS`,
//! `CROSSWALK_HISTORY`.

use crate::controller::{BuildError, Controller, DEFAULT_HISTORY_CAPACITY};
use crate::core::{Durations, Phase};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default host tick cadence.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Errors produced while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable {key}={value:?} is not a valid number")]
    InvalidEnv { key: &'static str, value: String },

    #[error("duration for phase {0} must be greater than zero")]
    ZeroDuration(Phase),

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// Controller and host settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-phase thresholds
    pub durations: Durations,
    /// Fixed delta the host feeds to every tick
    pub tick_interval_ms: u64,
    /// Transitions kept in history (0 disables)
    pub history_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Apply `CROSSWALK_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup, then re-validate.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &'static str| -> Result<Option<u64>, ConfigError> {
            match lookup(key) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse::<u64>()
                    .map(Some)
                    .map_err(|_| ConfigError::InvalidEnv { key, value }),
            }
        };

        if let Some(ms) = number("CROSSWALK_TICK_MS")? {
            self.tick_interval_ms = ms;
        }
        let phases = [
            ("CROSSWALK_GREEN_MS", Phase::Green),
            ("CROSSWALK_YELLOW_MS", Phase::Yellow),
            ("CROSSWALK_RED_WALK_MS", Phase::RedWalk),
            ("CROSSWALK_RED_FLASH_MS", Phase::RedFlash),
            ("CROSSWALK_RED_WAIT_MS", Phase::RedWait),
        ];
        for (key, phase) in phases {
            if let Some(ms) = number(key)? {
                self.durations = self.durations.with(phase, Duration::from_millis(ms));
            }
        }
        if let Some(value) = lookup("CROSSWALK_HISTORY") {
            self.history_capacity = value.trim().parse::<usize>().map_err(|_| {
                ConfigError::InvalidEnv {
                    key: "CROSSWALK_HISTORY",
                    value,
                }
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject settings that cannot drive a controller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(phase) = self.durations.first_zero() {
            return Err(ConfigError::ZeroDuration(phase));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Build a controller from these settings.
    pub fn build_controller(&self) -> Result<Controller, BuildError> {
        Controller::builder()
            .durations(self.durations)
            .history_capacity(self.history_capacity)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_document_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tick_interval(), Duration::from_millis(200));
    }

    #[test]
    fn parses_partial_durations() {
        let settings = Settings::from_toml_str(
            r#"
            tick_interval_ms = 100

            [durations]
            green = 5000
            red_walk = 8000
            "#,
        )
        .unwrap();

        assert_eq!(settings.tick_interval_ms, 100);
        assert_eq!(settings.durations.green, Duration::from_millis(5000));
        assert_eq!(settings.durations.red_walk, Duration::from_millis(8000));
        assert_eq!(settings.durations.yellow, Durations::default().yellow);
    }

    #[test]
    fn rejects_zero_duration() {
        let err = Settings::from_toml_str("[durations]\nyellow = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration(Phase::Yellow)));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let err = Settings::from_toml_str("tick_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTickInterval));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Settings::from_toml_str("tick_interval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Settings::load("/definitely/not/here/crosswalk.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => {
                assert!(path.ends_with("crosswalk.toml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!(
            "crosswalk_settings_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "history_capacity = 3\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.history_capacity, 3);
    }

    #[test]
    fn overrides_apply_per_key() {
        let settings = Settings::default()
            .with_overrides(lookup(&[
                ("CROSSWALK_TICK_MS", "50"),
                ("CROSSWALK_GREEN_MS", "5000"),
                ("CROSSWALK_HISTORY", "8"),
            ]))
            .unwrap();

        assert_eq!(settings.tick_interval_ms, 50);
        assert_eq!(settings.durations.green, Duration::from_millis(5000));
        assert_eq!(settings.durations.red_wait, Durations::default().red_wait);
        assert_eq!(settings.history_capacity, 8);
    }

    #[test]
    fn invalid_override_is_reported() {
        let err = Settings::default()
            .with_overrides(lookup(&[("CROSSWALK_RED_WAIT_MS", "soon")]))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidEnv { key: "CROSSWALK_RED_WAIT_MS", .. }
        ));
    }

    #[test]
    fn zero_override_fails_validation() {
        let err = Settings::default()
            .with_overrides(lookup(&[("CROSSWALK_RED_FLASH_MS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroDuration(Phase::RedFlash)));
    }

    #[test]
    fn builds_controller_from_settings() {
        let settings =
            Settings::from_toml_str("history_capacity = 2\n[durations]\ngreen = 100").unwrap();
        let mut controller = settings.build_controller().unwrap();

        controller.tick(Duration::from_millis(100));
        assert_eq!(controller.phase(), Phase::Yellow);
        assert_eq!(controller.history().capacity(), 2);
    }

    #[test]
    fn huge_history_capacity_still_builds() {
        let settings = Settings::from_toml_str("history_capacity = 1000000000000000").unwrap();
        let mut controller = settings.build_controller().unwrap();
        controller.tick(settings.durations.green);
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.history().capacity(), 1_000_000_000_000_000);
    }

    #[test]
    fn history_override_accepts_usize_max() {
        let settings = Settings::default()
            .with_overrides(lookup(&[("CROSSWALK_HISTORY", "18446744073709551615")]))
            .unwrap();
        assert!(settings.build_controller().is_ok());
    }

    #[test]
    fn history_override_rejects_out_of_range_value() {
        let err = Settings::default()
            .with_overrides(lookup(&[("CROSSWALK_HISTORY", "99999999999999999999999")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv { key: "CROSSWALK_HISTORY", .. }
        ));
    }
}
