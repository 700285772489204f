use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

use cadence_domain::{CycleDefaults, PreconditionPolicy};

use crate::ConfigError;

/// Environment variable that overrides the configuration directory.
pub const HOME_ENV: &str = "CADENCE_HOME";

/// Stores engine policy and CLI preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub precondition_policy: PreconditionPolicy,
    #[serde(default = "Config::default_week_start_day")]
    pub default_week_start_day: u8,
    #[serde(default = "Config::default_month_start_day")]
    pub default_month_start_day: u8,
    #[serde(default = "Config::default_log_filter")]
    pub log_filter: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            precondition_policy: PreconditionPolicy::default(),
            default_week_start_day: Self::default_week_start_day(),
            default_month_start_day: Self::default_month_start_day(),
            log_filter: Self::default_log_filter(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_week_start_day() -> u8 {
        0
    }

    pub fn default_month_start_day() -> u8 {
        1
    }

    pub fn default_log_filter() -> String {
        "cadence=info".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Fallback cycle-start days handed to the engine.
    pub fn cycle_defaults(&self) -> CycleDefaults {
        CycleDefaults {
            week_start_day: self.default_week_start_day,
            month_start_day: self.default_month_start_day,
        }
    }

    /// Rejects defaults that could never produce a valid budget window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_week_start_day > 6 {
            return Err(ConfigError::Invalid(format!(
                "default_week_start_day must be 0-6, got {}",
                self.default_week_start_day
            )));
        }
        if !(1..=28).contains(&self.default_month_start_day) {
            return Err(ConfigError::Invalid(format!(
                "default_month_start_day must be 1-28, got {}",
                self.default_month_start_day
            )));
        }
        Ok(())
    }

    /// Directory holding `config.json`: `$CADENCE_HOME`, else `<config dir>/cadence`.
    pub fn resolve_config_root() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cadence")
    }
}
