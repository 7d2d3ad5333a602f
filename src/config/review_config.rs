use serde::Deserialize;
use std::{collections::HashMap, path::PathBuf, time::Duration};

use crate::{errors::ConfigError, types::Locale};

pub const LOCALES_ENV: &str = "XCAL_GERRIT_LOCALES";
pub const TIMEOUT_ENV: &str = "XCAL_GERRIT_TIMEOUT_SECS";

/// Configuration for review publishing
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewConfig {
    /// Locales to publish in, one review per locale, in this order
    pub locales: Vec<Locale>,

    /// Per-request timeout for Gerrit calls
    pub timeout: Duration,

    /// Directory with `<locale>.toml` message overrides (supports ~ expansion)
    pub messages_dir: Option<PathBuf>,
}

/// Partial Review Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialReviewConfig {
    pub locales: Option<Vec<Locale>>,
    pub timeout_secs: Option<u64>,
    pub messages_dir: Option<String>,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            timeout: Duration::from_secs(default_timeout_secs()),
            messages_dir: None,
        }
    }
}

impl ReviewConfig {
    /// Create ReviewConfig from partial config, environment overrides and defaults
    pub fn from_partial(
        partial: Option<PartialReviewConfig>,
        env_map: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();

        let locales = match env_map.get(LOCALES_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_locales(raw)?,
            None => partial.locales.unwrap_or_else(default_locales),
        };
        if locales.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "review.locales".to_string(),
                reason: "at least one locale is required".to_string(),
            });
        }

        let timeout_secs = match env_map.get(TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                field: TIMEOUT_ENV.to_string(),
                reason: format!("'{}' is not a number of seconds", raw),
            })?,
            None => partial.timeout_secs.unwrap_or_else(default_timeout_secs),
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "review.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let messages_dir = partial
            .messages_dir
            .filter(|dir| !dir.trim().is_empty())
            .map(|dir| PathBuf::from(shellexpand::tilde(&dir).as_ref()));

        Ok(Self {
            locales,
            timeout: Duration::from_secs(timeout_secs),
            messages_dir,
        })
    }
}

fn parse_locales(raw: &str) -> Result<Vec<Locale>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Locale>().map_err(|reason| ConfigError::InvalidValue {
                field: LOCALES_ENV.to_string(),
                reason,
            })
        })
        .collect()
}

// Default functions
fn default_locales() -> Vec<Locale> {
    Locale::DEFAULT_ORDER.to_vec()
}

fn default_timeout_secs() -> u64 {
    30
}
