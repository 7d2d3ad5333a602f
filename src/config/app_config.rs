use serde::Deserialize;
use std::{collections::HashMap, path::PathBuf};

use crate::errors::ConfigError;

use super::{
    gerrit_config::{CredentialConfig, GerritServerConfig, TriggerConfig},
    loader::ConfigLoader,
    review_config::{PartialReviewConfig, ReviewConfig},
};

// Configuration location constants
pub const USER_CONFIG_PATH: &str = "~/.config/xcal-gerrit";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "XCAL_GERRIT_CONFIG";

/// Template written by `init` when no config file exists yet
pub const TEMPLATE_CONFIG: &str = include_str!("../../assets/config.example.toml");

/// Main Application Configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub servers: Vec<GerritServerConfig>,
    pub credentials: Vec<CredentialConfig>,
    pub trigger: Option<TriggerConfig>,
    pub review: ReviewConfig,
}

/// Partial Application Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialAppConfig {
    servers: Option<Vec<GerritServerConfig>>,
    credentials: Option<Vec<CredentialConfig>>,
    trigger: Option<TriggerConfig>,
    review: Option<PartialReviewConfig>,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(path_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        ConfigLoader::new(path_override).load_config()
    }

    /// Create AppConfig from partial config and environment
    pub fn from_partial_and_env(
        partial: Option<PartialAppConfig>,
        env_map: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();

        let config = AppConfig {
            servers: partial.servers.unwrap_or_default(),
            credentials: partial.credentials.unwrap_or_default(),
            trigger: partial.trigger,
            review: ReviewConfig::from_partial(partial.review, env_map)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (idx, server) in self.servers.iter().enumerate() {
            server.validate()?;
            if self.servers[..idx].iter().any(|s| s.name == server.name) {
                return Err(ConfigError::InvalidValue {
                    field: "servers.name".to_string(),
                    reason: format!("duplicate server name '{}'", server.name),
                });
            }
        }

        for (idx, cred) in self.credentials.iter().enumerate() {
            if cred.id.trim().is_empty() {
                return Err(ConfigError::FieldMissing("credentials.id".to_string()));
            }
            if self.credentials[..idx].iter().any(|c| c.id == cred.id) {
                return Err(ConfigError::InvalidValue {
                    field: "credentials.id".to_string(),
                    reason: format!("duplicate credential id '{}'", cred.id),
                });
            }
        }

        Ok(())
    }
}
