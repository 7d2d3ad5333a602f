use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// A Gerrit server the tool may publish to, selected by `name`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GerritServerConfig {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Base URL of the Gerrit web UI, REST calls go below it
    pub front_end_url: String,
    #[serde(default = "default_use_rest_api")]
    pub use_rest_api: bool,
    /// Used when the selected credential carries no username
    #[serde(default)]
    pub http_username: Option<String>,
    /// Used when the selected credential carries no password
    #[serde(default)]
    pub http_password: Option<String>,
}

impl GerritServerConfig {
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::FieldMissing("servers.name".to_string()));
        }
        if self.front_end_url.trim().is_empty() {
            return Err(ConfigError::FieldMissing(format!(
                "servers[{}].front_end_url",
                self.name
            )));
        }
        Ok(())
    }
}

/// Stored username/password pair, referenced by `id`.
#[derive(Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CredentialConfig {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Presence of this section marks builds as Gerrit-triggered.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct TriggerConfig {
    /// Server used when the build environment does not name one
    #[serde(default)]
    pub server_name: Option<String>,
}

fn default_use_rest_api() -> bool {
    true
}
