pub mod app_config;
pub mod gerrit_config;
pub mod loader;
pub mod review_config;

// Re-export commonly used types
pub use app_config::AppConfig;
pub use gerrit_config::{CredentialConfig, GerritServerConfig, TriggerConfig};
pub use loader::ConfigLoader;
pub use review_config::ReviewConfig;

// Re-export constants
pub use app_config::{CONFIG_FILE_NAME, CONFIG_PATH_ENV, USER_CONFIG_PATH};
