use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::ConfigError, resolver::process_env};

use super::app_config::{
    AppConfig, PartialAppConfig, CONFIG_FILE_NAME, CONFIG_PATH_ENV, TEMPLATE_CONFIG,
    USER_CONFIG_PATH,
};

/// Configuration loader responsible for loading config from files and environment
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit override, then `XCAL_GERRIT_CONFIG`, then the user default
    pub fn new(path_override: Option<PathBuf>) -> Self {
        let config_path = path_override
            .or_else(|| {
                env::var(CONFIG_PATH_ENV)
                    .ok()
                    .filter(|p| !p.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(default_config_path);
        Self::with_path(config_path)
    }

    /// Create a config loader for an exact file (for testing)
    pub fn with_path(config_path: PathBuf) -> Self {
        let expanded = shellexpand::tilde(&config_path.to_string_lossy()).to_string();
        Self {
            config_path: PathBuf::from(expanded),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load complete application configuration
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let partial_config = self.load_partial_config()?;
        let env_map = self.collect_env_vars();
        AppConfig::from_partial_and_env(Some(partial_config), &env_map)
    }

    /// Write the example configuration if the file does not exist yet.
    ///
    /// Returns `true` when a new file was created.
    pub fn initialize_config(&self) -> Result<bool, ConfigError> {
        if self.config_path.exists() {
            tracing::info!("配置文件已存在: {:?}", self.config_path);
            return Ok(false);
        }

        if let Some(config_dir) = self.config_path.parent() {
            fs::create_dir_all(config_dir).map_err(|e| {
                ConfigError::FileWrite(config_dir.to_string_lossy().to_string(), e)
            })?;
        }

        fs::write(&self.config_path, TEMPLATE_CONFIG).map_err(|e| {
            ConfigError::FileWrite(self.config_path.to_string_lossy().to_string(), e)
        })?;

        tracing::info!("已初始化配置文件: {:?}", self.config_path);
        Ok(true)
    }

    fn load_partial_config(&self) -> Result<PartialAppConfig, ConfigError> {
        let path_str = self.config_path.to_string_lossy().to_string();
        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::FileRead(path_str.clone(), e))?;
        toml::from_str(&content).map_err(|e| ConfigError::TomlParse(path_str, e))
    }

    fn collect_env_vars(&self) -> HashMap<String, String> {
        process_env()
            .into_iter()
            .filter(|(k, _)| k.starts_with("XCAL_GERRIT_"))
            .collect()
    }
}

fn default_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(USER_CONFIG_PATH).as_ref()).join(CONFIG_FILE_NAME)
}
