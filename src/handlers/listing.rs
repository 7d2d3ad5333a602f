use crate::{config::AppConfig, resolver::CredentialStore};

/// A selectable Gerrit server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub display_name: String,
    pub name: String,
}

/// Configured servers, in config order.
pub fn list_servers(config: &AppConfig) -> Vec<ServerEntry> {
    config
        .servers
        .iter()
        .map(|s| ServerEntry {
            display_name: s.display_name().to_string(),
            name: s.name.clone(),
        })
        .collect()
}

pub fn list_credentials(store: &dyn CredentialStore) -> Vec<String> {
    store.ids()
}
