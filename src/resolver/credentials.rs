use crate::config::CredentialConfig;

/// Username/password pair handed to the Gerrit client.
#[derive(Clone, PartialEq, Eq)]
pub struct UsernamePassword {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for UsernamePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsernamePassword")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Lookup of stored credentials by id.
pub trait CredentialStore: Send + Sync {
    fn find(&self, id: &str) -> Option<UsernamePassword>;

    /// All known ids, in declaration order.
    fn ids(&self) -> Vec<String>;
}

/// Credentials declared in the `[[credentials]]` config sections.
pub struct ConfigCredentialStore {
    entries: Vec<CredentialConfig>,
}

impl ConfigCredentialStore {
    pub fn new(entries: Vec<CredentialConfig>) -> Self {
        Self { entries }
    }
}

impl CredentialStore for ConfigCredentialStore {
    fn find(&self, id: &str) -> Option<UsernamePassword> {
        self.entries
            .iter()
            .find(|c| c.id == id)
            .map(|c| UsernamePassword {
                username: c.username.clone(),
                password: c.password.clone(),
            })
    }

    fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.id.clone()).collect()
    }
}

/// Blank or unknown ids resolve to no credentials; the client then falls
/// back to the server's own http credentials.
pub fn resolve_credentials(
    store: &dyn CredentialStore,
    credential_id: Option<&str>,
) -> Option<UsernamePassword> {
    let id = credential_id.map(str::trim).filter(|id| !id.is_empty())?;
    let found = store.find(id);
    if found.is_none() {
        tracing::warn!(credential_id = id, "Credential not found, using server defaults");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConfigCredentialStore {
        ConfigCredentialStore::new(vec![
            CredentialConfig {
                id: "bot".to_string(),
                username: Some("xcal".to_string()),
                password: Some("secret".to_string()),
            },
            CredentialConfig {
                id: "anon".to_string(),
                username: None,
                password: None,
            },
        ])
    }

    #[test]
    fn test_resolve_known_id() {
        let creds = resolve_credentials(&store(), Some("bot")).unwrap();
        assert_eq!(creds.username.as_deref(), Some("xcal"));
        assert_eq!(creds.password.as_deref(), Some("secret"));

        let creds = resolve_credentials(&store(), Some(" anon ")).unwrap();
        assert!(creds.username.is_none());
    }

    #[test]
    fn test_blank_or_unknown_id_yields_none() {
        assert!(resolve_credentials(&store(), None).is_none());
        assert!(resolve_credentials(&store(), Some("")).is_none());
        assert!(resolve_credentials(&store(), Some("   ")).is_none());
        assert!(resolve_credentials(&store(), Some("nobody")).is_none());
    }

    #[test]
    fn test_ids_keep_order() {
        assert_eq!(store().ids(), vec!["bot".to_string(), "anon".to_string()]);
    }

    #[test]
    fn test_debug_masks_password() {
        let creds = UsernamePassword {
            username: Some("xcal".to_string()),
            password: Some("secret".to_string()),
        };
        let printed = format!("{:?}", creds);
        assert!(printed.contains("xcal"));
        assert!(!printed.contains("secret"));
    }
}
