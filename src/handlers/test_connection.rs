use crate::{
    clients::GerritClient,
    config::AppConfig,
    errors::PublishError,
    resolver::{resolve_credentials, CredentialStore},
    review::{MessageCatalog, MessageId},
    types::Locale,
};

/// Result of a connection check, shown to the user rather than raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Ok(String),
    Error(String),
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        matches!(self, Validation::Ok(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Validation::Ok(msg) | Validation::Error(msg) => msg,
        }
    }
}

/// Connect to `server_name` and read its version.
pub async fn test_connection(
    config: &AppConfig,
    store: &dyn CredentialStore,
    catalog: &MessageCatalog,
    server_name: &str,
    credential_id: Option<&str>,
    locale: Locale,
) -> Validation {
    match check(config, store, catalog, server_name, credential_id, locale).await {
        Ok(validation) => validation,
        Err(e) => {
            tracing::debug!(server = server_name, "Connection test failed: {}", e);
            Validation::Error(e.to_string())
        }
    }
}

async fn check(
    config: &AppConfig,
    store: &dyn CredentialStore,
    catalog: &MessageCatalog,
    server_name: &str,
    credential_id: Option<&str>,
    locale: Locale,
) -> Result<Validation, PublishError> {
    let server_name = server_name.trim();
    if server_name.is_empty() {
        return Ok(Validation::Error(catalog.render(
            MessageId::EmptyServerName,
            locale,
            &[],
        )?));
    }

    let credentials = resolve_credentials(store, credential_id);
    let client = GerritClient::connect(
        &config.servers,
        server_name,
        credentials.as_ref(),
        config.review.timeout,
    )
    .await?;

    let version = client.server_version().await?;
    if version.trim().is_empty() {
        return Ok(Validation::Error(catalog.render(
            MessageId::EmptyServerVersion,
            locale,
            &[],
        )?));
    }

    tracing::info!(server = server_name, version = %version, "Gerrit connection verified");
    Ok(Validation::Ok(catalog.render(
        MessageId::ConnectionOk,
        locale,
        &[&version],
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GerritServerConfig;
    use crate::resolver::ConfigCredentialStore;
    use httpmock::prelude::*;

    fn config(url: &str, use_rest_api: bool) -> AppConfig {
        AppConfig {
            servers: vec![GerritServerConfig {
                name: "gerrit1".to_string(),
                display_name: None,
                front_end_url: url.to_string(),
                use_rest_api,
                http_username: Some("ci-bot".to_string()),
                http_password: Some("pw".to_string()),
            }],
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_reports_server_version() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/a/config/server/version");
                then.status(200).body(")]}'\n\"3.9.1\"");
            })
            .await;

        let config = config(&server.base_url(), true);
        let store = ConfigCredentialStore::new(Vec::new());
        let catalog = MessageCatalog::embedded().unwrap();

        let validation =
            test_connection(&config, &store, &catalog, "gerrit1", None, Locale::English).await;
        assert_eq!(validation, Validation::Ok("Connected to Gerrit 3.9.1".to_string()));

        let validation = test_connection(
            &config,
            &store,
            &catalog,
            "gerrit1",
            None,
            Locale::SimplifiedChinese,
        )
        .await;
        assert_eq!(validation.message(), "已连接到 Gerrit 3.9.1");
    }

    #[tokio::test]
    async fn test_blank_version_is_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/a/config/server/version");
                then.status(200).body(")]}'\n\"\"");
            })
            .await;

        let config = config(&server.base_url(), true);
        let store = ConfigCredentialStore::new(Vec::new());
        let catalog = MessageCatalog::embedded().unwrap();

        let validation =
            test_connection(&config, &store, &catalog, "gerrit1", None, Locale::English).await;
        assert!(!validation.is_ok());
        assert_eq!(
            validation.message(),
            catalog.template(MessageId::EmptyServerVersion, Locale::English).unwrap()
        );
    }

    #[tokio::test]
    async fn test_failures_become_validation_errors() {
        let config = config("http://127.0.0.1:9", false);
        let store = ConfigCredentialStore::new(Vec::new());
        let catalog = MessageCatalog::embedded().unwrap();

        let validation =
            test_connection(&config, &store, &catalog, "  ", None, Locale::English).await;
        assert_eq!(
            validation.message(),
            catalog.template(MessageId::EmptyServerName, Locale::English).unwrap()
        );

        let validation =
            test_connection(&config, &store, &catalog, "gerrit1", None, Locale::English).await;
        assert_eq!(
            validation,
            Validation::Error("REST API is disabled for Gerrit server 'gerrit1'".to_string())
        );
    }
}
