use std::{collections::HashMap, fs, path::Path};

use crate::{
    clients::GerritClient,
    config::AppConfig,
    errors::{AppError, PublishError},
    resolver::{
        resolve_change_number, resolve_credentials, resolve_patchset_number, resolve_server_name,
        process_env, ChangeNumber, CredentialStore, GerritTrigger, PatchsetNumber,
    },
    review::{build_message, MessageCatalog},
    types::{AnalysisResult, Locale},
};

/// Snapshot of the build environment a publish runs in.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    pub env: HashMap<String, String>,
}

impl BuildContext {
    pub fn new(env: HashMap<String, String>) -> Self {
        Self { env }
    }

    /// Capture the current process environment.
    pub fn from_process() -> Self {
        Self::new(process_env())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Nothing to publish; not an error.
    Skipped { reason: String },
    Published {
        change: ChangeNumber,
        patchset: PatchsetNumber,
        locales: Vec<Locale>,
    },
}

/// Posts analysis results to Gerrit as review messages, one per locale.
pub struct Publisher<'a> {
    config: &'a AppConfig,
    credentials: &'a dyn CredentialStore,
    catalog: &'a MessageCatalog,
}

impl<'a> Publisher<'a> {
    pub fn new(
        config: &'a AppConfig,
        credentials: &'a dyn CredentialStore,
        catalog: &'a MessageCatalog,
    ) -> Self {
        Self {
            config,
            credentials,
            catalog,
        }
    }

    /// Publish `analysis` to the change the build was triggered for.
    ///
    /// Locales are submitted in configured order and the first failure stops
    /// the run; reviews already posted stay posted.
    pub async fn publish(
        &self,
        build: &BuildContext,
        analysis: Option<&AnalysisResult>,
        credential_id: Option<&str>,
    ) -> Result<PublishOutcome, PublishError> {
        let env = &build.env;
        let credentials = resolve_credentials(self.credentials, credential_id);

        let Some(trigger) = GerritTrigger::detect(env, self.config.trigger.as_ref()) else {
            tracing::warn!("Build was not triggered by Gerrit, skipping review");
            return Ok(PublishOutcome::Skipped {
                reason: "no Gerrit trigger".to_string(),
            });
        };
        let Some(analysis) = analysis else {
            tracing::warn!("No analysis result available, skipping review");
            return Ok(PublishOutcome::Skipped {
                reason: "no analysis result".to_string(),
            });
        };

        let server_name = resolve_server_name(env, Some(&trigger))?;
        let change = resolve_change_number(env)?;
        let patchset = resolve_patchset_number(env)?;

        tracing::info!(
            server = %server_name,
            change = %change,
            patchset = %patchset,
            "Publishing analysis of {} to Gerrit",
            analysis.project_name
        );

        let client = GerritClient::connect(
            &self.config.servers,
            &server_name,
            credentials.as_ref(),
            self.config.review.timeout,
        )
        .await?;

        let mut sent = Vec::with_capacity(self.config.review.locales.len());
        for &locale in &self.config.review.locales {
            let message = build_message(analysis, locale, self.catalog)?;
            tracing::info!(locale = %locale, "Review message:\n{}", message);

            let revision = client.revision(change, patchset)?;
            let result = revision.review(&message).await?;
            if let Some(error) = result.error_message() {
                tracing::error!(locale = %locale, "Gerrit rejected the review: {}", error);
                return Err(PublishError::ReviewRejected(error.to_string()));
            }

            tracing::info!(locale = %locale, change = %change, patchset = %patchset, "Review has been sent");
            sent.push(locale);
        }

        Ok(PublishOutcome::Published {
            change,
            patchset,
            locales: sent,
        })
    }
}

/// Read the analysis-result JSON written by the scan step.
pub fn load_analysis(path: &Path) -> Result<AnalysisResult, AppError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::IO(format!("reading analysis result '{}'", display), e))?;
    serde_json::from_str(&content).map_err(|e| AppError::AnalysisParse(display, e))
}

/// Render the message for each locale without contacting Gerrit.
pub fn preview_messages(
    analysis: &AnalysisResult,
    locales: &[Locale],
    catalog: &MessageCatalog,
) -> Result<Vec<(Locale, String)>, PublishError> {
    locales
        .iter()
        .map(|&locale| build_message(analysis, locale, catalog).map(|msg| (locale, msg)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GerritServerConfig, TriggerConfig};
    use crate::resolver::ConfigCredentialStore;

    fn config_with_trigger(trigger: Option<TriggerConfig>) -> AppConfig {
        AppConfig {
            servers: vec![GerritServerConfig {
                name: "gerrit1".to_string(),
                display_name: None,
                front_end_url: "http://127.0.0.1:9".to_string(),
                use_rest_api: true,
                http_username: Some("ci-bot".to_string()),
                http_password: None,
            }],
            trigger,
            ..AppConfig::default()
        }
    }

    fn build(pairs: &[(&str, &str)]) -> BuildContext {
        BuildContext::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_skips_without_trigger() {
        let config = config_with_trigger(None);
        let store = ConfigCredentialStore::new(Vec::new());
        let catalog = MessageCatalog::embedded().unwrap();
        let publisher = Publisher::new(&config, &store, &catalog);

        let outcome = publisher
            .publish(
                &build(&[("GERRIT_CHANGE_NUMBER", "42")]),
                Some(&AnalysisResult::default()),
                None,
            )
            .await
            .unwrap();
        assert!(matches!(outcome, PublishOutcome::Skipped { .. }));
    }

    #[tokio::test]
    async fn test_skips_without_analysis() {
        let config = config_with_trigger(Some(TriggerConfig::default()));
        let store = ConfigCredentialStore::new(Vec::new());
        let catalog = MessageCatalog::embedded().unwrap();
        let publisher = Publisher::new(&config, &store, &catalog);

        let outcome = publisher
            .publish(&build(&[("GERRIT_NAME", "gerrit1")]), None, None)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            PublishOutcome::Skipped {
                reason: "no analysis result".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_environment_errors_abort_before_connecting() {
        let config = config_with_trigger(Some(TriggerConfig::default()));
        let store = ConfigCredentialStore::new(Vec::new());
        let catalog = MessageCatalog::embedded().unwrap();
        let publisher = Publisher::new(&config, &store, &catalog);
        let analysis = AnalysisResult::default();

        let err = publisher
            .publish(
                &build(&[("GERRIT_CHANGE_NUMBER", "1"), ("GERRIT_PATCHSET_NUMBER", "1")]),
                Some(&analysis),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::MissingConfiguration(_)));

        let err = publisher
            .publish(
                &build(&[
                    ("GERRIT_NAME", "gerrit1"),
                    ("GERRIT_CHANGE_NUMBER", "-5"),
                    ("GERRIT_PATCHSET_NUMBER", "1"),
                ]),
                Some(&analysis),
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::InvalidFormat { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_from_process_tolerates_non_utf8_environment() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let key = "XCAL_GERRIT_TEST_BUILD_NON_UTF8";
        std::env::set_var(key, OsStr::from_bytes(b"f\xffo"));
        std::env::set_var("XCAL_GERRIT_TEST_BUILD_NAME", "gerrit1");

        let build = BuildContext::from_process();
        assert!(!build.env.contains_key(key));
        assert_eq!(
            build.env.get("XCAL_GERRIT_TEST_BUILD_NAME").map(String::as_str),
            Some("gerrit1")
        );

        std::env::remove_var(key);
        std::env::remove_var("XCAL_GERRIT_TEST_BUILD_NAME");
    }

    #[test]
    fn test_load_analysis_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(load_analysis(&missing), Err(AppError::IO(_, _))));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            load_analysis(&broken),
            Err(AppError::AnalysisParse(_, _))
        ));

        let ok = dir.path().join("ok.json");
        fs::write(&ok, r#"{"projectName": "demo", "issuesCount": 3}"#).unwrap();
        let analysis = load_analysis(&ok).unwrap();
        assert_eq!(analysis.project_name, "demo");
        assert_eq!(analysis.issues_count, 3);
    }

    #[test]
    fn test_preview_renders_each_locale() {
        let catalog = MessageCatalog::embedded().unwrap();
        let analysis = AnalysisResult {
            project_name: "demo".to_string(),
            ..AnalysisResult::default()
        };
        let previews = preview_messages(&analysis, &Locale::DEFAULT_ORDER, &catalog).unwrap();
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].0, Locale::English);
        assert!(previews[0].1.contains("demo"));
        assert_eq!(previews[1].0, Locale::SimplifiedChinese);
        assert!(previews[1].1.contains("demo"));
    }
}
