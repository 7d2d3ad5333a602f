use std::time::Duration;

use reqwest::{header, Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::GerritServerConfig,
    errors::{GerritError, PublishError},
    resolver::{ChangeNumber, PatchsetNumber, UsernamePassword},
    types::gerrit::{ChangeSummary, ReviewInput, ReviewResult},
};

/// Anti-XSSI prefix Gerrit puts in front of every JSON response.
const XSSI_PREFIX: &str = ")]}'";

pub struct GerritClient {
    server_name: String,
    base_url: Url,
    username: String,
    password: Option<String>,
    client: Client,
}

impl std::fmt::Debug for GerritClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GerritClient")
            .field("server_name", &self.server_name)
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl GerritClient {
    /// Connect to the named server.
    ///
    /// Credential fields that are absent or blank fall back to the server's
    /// `http_username`/`http_password`. A failed connectivity probe is only
    /// logged; real errors surface on the first review call.
    pub async fn connect(
        servers: &[GerritServerConfig],
        server_name: &str,
        credentials: Option<&UsernamePassword>,
        timeout: Duration,
    ) -> Result<Self, PublishError> {
        let server = servers
            .iter()
            .find(|s| s.name == server_name)
            .ok_or_else(|| {
                PublishError::MissingConfiguration(format!(
                    "Gerrit server '{}' is not configured",
                    server_name
                ))
            })?;

        if !server.use_rest_api {
            return Err(PublishError::RestApiDisabled {
                server: server.name.clone(),
            });
        }

        let username = pick(
            credentials.and_then(|c| c.username.as_deref()),
            server.http_username.as_deref(),
        )
        .ok_or_else(|| {
            PublishError::MissingConfiguration(format!(
                "no username for Gerrit server '{}'",
                server.name
            ))
        })?;
        let password = pick(
            credentials.and_then(|c| c.password.as_deref()),
            server.http_password.as_deref(),
        );

        let base_url = base_url(&server.front_end_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GerritError::NetworkError)?;

        let gerrit = GerritClient {
            server_name: server.name.clone(),
            base_url,
            username,
            password,
            client,
        };

        match gerrit.probe().await {
            Ok(changes) => tracing::debug!(
                server = %gerrit.server_name,
                visible_changes = changes.len(),
                "Gerrit connectivity probe succeeded"
            ),
            Err(e) => tracing::debug!(
                server = %gerrit.server_name,
                "Gerrit connectivity probe failed: {}",
                e
            ),
        }

        Ok(gerrit)
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn revision(
        &self,
        change: ChangeNumber,
        patchset: PatchsetNumber,
    ) -> Result<RevisionHandle<'_>, PublishError> {
        let url = self.endpoint(&format!("a/changes/{}/revisions/{}/", change, patchset))?;
        Ok(RevisionHandle { client: self, url })
    }

    /// `GET /a/config/server/version`
    pub async fn server_version(&self) -> Result<String, GerritError> {
        let url = self.endpoint("a/config/server/version")?;
        self.send_json(self.client.get(url)).await
    }

    async fn probe(&self) -> Result<Vec<ChangeSummary>, GerritError> {
        let url = self.endpoint("a/changes/?n=1")?;
        self.send_json(self.client.get(url)).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, GerritError> {
        join_url(&self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GerritError> {
        let response = request
            .basic_auth(&self.username, self.password.as_deref())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(GerritError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(GerritError::from_transport)?;

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(GerritError::AuthenticationError {
                    status_code: status.as_u16(),
                })
            }
            s if !s.is_success() => Err(GerritError::ServerError {
                status_code: s.as_u16(),
                body,
            }),
            _ => parse_body(&body),
        }
    }
}

/// A single patchset of a change, ready to receive reviews.
#[derive(Debug)]
pub struct RevisionHandle<'a> {
    client: &'a GerritClient,
    url: Url,
}

impl RevisionHandle<'_> {
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Post a review carrying only `message`.
    ///
    /// An HTTP-level success is returned as is, even when the body reports an
    /// `error`; callers decide what a rejection means.
    pub async fn review(&self, message: &str) -> Result<ReviewResult, GerritError> {
        let url = join_url(&self.url, "review")?;
        let request = self.client.client.post(url).json(&ReviewInput::message(message));
        self.client.send_json(request).await
    }
}

/// First non-blank value of the two.
fn pick(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    primary
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.filter(|v| !v.trim().is_empty()))
        .map(str::to_string)
}

fn base_url(front_end_url: &str) -> Result<Url, GerritError> {
    let normalized = format!("{}/", front_end_url.trim().trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| {
        GerritError::ParseError(format!("invalid Gerrit URL '{}': {}", front_end_url, e))
    })
}

fn join_url(base: &Url, path: &str) -> Result<Url, GerritError> {
    base.join(path)
        .map_err(|e| GerritError::ParseError(format!("invalid Gerrit URL for '{}': {}", path, e)))
}

pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, GerritError> {
    let json = body.strip_prefix(XSSI_PREFIX).unwrap_or(body).trim_start();
    serde_json::from_str(json).map_err(|e| GerritError::ParseError(e.to_string()))
}
