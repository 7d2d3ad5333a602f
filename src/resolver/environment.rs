//! Gerrit change coordinates taken from the build environment.

use std::collections::HashMap;

use crate::{config::TriggerConfig, errors::PublishError};

/// Environment variables set by Gerrit-triggered CI jobs.
pub const GERRIT_NAME: &str = "GERRIT_NAME";
pub const GERRIT_CHANGE_NUMBER: &str = "GERRIT_CHANGE_NUMBER";
pub const GERRIT_PATCHSET_NUMBER: &str = "GERRIT_PATCHSET_NUMBER";
pub const GERRIT_EVENT_TYPE: &str = "GERRIT_EVENT_TYPE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeNumber(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatchsetNumber(pub u32);

impl std::fmt::Display for ChangeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for PatchsetNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The Gerrit trigger attached to a build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GerritTrigger {
    pub server_name: Option<String>,
}

impl GerritTrigger {
    /// A build counts as Gerrit-triggered when a trigger is configured or the
    /// environment carries a Gerrit event type.
    pub fn detect(env: &HashMap<String, String>, config: Option<&TriggerConfig>) -> Option<Self> {
        match config {
            Some(trigger) => Some(Self {
                server_name: trigger.server_name.clone(),
            }),
            None if non_blank(env, GERRIT_EVENT_TYPE).is_some() => Some(Self::default()),
            None => None,
        }
    }
}

/// `GERRIT_NAME`, falling back to the trigger's configured server.
pub fn resolve_server_name(
    env: &HashMap<String, String>,
    trigger: Option<&GerritTrigger>,
) -> Result<String, PublishError> {
    non_blank(env, GERRIT_NAME)
        .or_else(|| {
            trigger
                .and_then(|t| t.server_name.as_deref())
                .filter(|name| !name.trim().is_empty())
        })
        .map(|name| name.trim().to_string())
        .ok_or_else(|| {
            PublishError::MissingConfiguration("Gerrit server name is empty".to_string())
        })
}

pub fn resolve_change_number(env: &HashMap<String, String>) -> Result<ChangeNumber, PublishError> {
    parse_number(env, GERRIT_CHANGE_NUMBER).map(ChangeNumber)
}

pub fn resolve_patchset_number(
    env: &HashMap<String, String>,
) -> Result<PatchsetNumber, PublishError> {
    parse_number(env, GERRIT_PATCHSET_NUMBER).map(PatchsetNumber)
}

/// Current process environment; entries that are not valid UTF-8 are skipped.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}

fn non_blank<'a>(env: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    env.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
}

/// Decimal digits only: leading zeros are fine, signs are not.
fn parse_number(env: &HashMap<String, String>, key: &str) -> Result<u32, PublishError> {
    let raw = non_blank(env, key)
        .ok_or_else(|| PublishError::MissingConfiguration(format!("{} is empty", key)))?;
    let trimmed = raw.trim();

    let invalid = || PublishError::InvalidFormat {
        parameter: key.to_string(),
        value: raw.to_string(),
    };
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    trimmed.parse::<u32>().map_err(|_| invalid())
}
