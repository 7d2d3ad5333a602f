//! Gerrit REST request and response bodies used by the client.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /changes/{id}/revisions/{rev}/review`.
///
/// Only a message is sent; no labels and no inline comments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewInput {
    pub message: String,
}

impl ReviewInput {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of a review submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReviewResult {
    #[serde(default)]
    pub labels: HashMap<String, i32>,
    #[serde(default)]
    pub ready: Option<bool>,
    /// Set by the server when the review was accepted at HTTP level but not applied.
    #[serde(default)]
    pub error: Option<String>,
}

impl ReviewResult {
    /// Non-empty server-side error, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Minimal change summary returned by the connectivity probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeSummary {
    pub id: String,
    #[serde(rename = "_number")]
    pub number: i64,
    #[serde(default)]
    pub project: Option<String>,
}
