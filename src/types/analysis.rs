use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Issue-diff result attached to a build by the Xcalscan analysis step.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub project_name: String,
    pub commit_id: String,
    pub risk: String,
    pub issues_count: u64,
    pub definite_count: u64,
    pub high_priority_count: u64,
    pub medium_priority_count: u64,
    pub low_priority_count: u64,
    /// Dashboard link for this scan.
    pub url: String,
    pub baseline_commit_id: Option<String>,
    /// Diff-summary report link, meaningful only with a baseline.
    pub dsr_url: Option<String>,
    pub new_issue_count: u64,
    pub fixed_issue_count: u64,
    pub issue_diffs: Vec<IssueDiff>,
    pub rule_info: HashMap<String, RuleNames>,
}

impl AnalysisResult {
    /// Baseline commit, if one was scanned against.
    pub fn baseline(&self) -> Option<&str> {
        self.baseline_commit_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueDiff {
    /// `NEW`, `FIXED`, or anything else for unchanged issues.
    pub r#type: String,
    pub issue_code: String,
    pub severity: String,
    pub relative_path: String,
    pub line_no: i64,
    pub function_name: String,
    pub variable_name: String,
    pub issue: Issue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    New,
    Fixed,
    Unchanged,
}

impl IssueDiff {
    pub fn kind(&self) -> DiffKind {
        if self.r#type.eq_ignore_ascii_case("NEW") {
            DiffKind::New
        } else if self.r#type.eq_ignore_ascii_case("FIXED") {
            DiffKind::Fixed
        } else {
            DiffKind::Unchanged
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Issue {
    #[serde(deserialize_with = "string_or_number")]
    pub seq: String,
    pub issue_attributes: Vec<IssueAttribute>,
    pub rule_information: RuleInformation,
}

impl Issue {
    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.issue_attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

/// Issue sequence ids arrive as either JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {}",
            other
        ))),
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct IssueAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleInformation {
    pub rule_set_display_name: String,
}

/// Display names of a rule, keyed by issue code in [`AnalysisResult::rule_info`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RuleNames {
    pub rule_name_eng: Option<String>,
    pub rule_name_chi: Option<String>,
}
