use crate::{
    errors::PublishError,
    types::{AnalysisResult, DiffKind, IssueDiff, Locale},
};

use super::catalog::{MessageCatalog, MessageId};

/// Issue attribute holding the number of trace-set elements, shown as the issue's path.
pub const TRACE_SET_ATTRIBUTE: &str = "NO_OF_TRACE_SET";

const CHINESE_SEVERITIES: [(&str, &str); 3] = [("HIGH", "高"), ("MEDIUM", "中"), ("LOW", "低")];

/// An issue diff together with its derived path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffRow<'a> {
    pub diff: &'a IssueDiff,
    pub path: &'a str,
}

/// Compose the review message for one locale.
///
/// Summary block, then the delta block when a baseline was scanned, then
/// the new and fixed issue sections. Lines are joined with `\n`.
pub fn build_message(
    result: &AnalysisResult,
    locale: Locale,
    catalog: &MessageCatalog,
) -> Result<String, PublishError> {
    let mut lines = vec![catalog.render(
        MessageId::Result,
        locale,
        &[
            &result.project_name,
            &result.commit_id,
            &result.risk,
            &result.issues_count,
            &result.definite_count,
            &result.high_priority_count,
            &result.medium_priority_count,
            &result.low_priority_count,
            &result.url,
        ],
    )?];

    if let Some(baseline) = result.baseline() {
        lines.push(catalog.render(
            MessageId::Dsr,
            locale,
            &[
                &result.new_issue_count,
                &result.fixed_issue_count,
                &baseline,
                &result.dsr_url.as_deref().unwrap_or_default(),
            ],
        )?);
    }

    if !result.issue_diffs.is_empty() {
        let rows = derive_rows(&result.issue_diffs)?;
        require_rule_info(result)?;
        let (new_rows, fixed_rows) = partition_rows(&rows);

        if !new_rows.is_empty() {
            lines.push(catalog.render(MessageId::DsrNew, locale, &[&new_rows.len()])?);
            for row in &new_rows {
                lines.push(detail_line(result, row, locale, catalog)?);
            }
        }
        if !fixed_rows.is_empty() {
            lines.push(catalog.render(MessageId::DsrFixed, locale, &[&fixed_rows.len()])?);
            for row in &fixed_rows {
                lines.push(detail_line(result, row, locale, catalog)?);
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Attach the trace-set path to every diff, unchanged ones included.
pub fn derive_rows(diffs: &[IssueDiff]) -> Result<Vec<DiffRow<'_>>, PublishError> {
    diffs
        .iter()
        .map(|diff| {
            let path = diff.issue.attribute(TRACE_SET_ATTRIBUTE).ok_or_else(|| {
                PublishError::MissingAttribute {
                    issue_seq: diff.issue.seq.clone(),
                    attribute: TRACE_SET_ATTRIBUTE.to_string(),
                }
            })?;
            Ok(DiffRow { diff, path })
        })
        .collect()
}

/// Every diff, unchanged ones included, needs a rule-info entry for its code.
pub fn require_rule_info(result: &AnalysisResult) -> Result<(), PublishError> {
    match result
        .issue_diffs
        .iter()
        .find(|diff| !result.rule_info.contains_key(&diff.issue_code))
    {
        Some(diff) => Err(PublishError::MissingRuleInfo {
            issue_code: diff.issue_code.clone(),
            field: "rule_info".to_string(),
        }),
        None => Ok(()),
    }
}

/// Split rows into (new, fixed), keeping input order; other kinds are dropped.
pub fn partition_rows<'r, 'a>(
    rows: &'r [DiffRow<'a>],
) -> (Vec<&'r DiffRow<'a>>, Vec<&'r DiffRow<'a>>) {
    let new_rows = rows.iter().filter(|r| r.diff.kind() == DiffKind::New).collect();
    let fixed_rows = rows.iter().filter(|r| r.diff.kind() == DiffKind::Fixed).collect();
    (new_rows, fixed_rows)
}

pub fn localized_severity(severity: &str, locale: Locale) -> Result<&str, PublishError> {
    match locale {
        Locale::SimplifiedChinese => CHINESE_SEVERITIES
            .iter()
            .find(|(raw, _)| *raw == severity)
            .map(|(_, localized)| *localized)
            .ok_or_else(|| PublishError::InvalidSeverity(severity.to_string())),
        Locale::English => Ok(severity),
    }
}

pub fn rule_name<'a>(
    result: &'a AnalysisResult,
    issue_code: &str,
    locale: Locale,
) -> Result<&'a str, PublishError> {
    let field = match locale {
        Locale::SimplifiedChinese => "rule_name_chi",
        Locale::English => "rule_name_eng",
    };
    let missing = || PublishError::MissingRuleInfo {
        issue_code: issue_code.to_string(),
        field: field.to_string(),
    };

    let names = result.rule_info.get(issue_code).ok_or_else(missing)?;
    let name = match locale {
        Locale::SimplifiedChinese => names.rule_name_chi.as_deref(),
        Locale::English => names.rule_name_eng.as_deref(),
    };
    name.ok_or_else(missing)
}

fn detail_line(
    result: &AnalysisResult,
    row: &DiffRow<'_>,
    locale: Locale,
    catalog: &MessageCatalog,
) -> Result<String, PublishError> {
    let diff = row.diff;
    let severity = localized_severity(&diff.severity, locale)?;
    let rule = rule_name(result, &diff.issue_code, locale)?;
    let rule_set = diff.issue.rule_information.rule_set_display_name.to_uppercase();

    catalog.render(
        MessageId::DsrDetail,
        locale,
        &[
            &severity,
            &diff.issue.seq,
            &diff.issue_code,
            &rule,
            &rule_set,
            &diff.relative_path,
            &diff.line_no,
            &diff.function_name,
            &diff.variable_name,
            &row.path,
        ],
    )
}
