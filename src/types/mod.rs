pub mod analysis;
pub mod cli;
pub mod gerrit;
pub mod locale;

pub use analysis::{AnalysisResult, DiffKind, Issue, IssueAttribute, IssueDiff, RuleNames};
pub use locale::Locale;
