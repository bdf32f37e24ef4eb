//! Import diagnostics.
//!
//! Catalog and placement sheets are messy: numeric cells carry units or
//! notes, rows arrive without a model number, mount kinds are misspelled.
//! None of that aborts an import. Each tolerated problem is recorded as an
//! [`ImportIssue`] so the caller can print them, count them, or fail
//! strictly on its own terms.

use serde::Serialize;
use std::fmt;

/// How bad an import issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The cell was defaulted or dropped; the module still loaded
    Warning,
    /// The row or sheet section could not be used at all
    Error,
}

/// A single tolerated problem found while importing a sheet.
#[derive(Debug, Clone, Serialize)]
pub struct ImportIssue {
    pub severity: Severity,
    /// Grouping key: "parse", "structure", "reference"
    pub category: String,
    pub message: String,
    /// Model number the issue belongs to, when one was readable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Source row, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl fmt::Display for ImportIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{tag}[{}]: {}", self.category, self.message)?;
        if let Some(model) = &self.model {
            write!(f, " (model {model})")?;
        }
        if let Some(row) = self.row {
            write!(f, " at row {row}")?;
        }
        Ok(())
    }
}

/// Issues collected over one import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    issues: Vec<ImportIssue>,
}

fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fully built issue.
    pub fn push(&mut self, issue: ImportIssue) {
        self.issues.push(issue);
    }

    /// Record a warning not tied to any particular module.
    pub fn warn(&mut self, category: &str, message: impl Into<String>) {
        self.push(ImportIssue {
            severity: Severity::Warning,
            category: category.to_string(),
            message: message.into(),
            model: None,
            row: None,
        });
    }

    /// Record a warning against a model number.
    pub fn warn_model(&mut self, category: &str, message: impl Into<String>, model: &str) {
        self.push(ImportIssue {
            severity: Severity::Warning,
            category: category.to_string(),
            message: message.into(),
            model: Some(model.to_string()),
            row: None,
        });
    }

    /// Record an error not tied to any particular module.
    pub fn error(&mut self, category: &str, message: impl Into<String>) {
        self.push(ImportIssue {
            severity: Severity::Error,
            category: category.to_string(),
            message: message.into(),
            model: None,
            row: None,
        });
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportIssue> {
        self.issues.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ImportIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ImportIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Fold another collection's issues into this one.
    pub fn merge(&mut self, other: Diagnostics) {
        self.issues.extend(other.issues);
    }

    /// One-line count summary, e.g. "2 warnings, 1 error".
    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            return "clean".to_string();
        }
        let mut parts = Vec::new();
        let warnings = self.warning_count();
        if warnings > 0 {
            parts.push(count_noun(warnings, "warning"));
        }
        let errors = self.error_count();
        if errors > 0 {
            parts.push(count_noun(errors, "error"));
        }
        parts.join(", ")
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "import diagnostics: {}", self.summary())?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_accumulate_per_model() {
        let mut diag = Diagnostics::new();
        diag.warn_model("parse", "Supervisory Current \"n/a A\" is not numeric", "4100-1248");
        diag.warn("structure", "2 rows had no model number and were skipped");

        assert_eq!(diag.len(), 2);
        assert_eq!(diag.warning_count(), 2);
        assert!(!diag.has_errors());
        assert!(diag.warnings().any(|i| i.model.as_deref() == Some("4100-1248")));
    }

    #[test]
    fn errors_flip_has_errors() {
        let mut diag = Diagnostics::new();
        diag.warn("parse", "price cell defaulted");
        assert!(!diag.has_errors());
        diag.error("structure", "sheet has no header row");
        assert!(diag.has_errors());
        assert_eq!(diag.error_count(), 1);
    }

    #[test]
    fn summary_counts_both_severities() {
        let mut diag = Diagnostics::new();
        assert_eq!(diag.summary(), "clean");
        diag.warn("parse", "x");
        assert_eq!(diag.summary(), "1 warning");
        diag.warn("parse", "y");
        diag.error("structure", "z");
        assert_eq!(diag.summary(), "2 warnings, 1 error");
    }

    #[test]
    fn issue_rendering_carries_model_and_row() {
        let issue = ImportIssue {
            severity: Severity::Warning,
            category: "parse".to_string(),
            message: "Alarm Current is not numeric".to_string(),
            model: Some("4100-1248".to_string()),
            row: Some(12),
        };
        let rendered = issue.to_string();
        assert!(rendered.starts_with("warning[parse]"));
        assert!(rendered.contains("model 4100-1248"));
        assert!(rendered.contains("row 12"));
    }

    #[test]
    fn merge_folds_issue_lists() {
        let mut first = Diagnostics::new();
        first.warn("parse", "a");
        let mut second = Diagnostics::new();
        second.error("structure", "b");
        first.merge(second);
        assert_eq!(first.len(), 2);
        assert!(first.has_errors());
    }
}
