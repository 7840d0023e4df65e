//! Append-only findings of one conversion or validation run.

use serde::Serialize;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Ordered info, warning and error messages.
///
/// Entries are only ever appended; nothing already recorded is changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub info: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.info.push(msg.into());
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Record a message at the given severity.
    pub fn push(&mut self, severity: Severity, msg: impl Into<String>) {
        match severity {
            Severity::Info => self.info(msg),
            Severity::Warning => self.warn(msg),
            Severity::Error => self.error(msg),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of errors and warnings recorded so far.
    pub(crate) fn mark(&self) -> (usize, usize) {
        (self.errors.len(), self.warnings.len())
    }

    /// Check that nothing was added since `mark`.
    pub(crate) fn clean_since(&self, mark: (usize, usize)) -> bool {
        self.mark() == mark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_append() {
        let mut report = Report::new();
        report.info("a");
        report.push(Severity::Warning, "w");
        let mark = report.mark();
        assert!(report.clean_since(mark));

        report.error("e");
        assert!(!report.clean_since(mark));
        assert!(report.has_errors());
        assert!(report.has_warnings());
        assert_eq!(report.info, ["a"]);
    }

    #[test]
    fn test_report_serializes() {
        let mut report = Report::new();
        report.warn("too wide");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["warnings"][0], "too wide");
        assert_eq!(json["errors"].as_array().map(Vec::len), Some(0));
    }
}
