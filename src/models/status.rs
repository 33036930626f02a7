//! Canonical result status and source-format status normalization.

use serde::{Deserialize, Serialize};

/// Canonical execution status of an imported result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    Skipped,
}

impl TestStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skipped => "SKIPPED",
        }
    }

    /// Normalize a raw source-format status string.
    ///
    /// An absent or empty status counts as success, and so does any string
    /// outside the known vocabulary ("passed" included). This leniency is
    /// deliberate: reports from the wild carry framework-specific statuses
    /// and the importer degrades them to PASS rather than rejecting the
    /// report. "undefined" is Cucumber's missing-step-definition marker and
    /// counts as a failure.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Pass;
        };
        match raw.to_ascii_lowercase().as_str() {
            "skipped" | "pending" => Self::Skipped,
            "failed" | "failure" | "error" | "undefined" => Self::Fail,
            _ => Self::Pass,
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
