//! Normalized records produced by the report parsers.

use serde::{Deserialize, Serialize};

use super::TestStatus;

/// Outcome of a single step inside a scenario.
///
/// Serialized as-is into the result's steps log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step name as it appears in the report
    pub name: String,
    /// Normalized step status
    pub status: TestStatus,
    /// Error message attached to the step (if any)
    pub error: Option<String>,
}

/// One normalized unit of outcome extracted from a report: a JUnit testcase
/// or a Cucumber scenario. Transient; never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedTestRecord {
    /// Tag-derived or name-derived key used to match an existing case
    pub identity_key: String,
    /// Human-readable test/scenario name
    pub display_name: String,
    /// Owning suite/feature name; becomes the component on auto-create
    pub group_name: Option<String>,
    /// Ordered per-step outcomes; None for flat (JUnit) imports, Some
    /// (possibly empty) for step-based (Cucumber) imports
    pub step_log: Option<Vec<StepOutcome>>,
    /// Tags applied when auto-creating a case
    pub tags: Vec<String>,
    /// Elapsed time normalized to milliseconds
    pub duration_ms: Option<i64>,
    /// Overall record status, derived from the worst signal
    pub outcome: TestStatus,
    /// First failure/error message encountered
    pub error_message: Option<String>,
}
