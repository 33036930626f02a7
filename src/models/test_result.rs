//! Persisted result of one case within one execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{StepOutcome, TestStatus};

/// One recorded outcome of one case within one execution.
///
/// Results are append-only: every import run creates fresh rows, so
/// re-importing the same report duplicates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    /// Internal ID
    pub id: Uuid,
    /// Owning execution
    pub execution_id: Uuid,
    /// Resolved case
    pub case_id: Uuid,
    /// Canonical status
    pub status: TestStatus,
    /// Elapsed time in milliseconds
    pub duration_ms: Option<i64>,
    /// First failure/error message
    pub error_message: Option<String>,
    /// Per-step outcomes (None for flat imports)
    pub steps_log: Option<Vec<StepOutcome>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a test result.
#[derive(Debug, Clone)]
pub struct NewTestResult {
    pub execution_id: Uuid,
    pub case_id: Uuid,
    pub status: TestStatus,
    pub duration_ms: Option<i64>,
    pub error_message: Option<String>,
    pub steps_log: Option<Vec<StepOutcome>>,
}
