//! Persisted test-case definition as seen by the importer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status stamped on cases created by an import. This is a free
/// lifecycle field on the case, not the execution-status enum.
pub const IMPORTED_CASE_STATUS: &str = "Imported";

/// A single authored step of a test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestStep {
    /// Action to perform
    pub action: String,
    /// Expected outcome (empty for imported cases)
    pub expected: String,
}

/// A reusable test-case definition within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    /// Internal ID
    pub id: Uuid,
    /// Owning project
    pub project_id: Uuid,
    /// Short unique key within the project (e.g. "TC-42")
    pub key: String,
    /// Human-readable name
    pub name: String,
    /// Authored steps
    pub steps: Vec<TestStep>,
    /// Lifecycle status label
    pub status: String,
    /// Free-form tags
    pub tags: Vec<String>,
    /// Owning component/suite
    pub component: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a test case.
#[derive(Debug, Clone)]
pub struct NewTestCase {
    pub project_id: Uuid,
    pub key: String,
    pub name: String,
    pub steps: Vec<TestStep>,
    pub status: String,
    pub tags: Vec<String>,
    pub component: Option<String>,
}
