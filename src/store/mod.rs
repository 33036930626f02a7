//! Persistence collaborator consumed by the import pipeline.
//!
//! The pipeline never talks to a database directly; it is handed an
//! [`ImportStore`] and performs single-row find/create calls through it. The
//! surrounding application provides the production implementation;
//! [`InMemoryStore`] covers local development and tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ImportResult;
use crate::models::{NewTestCase, NewTestResult, TestCase, TestResult};

pub mod memory;

pub use memory::InMemoryStore;

/// Find/create operations the importer needs from the persistence layer.
#[async_trait]
pub trait ImportStore: Send + Sync {
    /// Find the first case in the project whose `key` equals `key` OR whose
    /// `name` equals `name`. The OR is deliberate: imported reports may carry
    /// either a case key (via tags) or a bare scenario name. Implementations
    /// must use a stable iteration order and document it.
    async fn find_case(
        &self,
        project_id: Uuid,
        key: &str,
        name: &str,
    ) -> ImportResult<Option<TestCase>>;

    /// Create a test case.
    async fn create_case(&self, case: NewTestCase) -> ImportResult<TestCase>;

    /// Create a test result. Always an insert; results are never upserted.
    async fn create_result(&self, result: NewTestResult) -> ImportResult<TestResult>;
}
