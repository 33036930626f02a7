//! In-memory store for local development and tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{ImportError, ImportResult};
use crate::models::{NewTestCase, NewTestResult, TestCase, TestResult};

use super::ImportStore;

#[derive(Debug, Default)]
struct Tables {
    cases: Vec<TestCase>,
    results: Vec<TestResult>,
}

/// Mutex-guarded, insertion-ordered store. `find_case` scans cases in
/// creation order, so the oldest matching case wins ties between key and
/// name matches.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing case, e.g. test fixtures or local dev data.
    pub fn insert_case(&self, case: NewTestCase) -> ImportResult<TestCase> {
        let mut tables = self.lock()?;
        let case = materialize_case(case);
        tables.cases.push(case.clone());
        Ok(case)
    }

    /// Snapshot of all stored cases, in creation order.
    pub fn cases(&self) -> ImportResult<Vec<TestCase>> {
        Ok(self.lock()?.cases.clone())
    }

    /// Snapshot of all stored results, in creation order.
    pub fn results(&self) -> ImportResult<Vec<TestResult>> {
        Ok(self.lock()?.results.clone())
    }

    fn lock(&self) -> ImportResult<std::sync::MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| ImportError::Storage("in-memory store mutex poisoned".to_string()))
    }
}

fn materialize_case(case: NewTestCase) -> TestCase {
    TestCase {
        id: Uuid::new_v4(),
        project_id: case.project_id,
        key: case.key,
        name: case.name,
        steps: case.steps,
        status: case.status,
        tags: case.tags,
        component: case.component,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl ImportStore for InMemoryStore {
    async fn find_case(
        &self,
        project_id: Uuid,
        key: &str,
        name: &str,
    ) -> ImportResult<Option<TestCase>> {
        let tables = self.lock()?;
        Ok(tables
            .cases
            .iter()
            .find(|case| case.project_id == project_id && (case.key == key || case.name == name))
            .cloned())
    }

    async fn create_case(&self, case: NewTestCase) -> ImportResult<TestCase> {
        self.insert_case(case)
    }

    async fn create_result(&self, result: NewTestResult) -> ImportResult<TestResult> {
        let mut tables = self.lock()?;
        let result = TestResult {
            id: Uuid::new_v4(),
            execution_id: result.execution_id,
            case_id: result.case_id,
            status: result.status,
            duration_ms: result.duration_ms,
            error_message: result.error_message,
            steps_log: result.steps_log,
            created_at: Utc::now(),
        };
        tables.results.push(result.clone());
        Ok(result)
    }
}
