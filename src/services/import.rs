//! Report import orchestration.
//!
//! Sequences parser → case resolution → result recording for a whole report.
//! Records are processed sequentially in document order; each resolve+record
//! pair commits independently, so a store failure mid-batch leaves the
//! already-written results in place and propagates the error. Concurrent
//! import runs are not coordinated here: two auto-creating uploads racing on
//! the same identity key can create duplicate cases, which the surrounding
//! application accepts.

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::ImportResult;
use crate::models::test_case::IMPORTED_CASE_STATUS;
use crate::models::{ImportedTestRecord, NewTestCase, NewTestResult, TestCase, TestStep};
use crate::store::ImportStore;

use super::cucumber::parse_cucumber_report;
use super::junit::parse_junit_report;

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Junit,
    Cucumber,
}

/// Target coordinates and options for one import run. The project and
/// execution are assumed to exist; resolving them from human-readable keys
/// is the caller's job.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub project_id: Uuid,
    pub execution_id: Uuid,
    pub auto_create_cases: bool,
}

impl ImportOptions {
    pub fn new(project_id: Uuid, execution_id: Uuid) -> Self {
        Self {
            project_id,
            execution_id,
            auto_create_cases: false,
        }
    }

    pub fn auto_create_cases(mut self, auto_create: bool) -> Self {
        self.auto_create_cases = auto_create;
        self
    }
}

/// Imports parsed reports into an execution through an injected store.
pub struct ReportImporter<S> {
    store: S,
}

impl<S: ImportStore> ReportImporter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Import a raw report document. Records that match no case are skipped
    /// silently unless `auto_create_cases` is set; an empty report is not an
    /// error. The first store error aborts the remaining records.
    pub async fn import_report(
        &self,
        format: ReportFormat,
        raw: &str,
        options: &ImportOptions,
    ) -> ImportResult<()> {
        let records = match format {
            ReportFormat::Junit => parse_junit_report(raw),
            ReportFormat::Cucumber => parse_cucumber_report(raw)?,
        };

        info!(
            "Importing {} records into execution {}",
            records.len(),
            options.execution_id
        );

        let mut recorded = 0usize;
        let mut skipped = 0usize;
        for record in &records {
            match self.resolve_case(options, record).await? {
                Some(case) => {
                    self.record_result(options, &case, record).await?;
                    recorded += 1;
                }
                None => {
                    debug!(
                        "No case matching '{}' in project {}, skipping record",
                        record.identity_key, options.project_id
                    );
                    skipped += 1;
                }
            }
        }

        info!(
            "Import complete for execution {}: {} recorded, {} skipped",
            options.execution_id, recorded, skipped
        );

        Ok(())
    }

    /// Look up the case a record belongs to, creating it when allowed.
    async fn resolve_case(
        &self,
        options: &ImportOptions,
        record: &ImportedTestRecord,
    ) -> ImportResult<Option<TestCase>> {
        let existing = self
            .store
            .find_case(options.project_id, &record.identity_key, &record.display_name)
            .await?;
        if existing.is_some() || !options.auto_create_cases {
            return Ok(existing);
        }

        let steps = record
            .step_log
            .iter()
            .flatten()
            .map(|step| TestStep {
                action: step.name.clone(),
                expected: String::new(),
            })
            .collect();
        let case = self
            .store
            .create_case(NewTestCase {
                project_id: options.project_id,
                key: record.identity_key.clone(),
                name: record.display_name.clone(),
                steps,
                status: IMPORTED_CASE_STATUS.to_string(),
                tags: record.tags.clone(),
                component: record.group_name.clone(),
            })
            .await?;
        debug!("Auto-created case '{}' ({})", case.key, case.id);
        Ok(Some(case))
    }

    /// Record one result against a resolved case. Always an insert.
    async fn record_result(
        &self,
        options: &ImportOptions,
        case: &TestCase,
        record: &ImportedTestRecord,
    ) -> ImportResult<()> {
        self.store
            .create_result(NewTestResult {
                execution_id: options.execution_id,
                case_id: case.id,
                status: record.outcome,
                duration_ms: record.duration_ms,
                error_message: record.error_message.clone(),
                steps_log: record.step_log.clone(),
            })
            .await?;
        Ok(())
    }
}
