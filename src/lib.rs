//! TestSimply report import library.
//!
//! This library implements the test-report ingestion pipeline: JUnit XML and
//! Cucumber JSON reports are parsed into normalized records, matched against
//! persisted test cases (optionally creating missing ones), and recorded as
//! per-execution results through an injected persistence store.

pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use error::{ImportError, ImportResult};
pub use models::{ImportedTestRecord, StepOutcome, TestCase, TestResult, TestStatus};
pub use services::{ImportOptions, ReportFormat, ReportImporter};
pub use store::{ImportStore, InMemoryStore};
