//! Domain models for the import pipeline.

pub mod record;
pub mod status;
pub mod test_case;
pub mod test_result;

// Re-export commonly used types
pub use record::{ImportedTestRecord, StepOutcome};
pub use status::TestStatus;
pub use test_case::{NewTestCase, TestCase, TestStep};
pub use test_result::{NewTestResult, TestResult};
