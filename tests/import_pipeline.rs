//! End-to-end pipeline tests: parse → resolve → record over the in-memory
//! store, including the partial-failure policy.

use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use testsimply_import::models::{NewTestCase, NewTestResult, TestCase, TestResult};
use testsimply_import::{
    ImportError, ImportOptions, ImportResult, ImportStore, InMemoryStore, ReportFormat,
    ReportImporter, TestStatus,
};

const LOGIN_SUITE_XML: &str = r#"
<testsuite name="Login" time="3">
  <testcase name="TC-1" time="1"/>
  <testcase name="TC-2" time="2">
    <failure>Invalid credentials</failure>
  </testcase>
</testsuite>"#;

static TRACING: Once = Once::new();

/// Route pipeline logs through the test harness, filtered by RUST_LOG.
fn init_tracing() {
    TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

fn options(auto_create: bool) -> ImportOptions {
    init_tracing();
    ImportOptions::new(Uuid::new_v4(), Uuid::new_v4()).auto_create_cases(auto_create)
}

fn seed_case(store: &InMemoryStore, project_id: Uuid, key: &str, name: &str) -> TestCase {
    store
        .insert_case(NewTestCase {
            project_id,
            key: key.to_string(),
            name: name.to_string(),
            steps: Vec::new(),
            status: "Draft".to_string(),
            tags: Vec::new(),
            component: None,
        })
        .expect("seed case")
}

#[tokio::test]
async fn junit_import_into_empty_project_with_auto_create() {
    let importer = ReportImporter::new(InMemoryStore::new());
    let options = options(true);

    importer
        .import_report(ReportFormat::Junit, LOGIN_SUITE_XML, &options)
        .await
        .expect("import should succeed");

    let cases = importer.store().cases().unwrap();
    assert_eq!(cases.len(), 2);
    for case in &cases {
        assert_eq!(case.project_id, options.project_id);
        assert_eq!(case.status, "Imported");
        assert_eq!(case.component.as_deref(), Some("Login"));
        assert_eq!(case.tags, vec!["imported".to_string()]);
        assert!(case.steps.is_empty());
    }
    assert_eq!(cases[0].key, "TC-1");
    assert_eq!(cases[1].key, "TC-2");

    let results = importer.store().results().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status, TestStatus::Pass);
    assert_eq!(results[0].duration_ms, Some(1000));
    assert_eq!(results[0].steps_log, None);
    assert_eq!(results[1].status, TestStatus::Fail);
    assert_eq!(
        results[1].error_message.as_deref(),
        Some("Invalid credentials")
    );
    for result in &results {
        assert_eq!(result.execution_id, options.execution_id);
    }
}

#[tokio::test]
async fn unmatched_records_are_skipped_without_auto_create() {
    let importer = ReportImporter::new(InMemoryStore::new());
    let options = options(false);

    importer
        .import_report(ReportFormat::Junit, LOGIN_SUITE_XML, &options)
        .await
        .expect("skipping is not an error");

    assert!(importer.store().cases().unwrap().is_empty());
    assert!(importer.store().results().unwrap().is_empty());
}

#[tokio::test]
async fn matched_records_record_results_without_creating_cases() {
    let store = InMemoryStore::new();
    let options = options(false);
    let case = seed_case(&store, options.project_id, "TC-1", "Login happy path");
    let importer = ReportImporter::new(store);

    importer
        .import_report(
            ReportFormat::Junit,
            r#"<testcase name="TC-1"/><testcase name="TC-9"/>"#,
            &options,
        )
        .await
        .expect("import should succeed");

    // TC-9 has no case and is skipped; TC-1 matched the seeded case
    assert_eq!(importer.store().cases().unwrap().len(), 1);
    let results = importer.store().results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].case_id, case.id);
}

#[tokio::test]
async fn reimporting_a_report_duplicates_results_not_cases() {
    let importer = ReportImporter::new(InMemoryStore::new());
    let options = options(true);

    for _ in 0..2 {
        importer
            .import_report(ReportFormat::Junit, LOGIN_SUITE_XML, &options)
            .await
            .expect("import should succeed");
    }

    assert_eq!(importer.store().cases().unwrap().len(), 2);
    assert_eq!(importer.store().results().unwrap().len(), 4);
}

#[tokio::test]
async fn cucumber_import_creates_cases_with_steps_and_tags() {
    let importer = ReportImporter::new(InMemoryStore::new());
    let options = options(true);

    let report = r#"[{
        "name": "Checkout",
        "elements": [{
            "name": "Pay with card",
            "tags": [{"name": "@TC-7"}, {"name": "@smoke"}],
            "steps": [
                {"name": "Given a cart", "result": {"status": "passed", "duration": 1000000}},
                {"name": "When paying", "result": {"status": "failed", "error_message": "declined", "duration": 2000000}}
            ]
        }]
    }]"#;

    importer
        .import_report(ReportFormat::Cucumber, report, &options)
        .await
        .expect("import should succeed");

    let cases = importer.store().cases().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].key, "TC-7");
    assert_eq!(cases[0].name, "Pay with card");
    assert_eq!(cases[0].component.as_deref(), Some("Checkout"));
    assert_eq!(cases[0].tags, vec!["TC-7".to_string(), "smoke".to_string()]);
    assert_eq!(cases[0].steps.len(), 2);
    assert_eq!(cases[0].steps[0].action, "Given a cart");
    assert_eq!(cases[0].steps[0].expected, "");

    let results = importer.store().results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].status, TestStatus::Fail);
    assert_eq!(results[0].duration_ms, Some(3));
    assert_eq!(results[0].error_message.as_deref(), Some("declined"));
    let steps_log = results[0].steps_log.as_ref().expect("cucumber keeps steps");
    assert_eq!(steps_log.len(), 2);
    assert_eq!(steps_log[1].status, TestStatus::Fail);
}

#[tokio::test]
async fn cucumber_matches_existing_case_by_tag_key() {
    let store = InMemoryStore::new();
    let options = options(false);
    let case = seed_case(&store, options.project_id, "TC-42", "Some older name");
    let importer = ReportImporter::new(store);

    let report = r#"[{"name": "F", "elements": [{
        "name": "Renamed scenario",
        "tags": [{"name": "@TC-42"}],
        "steps": [{"name": "s", "result": {"status": "passed"}}]
    }]}]"#;

    importer
        .import_report(ReportFormat::Cucumber, report, &options)
        .await
        .expect("import should succeed");

    let results = importer.store().results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].case_id, case.id);
}

#[tokio::test]
async fn cucumber_scenario_without_steps_records_empty_step_log() {
    let store = InMemoryStore::new();
    let options = options(false);
    seed_case(&store, options.project_id, "TC-3", "Stepless scenario");
    let importer = ReportImporter::new(store);

    let report = r#"[{"name": "F", "elements": [{"name": "Stepless scenario", "steps": []}]}]"#;
    importer
        .import_report(ReportFormat::Cucumber, report, &options)
        .await
        .expect("import should succeed");

    // Cucumber persists the step array even when empty; only JUnit stores null
    let results = importer.store().results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].steps_log, Some(Vec::new()));
}

#[tokio::test]
async fn empty_report_is_a_successful_noop() {
    let importer = ReportImporter::new(InMemoryStore::new());
    let options = options(true);

    importer
        .import_report(ReportFormat::Cucumber, "[]", &options)
        .await
        .expect("empty import is fine");
    importer
        .import_report(ReportFormat::Junit, "<testsuite name=\"s\"></testsuite>", &options)
        .await
        .expect("empty import is fine");

    assert!(importer.store().results().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_cucumber_json_is_rejected() {
    let importer = ReportImporter::new(InMemoryStore::new());
    let err = importer
        .import_report(ReportFormat::Cucumber, "{not json", &options(true))
        .await
        .expect_err("unparseable report");
    assert!(matches!(err, ImportError::InvalidReport(_)));
}

/// Store wrapper that fails the Nth result creation, for exercising the
/// partial-failure policy.
struct FailingStore {
    inner: InMemoryStore,
    fail_on_result: usize,
    result_calls: AtomicUsize,
}

impl FailingStore {
    fn new(fail_on_result: usize) -> Self {
        Self {
            inner: InMemoryStore::new(),
            fail_on_result,
            result_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ImportStore for FailingStore {
    async fn find_case(
        &self,
        project_id: Uuid,
        key: &str,
        name: &str,
    ) -> ImportResult<Option<TestCase>> {
        self.inner.find_case(project_id, key, name).await
    }

    async fn create_case(&self, case: NewTestCase) -> ImportResult<TestCase> {
        self.inner.create_case(case).await
    }

    async fn create_result(&self, result: NewTestResult) -> ImportResult<TestResult> {
        let call = self.result_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on_result {
            return Err(ImportError::Storage("constraint violation".to_string()));
        }
        self.inner.create_result(result).await
    }
}

#[tokio::test]
async fn store_failure_aborts_remaining_records_but_keeps_committed_ones() {
    let importer = ReportImporter::new(FailingStore::new(2));
    let options = options(true);

    let xml = r#"
        <testsuite name="s">
          <testcase name="a"/>
          <testcase name="b"/>
          <testcase name="c"/>
        </testsuite>"#;

    let err = importer
        .import_report(ReportFormat::Junit, xml, &options)
        .await
        .expect_err("second record fails");
    assert!(matches!(err, ImportError::Storage(_)));

    // Record 1 committed, record 2 failed, record 3 never attempted
    let results = importer.store().inner.results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(importer.store().result_calls.load(Ordering::SeqCst), 2);
}
