//! JUnit XML report parsing.
//!
//! Produces one [`ImportedTestRecord`] per `<testcase>`. The parser is
//! deliberately tolerant: testcases may live under any number of
//! `<testsuite>` elements or appear bare with no wrapper at all, missing
//! attributes inherit from the enclosing suite, and malformed XML terminates
//! the scan with whatever was parsed up to that point instead of erroring.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use tracing::warn;

use crate::models::{ImportedTestRecord, TestStatus};

const TAG_TEST_SUITE: &[u8] = b"testsuite";
const TAG_TEST_CASE: &[u8] = b"testcase";
const TAG_FAILURE: &[u8] = b"failure";
const TAG_ERROR: &[u8] = b"error";
const TAG_SKIPPED: &[u8] = b"skipped";

/// Tag applied to every case auto-created from a JUnit report.
pub const JUNIT_IMPORT_TAG: &str = "imported";

/// Parse a JUnit XML document into normalized records, in document order.
pub fn parse_junit_report(xml: &str) -> Vec<ImportedTestRecord> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parser = JunitReportParser::default();
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => parser.match_event(event),
            Err(err) => {
                warn!(
                    "Malformed JUnit XML after {} records, keeping partial parse: {}",
                    parser.records.len(),
                    err
                );
                break;
            }
        }
    }
    parser.records
}

/// Enclosing `<testsuite>` attributes a testcase may inherit.
#[derive(Debug)]
struct SuiteContext {
    name: Option<String>,
    time_ms: Option<i64>,
}

#[derive(Debug)]
struct PendingCase {
    name: String,
    classname: Option<String>,
    time_ms: Option<i64>,
    failed: bool,
    skipped: bool,
    failure_text: Option<String>,
}

#[derive(Debug, Default)]
struct JunitReportParser {
    records: Vec<ImportedTestRecord>,
    suites: Vec<SuiteContext>,
    current_case: Option<PendingCase>,
    // Some while inside the first <failure>/<error> of the current case
    failure_buf: Option<String>,
}

impl JunitReportParser {
    fn match_event(&mut self, event: Event) {
        match event {
            Event::Start(e) => match e.name().as_ref() {
                TAG_TEST_SUITE => self.open_test_suite(&e),
                TAG_TEST_CASE => self.open_test_case(&e),
                TAG_FAILURE | TAG_ERROR => self.open_failure(),
                TAG_SKIPPED => self.mark_skipped(),
                _ => (),
            },
            Event::End(e) => match e.name().as_ref() {
                TAG_TEST_SUITE => self.close_test_suite(),
                TAG_TEST_CASE => self.close_test_case(),
                TAG_FAILURE | TAG_ERROR => self.close_failure(),
                _ => (),
            },
            Event::Empty(e) => match e.name().as_ref() {
                TAG_TEST_SUITE => {
                    self.open_test_suite(&e);
                    self.close_test_suite();
                }
                TAG_TEST_CASE => {
                    self.open_test_case(&e);
                    self.close_test_case();
                }
                TAG_FAILURE | TAG_ERROR => {
                    self.open_failure();
                    self.close_failure();
                }
                TAG_SKIPPED => self.mark_skipped(),
                _ => (),
            },
            Event::Text(e) => self.append_failure_text(&e),
            Event::CData(e) => {
                if let Ok(e) = e.minimal_escape() {
                    self.append_failure_text(&e);
                }
            }
            _ => (),
        }
    }

    fn open_test_suite(&mut self, e: &BytesStart) {
        self.suites.push(SuiteContext {
            name: parse_attr::string(e, "name"),
            time_ms: parse_attr::time_ms(e),
        });
    }

    fn close_test_suite(&mut self) {
        self.suites.pop();
    }

    fn open_test_case(&mut self, e: &BytesStart) {
        self.current_case = Some(PendingCase {
            name: parse_attr::string(e, "name").unwrap_or_default(),
            classname: parse_attr::string(e, "classname"),
            time_ms: parse_attr::time_ms(e),
            failed: false,
            skipped: false,
            failure_text: None,
        });
    }

    fn close_test_case(&mut self) {
        let Some(case) = self.current_case.take() else {
            return;
        };
        self.failure_buf = None;

        let suite = self.suites.last();
        let outcome = if case.failed {
            TestStatus::Fail
        } else if case.skipped {
            TestStatus::Skipped
        } else {
            TestStatus::Pass
        };
        let error_message = case
            .failure_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(String::from);

        self.records.push(ImportedTestRecord {
            identity_key: case.name.clone(),
            display_name: case.name,
            group_name: case
                .classname
                .or_else(|| suite.and_then(|s| s.name.clone())),
            step_log: None,
            tags: vec![JUNIT_IMPORT_TAG.to_string()],
            duration_ms: case.time_ms.or_else(|| suite.and_then(|s| s.time_ms)),
            outcome,
            error_message,
        });
    }

    fn open_failure(&mut self) {
        if let Some(case) = self.current_case.as_mut() {
            // Only the first failure/error contributes the message
            if !case.failed {
                self.failure_buf = Some(String::new());
            }
            case.failed = true;
        }
    }

    fn close_failure(&mut self) {
        if let (Some(case), Some(buf)) = (self.current_case.as_mut(), self.failure_buf.take()) {
            case.failure_text = Some(buf);
        }
    }

    fn mark_skipped(&mut self) {
        if let Some(case) = self.current_case.as_mut() {
            case.skipped = true;
        }
    }

    fn append_failure_text(&mut self, e: &BytesText) {
        if let Some(buf) = self.failure_buf.as_mut() {
            if let Ok(text) = e.unescape() {
                buf.push_str(&text);
            }
        }
    }
}

mod parse_attr {
    use quick_xml::events::BytesStart;

    pub fn string(e: &BytesStart, attr_name: &str) -> Option<String> {
        e.try_get_attribute(attr_name)
            .ok()
            .flatten()
            .and_then(|attr| attr.unescape_value().ok())
            .map(String::from)
    }

    /// `time` attribute in seconds, converted to rounded milliseconds.
    pub fn time_ms(e: &BytesStart) -> Option<i64> {
        string(e, "time")
            .and_then(|value| value.parse::<f64>().ok())
            .map(|seconds| (seconds * 1000.0).round() as i64)
    }
}
