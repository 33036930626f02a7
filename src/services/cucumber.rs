//! Cucumber JSON report parsing.
//!
//! This module handles flattening Cucumber's feature/scenario/step JSON into
//! normalized records. The schema structs only pin down the fields the
//! importer reads; everything else in the report is ignored and missing
//! fields default leniently.

use serde::Deserialize;

use crate::error::ImportResult;
use crate::models::{ImportedTestRecord, StepOutcome, TestStatus};

/// A top-level feature entry in a Cucumber JSON report.
#[derive(Debug, Deserialize)]
pub struct CucumberFeature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<CucumberScenario>,
}

/// A scenario (element) inside a feature.
#[derive(Debug, Deserialize)]
pub struct CucumberScenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<CucumberTag>,
    #[serde(default)]
    pub steps: Vec<CucumberStep>,
}

/// A tag attached to a scenario, e.g. `@TC-42`.
#[derive(Debug, Deserialize)]
pub struct CucumberTag {
    #[serde(default)]
    pub name: String,
}

/// A single step with its outcome.
#[derive(Debug, Deserialize)]
pub struct CucumberStep {
    #[serde(default)]
    pub name: String,
    pub result: Option<CucumberStepResult>,
}

/// Outcome of one step. `duration` is in nanoseconds.
#[derive(Debug, Deserialize)]
pub struct CucumberStepResult {
    pub status: Option<String>,
    #[serde(default)]
    pub duration: u64,
    pub error_message: Option<String>,
}

/// Parse a raw Cucumber JSON document (an array of features) into normalized
/// records. Unparseable top-level JSON is rejected here at the typed
/// boundary; missing fields inside a well-formed document are tolerated.
pub fn parse_cucumber_report(json: &str) -> ImportResult<Vec<ImportedTestRecord>> {
    let features: Vec<CucumberFeature> = serde_json::from_str(json)?;
    Ok(flatten_features(&features))
}

/// Flatten parsed features into one record per scenario, in document order.
pub fn flatten_features(features: &[CucumberFeature]) -> Vec<ImportedTestRecord> {
    features
        .iter()
        .flat_map(|feature| {
            feature
                .elements
                .iter()
                .map(|scenario| flatten_scenario(feature, scenario))
        })
        .collect()
}

fn flatten_scenario(feature: &CucumberFeature, scenario: &CucumberScenario) -> ImportedTestRecord {
    let tag_names: Vec<&str> = scenario
        .tags
        .iter()
        .map(|tag| tag.name.as_str())
        .filter(|name| !name.is_empty())
        .collect();

    // A leading-@ tag doubles as the case key, beating the scenario name
    let identity_key = tag_names
        .iter()
        .find(|name| name.starts_with('@'))
        .map(|name| name.trim_start_matches('@').to_string())
        .unwrap_or_else(|| scenario.name.clone());

    let step_log: Vec<StepOutcome> = scenario
        .steps
        .iter()
        .map(|step| StepOutcome {
            name: step.name.clone(),
            status: TestStatus::normalize(
                step.result.as_ref().and_then(|r| r.status.as_deref()),
            ),
            error: step
                .result
                .as_ref()
                .and_then(|r| r.error_message.clone()),
        })
        .collect();

    // The overall outcome only detects failure; a scenario made of skipped
    // steps still comes out as PASS. JUnit imports behave differently, and
    // downstream dashboards rely on both behaviors as they are.
    let outcome = if step_log.iter().any(|s| s.status == TestStatus::Fail) {
        TestStatus::Fail
    } else {
        TestStatus::Pass
    };

    let error_message = step_log
        .iter()
        .find(|s| s.status == TestStatus::Fail)
        .and_then(|s| s.error.clone());

    let total_ns: u64 = scenario
        .steps
        .iter()
        .filter_map(|step| step.result.as_ref())
        .map(|r| r.duration)
        .sum();
    let duration_ms = if total_ns == 0 {
        None
    } else {
        Some(((total_ns as f64) / 1_000_000.0).round() as i64)
    };

    ImportedTestRecord {
        identity_key,
        display_name: scenario.name.clone(),
        group_name: if feature.name.is_empty() {
            None
        } else {
            Some(feature.name.clone())
        },
        // Cucumber always carries a step log, even an empty one; only the
        // flat JUnit path leaves it out entirely
        step_log: Some(step_log),
        tags: tag_names
            .iter()
            .map(|name| name.trim_start_matches('@').to_string())
            .collect(),
        duration_ms,
        outcome,
        error_message,
    }
}
