//! Report parsing and import services.

pub mod cucumber;
pub mod import;
pub mod junit;

pub use cucumber::{flatten_features, parse_cucumber_report, CucumberFeature};
pub use import::{ImportOptions, ReportFormat, ReportImporter};
pub use junit::parse_junit_report;
