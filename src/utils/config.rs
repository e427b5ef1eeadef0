use std::path::PathBuf;

use crate::client::DEFAULT_BASE_URL;

/// Default location of the JSON report, relative to the working directory
pub const DEFAULT_REPORT_PATH: &str = "test_report.json";

/// Run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the pet-store API, e.g. `https://petstore.swagger.io/v2`
    pub base_url: String,

    /// JSON report file, overwritten on every run
    pub report_path: PathBuf,

    /// Optional JUnit XML export
    pub junit_path: Option<PathBuf>,

    /// Keep running the full-flow steps after one of them fails
    pub flow_continue_on_failure: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            junit_path: None,
            flow_continue_on_failure: true,
        }
    }
}
