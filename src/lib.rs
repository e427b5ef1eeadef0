pub mod client;
pub mod fixture;
pub mod menu;
pub mod recorder;
pub mod report;
pub mod runner;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export common items
pub use client::ApiClient;
pub use report::Report;
pub use runner::{run_full_suite, run_single_flow, ScenarioRunner};
pub use utils::config::Config;
