//! Recorder module for capturing assertion outcomes
//!
//! Every judged step ends up here as one `TestOutcome`, in the order the
//! assertions were made.

pub mod result_recorder;

pub use result_recorder::{RecordError, ResultRecorder};
