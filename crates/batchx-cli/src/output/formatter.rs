//! How a finished batch (or a fatal error) is presented to the operator.

use anyhow::Result;
use batchx_core::BatchReport;
use serde::Serialize;

/// Presents the end of a run: the batch summary, or the error that
/// stopped it before completion.
pub trait OutputFormatter {
    /// Prints counts and the archives that failed.
    fn format_batch_result(&self, report: &BatchReport) -> Result<()>;

    /// Prints a fatal error that ended the run early.
    fn format_error(&self, error: &anyhow::Error);
}

/// Envelope of every `--json` document: the command, whether it finished,
/// and either its data or the error text.
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
