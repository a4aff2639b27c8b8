//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use batchx_core::BatchReport;
use batchx_core::ItemReport;
use batchx_core::Severity;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct BatchOutput {
    total: usize,
    success: usize,
    failure: usize,
    duration_ms: u128,
    items: Vec<ItemOutput>,
}

#[derive(Debug, Serialize)]
struct ItemOutput {
    input: String,
    output_dir: String,
    exit_code: Option<i32>,
    description: &'static str,
    severity: Severity,
    success: bool,
}

impl From<&ItemReport> for ItemOutput {
    fn from(item: &ItemReport) -> Self {
        Self {
            input: item.input.display().to_string(),
            output_dir: item.output_dir.display().to_string(),
            exit_code: item.status.exit_code(),
            description: item.classification.description,
            severity: item.classification.severity,
            success: item.success(),
        }
    }
}

impl BatchOutput {
    fn from_report(report: &BatchReport) -> Self {
        Self {
            total: report.stats.total,
            success: report.stats.success(),
            failure: report.stats.failure,
            duration_ms: report.duration.as_millis(),
            items: report.items.iter().map(ItemOutput::from).collect(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_batch_result(&self, report: &BatchReport) -> Result<()> {
        let output = JsonOutput::success("extract", BatchOutput::from_report(report));
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("extract", error.root_cause().to_string());
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use batchx_core::RunStatistics;
    use batchx_core::ToolStatus;
    use batchx_core::classify::classify_status;
    use std::path::PathBuf;
    use std::time::Duration;

    fn item(input: &str, code: i32) -> ItemReport {
        let status = ToolStatus::Exited(code);
        ItemReport {
            index: 0,
            input: PathBuf::from(input),
            output_dir: PathBuf::from("out"),
            args: Vec::new(),
            classification: classify_status(&status),
            status,
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }

    #[test]
    fn test_batch_output_shape() {
        let report = BatchReport {
            stats: RunStatistics {
                total: 2,
                failure: 1,
            },
            items: vec![item("a.zip", 0), item("b.7z", 2)],
            duration: Duration::from_millis(1500),
        };

        let output = JsonOutput::success("extract", BatchOutput::from_report(&report));
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["operation"], "extract");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["total"], 2);
        assert_eq!(value["data"]["success"], 1);
        assert_eq!(value["data"]["failure"], 1);
        assert_eq!(value["data"]["duration_ms"], 1500);
        assert_eq!(value["data"]["items"][1]["exit_code"], 2);
        assert_eq!(value["data"]["items"][1]["description"], "Fatal error");
        assert_eq!(value["data"]["items"][1]["severity"], "error");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_output_shape() {
        let output = JsonOutput::error("extract", "7-Zip not found");
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "7-Zip not found");
        assert!(value.get("data").is_none());
    }
}
