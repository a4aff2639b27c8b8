//! Batch reporting.

use crate::classify::Classification;
use crate::classify::ToolStatus;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Aggregate counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    /// Number of archives processed.
    pub total: usize,
    /// Number of archives whose extraction did not succeed.
    pub failure: usize,
}

impl RunStatistics {
    /// Creates empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one processed archive.
    pub fn record(&mut self, success: bool) {
        self.total += 1;
        if !success {
            self.failure += 1;
        }
    }

    /// Number of successful archives.
    #[must_use]
    pub fn success(&self) -> usize {
        self.total - self.failure
    }

    /// Whether every archive succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failure == 0
    }
}

impl<'a> FromIterator<&'a ItemReport> for RunStatistics {
    fn from_iter<I: IntoIterator<Item = &'a ItemReport>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |mut stats, item| {
            stats.record(item.success());
            stats
        })
    }
}

/// What happened to one archive.
#[derive(Debug, Clone)]
pub struct ItemReport {
    /// Zero-based position in the batch.
    pub index: usize,
    /// Archive that was extracted.
    pub input: PathBuf,
    /// Directory it was extracted into.
    pub output_dir: PathBuf,
    /// Arguments passed to the tool, password masked.
    pub args: Vec<String>,
    /// How the tool finished.
    pub status: ToolStatus,
    /// Classification of `status`.
    pub classification: Classification,
    /// Captured standard output of the tool.
    pub stdout: Vec<u8>,
    /// Captured standard error of the tool.
    pub stderr: Vec<u8>,
}

impl ItemReport {
    /// Whether the archive was extracted successfully.
    #[must_use]
    pub fn success(&self) -> bool {
        self.classification.success
    }

    /// Status text in the `CMDSTATUS` shape: `<code>,<description>`.
    ///
    /// Statuses without an exit code use `-` for the code.
    #[must_use]
    pub fn status_line(&self) -> String {
        let code = self
            .status
            .exit_code()
            .map_or_else(|| "-".to_string(), |c| c.to_string());
        format!("{code},{}", self.classification.description)
    }
}

/// Result of a whole batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Aggregate counts.
    pub stats: RunStatistics,
    /// Per-archive results in input order.
    pub items: Vec<ItemReport>,
    /// Wall-clock time of the run.
    pub duration: Duration,
}

/// Receives progress events from the batch runner.
///
/// Events may arrive from several worker threads when the batch runs in
/// parallel; each call must be self-contained. All methods default to doing
/// nothing.
pub trait BatchObserver: Sync {
    /// Called once before the first archive.
    fn on_start(&self, _total: usize) {}

    /// Called when an archive is picked up (`index` is zero-based).
    fn on_item_start(&self, _index: usize, _total: usize, _input: &Path) {}

    /// Called when an archive has been processed.
    fn on_item_complete(&self, _item: &ItemReport, _total: usize) {}

    /// Called once after the last archive.
    fn on_complete(&self, _stats: &RunStatistics) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}
