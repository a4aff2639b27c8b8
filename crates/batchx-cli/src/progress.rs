//! Per-archive progress reporting.
//!
//! Every phase of every archive becomes one log record tagged with a
//! fixed-width category label, e.g.
//!
//! ```text
//! [IDX/TOTAL] 00001/00002
//! [IN_FILE  ] /data/a.zip
//! [OUT_DIR  ] /data/a
//! [CMDSTATUS] 0,No error
//! ```
//!
//! With `--progress` on a terminal, an indicatif bar is drawn as well.

use batchx_core::BatchObserver;
use batchx_core::ItemReport;
use batchx_core::RunStatistics;
use batchx_core::Severity;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;

/// Formats a category label: left-aligned, padded to 9, in brackets.
pub fn label(tag: &str) -> String {
    format!("[{tag:<9}]")
}

/// Body of the `RESULT` record, counts centred in five columns.
pub fn result_line(stats: &RunStatistics) -> String {
    format!(
        "TOTAL:{:^5},SUCCESS:{:^5},FAILURE:{:^5}",
        stats.total,
        stats.success(),
        stats.failure
    )
}

/// `BatchObserver` that writes the labelled log records.
pub struct BatchProgress {
    program: String,
    bar: Option<ProgressBar>,
}

impl BatchProgress {
    /// Creates the reporter; `show_bar` adds a progress bar on stderr.
    pub fn new(show_bar: bool) -> Self {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} archives ({elapsed})")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("█▓░"),
            );
            bar.set_message("Extracting");
            bar
        });

        Self {
            program: format!("{} {}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION")),
            bar,
        }
    }

    /// Checks if a progress bar can be drawn (stderr is a terminal).
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for BatchProgress {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

impl BatchObserver for BatchProgress {
    fn on_start(&self, total: usize) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
        }
        tracing::info!("{} {}", label("START"), self.program);
    }

    fn on_item_start(&self, index: usize, total: usize, _input: &Path) {
        tracing::info!("{} {:05}/{:05}", label("IDX/TOTAL"), index + 1, total);
    }

    fn on_item_complete(&self, item: &ItemReport, _total: usize) {
        tracing::debug!("{} {}", label("CMD"), item.args.join(" "));
        tracing::info!("{} {}", label("IN_FILE"), item.input.display());
        tracing::info!("{} {}", label("OUT_DIR"), item.output_dir.display());

        let status = format!("{} {}", label("CMDSTATUS"), item.status_line());
        match item.classification.severity {
            Severity::Info => tracing::info!("{status}"),
            Severity::Warning => tracing::warn!("{status}"),
            Severity::Error => tracing::error!("{status}"),
        }

        if !item.success() && !item.stderr.is_empty() {
            tracing::debug!(
                "{} {}",
                label("STDERR"),
                String::from_utf8_lossy(&item.stderr).trim_end()
            );
        }

        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn on_complete(&self, stats: &RunStatistics) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
        tracing::info!("{} {}", label("RESULT"), result_line(stats));
        tracing::info!("{} {}", label("END"), self.program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_fixed_width() {
        assert_eq!(label("START"), "[START    ]");
        assert_eq!(label("IDX/TOTAL"), "[IDX/TOTAL]");
        assert_eq!(label("CMDSTATUS"), "[CMDSTATUS]");
    }

    #[test]
    fn test_result_line() {
        let stats = RunStatistics {
            total: 2,
            failure: 1,
        };
        assert_eq!(
            result_line(&stats),
            "TOTAL:  2  ,SUCCESS:  1  ,FAILURE:  1  "
        );
    }

    #[test]
    fn test_observer_without_bar() {
        let progress = BatchProgress::new(false);
        progress.on_start(1);
        progress.on_item_start(0, 1, Path::new("a.zip"));
        progress.on_complete(&RunStatistics::default());
        assert!(progress.program.starts_with("batchx "));
    }
}
