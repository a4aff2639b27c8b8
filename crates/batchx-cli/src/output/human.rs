//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use batchx_core::BatchReport;
use batchx_core::Severity;
use console::Term;
use console::style;
use std::time::Duration;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();
        if secs >= 3600 {
            format!("{}h {:02}m {:02}s", secs / 3600, secs % 3600 / 60, secs % 60)
        } else if secs >= 60 {
            format!("{}m {:02}s", secs / 60, secs % 60)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }

    fn severity_tag(&self, severity: Severity) -> String {
        if self.use_colors {
            match severity {
                Severity::Error => style("ERROR").red().bold().to_string(),
                Severity::Warning => style("WARNING").yellow().to_string(),
                Severity::Info => style("INFO").cyan().to_string(),
            }
        } else {
            format!("[{severity}]")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_batch_result(&self, report: &BatchReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let stats = &report.stats;
        let headline = if stats.all_succeeded() {
            "Extraction complete".to_string()
        } else {
            format!("{} of {} archives failed", stats.failure, stats.total)
        };

        if self.use_colors {
            let mark = if stats.all_succeeded() {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };
            let _ = self.term.write_line(&format!("{mark} {headline}"));
        } else {
            let _ = self.term.write_line(&headline);
        }

        let _ = self
            .term
            .write_line(&format!("  Archives: {}", stats.total));
        let _ = self
            .term
            .write_line(&format!("  Succeeded: {}", stats.success()));
        let _ = self
            .term
            .write_line(&format!("  Failed: {}", stats.failure));

        if self.verbose {
            let _ = self.term.write_line(&format!(
                "  Duration: {}",
                Self::format_duration(report.duration)
            ));
        }

        let failed: Vec<_> = report.items.iter().filter(|i| !i.success()).collect();
        if !failed.is_empty() {
            let _ = self.term.write_line("");
            let _ = self.term.write_line("Failures:");
            for item in failed {
                let _ = self.term.write_line(&format!(
                    "  {} {}: {}",
                    self.severity_tag(item.classification.severity),
                    item.input.display(),
                    item.status_line()
                ));
            }
        }

        Ok(())
    }

    /// Prints the guidance attached to the error; the cause itself is
    /// already in the log.
    fn format_error(&self, error: &anyhow::Error) {
        let prefix = if self.use_colors {
            style("error:").red().bold().to_string()
        } else {
            "error:".to_string()
        };
        let _ = Term::stderr().write_line(&format!("{prefix} {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_seconds() {
        assert_eq!(HumanFormatter::format_duration(Duration::ZERO), "0.0s");
        assert_eq!(
            HumanFormatter::format_duration(Duration::from_millis(1500)),
            "1.5s"
        );
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(
            HumanFormatter::format_duration(Duration::from_secs(61)),
            "1m 01s"
        );
        assert_eq!(
            HumanFormatter::format_duration(Duration::from_secs(3725)),
            "1h 02m 05s"
        );
    }

    #[test]
    fn test_severity_tag_without_colors() {
        let formatter = HumanFormatter {
            verbose: false,
            quiet: false,
            use_colors: false,
            term: Term::stdout(),
        };
        assert_eq!(formatter.severity_tag(Severity::Warning), "[warning]");
    }
}
