//! Exit code classification.
//!
//! 7-Zip reports its result through a fixed set of exit codes. Only `0`
//! counts as a success. `1` (warning) and `255` (user stop) are reported at
//! warning severity but still count as failures.

use serde::Serialize;
use std::fmt;

/// Severity at which an outcome is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Normal completion.
    Info,
    /// Partial completion or interruption.
    Warning,
    /// The archive was not extracted.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// How one tool invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// The process exited with this code.
    Exited(i32),
    /// The process was terminated without an exit code (e.g. by a signal).
    Terminated,
    /// The process exceeded the per-invocation timeout and was killed.
    TimedOut,
    /// The process could not be started.
    LaunchFailed(String),
    /// The process was started but waiting for it failed.
    WaitFailed(String),
}

impl ToolStatus {
    /// Exit code, if the process exited normally.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(*code),
            _ => None,
        }
    }
}

/// Result of classifying a [`ToolStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Severity for logging.
    pub severity: Severity,
    /// Human-readable explanation.
    pub description: &'static str,
    /// Whether the archive counts as successfully extracted.
    pub success: bool,
}

impl Classification {
    const fn failure(severity: Severity, description: &'static str) -> Self {
        Self {
            severity,
            description,
            success: false,
        }
    }
}

/// Classifies a 7-Zip exit code.
///
/// # Examples
///
/// ```
/// use batchx_core::classify::Severity;
/// use batchx_core::classify::classify;
///
/// let ok = classify(0);
/// assert!(ok.success);
/// assert_eq!(ok.severity, Severity::Info);
///
/// let warn = classify(1);
/// assert!(!warn.success);
/// assert_eq!(warn.severity, Severity::Warning);
/// ```
#[must_use]
pub const fn classify(exit_code: i32) -> Classification {
    match exit_code {
        0 => Classification {
            severity: Severity::Info,
            description: "No error",
            success: true,
        },
        1 => Classification::failure(Severity::Warning, "Warning"),
        2 => Classification::failure(Severity::Error, "Fatal error"),
        7 => Classification::failure(Severity::Error, "Command line error"),
        8 => Classification::failure(Severity::Error, "Not enough memory for operation"),
        255 => Classification::failure(Severity::Warning, "User stopped the process"),
        _ => Classification::failure(Severity::Error, "Unknown code"),
    }
}

/// Classifies any [`ToolStatus`], including the ones without an exit code.
#[must_use]
pub const fn classify_status(status: &ToolStatus) -> Classification {
    match status {
        ToolStatus::Exited(code) => classify(*code),
        ToolStatus::Terminated => Classification::failure(Severity::Error, "Terminated by signal"),
        ToolStatus::TimedOut => Classification::failure(Severity::Error, "Timed out"),
        ToolStatus::LaunchFailed(_) => Classification::failure(Severity::Error, "Failed to start"),
        ToolStatus::WaitFailed(_) => Classification::failure(Severity::Error, "Lost track of process"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        let table = [
            (0, Severity::Info, "No error", true),
            (1, Severity::Warning, "Warning", false),
            (2, Severity::Error, "Fatal error", false),
            (7, Severity::Error, "Command line error", false),
            (8, Severity::Error, "Not enough memory for operation", false),
            (255, Severity::Warning, "User stopped the process", false),
        ];

        for (code, severity, description, success) in table {
            let c = classify(code);
            assert_eq!(c.severity, severity, "code {code}");
            assert_eq!(c.description, description, "code {code}");
            assert_eq!(c.success, success, "code {code}");
        }
    }

    #[test]
    fn test_unknown_codes_are_errors() {
        for code in [3, 6, 9, 128, -1, 254, 256] {
            let c = classify(code);
            assert_eq!(c.severity, Severity::Error);
            assert_eq!(c.description, "Unknown code");
            assert!(!c.success);
        }
    }

    #[test]
    fn test_status_without_exit_code() {
        assert_eq!(classify_status(&ToolStatus::TimedOut).description, "Timed out");
        assert!(!classify_status(&ToolStatus::Terminated).success);
        let launch = classify_status(&ToolStatus::LaunchFailed("gone".into()));
        assert_eq!(launch.severity, Severity::Error);
        assert!(!launch.success);
        let lost = classify_status(&ToolStatus::WaitFailed("EINTR".into()));
        assert_eq!(lost.description, "Lost track of process");
        assert!(!lost.success);
    }

    #[test]
    fn test_exit_code_accessor() {
        assert_eq!(ToolStatus::Exited(2).exit_code(), Some(2));
        assert_eq!(ToolStatus::TimedOut.exit_code(), None);
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert!(Severity::Error > Severity::Info);
    }
}
