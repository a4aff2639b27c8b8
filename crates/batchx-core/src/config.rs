//! Batch configuration.

use crate::expand::ExpandOptions;
use std::path::PathBuf;
use std::time::Duration;

/// Settings shared by every archive of one batch.
///
/// # Examples
///
/// ```
/// use batchx_core::BatchConfig;
/// use std::time::Duration;
///
/// let config = BatchConfig {
///     password: Some("infected".to_string()),
///     timeout: Some(Duration::from_secs(600)),
///     ..Default::default()
/// };
/// assert_eq!(config.jobs, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Root under which per-archive directories are created. When unset,
    /// each directory is created next to its archive.
    pub output_root: Option<PathBuf>,

    /// Password for encrypted `.zip`, `.7z`, `.rar` and extensionless archives.
    pub password: Option<String>,

    /// Code page identifier for `.zip` and `.tar` file names
    /// (e.g. 65001 for UTF-8, 932 for Shift-JIS).
    pub codepage: Option<u32>,

    /// Scan input directories recursively.
    pub recursive: bool,

    /// Kill an invocation that runs longer than this.
    pub timeout: Option<Duration>,

    /// Number of archives processed at the same time.
    pub jobs: usize,
}

impl Default for BatchConfig {
    /// Defaults: no output root, password or codepage; one directory level;
    /// no timeout; one job.
    fn default() -> Self {
        Self {
            output_root: None,
            password: None,
            codepage: None,
            recursive: false,
            timeout: None,
            jobs: 1,
        }
    }
}

impl BatchConfig {
    /// Number of workers actually used (at least one).
    #[must_use]
    pub fn effective_jobs(&self) -> usize {
        self.jobs.max(1)
    }

    /// Whether archives are processed in parallel.
    #[must_use]
    pub fn is_parallel(&self) -> bool {
        self.effective_jobs() > 1
    }

    /// Input expansion options for this batch.
    #[must_use]
    pub const fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            recursive: self.recursive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sequential() {
        let config = BatchConfig::default();
        assert_eq!(config.effective_jobs(), 1);
        assert!(!config.is_parallel());
        assert!(!config.recursive);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_zero_jobs_means_one() {
        let config = BatchConfig {
            jobs: 0,
            ..Default::default()
        };
        assert_eq!(config.effective_jobs(), 1);
    }

    #[test]
    fn test_expand_options_follow_recursive() {
        assert!(!BatchConfig::default().expand_options().recursive);

        let config = BatchConfig {
            recursive: true,
            ..Default::default()
        };
        assert!(config.expand_options().recursive);
    }

    #[test]
    fn test_parallel() {
        let config = BatchConfig {
            jobs: 4,
            ..Default::default()
        };
        assert!(config.is_parallel());
    }
}
