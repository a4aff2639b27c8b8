//! Batch orchestration.
//!
//! For each archive the runner allocates an output directory named after the
//! archive, runs the tool, classifies the result and reports it. A failing
//! archive never stops the batch; a directory that cannot be created does.

use crate::BatchConfig;
use crate::Result;
use crate::allocate::DirAllocator;
use crate::classify::ToolStatus;
use crate::classify::classify_status;
use crate::invoke::ArchiveTool;
use crate::invoke::InvocationPlan;
use crate::invoke::ProcessResult;
use crate::invoke::invoke;
use crate::report::BatchObserver;
use crate::report::BatchReport;
use crate::report::ItemReport;
use crate::report::RunStatistics;
use rayon::prelude::*;
use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

/// Drives one batch of extractions.
///
/// # Examples
///
/// ```no_run
/// use batchx_core::BatchConfig;
/// use batchx_core::BatchRunner;
/// use batchx_core::NoopObserver;
/// use batchx_core::invoke::SevenZip;
/// use std::path::PathBuf;
///
/// let tool = SevenZip::new("/usr/bin/7z");
/// let config = BatchConfig::default();
/// let runner = BatchRunner::new(&tool, &config);
/// let report = runner.run(&[PathBuf::from("/data/a.zip")], &NoopObserver)?;
/// println!("{} failed", report.stats.failure);
/// # Ok::<(), batchx_core::BatchError>(())
/// ```
pub struct BatchRunner<'a> {
    tool: &'a dyn ArchiveTool,
    config: &'a BatchConfig,
    allocator: DirAllocator,
}

impl<'a> BatchRunner<'a> {
    /// Creates a runner that extracts with `tool` using `config`.
    #[must_use]
    pub fn new(tool: &'a dyn ArchiveTool, config: &'a BatchConfig) -> Self {
        Self {
            tool,
            config,
            allocator: DirAllocator::new(),
        }
    }

    /// Extracts every file in `files`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BatchError::DirectoryCreation`] if an output
    /// directory cannot be created; remaining archives are not started.
    /// Tool failures are recorded in the report, not returned.
    pub fn run(&self, files: &[PathBuf], observer: &dyn BatchObserver) -> Result<BatchReport> {
        let started = Instant::now();
        let total = files.len();
        observer.on_start(total);

        let (items, stats) = if self.config.is_parallel() {
            self.run_parallel(files, observer)?
        } else {
            self.run_sequential(files, observer)?
        };

        observer.on_complete(&stats);

        Ok(BatchReport {
            stats,
            items,
            duration: started.elapsed(),
        })
    }

    fn run_sequential(
        &self,
        files: &[PathBuf],
        observer: &dyn BatchObserver,
    ) -> Result<(Vec<ItemReport>, RunStatistics)> {
        let total = files.len();
        let mut stats = RunStatistics::new();
        let mut items = Vec::with_capacity(total);

        for (index, archive) in files.iter().enumerate() {
            let item = self.process(index, total, archive, observer)?;
            stats.record(item.success());
            items.push(item);
        }

        Ok((items, stats))
    }

    fn run_parallel(
        &self,
        files: &[PathBuf],
        observer: &dyn BatchObserver,
    ) -> Result<(Vec<ItemReport>, RunStatistics)> {
        let jobs = self.config.effective_jobs();
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(error = %e, "cannot start worker pool, running sequentially");
                return self.run_sequential(files, observer);
            }
        };

        let total = files.len();
        let items: Vec<ItemReport> = pool.install(|| {
            files
                .par_iter()
                .enumerate()
                .map(|(index, archive)| self.process(index, total, archive, observer))
                .collect::<Result<Vec<_>>>()
        })?;

        let stats = items.iter().collect();
        Ok((items, stats))
    }

    /// Processes a single archive.
    fn process(
        &self,
        index: usize,
        total: usize,
        archive: &Path,
        observer: &dyn BatchObserver,
    ) -> Result<ItemReport> {
        observer.on_item_start(index, total, archive);

        let desired = target_dir(archive, self.config.output_root.as_deref());
        let output_dir = self
            .allocator
            .allocate(Some(desired.as_path()))?
            .unwrap_or(desired);

        let (args, result) = match invoke(
            self.tool,
            archive,
            &output_dir,
            self.config.password.as_deref(),
            self.config.codepage,
        ) {
            Ok(done) => (done.plan.display_args(), done.result),
            Err(e) => {
                let status = if e.is_per_item() {
                    tracing::error!(archive = %archive.display(), error = %e, "archive tool failed to start");
                    ToolStatus::LaunchFailed(e.to_string())
                } else {
                    tracing::error!(archive = %archive.display(), error = %e, "lost track of archive tool");
                    ToolStatus::WaitFailed(e.to_string())
                };
                let plan = InvocationPlan::build(
                    archive,
                    &output_dir,
                    self.config.password.as_deref(),
                    self.config.codepage,
                );
                let result = ProcessResult {
                    status,
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                };
                (plan.display_args(), result)
            }
        };

        let item = ItemReport {
            index,
            input: archive.to_path_buf(),
            output_dir,
            args,
            classification: classify_status(&result.status),
            status: result.status,
            stdout: result.stdout,
            stderr: result.stderr,
        };

        observer.on_item_complete(&item, total);
        Ok(item)
    }
}

/// Directory an archive is extracted into, before collision handling:
/// `<root>/<stem>` when an output root is set, otherwise `<stem>` next to
/// the archive.
///
/// # Examples
///
/// ```
/// use batchx_core::runner::target_dir;
/// use std::path::Path;
/// use std::path::PathBuf;
///
/// assert_eq!(target_dir(Path::new("/d/a.zip"), None), PathBuf::from("/d/a"));
/// assert_eq!(
///     target_dir(Path::new("/d/b.tar.gz"), Some(Path::new("/out"))),
///     PathBuf::from("/out/b.tar"),
/// );
/// ```
#[must_use]
pub fn target_dir(archive: &Path, output_root: Option<&Path>) -> PathBuf {
    let stem = archive.file_stem().unwrap_or_else(|| OsStr::new(""));
    let base = output_root
        .or_else(|| archive.parent())
        .unwrap_or_else(|| Path::new(""));
    base.join(stem)
}
