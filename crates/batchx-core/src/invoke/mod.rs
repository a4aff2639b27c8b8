//! Running the external archive tool.
//!
//! The tool is reached through the [`ArchiveTool`] trait so the batch runner
//! can be driven by a scripted double in tests. [`SevenZip`] is the real
//! implementation: it runs the executable as a child process, captures both
//! output streams and optionally kills the child after a timeout.

pub mod plan;
pub mod policy;

pub use plan::InvocationPlan;

use crate::BatchError;
use crate::Result;
use crate::classify::ToolStatus;
use std::ffi::OsString;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;
use std::time::Instant;

/// Interval between exit checks while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long output readers may keep running after a timed-out child was
/// killed. Descendants of the child can hold the pipes open indefinitely.
const DRAIN_GRACE: Duration = Duration::from_millis(200);

/// Captured result of one tool process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// How the process ended.
    pub status: ToolStatus,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error.
    pub stderr: Vec<u8>,
}

impl ProcessResult {
    /// Convenience constructor for a process that exited with `code` and
    /// produced no output.
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self {
            status: ToolStatus::Exited(code),
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }
}

/// An external archive tool.
///
/// A non-zero exit code is a normal [`ProcessResult`]. Only a failure to
/// start the process is an error.
pub trait ArchiveTool: Send + Sync {
    /// Path of the program, for diagnostics.
    fn program(&self) -> &Path;

    /// Runs the tool with `args` and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvocationStart`] if the process cannot be
    /// started.
    fn run(&self, args: &[OsString]) -> Result<ProcessResult>;
}

/// The 7-Zip command-line executable.
#[derive(Debug, Clone)]
pub struct SevenZip {
    exe: PathBuf,
    timeout: Option<Duration>,
}

impl SevenZip {
    /// Creates a tool that runs `exe` without a timeout.
    #[must_use]
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self {
            exe: exe.into(),
            timeout: None,
        }
    }

    /// Kills any invocation that runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl ArchiveTool for SevenZip {
    fn program(&self) -> &Path {
        &self.exe
    }

    fn run(&self, args: &[OsString]) -> Result<ProcessResult> {
        let mut child = Command::new(&self.exe)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| BatchError::InvocationStart {
                program: self.exe.clone(),
                source,
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => wait_with_deadline(&mut child, limit)?,
            None => Some(child.wait()?),
        };

        let Some(status) = status else {
            let deadline = Instant::now() + DRAIN_GRACE;
            return Ok(ProcessResult {
                status: ToolStatus::TimedOut,
                stdout: collect_until(stdout, deadline),
                stderr: collect_until(stderr, deadline),
            });
        };

        Ok(ProcessResult {
            status: tool_status(status),
            stdout: collect(stdout),
            stderr: collect(stderr),
        })
    }
}

/// Reads a child pipe to the end on a helper thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            // A read error only truncates the captured output.
            let _ = pipe.read_to_end(&mut buf);
            buf
        })
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Like [`collect`], but gives up at `deadline`. An unfinished reader is
/// detached and its output dropped.
fn collect_until(handle: Option<JoinHandle<Vec<u8>>>, deadline: Instant) -> Vec<u8> {
    let Some(handle) = handle else {
        return Vec::new();
    };
    while !handle.is_finished() {
        let now = Instant::now();
        if now >= deadline {
            tracing::debug!("output still held open after kill, detaching reader");
            return Vec::new();
        }
        thread::sleep(POLL_INTERVAL.min(deadline - now));
    }
    handle.join().unwrap_or_default()
}

/// Waits for `child`, killing it once `limit` has elapsed.
///
/// Returns `None` if the child was killed.
fn wait_with_deadline(child: &mut Child, limit: Duration) -> Result<Option<ExitStatus>> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }

        let elapsed = started.elapsed();
        if elapsed >= limit {
            tracing::warn!(pid = child.id(), ?limit, "tool timed out, killing");
            // The child may have exited between the check and the kill.
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }

        thread::sleep(POLL_INTERVAL.min(limit - elapsed));
    }
}

fn tool_status(status: ExitStatus) -> ToolStatus {
    status
        .code()
        .map_or(ToolStatus::Terminated, ToolStatus::Exited)
}

/// One completed invocation: the plan that was run and what came back.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The arguments that were used.
    pub plan: InvocationPlan,
    /// The process result.
    pub result: ProcessResult,
}

/// Builds the command line for `archive` and runs `tool` with it.
///
/// # Errors
///
/// Returns [`BatchError::InvocationStart`] if the tool cannot be started.
///
/// # Examples
///
/// ```no_run
/// use batchx_core::invoke::SevenZip;
/// use batchx_core::invoke::invoke;
/// use std::path::Path;
///
/// let tool = SevenZip::new("/usr/bin/7z");
/// let done = invoke(&tool, Path::new("a.zip"), Path::new("out/a"), Some("pw"), None)?;
/// println!("exit: {:?}", done.result.status);
/// # Ok::<(), batchx_core::BatchError>(())
/// ```
pub fn invoke(
    tool: &dyn ArchiveTool,
    archive: &Path,
    output_dir: &Path,
    password: Option<&str>,
    codepage: Option<u32>,
) -> Result<Invocation> {
    let plan = InvocationPlan::build(archive, output_dir, password, codepage);
    tracing::debug!(
        program = %tool.program().display(),
        args = ?plan.display_args(),
        "running archive tool"
    );
    let result = tool.run(plan.args())?;
    Ok(Invocation { plan, result })
}
