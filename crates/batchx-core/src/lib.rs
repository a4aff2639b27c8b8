//! Batch archive extraction driven by an external 7-Zip executable.
//!
//! `batchx-core` does not decompress anything itself. It expands input
//! paths into a list of archives, gives every archive its own output
//! directory, runs 7-Zip once per archive and accounts for the results.
//!
//! # Examples
//!
//! ```no_run
//! use batchx_core::BatchConfig;
//! use batchx_core::BatchRunner;
//! use batchx_core::NoopObserver;
//! use batchx_core::expand::ExpandOptions;
//! use batchx_core::expand::expand_inputs;
//! use batchx_core::invoke::SevenZip;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let files = expand_inputs(&["./downloads"], &ExpandOptions::default())?;
//! let tool = SevenZip::new("/usr/bin/7zz");
//! let config = BatchConfig::default();
//! let report = BatchRunner::new(&tool, &config).run(&files, &NoopObserver)?;
//! println!("{} of {} extracted", report.stats.success(), report.stats.total);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod allocate;
pub mod classify;
pub mod config;
pub mod error;
pub mod executable;
pub mod expand;
pub mod invoke;
pub mod report;
pub mod runner;

pub use classify::Classification;
pub use classify::Severity;
pub use classify::ToolStatus;
pub use config::BatchConfig;
pub use error::BatchError;
pub use error::Result;
pub use invoke::ArchiveTool;
pub use invoke::ProcessResult;
pub use invoke::SevenZip;
pub use report::BatchObserver;
pub use report::BatchReport;
pub use report::ItemReport;
pub use report::NoopObserver;
pub use report::RunStatistics;
pub use runner::BatchRunner;
