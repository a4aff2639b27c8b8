//! Error conversion utilities for CLI.
//!
//! Converts batchx-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance. The original
//! `BatchError` stays in the chain so the exit code can be derived from it.

use batchx_core::BatchError;
use std::process::ExitCode;

/// Exit status for errors detected before the first archive.
pub const EXIT_STARTUP: u8 = 254;

/// Exit status for errors that abort a running batch.
pub const EXIT_ABORTED: u8 = 1;

/// Converts `BatchError` to a user-friendly anyhow error with context.
pub fn convert_batch_error(err: BatchError) -> anyhow::Error {
    let hint = match &err {
        BatchError::InvalidInput { .. } => {
            "Invalid input\nHINT: Each -i value must be an existing file or directory."
        }
        BatchError::EmptyInput => {
            "Nothing to extract\n\
             HINT: Hidden files are skipped; use --recursive to scan subdirectories."
        }
        BatchError::Walk { .. } => "Cannot scan input directory",
        BatchError::ExecutableNotFound { .. } => {
            "7-Zip not found\n\
             HINT: Place 7z next to batchx or pass its location with --exe."
        }
        BatchError::UnrecognizedExecutable { .. } => {
            "Unsupported archive tool\n\
             HINT: The executable must be one of 7z, 7za, 7zz, 7zzs or 7zr."
        }
        BatchError::DirectoryCreation { .. } => {
            "Cannot create output directory\n\
             HINT: Check permissions on the output root or pass another one with --output."
        }
        BatchError::InvocationStart { .. } => "Cannot start 7-Zip",
        _ => "Batch extraction failed",
    };
    anyhow::Error::new(err).context(hint)
}

/// Maps an error to the process exit status.
pub fn exit_code(err: &anyhow::Error) -> ExitCode {
    let fatal_startup = err
        .chain()
        .find_map(|e| e.downcast_ref::<BatchError>())
        .is_some_and(BatchError::is_fatal_startup);

    if fatal_startup {
        ExitCode::from(EXIT_STARTUP)
    } else {
        ExitCode::from(EXIT_ABORTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_convert_missing_executable() {
        let err = BatchError::ExecutableNotFound {
            path: PathBuf::from("/opt/7z"),
        };
        let converted = convert_batch_error(err);
        let msg = format!("{converted:?}");
        assert!(msg.contains("HINT"));
        assert!(msg.contains("/opt/7z"));
        assert!(converted.downcast_ref::<BatchError>().is_some());
    }

    #[test]
    fn test_convert_empty_input() {
        let converted = convert_batch_error(BatchError::EmptyInput);
        assert!(format!("{converted:?}").contains("--recursive"));
    }

    #[test]
    fn test_startup_errors_exit_254() {
        let err = convert_batch_error(BatchError::UnrecognizedExecutable {
            name: "unzip".to_string(),
        });
        assert_eq!(exit_code(&err), ExitCode::from(EXIT_STARTUP));
    }

    #[test]
    fn test_midrun_errors_exit_1() {
        let err = convert_batch_error(BatchError::DirectoryCreation {
            path: PathBuf::from("/ro/a"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(exit_code(&err), ExitCode::from(EXIT_ABORTED));

        let other = anyhow::anyhow!("broken pipe");
        assert_eq!(exit_code(&other), ExitCode::from(EXIT_ABORTED));
    }
}
