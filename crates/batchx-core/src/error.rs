//! Error types for batch extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `BatchError`.
pub type Result<T> = std::result::Result<T, BatchError>;

/// Errors that can occur while preparing or running a batch.
#[derive(Error, Debug)]
pub enum BatchError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input path is neither a file nor a directory.
    #[error("invalid input path: {path}")]
    InvalidInput {
        /// The offending input path.
        path: PathBuf,
    },

    /// Expansion of the inputs produced no files.
    #[error("no files found in the given inputs")]
    EmptyInput,

    /// Directory traversal failed while expanding an input directory.
    #[error("cannot scan {path}: {reason}")]
    Walk {
        /// Directory (or entry) that could not be read.
        path: PathBuf,
        /// Underlying walker error.
        reason: String,
    },

    /// An output directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreation {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },

    /// The archive tool could not be started at all.
    #[error("failed to start {program}: {source}")]
    InvocationStart {
        /// Program that failed to start.
        program: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The configured archive tool executable does not exist.
    #[error("the 7-Zip executable file ({path}) does not exist")]
    ExecutableNotFound {
        /// Configured executable path.
        path: PathBuf,
    },

    /// The configured archive tool is not one of the known 7-Zip binaries.
    #[error("invalid 7-Zip executable file name ({name})")]
    UnrecognizedExecutable {
        /// File stem of the configured executable.
        name: String,
    },
}

impl BatchError {
    /// Returns `true` if this error must stop the program before any archive
    /// is processed.
    ///
    /// # Examples
    ///
    /// ```
    /// use batchx_core::BatchError;
    ///
    /// assert!(BatchError::EmptyInput.is_fatal_startup());
    /// ```
    #[must_use]
    pub const fn is_fatal_startup(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::EmptyInput
                | Self::Walk { .. }
                | Self::ExecutableNotFound { .. }
                | Self::UnrecognizedExecutable { .. }
        )
    }

    /// Returns `true` if this error concerns a single archive and the batch
    /// can continue with the next one.
    #[must_use]
    pub const fn is_per_item(&self) -> bool {
        matches!(self, Self::InvocationStart { .. })
    }

    /// Returns the path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::InvalidInput { path }
            | Self::Walk { path, .. }
            | Self::DirectoryCreation { path, .. }
            | Self::ExecutableNotFound { path }
            | Self::InvocationStart { program: path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = BatchError::EmptyInput;
        assert_eq!(err.to_string(), "no files found in the given inputs");

        let err = BatchError::UnrecognizedExecutable {
            name: "unzip".to_string(),
        };
        assert_eq!(err.to_string(), "invalid 7-Zip executable file name (unzip)");
    }

    #[test]
    fn test_startup_errors_are_fatal() {
        let err = BatchError::InvalidInput {
            path: PathBuf::from("missing.zip"),
        };
        assert!(err.is_fatal_startup());
        assert!(!err.is_per_item());
        assert_eq!(err.path(), Some(std::path::Path::new("missing.zip")));
    }

    #[test]
    fn test_directory_creation_is_not_startup() {
        let err = BatchError::DirectoryCreation {
            path: PathBuf::from("/out/a"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!err.is_fatal_startup());
        assert!(!err.is_per_item());
        assert!(err.to_string().contains("/out/a"));
    }

    #[test]
    fn test_invocation_start_is_per_item() {
        let err = BatchError::InvocationStart {
            program: PathBuf::from("/opt/7z"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.is_per_item());
        assert!(!err.is_fatal_startup());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: BatchError = io_err.into();
        assert!(matches!(err, BatchError::Io(_)));
        assert!(err.path().is_none());
    }
}
