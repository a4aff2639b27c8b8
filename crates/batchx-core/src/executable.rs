//! Locating and validating the 7-Zip executable.

use crate::BatchError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

/// File stems of the recognised 7-Zip command-line binaries.
///
/// `7z`/`7za` are the Windows names, `7zz`/`7zzs`/`7zr` the Linux builds.
pub const SEVEN_ZIP_NAMES: &[&str] = &["7z", "7za", "7zz", "7zzs", "7zr"];

/// Executable looked up next to the running program when `--exe` is absent.
#[cfg(windows)]
pub const DEFAULT_EXECUTABLE: &str = "7z.exe";
/// Executable looked up next to the running program when `--exe` is absent.
#[cfg(not(windows))]
pub const DEFAULT_EXECUTABLE: &str = "7z";

/// Returns the default executable path: [`DEFAULT_EXECUTABLE`] in the
/// directory of the running program, or in the current directory if that
/// cannot be determined.
#[must_use]
pub fn default_executable() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DEFAULT_EXECUTABLE)
}

/// Checks that `path` is an existing file with a recognised 7-Zip name and
/// returns it as an absolute path.
///
/// # Errors
///
/// - [`BatchError::ExecutableNotFound`] if `path` is not a file.
/// - [`BatchError::UnrecognizedExecutable`] if its stem is not one of
///   [`SEVEN_ZIP_NAMES`].
pub fn validate_executable(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(BatchError::ExecutableNotFound {
            path: path.to_path_buf(),
        });
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !is_recognized_name(&name) {
        return Err(BatchError::UnrecognizedExecutable { name });
    }

    Ok(std::path::absolute(path)?)
}

/// Returns `true` if `stem` names a 7-Zip binary.
///
/// # Examples
///
/// ```
/// use batchx_core::executable::is_recognized_name;
///
/// assert!(is_recognized_name("7zz"));
/// assert!(!is_recognized_name("unzip"));
/// ```
#[must_use]
pub fn is_recognized_name(stem: &str) -> bool {
    SEVEN_ZIP_NAMES.contains(&stem)
}
