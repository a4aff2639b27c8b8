//! Output directory allocation.
//!
//! A desired directory path is turned into a usable directory: if a regular
//! file already occupies the path, the first free `"<path>(n)"` variant is
//! used instead. An existing directory is reused as-is.

use crate::BatchError;
use crate::Result;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

/// Allocates (and creates) the directory for `desired`.
///
/// Returns `Ok(None)` when `desired` is unset or empty. Calling this twice
/// on an unchanged filesystem yields the same directory.
///
/// # Errors
///
/// Returns [`BatchError::DirectoryCreation`] if the directory cannot be
/// created, and [`BatchError::Io`] if the path cannot be made absolute.
///
/// # Examples
///
/// ```no_run
/// use batchx_core::allocate::allocate_dir;
/// use std::path::Path;
///
/// let dir = allocate_dir(Some(Path::new("out/report")))?;
/// assert!(dir.unwrap().is_dir());
/// # Ok::<(), batchx_core::BatchError>(())
/// ```
pub fn allocate_dir(desired: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(desired) = desired.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(None);
    };

    let absolute = std::path::absolute(desired)?;
    let chosen = free_dir_name(&absolute);

    if !chosen.is_dir() {
        fs::create_dir_all(&chosen).map_err(|source| BatchError::DirectoryCreation {
            path: chosen.clone(),
            source,
        })?;
        tracing::debug!(path = %chosen.display(), "created directory");
    }

    Ok(Some(chosen))
}

/// Returns `path` itself, or the first `"<path>(n)"` that is not a regular
/// file.
///
/// # Examples
///
/// ```
/// use batchx_core::allocate::free_dir_name;
/// use std::path::Path;
///
/// // Nothing occupies this path, so it is returned unchanged.
/// let path = Path::new("/nonexistent/batchx/out");
/// assert_eq!(free_dir_name(path), path);
/// ```
#[must_use]
pub fn free_dir_name(path: &Path) -> PathBuf {
    if !path.is_file() {
        return path.to_path_buf();
    }

    (1_u64..)
        .map(|n| suffixed(path, n))
        .find(|candidate| !candidate.is_file())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Appends the collision suffix `(n)` to the final path component.
///
/// # Examples
///
/// ```
/// use batchx_core::allocate::suffixed;
/// use std::path::Path;
/// use std::path::PathBuf;
///
/// assert_eq!(suffixed(Path::new("/out/data"), 2), PathBuf::from("/out/data(2)"));
/// ```
#[must_use]
pub fn suffixed(path: &Path, n: u64) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!("({n})"));
    PathBuf::from(name)
}

/// Directory allocator safe to share between concurrent workers.
///
/// The probe-then-create sequence of [`allocate_dir`] runs under a single
/// lock, so two workers targeting the same name cannot both claim it.
#[derive(Debug, Default)]
pub struct DirAllocator {
    lock: Mutex<()>,
}

impl DirAllocator {
    /// Creates a new allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a directory while holding the allocator lock.
    ///
    /// See [`allocate_dir`] for the allocation rules.
    pub fn allocate(&self, desired: Option<&Path>) -> Result<Option<PathBuf>> {
        // Poisoning is ignored: the filesystem holds the state.
        let _guard = self
            .lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        allocate_dir(desired)
    }
}
