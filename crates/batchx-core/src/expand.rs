//! Input path expansion.
//!
//! Turns the operator's `--input` values (files and directories) into the
//! flat, ordered list of files the batch will process. Directories are
//! scanned one level deep unless recursion is requested. Hidden entries
//! (names starting with `.`) are always skipped. Files are not filtered by
//! extension and duplicates are kept.

use crate::BatchError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Options controlling input expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Descend into sub-directories of input directories.
    pub recursive: bool,
}

impl ExpandOptions {
    /// Maximum walker depth below an input directory.
    const fn max_depth(self) -> usize {
        if self.recursive { usize::MAX } else { 1 }
    }
}

/// Expands the given inputs into absolute file paths.
///
/// Inputs are visited in the order given. A file input is appended as-is
/// (made absolute, symlinks are not resolved). A directory input contributes
/// its visible files, sorted by file name within each directory so that two
/// expansions of the same tree yield the same order.
///
/// # Errors
///
/// - [`BatchError::InvalidInput`] if an input is neither a file nor a
///   directory.
/// - [`BatchError::Walk`] if a directory cannot be read.
/// - [`BatchError::EmptyInput`] if no file was found at all.
///
/// # Examples
///
/// ```no_run
/// use batchx_core::expand::ExpandOptions;
/// use batchx_core::expand::expand_inputs;
///
/// let files = expand_inputs(&["./downloads", "./extra.zip"], &ExpandOptions::default())?;
/// println!("{} archives to extract", files.len());
/// # Ok::<(), batchx_core::BatchError>(())
/// ```
pub fn expand_inputs<P: AsRef<Path>>(inputs: &[P], options: &ExpandOptions) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let absolute = std::path::absolute(input.as_ref())?;

        if absolute.is_file() {
            files.push(absolute);
        } else if absolute.is_dir() {
            scan_dir(&absolute, options.max_depth(), &mut files)?;
        } else {
            return Err(BatchError::InvalidInput {
                path: input.as_ref().to_path_buf(),
            });
        }
    }

    if files.is_empty() {
        return Err(BatchError::EmptyInput);
    }

    tracing::debug!(count = files.len(), "expanded inputs");
    Ok(files)
}

/// Appends the visible files below `root`, down to `max_depth` levels.
fn scan_dir(root: &Path, max_depth: usize, files: &mut Vec<PathBuf>) -> Result<()> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        // The root itself is also offered to the predicate.
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()));

    for entry in walker {
        let entry = entry.map_err(|e| BatchError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            reason: e.to_string(),
        })?;

        if is_regular_file(&entry) {
            files.push(entry.into_path());
        }
    }

    Ok(())
}

/// Symlinks count as files when their target is a file; linked directories
/// are never descended into.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_symlink() {
        entry.path().is_file()
    } else {
        file_type.is_file()
    }
}

/// Checks if a path is hidden (its file name starts with `.`).
///
/// # Examples
///
/// ```
/// use batchx_core::expand::is_hidden;
/// use std::path::Path;
///
/// assert!(is_hidden(Path::new("dir/.cache")));
/// assert!(!is_hidden(Path::new("dir/data.zip")));
/// ```
#[must_use]
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().first() == Some(&b'.'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_directory_one_level_skips_hidden_and_subdirs() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.zip"));
        touch(&temp.path().join("b.7z"));
        touch(&temp.path().join("c.rar"));
        touch(&temp.path().join(".hidden.zip"));
        fs::create_dir(temp.path().join("sub")).unwrap();
        touch(&temp.path().join("sub").join("inner.zip"));

        let files = expand_inputs(&[temp.path()], &ExpandOptions::default()).unwrap();

        assert_eq!(names(&files), ["a.zip", "b.7z", "c.rar"]);
        assert!(files.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn test_recursive_includes_nested_files() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.zip"));
        fs::create_dir_all(temp.path().join("sub").join("deeper")).unwrap();
        touch(&temp.path().join("sub").join("inner.zip"));
        touch(&temp.path().join("sub").join("deeper").join("deep.tar"));
        fs::create_dir(temp.path().join(".git")).unwrap();
        touch(&temp.path().join(".git").join("config"));

        let options = ExpandOptions { recursive: true };
        let files = expand_inputs(&[temp.path()], &options).unwrap();

        assert_eq!(names(&files), ["a.zip", "deep.tar", "inner.zip"]);
    }

    #[test]
    fn test_inputs_keep_order_and_duplicates() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("z.zip");
        let second = temp.path().join("a.zip");
        touch(&first);
        touch(&second);

        let files = expand_inputs(&[&first, &second, &first], &ExpandOptions::default()).unwrap();

        assert_eq!(files, vec![first.clone(), second, first]);
    }

    #[test]
    fn test_explicit_hidden_file_is_kept() {
        let temp = TempDir::new().unwrap();
        let hidden = temp.path().join(".secret");
        touch(&hidden);

        let files = expand_inputs(&[&hidden], &ExpandOptions::default()).unwrap();
        assert_eq!(files, vec![hidden]);
    }

    #[test]
    fn test_missing_input_is_invalid() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.zip"));
        let missing = temp.path().join("missing.zip");

        let err = expand_inputs(&[temp.path(), missing.as_path()], &ExpandOptions::default())
            .unwrap_err();
        assert!(matches!(err, BatchError::InvalidInput { path } if path == missing));
    }

    #[test]
    fn test_empty_directory_is_empty_input() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("only_dir")).unwrap();

        let err = expand_inputs(&[temp.path()], &ExpandOptions::default()).unwrap_err();
        assert!(matches!(err, BatchError::EmptyInput));
    }

    #[test]
    fn test_rescan_sees_new_files() {
        let temp = TempDir::new().unwrap();
        touch(&temp.path().join("a.zip"));
        let options = ExpandOptions::default();

        assert_eq!(expand_inputs(&[temp.path()], &options).unwrap().len(), 1);
        touch(&temp.path().join("b.zip"));
        assert_eq!(expand_inputs(&[temp.path()], &options).unwrap().len(), 2);
    }

    #[test]
    fn test_is_hidden() {
        assert!(is_hidden(Path::new(".gitignore")));
        assert!(is_hidden(Path::new("dir/.hidden")));
        assert!(!is_hidden(Path::new("visible.zip")));
        assert!(!is_hidden(Path::new("dir/normal.7z")));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_hidden_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b".caf\xe9.zip");
        assert!(name.to_str().is_none());
        assert!(is_hidden(&Path::new("dir").join(name)));
        assert!(!is_hidden(Path::new(OsStr::from_bytes(b"caf\xe9.zip"))));
    }
}
