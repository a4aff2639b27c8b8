//! Extension-conditioned flag policy.
//!
//! Whether the password or codepage switch is passed to 7-Zip depends only
//! on the archive's extension. Extensions are compared exactly as written,
//! case included, with their leading dot; a file without any dot has the empty extension and is
//! treated as a 7z archive.

use std::path::Path;

/// Extensions for which `-p<password>` is passed.
pub const PASSWORD_EXTENSIONS: &[&str] = &[".zip", ".7z", ".rar", ""];

/// Extensions for which `-mcp=<codepage>` is passed.
pub const CODEPAGE_EXTENSIONS: &[&str] = &[".zip", ".tar"];

/// Optional 7-Zip switches that depend on the archive extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Archive password (`-p`).
    Password,
    /// Filename code page (`-mcp=`).
    Codepage,
}

impl FlagKind {
    /// Extensions that honour this flag.
    #[must_use]
    pub const fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Password => PASSWORD_EXTENSIONS,
            Self::Codepage => CODEPAGE_EXTENSIONS,
        }
    }
}

/// Returns the extension of `path` including the leading dot, case kept.
///
/// Only the last extension counts, so `x.tar.gz` yields `.gz`. A name with
/// no dot yields `""`; a trailing dot yields `"."`.
///
/// # Examples
///
/// ```
/// use batchx_core::invoke::policy::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("dir/Data.ZIP")), ".ZIP");
/// assert_eq!(extension_of(Path::new("backup.tar.gz")), ".gz");
/// assert_eq!(extension_of(Path::new("payload")), "");
/// ```
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension().map_or_else(String::new, |ext| {
        format!(".{}", ext.to_string_lossy())
    })
}

/// Returns `true` if `kind` should be passed for an archive with extension
/// `ext` (as produced by [`extension_of`]).
///
/// # Examples
///
/// ```
/// use batchx_core::invoke::policy::FlagKind;
/// use batchx_core::invoke::policy::flag_applies;
///
/// assert!(flag_applies(".rar", FlagKind::Password));
/// assert!(!flag_applies(".gz", FlagKind::Password));
/// assert!(flag_applies(".zip", FlagKind::Codepage));
/// assert!(!flag_applies(".7z", FlagKind::Codepage));
/// ```
#[must_use]
pub fn flag_applies(ext: &str, kind: FlagKind) -> bool {
    kind.extensions().contains(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_extensions() {
        for ext in [".zip", ".7z", ".rar", ""] {
            assert!(flag_applies(ext, FlagKind::Password), "{ext:?}");
        }
        for ext in [".tar", ".gz", ".xz", ".", ".iso"] {
            assert!(!flag_applies(ext, FlagKind::Password), "{ext:?}");
        }
    }

    #[test]
    fn test_uppercase_extensions_get_no_flags() {
        for ext in [".ZIP", ".Rar", ".7Z", ".TAR"] {
            assert!(!flag_applies(ext, FlagKind::Password), "{ext:?}");
            assert!(!flag_applies(ext, FlagKind::Codepage), "{ext:?}");
        }
    }

    #[test]
    fn test_codepage_extensions() {
        assert!(flag_applies(".zip", FlagKind::Codepage));
        assert!(flag_applies(".tar", FlagKind::Codepage));
        assert!(!flag_applies(".7z", FlagKind::Codepage));
        assert!(!flag_applies("", FlagKind::Codepage));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("secret.rar")), ".rar");
        assert_eq!(extension_of(Path::new("secret.tar.gz")), ".gz");
        assert_eq!(extension_of(Path::new("/a/b/NAME.7Z")), ".7Z");
        assert_eq!(extension_of(Path::new("noext")), "");
        assert_eq!(extension_of(Path::new("trailing.")), ".");
        assert_eq!(extension_of(Path::new(".bashrc")), "");
    }
}
