//! Command line construction for one archive.

use super::policy::FlagKind;
use super::policy::extension_of;
use super::policy::flag_applies;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// Placeholder shown instead of the password in diagnostics.
const REDACTED: &str = "***";

/// Position of `-p<password>`, right after the output switch.
const PASSWORD_INDEX: usize = 4;

/// The 7-Zip arguments for extracting one archive.
///
/// The argument order is fixed:
/// `x -y -aoa -o<dir> [-p<password>] [-mcp=<codepage>] <archive>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationPlan {
    archive: PathBuf,
    output_dir: PathBuf,
    args: Vec<OsString>,
    with_password: bool,
    with_codepage: bool,
}

impl InvocationPlan {
    /// Builds the plan for extracting `archive` into `output_dir`.
    ///
    /// The password is only used for `.zip`, `.7z`, `.rar` and extensionless
    /// archives; the codepage only for `.zip` and `.tar`.
    ///
    /// # Examples
    ///
    /// ```
    /// use batchx_core::invoke::InvocationPlan;
    /// use std::path::Path;
    ///
    /// let plan = InvocationPlan::build(Path::new("a.zip"), Path::new("out"), Some("pw"), Some(65001));
    /// assert!(plan.has_password());
    /// assert!(plan.has_codepage());
    /// ```
    #[must_use]
    pub fn build(
        archive: &Path,
        output_dir: &Path,
        password: Option<&str>,
        codepage: Option<u32>,
    ) -> Self {
        let ext = extension_of(archive);

        let mut args: Vec<OsString> = vec!["x".into(), "-y".into(), "-aoa".into()];

        let mut out_flag = OsString::from("-o");
        out_flag.push(output_dir.as_os_str());
        args.push(out_flag);

        let password = password.filter(|_| flag_applies(&ext, FlagKind::Password));
        if let Some(password) = password {
            args.push(format!("-p{password}").into());
        }

        let codepage = codepage.filter(|_| flag_applies(&ext, FlagKind::Codepage));
        if let Some(codepage) = codepage {
            args.push(format!("-mcp={codepage}").into());
        }

        args.push(archive.as_os_str().to_owned());

        Self {
            archive: archive.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            args,
            with_password: password.is_some(),
            with_codepage: codepage.is_some(),
        }
    }

    /// Archive to extract.
    #[must_use]
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    /// Target directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full argument list, password included.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Whether the password switch was added.
    #[must_use]
    pub fn has_password(&self) -> bool {
        self.with_password
    }

    /// Whether the codepage switch was added.
    #[must_use]
    pub fn has_codepage(&self) -> bool {
        self.with_codepage
    }

    /// Argument list for logging, with the password masked.
    #[must_use]
    pub fn display_args(&self) -> Vec<String> {
        self.args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                if self.with_password && i == PASSWORD_INDEX {
                    format!("-p{REDACTED}")
                } else {
                    arg.to_string_lossy().into_owned()
                }
            })
            .collect()
    }
}
