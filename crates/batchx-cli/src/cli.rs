//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "batchx")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Every given file, and every file directly inside a given directory, is \
                  extracted with 7-Zip into its own directory. Files are not selected by \
                  extension."
)]
#[command(subcommand_negates_reqs = true, args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub extract: ExtractArgs,

    /// Enable verbose output (includes the 7-Zip command lines)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the final summary in JSON format on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Archive file, or directory containing archives (repeatable)
    #[arg(short, long = "input", value_name = "PATH", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Root directory for the per-archive output directories
    /// (default: next to each archive)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Password for encrypted archives (ZIP, 7z, RAR and files without extension)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Code page identifier for ZIP/TAR file names
    /// (utf-8:65001, shift-jis:932, EUC-JP:20932, etc.)
    #[arg(short, long, value_parser = clap::value_parser!(u32))]
    pub codepage: Option<u32>,

    /// Path of the 7-Zip executable (default: 7z next to batchx)
    #[arg(short = 'x', long = "exe", value_name = "PATH")]
    pub exe: Option<PathBuf>,

    /// Scan input directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Kill an extraction that runs longer than this many seconds
    #[arg(short, long, value_name = "SECONDS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Number of archives extracted at the same time
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: u16,

    /// Show a progress bar instead of per-archive log lines
    #[arg(long)]
    pub progress: bool,
}

/// Parse a positive number of seconds.
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {s}"))?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(Duration::from_secs(secs))
}
