//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::convert_batch_error;
use crate::output::OutputFormatter;
use crate::progress::BatchProgress;
use anyhow::Result;
use batchx_core::BatchConfig;
use batchx_core::BatchRunner;
use batchx_core::SevenZip;
use batchx_core::allocate::allocate_dir;
use batchx_core::executable::default_executable;
use batchx_core::executable::validate_executable;
use batchx_core::expand::expand_inputs;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let exe = args.exe.clone().unwrap_or_else(default_executable);
    let exe = validate_executable(&exe).map_err(convert_batch_error)?;

    let mut config = BatchConfig {
        output_root: None,
        password: args.password.clone(),
        codepage: args.codepage,
        recursive: args.recursive,
        timeout: args.timeout,
        jobs: usize::from(args.jobs),
    };

    let files = expand_inputs(&args.inputs, &config.expand_options()).map_err(convert_batch_error)?;
    config.output_root = allocate_dir(args.output.as_deref()).map_err(convert_batch_error)?;

    tracing::debug!(
        exe = %exe.display(),
        files = files.len(),
        jobs = config.effective_jobs(),
        "starting batch"
    );

    let tool = SevenZip::new(exe).with_timeout(config.timeout);
    let progress = BatchProgress::new(args.progress && BatchProgress::should_show());

    let report = BatchRunner::new(&tool, &config)
        .run(&files, &progress)
        .map_err(convert_batch_error)?;
    drop(progress);

    formatter.format_batch_result(&report)?;

    Ok(())
}
