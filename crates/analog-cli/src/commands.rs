//! Command execution: configuration, then the cross-reference run.

use std::path::PathBuf;
use std::time::Instant;

use analog_xref::{XrefJob, XrefReport};
use anyhow::{Context, Result};
use tracing::{info, info_span};

use crate::cli::Cli;
use crate::config::{load_config, resolve_job};
use crate::summary::print_config_source;

/// A resolved job and the config file that contributed to it, if any.
#[derive(Debug, Clone)]
pub struct PreparedJob {
    pub config: Option<PathBuf>,
    pub job: XrefJob,
}

/// Resolves the job from flags, environment, and config file.
///
/// No dataset is opened here; every failure is a configuration error.
pub fn prepare_job(cli: &Cli) -> Result<PreparedJob> {
    let (config, file_values) = match load_config(cli.config.as_deref())? {
        Some(loaded) => (Some(loaded.path), loaded.values),
        None => (None, Default::default()),
    };
    let job = resolve_job(&cli.job, &file_values)?;
    Ok(PreparedJob { config, job })
}

/// Runs the cross-reference described by `cli`.
pub fn run_xref(cli: &Cli) -> Result<XrefReport> {
    let prepared = prepare_job(cli)?;
    if let Some(path) = &prepared.config {
        print_config_source(path);
    }
    run_job(&prepared.job)
}

/// Runs an already resolved job.
pub fn run_job(job: &XrefJob) -> Result<XrefReport> {
    let span = info_span!(
        "xref",
        dump = %job.dump.display(),
        assessment = %job.assessment.display()
    );
    let _guard = span.enter();
    let start = Instant::now();
    let report = analog_xref::run(job).with_context(|| {
        format!(
            "cross-reference {} against {}",
            job.assessment.display(),
            job.dump.display()
        )
    })?;
    info!(
        output = %report.output.display(),
        duration_ms = start.elapsed().as_millis(),
        "cross-reference complete"
    );
    Ok(report)
}
