//! End-to-end run: index the dump, join the assessment, write the output.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, info_span};

use crate::error::Result;
use crate::index::CrossRefIndex;
use crate::join::{JoinStats, cross_reference};
use crate::output::ResultWriter;
use crate::table::{HeaderIndex, TabularReader};

/// Dataset label for the dump file.
pub const DUMP_DATASET: &str = "dump";
/// Dataset label for the assessment file.
pub const ASSESSMENT_DATASET: &str = "assessment";

/// Header names selecting the direct-number and house-pair columns of one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    pub dn: String,
    pub hp: String,
}

impl HeaderNames {
    pub fn new(dn: impl Into<String>, hp: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            hp: hp.into(),
        }
    }
}

/// Everything needed for one cross-reference run.
#[derive(Debug, Clone)]
pub struct XrefJob {
    pub dump: PathBuf,
    pub assessment: PathBuf,
    pub output: PathBuf,
    pub dump_columns: HeaderNames,
    pub assessment_columns: HeaderNames,
}

/// Counts and paths from a completed run.
#[derive(Debug, Clone)]
pub struct XrefReport {
    pub output: PathBuf,
    pub indexed_keys: usize,
    pub overwritten_keys: usize,
    pub join: JoinStats,
}

/// Runs the job in two sequential passes.
///
/// The index is complete before any assessment row is read, and both header
/// rows are resolved before the output file is created.
pub fn run(job: &XrefJob) -> Result<XrefReport> {
    let index = build_dump_index(job)?;

    let join_span = info_span!("join", assessment = %job.assessment.display());
    let join_start = Instant::now();
    let (header, joined) = join_span.in_scope(|| -> Result<_> {
        let mut reader = TabularReader::open(&job.assessment, ASSESSMENT_DATASET)?;
        let header = reader.header()?.to_vec();
        let columns = HeaderIndex::new(&header, ASSESSMENT_DATASET)
            .resolve_pair(&job.assessment_columns.dn, &job.assessment_columns.hp)?;
        let joined = cross_reference(reader.rows()?, columns, &index, ASSESSMENT_DATASET)?;
        Ok((header, joined))
    })?;
    info!(
        rows = joined.stats.rows,
        already_populated = joined.stats.already_populated,
        filled = joined.stats.filled,
        unmatched = joined.stats.unmatched,
        duration_ms = join_start.elapsed().as_millis(),
        "join complete"
    );

    let output_span = info_span!("output", output = %job.output.display());
    let output_start = Instant::now();
    output_span.in_scope(|| -> Result<()> {
        ResultWriter::create(&job.output)?.write_joined(&header, &joined.rows)?;
        Ok(())
    })?;
    info!(
        rows = joined.rows.len(),
        duration_ms = output_start.elapsed().as_millis(),
        "output written"
    );

    Ok(XrefReport {
        output: job.output.clone(),
        indexed_keys: index.len(),
        overwritten_keys: index.overwritten(),
        join: joined.stats,
    })
}

fn build_dump_index(job: &XrefJob) -> Result<CrossRefIndex> {
    let span = info_span!("index", dump = %job.dump.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut reader = TabularReader::open(&job.dump, DUMP_DATASET)?;
    let columns = HeaderIndex::new(reader.header()?, DUMP_DATASET)
        .resolve_pair(&job.dump_columns.dn, &job.dump_columns.hp)?;
    let index = CrossRefIndex::build(reader.rows()?, columns, DUMP_DATASET)?;

    if index.is_empty() {
        tracing::warn!(dump = %job.dump.display(), "dump file has no data rows");
    }
    if index.overwritten() > 0 {
        tracing::debug!(
            overwritten = index.overwritten(),
            "duplicate direct numbers in dump, last occurrence kept"
        );
    }
    info!(
        keys = index.len(),
        duration_ms = start.elapsed().as_millis(),
        "dump index built"
    );
    Ok(index)
}
