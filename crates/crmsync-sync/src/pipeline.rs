//! Fetch, normalize, merge and upload in one pass.

use crate::fetch::fetch_contacts;
use crate::source::{ContactSink, ContactSource};
use crate::upload::{build_batches, upload_contacts, UploadReport, UPLOAD_BATCH_LIMIT};
use crate::Result;
use crmsync_core::{CanonicalRecord, MergeEngine, MergeOutcome, MergeStats, Normalizer, RawContactRecord};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub batch_size: usize,
    /// Merge and convert everything but send nothing.
    pub dry_run: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            batch_size: UPLOAD_BATCH_LIMIT,
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub pages: usize,
    pub fetched: usize,
    pub skipped_without_consent: usize,
    pub merge: MergeStats,
    pub canonical: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<UploadReport>,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    pub report: SyncReport,
    pub records: Vec<CanonicalRecord>,
}

pub fn merge_raw(
    normalizer: &Normalizer,
    engine: &MergeEngine,
    raw: &[RawContactRecord],
) -> MergeOutcome {
    engine.merge(normalizer.normalize_all(raw))
}

pub fn run<S, K>(
    source: &S,
    sink: &K,
    normalizer: &Normalizer,
    engine: &MergeEngine,
    options: PipelineOptions,
) -> Result<PipelineOutput>
where
    S: ContactSource + ?Sized,
    K: ContactSink + ?Sized,
{
    let fetched = fetch_contacts(source)?;
    let stats = fetched.stats();
    info!(
        source = source.source_name(),
        pages = stats.pages,
        fetched = stats.fetched,
        skipped = stats.skipped_without_consent,
        "fetched contacts"
    );

    let outcome = merge_raw(normalizer, engine, &fetched.records);
    info!(
        input = outcome.stats.input,
        canonical = outcome.records.len(),
        merged = outcome.stats.merged,
        "merged contacts"
    );

    let uploaded = if options.dry_run {
        let batches = build_batches(&outcome.records, options.batch_size)?;
        info!(batches = batches.len(), "dry run, skipping upload");
        None
    } else {
        let report = upload_contacts(sink, &outcome.records, options.batch_size)?;
        info!(
            sink = sink.sink_name(),
            batches = report.batches,
            contacts = report.contacts,
            "uploaded contacts"
        );
        Some(report)
    };

    Ok(PipelineOutput {
        report: SyncReport {
            pages: stats.pages,
            fetched: stats.fetched,
            skipped_without_consent: stats.skipped_without_consent,
            merge: outcome.stats,
            canonical: outcome.records.len(),
            uploaded,
            dry_run: options.dry_run,
        },
        records: outcome.records,
    })
}
