use crate::commands::{print_json, write_json_file, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use crmsync_core::{MergeStats, RawContactRecord};
use crmsync_sync::pipeline::merge_raw;
use crmsync_sync::wire::property_map;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// JSON array of raw contact property maps
    pub file: PathBuf,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct MergeSummary {
    skipped_without_consent: usize,
    merge: MergeStats,
    canonical: usize,
    output: String,
}

pub fn merge(ctx: &Context<'_>, args: MergeArgs) -> Result<()> {
    let data = fs::read_to_string(&args.file)
        .with_context(|| format!("read contacts file {}", args.file.display()))?;
    let maps: Vec<Map<String, Value>> = serde_json::from_str(&data).map_err(|err| {
        invalid_input(format!(
            "contacts file {} is not a JSON array of objects: {err}",
            args.file.display()
        ))
    })?;

    let mut raw = Vec::with_capacity(maps.len());
    let mut skipped_without_consent = 0;
    for (index, map) in maps.iter().enumerate() {
        let record = RawContactRecord::from_properties(&property_map(map))
            .with_context(|| format!("contact #{index} in {}", args.file.display()))?;
        if !record.has_consent() {
            warn!(index, "skipping contact without consent");
            skipped_without_consent += 1;
            continue;
        }
        raw.push(record);
    }

    let outcome = merge_raw(
        &ctx.config.normalizer(),
        &ctx.config.merge_engine(),
        &raw,
    );

    let Some(path) = args.out else {
        return print_json(&outcome.records);
    };
    write_json_file(&path, &outcome.records)?;

    if ctx.json {
        return print_json(&MergeSummary {
            skipped_without_consent,
            merge: outcome.stats,
            canonical: outcome.records.len(),
            output: path.display().to_string(),
        });
    }
    println!(
        "Merged {} contacts into {} canonical records ({} skipped without consent) in {}",
        outcome.stats.input,
        outcome.records.len(),
        skipped_without_consent,
        path.display()
    );
    Ok(())
}
