use crate::commands::{print_json, write_json_file, Context};
use crate::error::invalid_input;
use anyhow::{Context as _, Result};
use clap::Args;
use crmsync_config::AppConfig;
use crmsync_sync::fetch::fetch_contacts;
use crmsync_sync::hubspot::{HubSpotClient, HubSpotOptions};
use crmsync_sync::pipeline::{self, PipelineOptions, SyncReport};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Merge and convert without uploading anything
    #[arg(long)]
    pub dry_run: bool,
    /// Also write the canonical records as JSON
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct FetchSummary {
    pages: usize,
    fetched: usize,
    skipped_without_consent: usize,
    output: String,
}

pub fn sync(ctx: &Context<'_>, args: SyncArgs) -> Result<()> {
    let client = hubspot_client(ctx.config)?;
    let output = pipeline::run(
        &client,
        &client,
        &ctx.config.normalizer(),
        &ctx.config.merge_engine(),
        PipelineOptions {
            batch_size: ctx.config.hubspot.batch_size,
            dry_run: args.dry_run,
        },
    )
    .with_context(|| "sync contacts")?;

    if let Some(path) = args.out.as_deref() {
        write_json_file(path, &output.records)?;
    }

    if ctx.json {
        return print_json(&output.report);
    }
    print_report(&output.report);
    if let Some(path) = args.out {
        println!("Canonical records written to {}", path.display());
    }
    Ok(())
}

pub fn fetch(ctx: &Context<'_>, args: FetchArgs) -> Result<()> {
    let client = hubspot_client(ctx.config)?;
    let report = fetch_contacts(&client).with_context(|| "fetch contacts")?;
    let stats = report.stats();
    let maps: Vec<BTreeMap<String, Option<String>>> = report
        .records
        .iter()
        .map(|record| record.to_properties())
        .collect();

    let Some(path) = args.out else {
        return print_json(&maps);
    };
    write_json_file(&path, &maps)?;

    if ctx.json {
        return print_json(&FetchSummary {
            pages: stats.pages,
            fetched: stats.fetched,
            skipped_without_consent: stats.skipped_without_consent,
            output: path.display().to_string(),
        });
    }
    println!(
        "Fetched {} contacts over {} pages (skipped {} without consent) into {}",
        stats.fetched,
        stats.pages,
        stats.skipped_without_consent,
        path.display()
    );
    Ok(())
}

fn hubspot_client(config: &AppConfig) -> Result<HubSpotClient> {
    let hubspot = &config.hubspot;
    let token = hubspot.resolve_token().ok_or_else(|| {
        invalid_input(format!(
            "missing HubSpot token: set {} or hubspot.token",
            hubspot.token_env
        ))
    })?;
    let client = HubSpotClient::new(HubSpotOptions {
        api_base: hubspot.api_base.clone(),
        token,
        page_size: hubspot.page_size,
        timeout: Duration::from_secs(hubspot.timeout_secs),
        user_agent: Some(format!("crmsync/{}", env!("CARGO_PKG_VERSION"))),
    })
    .with_context(|| "build hubspot client")?;
    Ok(client)
}

fn print_report(report: &SyncReport) {
    println!(
        "Fetched {} contacts over {} pages (skipped {} without consent)",
        report.fetched, report.pages, report.skipped_without_consent
    );
    println!(
        "Merged into {} canonical records ({} duplicates folded, {} without identity)",
        report.canonical, report.merge.merged, report.merge.keyless
    );
    match report.uploaded {
        Some(uploaded) => println!(
            "Uploaded {} contacts in {} batches",
            uploaded.contacts, uploaded.batches
        ),
        None => println!("Dry run: nothing uploaded"),
    }
}
