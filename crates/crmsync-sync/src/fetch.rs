use crate::source::ContactSource;
use crate::{Result, SyncError};
use crmsync_core::RawContactRecord;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub records: Vec<RawContactRecord>,
    pub pages: usize,
    pub skipped_without_consent: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    pub pages: usize,
    pub fetched: usize,
    pub skipped_without_consent: usize,
}

impl FetchReport {
    pub fn stats(&self) -> FetchStats {
        FetchStats {
            pages: self.pages,
            fetched: self.records.len(),
            skipped_without_consent: self.skipped_without_consent,
        }
    }
}

/// Follows the search cursor until the last page and keeps the records with consent.
/// Every page is collected before returning; any failure aborts the whole fetch.
pub fn fetch_contacts<S: ContactSource + ?Sized>(source: &S) -> Result<FetchReport> {
    let mut report = FetchReport::default();
    let mut after: Option<String> = None;

    loop {
        let page = source.search_page(after.as_deref())?;
        report.pages += 1;
        debug!(
            source = source.source_name(),
            page = report.pages,
            results = page.results.len(),
            "fetched contacts page"
        );

        for result in &page.results {
            let record = RawContactRecord::from_properties(&result.property_map()).map_err(
                |source| SyncError::InvalidRecord {
                    id: result.id.clone(),
                    source,
                },
            )?;
            if !record.has_consent() {
                warn!(id = %result.id, "skipping contact without consent");
                report.skipped_without_consent += 1;
                continue;
            }
            report.records.push(record);
        }

        match page.next_after() {
            Some(next) if after.as_deref() == Some(next) => {
                return Err(SyncError::Parse(format!(
                    "search cursor {next} did not advance"
                )));
            }
            Some(next) => after = Some(next.to_string()),
            None => break,
        }
    }

    Ok(report)
}
