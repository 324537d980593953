use crate::source::ContactSink;
use crate::wire::{BatchCreateRequest, ContactInput};
use crate::{Result, SyncError};
use crmsync_core::time::date_to_epoch_millis;
use crmsync_core::CanonicalRecord;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Largest batch the batch-create endpoint accepts.
pub const UPLOAD_BATCH_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadReport {
    pub batches: usize,
    pub contacts: usize,
}

pub fn to_contact_input(record: &CanonicalRecord) -> Result<ContactInput> {
    let mut properties = BTreeMap::new();
    let mut put = |name: &str, value: Option<&str>| {
        if let Some(value) = value {
            properties.insert(name.to_string(), Value::from(value));
        }
    };
    put("email", record.email.as_deref());
    put("phone", record.phone.as_deref());
    put("country", record.country.as_deref());
    put("city", record.city.as_deref());
    put("firstname", record.first_name.as_deref());
    put("lastname", record.last_name.as_deref());
    put("address", record.address.as_deref());
    put(
        "original_industry",
        record.industry.as_ref().map(|industry| industry.as_str()),
    );
    put("temporary_id", record.external_id.as_deref());

    if let Some(date) = record.create_date.as_deref() {
        let millis = date_to_epoch_millis(date).map_err(|source| SyncError::InvalidCreateDate {
            record: record_label(record),
            source,
        })?;
        properties.insert("original_create_date".to_string(), Value::from(millis));
    }

    Ok(ContactInput { properties })
}

/// Converts every record up front so a bad record fails before anything is sent.
pub fn build_batches(
    records: &[CanonicalRecord],
    batch_size: usize,
) -> Result<Vec<BatchCreateRequest>> {
    let batch_size = batch_size.clamp(1, UPLOAD_BATCH_LIMIT);
    records
        .chunks(batch_size)
        .map(|chunk| {
            let inputs = chunk
                .iter()
                .map(to_contact_input)
                .collect::<Result<Vec<_>>>()?;
            Ok(BatchCreateRequest { inputs })
        })
        .collect()
}

pub fn upload_contacts<S: ContactSink + ?Sized>(
    sink: &S,
    records: &[CanonicalRecord],
    batch_size: usize,
) -> Result<UploadReport> {
    let batches = build_batches(records, batch_size)?;
    let total = batches.len();
    let mut report = UploadReport::default();

    for batch in &batches {
        sink.batch_create(batch)
            .map_err(|source| SyncError::UploadAborted {
                sent: report.batches,
                total,
                source: Box::new(source),
            })?;
        report.batches += 1;
        report.contacts += batch.inputs.len();
        debug!(
            sink = sink.sink_name(),
            batch = report.batches,
            total,
            inputs = batch.inputs.len(),
            "uploaded contact batch"
        );
    }

    Ok(report)
}

fn record_label(record: &CanonicalRecord) -> String {
    record
        .external_id
        .as_deref()
        .or(record.email.as_deref())
        .or(record.full_name.as_deref())
        .unwrap_or("<unnamed>")
        .to_string()
}
