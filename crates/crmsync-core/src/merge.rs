//! Deduplication of contact records into canonical records.
//!
//! Records are processed newest first. The first record seen for an identity seeds the
//! canonical record; later records only fill its empty fields and extend its industry list.
//! A record joins an existing canonical record by email, or by full name when no record
//! carries its email.

use crate::domain::{CanonicalRecord, ContactRecord, IndustryMatch};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeEngine {
    industry_match: IndustryMatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub input: usize,
    /// Records that started a new canonical record.
    pub seeded: usize,
    /// Records folded into an existing canonical record.
    pub merged: usize,
    /// Records without email or full name, passed through untouched.
    pub keyless: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub records: Vec<CanonicalRecord>,
    pub stats: MergeStats,
}

impl MergeEngine {
    pub fn new(industry_match: IndustryMatch) -> Self {
        Self { industry_match }
    }

    pub fn merge(&self, mut records: Vec<ContactRecord>) -> MergeOutcome {
        records.sort_by(|a, b| newest_first(a.create_date.as_deref(), b.create_date.as_deref()));

        let mut output = OutputSet::with_capacity(records.len());
        let mut stats = MergeStats {
            input: records.len(),
            ..MergeStats::default()
        };

        for record in records {
            let record = CanonicalRecord::seed(record);
            if !record.has_identity() {
                stats.keyless += 1;
                output.push(record);
                continue;
            }

            match output.find_target(&record) {
                Some(position) => {
                    output.fold_into(position, &record, self.industry_match);
                    stats.merged += 1;
                }
                None => {
                    output.push(record);
                    stats.seeded += 1;
                }
            }
        }

        MergeOutcome {
            records: output.records,
            stats,
        }
    }
}

/// Canonical records in output order plus key indices. Each index maps a key to the lowest
/// output position carrying it, which is what a front-to-back scan would find.
#[derive(Debug, Default)]
struct OutputSet {
    records: Vec<CanonicalRecord>,
    by_email: HashMap<String, usize>,
    by_full_name: HashMap<String, usize>,
}

impl OutputSet {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    fn push(&mut self, record: CanonicalRecord) {
        let position = self.records.len();
        self.records.push(record);
        self.index(position);
    }

    // Email wins over full name even when both match different records.
    fn find_target(&self, record: &CanonicalRecord) -> Option<usize> {
        let by_email = record
            .email
            .as_ref()
            .and_then(|email| self.by_email.get(email));
        let by_full_name = record
            .full_name
            .as_ref()
            .and_then(|name| self.by_full_name.get(name));
        by_email.or(by_full_name).copied()
    }

    fn fold_into(&mut self, position: usize, incoming: &CanonicalRecord, policy: IndustryMatch) {
        let target = &mut self.records[position];
        let filled = target.fill_in(incoming);
        target.absorb_industry(incoming.industry.as_ref(), policy);
        if filled.email || filled.full_name {
            self.index(position);
        }
    }

    fn index(&mut self, position: usize) {
        let record = &self.records[position];
        if let Some(email) = record.email.as_ref() {
            insert_lowest(&mut self.by_email, email, position);
        }
        if let Some(name) = record.full_name.as_ref() {
            insert_lowest(&mut self.by_full_name, name, position);
        }
    }
}

fn insert_lowest(index: &mut HashMap<String, usize>, key: &str, position: usize) {
    index
        .entry(key.to_string())
        .and_modify(|existing| *existing = (*existing).min(position))
        .or_insert(position);
}

// ISO dates order lexically. Undated records go last.
fn newest_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
