use crmsync_core::{
    CanonicalRecord, ContactRecord, Industry, IndustryMatch, MergeEngine, Normalizer,
    RawContactRecord,
};
use std::collections::{HashMap, HashSet};

fn contact(
    name: Option<(&str, &str)>,
    email: Option<&str>,
    industry: Option<&str>,
    date: &str,
) -> ContactRecord {
    ContactRecord {
        first_name: name.map(|(first, _)| first.to_string()),
        last_name: name.map(|(_, last)| last.to_string()),
        email: email.map(str::to_string),
        industry: industry.map(str::to_string),
        create_date: Some(date.to_string()),
        ..ContactRecord::default()
    }
}

fn sample_records() -> Vec<ContactRecord> {
    let names = [("Jane", "Doe"), ("John", "Roe"), ("Ada", "Byron"), ("Jane", "Roe")];
    let emails = ["jane@x.com", "john@x.com", "ada@x.com", "shared@x.com"];
    let industries = ["Tech", "Finance", "Retail", "Technology", "Health"];

    let mut records = Vec::new();
    for i in 0..40usize {
        let name = if i % 3 == 0 { None } else { Some(names[i % names.len()]) };
        let email = if i % 4 == 1 { None } else { Some(emails[(i * 7) % emails.len()]) };
        let industry = if i % 5 == 2 { None } else { Some(industries[i % industries.len()]) };
        let date = format!("2024-{:02}-{:02}", 1 + i % 12, 1 + (i * 3) % 28);
        records.push(ContactRecord {
            phone: Some(format!("(+353) 8512 {:05}", i)),
            ..contact(name, email, industry, &date)
        });
    }
    records
}

fn count_by<F>(records: &[CanonicalRecord], key: F) -> HashMap<String, usize>
where
    F: Fn(&CanonicalRecord) -> Option<&String>,
{
    let mut counts = HashMap::new();
    for record in records {
        if let Some(value) = key(record) {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[test]
fn every_email_lands_in_one_record() {
    let outcome = MergeEngine::default().merge(sample_records());
    let counts = count_by(&outcome.records, |record| record.email.as_ref());
    assert!(!counts.is_empty());
    assert!(counts.values().all(|count| *count == 1), "{counts:?}");
}

#[test]
fn stats_account_for_every_input() {
    let records = sample_records();
    let total = records.len();
    let outcome = MergeEngine::default().merge(records);
    let stats = outcome.stats;
    assert_eq!(stats.input, total);
    assert_eq!(stats.seeded + stats.merged + stats.keyless, total);
    assert_eq!(outcome.records.len(), stats.seeded + stats.keyless);
}

#[test]
fn industries_are_never_repeated() {
    for policy in [IndustryMatch::Substring, IndustryMatch::Exact] {
        let outcome = MergeEngine::new(policy).merge(sample_records());
        for record in &outcome.records {
            let Some(industry) = record.industry.as_ref() else {
                continue;
            };
            let values: Vec<&str> = industry.values().collect();
            let distinct: HashSet<&str> = values.iter().copied().collect();
            assert_eq!(values.len(), distinct.len(), "{}", industry.as_str());
        }
    }
}

#[test]
fn seed_values_survive_later_merges() {
    let with = |phone: &str, address: Option<&str>, date: &str| ContactRecord {
        phone: Some(phone.to_string()),
        address: address.map(str::to_string),
        ..contact(Some(("Ann", "Lee")), Some("shared@x.com"), None, date)
    };
    let outcome = MergeEngine::default().merge(vec![
        with("(+353) 1111 11111", Some("Old Rd"), "2024-01-01"),
        with("(+353) 3333 33333", None, "2024-05-01"),
        with("(+353) 2222 22222", Some("Mid Rd"), "2024-03-01"),
    ]);
    assert_eq!(outcome.records.len(), 1);
    let merged = &outcome.records[0];
    assert_eq!(merged.phone.as_deref(), Some("(+353) 3333 33333"));
    assert_eq!(merged.address.as_deref(), Some("Mid Rd"));
    assert_eq!(merged.create_date.as_deref(), Some("2024-05-01"));
    assert_eq!(outcome.stats.merged, 2);
}

#[test]
fn order_of_input_does_not_change_result_for_distinct_dates() {
    let older = contact(None, Some("a@x.com"), Some("Tech"), "2024-01-01");
    let newer = contact(None, Some("a@x.com"), Some("Finance"), "2024-02-01");
    let engine = MergeEngine::default();

    let forward = engine.merge(vec![older.clone(), newer.clone()]);
    let backward = engine.merge(vec![newer, older]);
    assert_eq!(forward, backward);
    assert_eq!(
        forward.records[0].industry.as_ref().map(Industry::as_str),
        Some(";Finance;Tech")
    );
}

#[test]
fn duplicate_email_keeps_newest_phone_and_fills_gaps() {
    let engine = MergeEngine::default();
    let older = ContactRecord {
        phone: Some("(+353) 1111 22222".to_string()),
        address: Some("1 Quay St".to_string()),
        ..contact(None, Some("b@y.com"), None, "2023-01-01")
    };
    let newer = ContactRecord {
        phone: Some("(+353) 3333 44444".to_string()),
        address: Some("1 Quay St".to_string()),
        ..contact(None, Some("b@y.com"), None, "2024-01-01")
    };
    let outcome = engine.merge(vec![older.clone(), newer]);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].phone.as_deref(), Some("(+353) 3333 44444"));

    let newer_without_phone = ContactRecord {
        phone: None,
        ..contact(None, Some("b@y.com"), None, "2024-01-01")
    };
    let outcome = engine.merge(vec![older, newer_without_phone]);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].phone.as_deref(), Some("(+353) 1111 22222"));
    assert_eq!(outcome.records[0].address.as_deref(), Some("1 Quay St"));
}

#[test]
fn raw_records_flow_through_normalizer_into_engine() {
    let raw = |first: &str, email: &str, locality: &str, date: &str| RawContactRecord {
        first_name: Some(first.to_string()),
        last_name: Some("Murphy".to_string()),
        raw_email: Some(email.to_string()),
        country: Some(locality.to_string()),
        create_date: Some(date.to_string()),
        consent: Some("true".to_string()),
        ..RawContactRecord::default()
    };
    let raws = vec![
        raw("Sean", "Sean <sean@x.ie> Contact Info.", "Limerick", "2024-01-01"),
        raw("Sean", "", "Ireland", "2024-02-01"),
    ];

    let normalizer = Normalizer::default();
    let outcome = MergeEngine::default().merge(normalizer.normalize_all(&raws));
    assert_eq!(outcome.records.len(), 1);
    let merged = &outcome.records[0];
    assert_eq!(merged.full_name.as_deref(), Some("Sean Murphy"));
    assert_eq!(merged.email.as_deref(), Some("sean@x.ie"));
    assert_eq!(merged.country.as_deref(), Some("Ireland"));
    assert_eq!(merged.city.as_deref(), Some("Limerick"));
}
