pub mod email;
pub mod locality;
pub mod phone;

pub use email::extract_email;
pub use locality::{Locality, LocalityTable};
pub use phone::{group_digits, CallingCodes, DEFAULT_CALLING_CODE};

use crate::domain::{ContactRecord, RawContactRecord};

/// Applies the field normalizers to a raw record.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    localities: LocalityTable,
    calling_codes: CallingCodes,
}

impl Normalizer {
    pub fn new(localities: LocalityTable, calling_codes: CallingCodes) -> Self {
        Self {
            localities,
            calling_codes,
        }
    }

    pub fn normalize(&self, raw: &RawContactRecord) -> ContactRecord {
        let locality = self.localities.split(raw.country.as_deref());
        let country = non_empty(locality.country);
        let city = non_empty(locality.city);
        let phone = self
            .calling_codes
            .format_phone(raw.phone.as_deref(), country.as_deref());

        ContactRecord {
            first_name: raw.first_name.clone(),
            last_name: raw.last_name.clone(),
            email: extract_email(raw.raw_email.as_deref()),
            phone,
            country,
            city,
            address: raw.address.clone(),
            industry: raw.industry.clone(),
            external_id: raw.external_id.clone(),
            create_date: raw.create_date.clone(),
        }
    }

    pub fn normalize_all(&self, raw: &[RawContactRecord]) -> Vec<ContactRecord> {
        raw.iter().map(|record| self.normalize(record)).collect()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
