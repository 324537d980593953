use crate::domain::industry::{Industry, IndustryMatch};
use crate::domain::record::{clean_value, ContactRecord};
use serde::{Deserialize, Serialize};

/// Merged representation of one real-world contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub industry: Option<Industry>,
    pub external_id: Option<String>,
    pub create_date: Option<String>,
}

/// Identity keys that a fill-in populated on the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilledKeys {
    pub email: bool,
    pub full_name: bool,
}

impl CanonicalRecord {
    pub fn seed(record: ContactRecord) -> Self {
        let first_name = clean_value(record.first_name.as_deref());
        let last_name = clean_value(record.last_name.as_deref());
        Self {
            full_name: full_name(first_name.as_deref(), last_name.as_deref()),
            first_name,
            last_name,
            email: clean_value(record.email.as_deref()),
            phone: clean_value(record.phone.as_deref()),
            country: clean_value(record.country.as_deref()),
            city: clean_value(record.city.as_deref()),
            address: clean_value(record.address.as_deref()),
            industry: record.industry.as_deref().and_then(Industry::new),
            external_id: clean_value(record.external_id.as_deref()),
            create_date: clean_value(record.create_date.as_deref()),
        }
    }

    /// Copies every value of `incoming` into a field that is still empty here. Existing values
    /// are never replaced.
    pub fn fill_in(&mut self, incoming: &CanonicalRecord) -> FilledKeys {
        let keys = FilledKeys {
            email: fill(&mut self.email, &incoming.email),
            full_name: fill(&mut self.full_name, &incoming.full_name),
        };
        fill(&mut self.first_name, &incoming.first_name);
        fill(&mut self.last_name, &incoming.last_name);
        fill(&mut self.phone, &incoming.phone);
        fill(&mut self.country, &incoming.country);
        fill(&mut self.city, &incoming.city);
        fill(&mut self.address, &incoming.address);
        fill(&mut self.industry, &incoming.industry);
        fill(&mut self.external_id, &incoming.external_id);
        fill(&mut self.create_date, &incoming.create_date);
        keys
    }

    /// Accumulates the incoming industry. Skipped when either side has none.
    pub fn absorb_industry(&mut self, incoming: Option<&Industry>, policy: IndustryMatch) -> bool {
        match (self.industry.as_mut(), incoming) {
            (Some(current), Some(incoming)) => current.absorb(incoming, policy),
            _ => false,
        }
    }

    pub fn has_identity(&self) -> bool {
        self.email.is_some() || self.full_name.is_some()
    }
}

/// First and last name joined by a single space, a missing part counting as empty. Only
/// first-only names end with the space and only last-only names start with it, so the two
/// never collide. `None` when both parts are empty.
pub fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let first = first_name.map(str::trim).unwrap_or_default();
    let last = last_name.map(str::trim).unwrap_or_default();
    if first.is_empty() && last.is_empty() {
        return None;
    }
    Some(format!("{first} {last}"))
}

fn fill<T: Clone>(target: &mut Option<T>, incoming: &Option<T>) -> bool {
    match (target.as_ref(), incoming) {
        (None, Some(value)) => {
            *target = Some(value.clone());
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{full_name, CanonicalRecord};
    use crate::domain::{ContactRecord, Industry, IndustryMatch};

    #[test]
    fn full_name_keeps_separator_for_missing_parts() {
        assert_eq!(full_name(Some("Jane"), Some("Doe")).as_deref(), Some("Jane Doe"));
        assert_eq!(full_name(Some("Jane"), None).as_deref(), Some("Jane "));
        assert_eq!(full_name(None, Some(" Doe ")).as_deref(), Some(" Doe"));
        assert_ne!(full_name(Some("Jane"), None), full_name(None, Some("Jane")));
        assert_ne!(full_name(Some("Jane Doe"), None), full_name(Some("Jane"), Some("Doe")));
        assert_eq!(full_name(Some(" "), None), None);
        assert_eq!(full_name(None, None), None);
    }

    #[test]
    fn seed_drops_blank_values() {
        let record = CanonicalRecord::seed(ContactRecord {
            first_name: Some("Ada".to_string()),
            email: Some(String::new()),
            industry: Some(" ".to_string()),
            ..ContactRecord::default()
        });
        assert_eq!(record.full_name.as_deref(), Some("Ada "));
        assert_eq!(record.email, None);
        assert_eq!(record.industry, None);
        assert!(record.has_identity());
    }

    #[test]
    fn fill_in_never_overwrites() {
        let mut target = CanonicalRecord::seed(ContactRecord {
            first_name: Some("Ada".to_string()),
            phone: Some("(+353) 8512 34567".to_string()),
            ..ContactRecord::default()
        });
        let incoming = CanonicalRecord::seed(ContactRecord {
            first_name: Some("Augusta".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("(+44) 7700 900123".to_string()),
            city: Some("London".to_string()),
            ..ContactRecord::default()
        });

        let keys = target.fill_in(&incoming);
        assert!(keys.email);
        assert!(!keys.full_name);
        assert_eq!(target.first_name.as_deref(), Some("Ada"));
        assert_eq!(target.phone.as_deref(), Some("(+353) 8512 34567"));
        assert_eq!(target.email.as_deref(), Some("ada@example.com"));
        assert_eq!(target.city.as_deref(), Some("London"));
    }

    #[test]
    fn absorb_industry_skips_missing_sides() {
        let mut target = CanonicalRecord::default();
        let incoming = Industry::new("Tech");
        assert!(!target.absorb_industry(incoming.as_ref(), IndustryMatch::Substring));
        assert_eq!(target.industry, None);

        target.industry = Industry::new("Finance");
        assert!(!target.absorb_industry(None, IndustryMatch::Substring));
        assert!(target.absorb_industry(incoming.as_ref(), IndustryMatch::Substring));
        assert_eq!(
            target.industry.as_ref().map(Industry::as_str),
            Some(";Finance;Tech")
        );
    }
}
