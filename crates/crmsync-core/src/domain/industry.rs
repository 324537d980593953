use serde::{Deserialize, Serialize};

pub const INDUSTRY_DELIMITER: char = ';';

/// How an incoming industry value is tested against the accumulated string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndustryMatch {
    /// Skip the value when it occurs anywhere in the accumulated string, so `Tech` is
    /// swallowed by `Technology`.
    #[default]
    Substring,
    /// Skip the value only when it equals one of the delimited entries.
    Exact,
}

/// Industry of a canonical record. A single value is stored as-is; once a second distinct
/// value arrives the string gains a leading delimiter (`;Finance;Tech`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Industry(String);

impl Industry {
    pub fn new(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_multi_valued(&self) -> bool {
        self.0.starts_with(INDUSTRY_DELIMITER)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0
            .split(INDUSTRY_DELIMITER)
            .filter(|value| !value.is_empty())
    }

    pub fn contains(&self, value: &str, policy: IndustryMatch) -> bool {
        match policy {
            IndustryMatch::Substring => self.0.contains(value),
            IndustryMatch::Exact => self.values().any(|existing| existing == value),
        }
    }

    /// Appends the values of `incoming` not already present. Returns whether anything changed.
    pub fn absorb(&mut self, incoming: &Industry, policy: IndustryMatch) -> bool {
        match policy {
            IndustryMatch::Substring => {
                let value = incoming.as_str().trim_start_matches(INDUSTRY_DELIMITER);
                if value.is_empty() || self.contains(value, policy) {
                    return false;
                }
                self.append(value);
                true
            }
            IndustryMatch::Exact => {
                let mut changed = false;
                for value in incoming.values() {
                    if !self.contains(value, policy) {
                        self.append(value);
                        changed = true;
                    }
                }
                changed
            }
        }
    }

    fn append(&mut self, value: &str) {
        if !self.is_multi_valued() {
            self.0.insert(0, INDUSTRY_DELIMITER);
        }
        self.0.push(INDUSTRY_DELIMITER);
        self.0.push_str(value);
    }
}

#[cfg(test)]
mod tests {
    use super::{Industry, IndustryMatch};

    fn industry(value: &str) -> Industry {
        Industry::new(value).expect("industry")
    }

    #[test]
    fn new_rejects_blank() {
        assert!(Industry::new("  ").is_none());
        assert_eq!(industry(" Tech ").as_str(), "Tech");
    }

    #[test]
    fn absorb_adds_leading_delimiter_once() {
        let mut acc = industry("Finance");
        assert!(acc.absorb(&industry("Tech"), IndustryMatch::Substring));
        assert_eq!(acc.as_str(), ";Finance;Tech");
        assert!(acc.absorb(&industry("Retail"), IndustryMatch::Substring));
        assert_eq!(acc.as_str(), ";Finance;Tech;Retail");
        assert!(acc.is_multi_valued());
    }

    #[test]
    fn absorb_is_idempotent() {
        let mut acc = industry("Finance");
        acc.absorb(&industry("Tech"), IndustryMatch::Substring);
        assert!(!acc.absorb(&industry("Tech"), IndustryMatch::Substring));
        assert!(!acc.absorb(&industry("Finance"), IndustryMatch::Substring));
        assert_eq!(acc.as_str(), ";Finance;Tech");
    }

    #[test]
    fn substring_policy_swallows_prefixes() {
        let mut acc = industry("Technology");
        assert!(!acc.absorb(&industry("Tech"), IndustryMatch::Substring));
        assert_eq!(acc.as_str(), "Technology");
    }

    #[test]
    fn exact_policy_keeps_prefixes_distinct() {
        let mut acc = industry("Technology");
        assert!(acc.absorb(&industry("Tech"), IndustryMatch::Exact));
        assert_eq!(acc.as_str(), ";Technology;Tech");
        assert!(!acc.absorb(&industry("Tech"), IndustryMatch::Exact));
        assert_eq!(acc.values().collect::<Vec<_>>(), vec!["Technology", "Tech"]);
    }

    #[test]
    fn single_value_is_not_multi_valued() {
        let acc = industry("Finance");
        assert!(!acc.is_multi_valued());
        assert_eq!(acc.values().collect::<Vec<_>>(), vec!["Finance"]);
    }
}
