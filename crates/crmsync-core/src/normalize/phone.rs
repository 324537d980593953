use std::collections::HashMap;

pub const DEFAULT_CALLING_CODE: &str = "+353";

/// Calling codes keyed by normalized country name, with a fallback for every other country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallingCodes {
    default: String,
    by_country: HashMap<String, String>,
}

impl Default for CallingCodes {
    fn default() -> Self {
        Self::new(DEFAULT_CALLING_CODE).with_country("England", "+44")
    }
}

impl CallingCodes {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            by_country: HashMap::new(),
        }
    }

    pub fn with_country(mut self, country: impl Into<String>, code: impl Into<String>) -> Self {
        self.insert(country, code);
        self
    }

    pub fn insert(&mut self, country: impl Into<String>, code: impl Into<String>) {
        self.by_country.insert(country.into(), code.into());
    }

    pub fn set_default(&mut self, code: impl Into<String>) {
        self.default = code.into();
    }

    pub fn default_code(&self) -> &str {
        &self.default
    }

    pub fn code_for(&self, country: Option<&str>) -> &str {
        country
            .and_then(|country| self.by_country.get(country))
            .map(String::as_str)
            .unwrap_or(&self.default)
    }

    /// Formats a phone number as `(+CC) NNNN NNNN...`.
    pub fn format_phone(&self, phone: Option<&str>, country: Option<&str>) -> Option<String> {
        let digits = group_digits(phone?)?;
        Some(format!("({}) {}", self.code_for(country), digits))
    }
}

/// Drops hyphens and leading zeros, then separates the first four characters from the rest.
pub fn group_digits(phone: &str) -> Option<String> {
    let stripped = phone.trim().replace('-', "");
    let stripped = stripped.trim_start_matches('0');
    if stripped.is_empty() {
        return None;
    }
    match stripped.char_indices().nth(4) {
        Some((split, _)) => Some(format!("{} {}", &stripped[..split], &stripped[split..])),
        None => Some(stripped.to_string()),
    }
}
