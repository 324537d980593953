use regex::Regex;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// Matches `Name <address>`; the address is captured.
fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"[A-Za-z]+ <([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})>")
            .expect("Invalid email regex")
    })
}

/// Pulls the address out of a `Name <address> ...` field. A bare address without the
/// bracketed form is not recognized.
pub fn extract_email(value: Option<&str>) -> Option<String> {
    let value = value?;
    email_regex()
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|address| address.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::extract_email;

    #[test]
    fn extracts_bracketed_address() {
        let value = extract_email(Some("Jane <jane.doe@example.ie> Contact Info."));
        assert_eq!(value.as_deref(), Some("jane.doe@example.ie"));
    }

    #[test]
    fn keeps_address_case() {
        let value = extract_email(Some("Ann <Ann.B@Example.COM>"));
        assert_eq!(value.as_deref(), Some("Ann.B@Example.COM"));
    }

    #[test]
    fn missing_or_unparseable_yields_none() {
        assert_eq!(extract_email(None), None);
        assert_eq!(extract_email(Some("")), None);
        assert_eq!(extract_email(Some("jane@example.ie")), None);
        assert_eq!(extract_email(Some("Jane <not-an-email>")), None);
    }
}
