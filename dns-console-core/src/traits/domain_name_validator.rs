//! Swappable domain name syntax check

use std::sync::LazyLock;

use regex::Regex;

/// Validates a domain name before it is sent to the Domain API.
///
/// Returns the normalized name, or a human-readable reason.
pub trait DomainNameValidator: Send + Sync {
    fn validate(&self, name: &str) -> Result<String, String>;
}

/// `label.tld` where the label is 1-63 alphanumerics/hyphens not starting with
/// a hyphen, and the TLD is at least two letters.
static DOMAIN_NAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.[a-z]{2,}$").ok()
});

/// Default validator: trims, lower-cases and strips one trailing dot first.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxDomainNameValidator;

impl DomainNameValidator for SyntaxDomainNameValidator {
    fn validate(&self, name: &str) -> Result<String, String> {
        let trimmed = name.trim().to_ascii_lowercase();
        let normalized = trimmed.strip_suffix('.').unwrap_or(&trimmed);

        if normalized.is_empty() {
            return Err("Domain name is required".to_string());
        }
        let Some(re) = DOMAIN_NAME_RE.as_ref() else {
            return Err("Domain name pattern unavailable".to_string());
        };
        if re.is_match(normalized) {
            Ok(normalized.to_string())
        } else {
            Err(format!("'{normalized}' is not a valid domain name"))
        }
    }
}
