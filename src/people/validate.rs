use lazy_static::lazy_static;
use regex::Regex;

/// True when the value is empty or consists solely of whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Permissive email shape check: local part of alphanumeric runs separated
/// by dot/underscore/dash, then `@`, then domain labels ending in a TLD of
/// two or more letters. Syntax only, no deliverability check.
pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^([A-Za-z0-9]+[._-])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Za-z]{2,})+$")
                .unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_catches_empty_and_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank("kent"));
        assert!(!is_blank(" k "));
    }

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("kent@test.com"));
        assert!(is_valid_email("a.b@test.com"));
        assert!(is_valid_email("first_last@sub.example.org"));
        assert!(is_valid_email("User-1@host-name.CO"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing-domain@"));
        assert!(!is_valid_email("@missing-local.com"));
        assert!(!is_valid_email("no-dot@domain"));
        assert!(!is_valid_email("short-tld@test.c"));
        assert!(!is_valid_email("spaces in@test.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn rejects_trailing_or_leading_noise() {
        assert!(!is_valid_email("kent@test.com extra"));
        assert!(!is_valid_email(" kent@test.com"));
        assert!(!is_valid_email("kent@test.com."));
    }
}
