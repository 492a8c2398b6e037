//! Field-level rules shared by the customer validator.

use std::sync::LazyLock;

use regex::Regex;

/// Local part (quoted string or dot-separated atoms, never starting or ending
/// with a dot), `@`, domain labels, and a TLD of at least two letters.
const EMAIL_PATTERN: &str = r##"(?i)^(?:"(?:[^"\r\\]|\\["\r\\])*"|(?:[-a-z0-9!#$%&'*+/=?^_`{|}~]+(?:\.[-a-z0-9!#$%&'*+/=?^_`{|}~]+)*)?)@[a-z0-9](?:[\w.-]*[a-z0-9])?\.[a-z][a-z.]*[a-z]$"##;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Returns `true` when `value` is empty or contains only whitespace.
pub fn is_string_missing(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns `true` when `email` is present and matches the address grammar.
pub fn is_valid_email_address(email: &str) -> bool {
    if is_string_missing(email) {
        return false;
    }
    EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_counts_as_missing() {
        assert!(is_string_missing(""));
        assert!(is_string_missing("   "));
        assert!(is_string_missing("\t\n"));
        assert!(!is_string_missing(" a "));
    }

    #[test]
    fn accepts_ordinary_addresses() {
        let valid = [
            "a@b.com",
            "ann@x.com",
            "first.last@example.co.uk",
            "o'brien+tag@mail-host.org",
            "UPPER@EXAMPLE.COM",
            "\"quoted name\"@example.com",
        ];
        for email in valid {
            assert!(is_valid_email_address(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        let invalid = [
            "",
            "   ",
            "not-an-email",
            ".leading@b.com",
            "trailing.@b.com",
            "double..dot@b.com",
            "a@b",
            "a@b.c",
            "a@-b.com",
            "a@b.com.",
            "a b@c.com",
        ];
        for email in invalid {
            assert!(!is_valid_email_address(email), "{email:?} should be invalid");
        }
    }
}
