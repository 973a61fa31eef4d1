//! Email address validation shared by the registration and account forms.

use email_address::EmailAddress;

/// Whether `value` is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EmailAddress::is_valid(value)
}

#[cfg(test)]
mod email_tests {
    use super::is_valid_email;

    #[test]
    fn accepts_plain_address() {
        assert!(is_valid_email("hello@example.com"));
    }

    #[test]
    fn accepts_plus_tag() {
        assert!(is_valid_email("hello+ledger@example.com"));
    }

    #[test]
    fn rejects_missing_at_sign() {
        assert!(!is_valid_email("hello.example.com"));
    }

    #[test]
    fn rejects_missing_local_part() {
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn rejects_empty_string() {
        assert!(!is_valid_email(""));
    }

    #[test]
    fn rejects_embedded_whitespace() {
        assert!(!is_valid_email("hello world@example.com"));
    }
}
