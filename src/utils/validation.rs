use std::sync::OnceLock;

use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("no-tld@example"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("space in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_strength() {
        assert!(!is_strong_password("12345"));
        assert!(is_strong_password("123456"));
        assert!(!is_strong_password(""));
    }
}
