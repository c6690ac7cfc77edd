//! Input validation for user operations

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::DomainError;

/// Canonical address pattern: local part, `@`, dotted domain, final label
/// of at least two letters. Compiled once per process.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates an email address against the canonical pattern.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(DomainError::InvalidEmail);
    }

    Ok(())
}

/// Validates a password against the minimum length requirement.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::InvalidPassword);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("first.last+tag@sub.example.org").is_ok());
        assert!(validate_email("user_100%@host-name.co").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email(""), Err(DomainError::InvalidEmail));
        assert_eq!(validate_email("invalid-email"), Err(DomainError::InvalidEmail));
        assert_eq!(validate_email("missing@domain"), Err(DomainError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(DomainError::InvalidEmail));
        assert_eq!(validate_email("user@example.c"), Err(DomainError::InvalidEmail));
        assert_eq!(validate_email("user@example.c0m"), Err(DomainError::InvalidEmail));
        assert_eq!(
            validate_email("spaces in@example.com"),
            Err(DomainError::InvalidEmail)
        );
    }

    #[test]
    fn test_password_length_boundary() {
        assert_eq!(validate_password("1234567"), Err(DomainError::InvalidPassword));
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("a much longer passphrase").is_ok());
    }
}
