// 📝 Form Validation - required fields and password policy
// Checks run before a form reaches the session, producing inline messages.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Every failed check for one form submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormErrors(pub Vec<ValidationError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first_message(&self) -> Option<&str> {
        self.0.first().map(|e| e.message.as_str())
    }

    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl std::error::Error for FormErrors {}

// ============================================================================
// FORMS
// ============================================================================

pub fn validate_login(email: &str, password: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    if email.is_empty() || password.is_empty() {
        errors.0.push(ValidationError::new(
            "credentials",
            "Email and password are required.",
        ));
    }

    errors.into_result()
}

pub fn validate_signup(name: &str, email: &str, password: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    if name.is_empty() || email.is_empty() || password.is_empty() {
        errors.0.push(ValidationError::new(
            "credentials",
            "Name, email, and password are required for signup.",
        ));
    }

    errors.into_result()
}

pub fn validate_profile(name: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    if name.trim().is_empty() {
        errors.0.push(ValidationError::new("name", "Name cannot be empty."));
    }

    errors.into_result()
}

/// New password must meet the length policy and match its confirmation
pub fn validate_new_password(
    new_password: &str,
    confirm_password: &str,
    min_length: usize,
) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    if new_password.chars().count() < min_length {
        errors.0.push(ValidationError {
            field: "new_password".to_string(),
            message: format!(
                "New password must be at least {} characters long.",
                min_length
            ),
        });
    } else if new_password != confirm_password {
        errors.0.push(ValidationError::new(
            "confirm_password",
            "New passwords do not match.",
        ));
    }

    errors.into_result()
}

pub fn validate_review(rating: u8) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    if !(1..=5).contains(&rating) {
        errors.0.push(ValidationError::new(
            "rating",
            "Please select a rating between 1 and 5 stars.",
        ));
    }

    errors.into_result()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("a@b.pk", "secret").is_ok());

        let errors = validate_login("", "secret").unwrap_err();
        assert_eq!(errors.first_message(), Some("Email and password are required."));
        assert!(validate_login("a@b.pk", "").is_err());
    }

    #[test]
    fn test_signup_requires_name() {
        let errors = validate_signup("", "a@b.pk", "secret").unwrap_err();
        assert_eq!(
            errors.first_message(),
            Some("Name, email, and password are required for signup.")
        );
        assert!(validate_signup("Ali", "a@b.pk", "secret").is_ok());
    }

    #[test]
    fn test_profile_name_cannot_be_blank() {
        assert!(validate_profile("   ").is_err());
        assert!(validate_profile("Hira").is_ok());
    }

    #[test]
    fn test_new_password_length_checked_before_match() {
        let errors = validate_new_password("abc", "xyz", 6).unwrap_err();
        assert!(errors.for_field("new_password").is_some());
        assert!(errors.for_field("confirm_password").is_none());
        assert_eq!(
            errors.to_string(),
            "New password must be at least 6 characters long."
        );
    }

    #[test]
    fn test_new_password_must_match_confirmation() {
        let errors = validate_new_password("abcdef", "abcdeg", 6).unwrap_err();
        assert_eq!(errors.first_message(), Some("New passwords do not match."));
        assert!(validate_new_password("abcdef", "abcdef", 6).is_ok());
    }

    #[test]
    fn test_review_needs_stars() {
        assert!(validate_review(0).is_err());
        assert!(validate_review(6).is_err());
        assert!(validate_review(3).is_ok());
    }
}
