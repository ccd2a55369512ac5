//! # Validation
//!
//! Field checks used by the login, signup and edit forms. Messages are
//! shown under the field as-is.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<(), String> {
        match self.error {
            Some(message) if !self.is_valid => Err(message),
            _ => Ok(()),
        }
    }
}

/// Non-blank value
pub fn validate_required(value: &str, label: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::err(format!("{} is required", label));
    }
    ValidationResult::ok()
}

/// `local@domain.tld`, nothing fancier: the server does the real check.
pub fn validate_email(email: &str) -> ValidationResult {
    let email = email.trim();
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() > 1
                && domain.split('.').all(|label| !label.is_empty()) =>
        {
            ValidationResult::ok()
        }
        _ => ValidationResult::err("Invalid email format"),
    }
}

/// Validate a new account's username (server accounts allow up to 150
/// characters of letters, digits and `@.+-_`).
pub fn validate_username(username: &str) -> ValidationResult {
    if username.is_empty() {
        return ValidationResult::err("Username is required");
    }

    if username.chars().count() > 150 {
        return ValidationResult::err("Username must be 150 characters or fewer");
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return ValidationResult::err("Username can only contain letters, numbers and @/./+/-/_");
    }

    ValidationResult::ok()
}

/// Validate a new account's password
pub fn validate_password(password: &str) -> ValidationResult {
    if password.is_empty() {
        return ValidationResult::err("Password is required");
    }

    if password.chars().count() < 8 {
        return ValidationResult::err("Password must be at least 8 characters");
    }

    ValidationResult::ok()
}

/// Parse a whole, positive quantity as typed into a quantity field
pub fn parse_quantity(input: &str) -> Result<i64, String> {
    let quantity: i64 = input
        .trim()
        .parse()
        .map_err(|_| "Quantity must be a whole number".to_string())?;
    if quantity <= 0 {
        return Err("Quantity must be greater than 0".to_string());
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        for ok in ["alice@example.com", "a.b+shop@mail.co.uk"] {
            assert!(validate_email(ok).is_valid, "{}", ok);
        }
        for bad in ["", "alice", "@example.com", "alice@", "alice@localhost", "a@b@c.com", "alice@example."] {
            assert!(!validate_email(bad).is_valid, "{}", bad);
        }
        assert_eq!(validate_email("  ").error.as_deref(), Some("Email is required"));
    }

    #[test]
    fn test_username_validation() {
        assert!(validate_username("alice").is_valid);
        assert!(validate_username("first.last+shop@x").is_valid);
        assert!(!validate_username("").is_valid);
        assert!(!validate_username("has space").is_valid);
        assert!(!validate_username(&"a".repeat(151)).is_valid);
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("longenough").is_valid);
        assert_eq!(
            validate_password("short").into_result(),
            Err("Password must be at least 8 characters".to_string())
        );
    }

    #[test]
    fn test_required() {
        assert_eq!(
            validate_required("  ", "Username").error.as_deref(),
            Some("Username is required")
        );
        assert!(validate_required("x", "Username").into_result().is_ok());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 3 "), Ok(3));
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("2.5").is_err());
        assert_eq!(parse_quantity("0"), Err("Quantity must be greater than 0".to_string()));
    }
}
