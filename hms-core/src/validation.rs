//! Input validation for patient and doctor records.
//!
//! All checks run before any store interaction and return a human-readable
//! reason on failure; nothing here touches the database.

/// Validation result carrying a display-ready message.
pub type ValidationResult = Result<(), String>;

/// Validate a person name: at least 3 characters, letters and spaces only.
pub fn validate_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.len() < 3 {
        return Err("Please enter a valid name (minimum 3 characters).".into());
    }

    if !trimmed.chars().all(|c| c.is_alphabetic() || c.is_whitespace()) {
        return Err("Please enter a valid name (letters only).".into());
    }

    Ok(())
}

/// Validate an age in years, 1-100.
pub fn validate_age(age: i64) -> ValidationResult {
    if !(1..=100).contains(&age) {
        return Err("Please enter a valid age (1-100).".into());
    }
    Ok(())
}

/// Validate a phone number: 10-15 characters of digits, spaces, `-` and `+`.
pub fn validate_phone(phone: &str) -> ValidationResult {
    let trimmed = phone.trim();

    let allowed = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || c == '-' || c == '+');

    if trimmed.is_empty() || !allowed || !(10..=15).contains(&trimmed.len()) {
        return Err("Please enter a valid phone number (10-15 digits).".into());
    }

    Ok(())
}

/// Validate an email address shape: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> ValidationResult {
    let trimmed = email.trim();

    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err("Please enter a valid email address (e.g., example@email.com).".into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_require_three_letters() {
        assert!(validate_name("Jo").is_err());
        assert!(validate_name("Jane Doe").is_ok());
        assert!(validate_name("J4ne").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn age_bounds() {
        assert!(validate_age(0).is_err());
        assert!(validate_age(1).is_ok());
        assert!(validate_age(100).is_ok());
        assert!(validate_age(101).is_err());
    }

    #[test]
    fn phone_length_and_charset() {
        assert!(validate_phone("0771234567").is_ok());
        assert!(validate_phone("+94 77-123 4567").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("07712345678901234").is_err());
        assert!(validate_phone("077123456x").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("patient@example.com").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("spaced @example.com").is_err());
        assert!(validate_email("user@nodot").is_err());
    }
}
