//! Email validation mirroring backend constraints.
//!
//! These rules match the backend's `Email` type in
//! `backend/src/domain/user.rs`, so every seeded user can be converted into a
//! domain user without surprises.
//!
//! # Validation Rules
//!
//! - Must not be empty or whitespace-only
//! - Must not carry leading or trailing whitespace
//! - Exactly one `@`, with non-empty text on both sides
//! - The domain part must contain a `.` that is neither first nor last

/// Validates an email address against backend constraints.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_email;
///
/// assert!(is_valid_email("esma@example.com"));
/// assert!(!is_valid_email("esma.example.com")); // Missing '@'
/// assert!(!is_valid_email("esma@localhost"));   // No domain dot
/// assert!(!is_valid_email(" esma@example.com")); // Padded
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.trim().is_empty() || email.trim() != email {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
