use crate::error::UsernameError;
use std::collections::HashSet;

/// Check a raw entry against the registration rules.
///
/// Surrounding whitespace is ignored. The trimmed name must be one or more
/// ASCII letters or digits and must not already be registered (the
/// comparison is case-sensitive). Returns the trimmed name on success.
pub fn validate_username<'a>(
    raw: &'a str,
    registered: &HashSet<String>,
) -> Result<&'a str, UsernameError> {
    let username = raw.trim();

    if username.is_empty() {
        return Err(UsernameError::Empty);
    }

    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(UsernameError::InvalidCharacters);
    }

    if registered.contains(username) {
        return Err(UsernameError::Duplicate(username.to_string()));
    }

    Ok(username)
}
