//! Form input rules: password strength, required fields, email shape.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

/// Password strength requirements applied on signup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRules {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_number: bool,
}

impl PasswordRules {
    /// Rules enforced by the signup form.
    pub const DEFAULT: Self = Self { min_length: 8, require_uppercase: true, require_number: true };
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("Password must be at least {min_length} characters long.")]
    TooShort { min_length: usize },
    #[error("Password must contain at least one uppercase letter.")]
    MissingUppercase,
    #[error("Password must contain at least one number.")]
    MissingNumber,
}

/// Local rejection of a signup submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email is required.")]
    EmailRequired,
    #[error("Password is required.")]
    PasswordRequired,
    #[error("Confirm Password is required.")]
    ConfirmPasswordRequired,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Invalid email format.")]
    InvalidEmailFormat,
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Values read from a signup or signin form for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub confirm_password: Option<String>,
}

/// Check `password` against `rules`.
///
/// Checks run in a fixed order (length, uppercase, digit) and the first
/// failure is returned. Length is measured in UTF-16 code units, the unit
/// browser inputs report, so a character outside the BMP counts twice.
///
/// # Errors
///
/// Returns the first [`PasswordError`] the password triggers.
pub fn validate_password(password: &str, rules: &PasswordRules) -> Result<(), PasswordError> {
    if password.encode_utf16().count() < rules.min_length {
        return Err(PasswordError::TooShort { min_length: rules.min_length });
    }
    if rules.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    if rules.require_number && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingNumber);
    }
    Ok(())
}

/// Pre-submit checks for the signup form.
///
/// Order: email, password, confirmation present; password equals
/// confirmation; password meets `rules`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] hit.
pub fn validate_signup(credentials: &Credentials, rules: &PasswordRules) -> Result<(), ValidationError> {
    if credentials.email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if credentials.password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    let confirm = credentials.confirm_password.as_deref().unwrap_or_default();
    if confirm.is_empty() {
        return Err(ValidationError::ConfirmPasswordRequired);
    }
    if credentials.password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    validate_password(&credentials.password, rules)?;
    Ok(())
}

const LOCAL_PART_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// Shape check matching what a required `<input type="email">` accepts.
#[must_use]
pub fn is_valid_email_format(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
    {
        return false;
    }
    !domain.is_empty() && domain.split('.').all(is_valid_domain_label)
}

fn is_valid_domain_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
