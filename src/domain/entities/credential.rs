//! Bearer credential value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::errors::ValidationError;

/// Opaque bearer token attached to every API request.
///
/// Held in memory for the process lifetime only; wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    value: String,
}

impl Credential {
    /// Shortest token accepted from user input.
    pub const MIN_TOKEN_LENGTH: usize = 59;

    /// Creates a credential from a token pasted by the user.
    ///
    /// Surrounding whitespace and quotes are stripped.
    ///
    /// # Errors
    /// Returns error if the token is too short to be real.
    pub fn from_user_input(raw: &str) -> Result<Self, ValidationError> {
        let value = raw.trim().trim_matches('"');

        if value.len() < Self::MIN_TOKEN_LENGTH {
            return Err(ValidationError::invalid_token(format!(
                "expected at least {} characters, got {}",
                Self::MIN_TOKEN_LENGTH,
                value.len()
            )));
        }

        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Creates a credential as issued by the server.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let char_count = self.value.chars().count();
        if char_count <= 10 {
            return "*".repeat(char_count);
        }

        let visible_prefix: String = self.value.chars().take(4).collect();
        let visible_suffix: String = self.value.chars().skip(char_count - 4).collect();
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_token() -> String {
        "MTIzNDU2Nzg5MDEyMzQ1Njc4OQ.XXXXXX.YYYYYYYYYYYYYYYYYYYYYYYYYYYYYYYYYYYY".to_string()
    }

    #[test]
    fn test_user_input_strips_quotes() {
        let quoted = format!("  \"{}\"\n", make_token());
        let credential = Credential::from_user_input(&quoted).unwrap();

        assert_eq!(credential.as_str(), make_token());
    }

    #[test]
    fn test_user_input_too_short() {
        let result = Credential::from_user_input("short");
        assert!(matches!(result, Err(ValidationError::InvalidToken { .. })));
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let credential = Credential::new_unchecked(make_token());
        let debug_output = format!("{credential:?}");

        assert!(!debug_output.contains(&make_token()));
        assert!(debug_output.contains("..."));
    }

    #[test]
    fn test_short_token_fully_masked() {
        let credential = Credential::new_unchecked("tok");
        assert_eq!(credential.masked(), "***");
    }

    #[test]
    fn test_masking_respects_multibyte_characters() {
        let raw = format!("abcé{}ñxyz", "x".repeat(60));
        let credential = Credential::from_user_input(&raw).unwrap();

        assert_eq!(credential.masked(), "abcé...ñxyz");
        assert_eq!(format!("{credential}"), "abcé...ñxyz");
    }
}
