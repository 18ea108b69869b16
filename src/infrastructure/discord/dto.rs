use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::snowflake;

/// Discord login request body.
#[derive(Debug, Serialize)]
pub struct LoginPayload<'a> {
    /// Account e-mail or phone number.
    #[serde(rename = "email")]
    pub identifier: &'a str,
    /// Account password.
    #[serde(rename = "password")]
    pub secret: &'a str,
    /// Do not restore a pending-deletion account.
    pub undelete: bool,
    /// No captcha solved.
    pub captcha_key: Option<String>,
    /// Login source, unset.
    pub login_source: Option<String>,
    /// Gift code, unset.
    pub gift_code_sku_id: Option<String>,
}

impl<'a> LoginPayload<'a> {
    /// Creates the body for a plain password login.
    #[must_use]
    pub const fn new(identifier: &'a str, secret: &'a str) -> Self {
        Self {
            identifier,
            secret,
            undelete: false,
            captcha_key: None,
            login_source: None,
            gift_code_sku_id: None,
        }
    }
}

/// Discord login response structure.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Bearer token, absent when a second factor is required.
    #[serde(default)]
    pub token: Option<String>,
    /// Set when the account needs multi-factor authentication.
    #[serde(default)]
    pub mfa: bool,
}

/// Partial guild from the `users/@me/guilds` listing.
#[derive(Debug, Deserialize)]
pub struct GuildResponse {
    /// Guild ID.
    #[serde(with = "snowflake")]
    pub id: String,
    /// Guild name.
    pub name: String,
}

/// Custom emoji from the `guilds/{id}/emojis` listing.
#[derive(Debug, Deserialize)]
pub struct EmojiResponse {
    /// Emoji ID.
    #[serde(with = "snowflake")]
    pub id: String,
    /// Emoji name.
    pub name: String,
    /// Whether the emoji is animated; Discord may omit it.
    #[serde(default)]
    pub animated: bool,
}

/// Discord API error response structure.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Error message from Discord.
    pub message: String,
}

impl ErrorResponse {
    /// Extracts a short message from an error body for logging.
    #[must_use]
    pub fn summarize(body: &str) -> String {
        serde_json::from_str::<Self>(body).map_or_else(
            |_| body.chars().take(200).collect(),
            |error| error.message,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_payload_shape() {
        let payload = LoginPayload::new("user@example.com", "hunter2");
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["password"], "hunter2");
        assert_eq!(json["undelete"], false);
        assert!(json["captcha_key"].is_null());
    }

    #[test]
    fn test_login_response_mfa() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token": null, "mfa": true, "ticket": "abc"}"#).unwrap();

        assert!(response.token.is_none());
        assert!(response.mfa);
    }

    #[test]
    fn test_emoji_animated_defaults_to_false() {
        let emoji: Vec<EmojiResponse> =
            serde_json::from_str(r#"[{"id": "9", "name": "smile"}]"#).unwrap();

        assert!(!emoji[0].animated);
    }

    #[test]
    fn test_emoji_missing_name_is_error() {
        let result = serde_json::from_str::<Vec<EmojiResponse>>(r#"[{"id": "9"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_summarize_error_body() {
        assert_eq!(
            ErrorResponse::summarize(r#"{"message": "401: Unauthorized", "code": 0}"#),
            "401: Unauthorized"
        );
        assert_eq!(ErrorResponse::summarize("Bad Gateway"), "Bad Gateway");
    }
}
