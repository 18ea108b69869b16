//! Discord API HTTP client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::cdn::{DISCORD_EMOJI_CDN, emoji_url};
use super::dto::{EmojiResponse, ErrorResponse, GuildResponse, LoginPayload, LoginResponse};
use crate::domain::entities::{Community, CommunityId, Credential, Emoji};
use crate::domain::errors::{AuthError, DownloadError, FetchError};
use crate::domain::ports::{AuthPort, EmojiSourcePort};

/// Default Discord REST API base.
pub const DISCORD_API_BASE: &str = "https://discord.com/api/v9";
/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Discord API client covering login, listings and CDN downloads.
pub struct DiscordClient {
    client: Client,
    api_base: String,
    cdn_base: String,
}

impl DiscordClient {
    /// Creates new client with default endpoints.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, AuthError> {
        Self::with_endpoints(DISCORD_API_BASE, DISCORD_EMOJI_CDN, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates client with custom API and CDN base URLs.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_endpoints(
        api_base: impl Into<String>,
        cdn_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            cdn_base: cdn_base.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// GETs an authenticated endpoint and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
    ) -> Result<T, FetchError> {
        let url = self.endpoint(path);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, credential.as_str())
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Failed to reach Discord API");
                FetchError::network(transport_message(&e))
            })?;

        let status = response.status();
        let body = read_body(response).await;

        if !status.is_success() {
            warn!(
                url = %url,
                status = status.as_u16(),
                message = %ErrorResponse::summarize(&body),
                "Listing request failed"
            );
            return Err(FetchError::http(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(url = %url, error = %e, "Failed to parse listing response");
            FetchError::decode(e.to_string(), body)
        })
    }
}

#[async_trait]
impl AuthPort for DiscordClient {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Credential, AuthError> {
        let url = self.endpoint("/auth/login");

        debug!("Logging in against Discord API");

        let response = self
            .client
            .post(&url)
            .json(&LoginPayload::new(identifier, secret))
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to connect to Discord API");
                AuthError::network(transport_message(&e))
            })?;

        let status = response.status();
        let body = read_body(response).await;

        if !status.is_success() {
            warn!(
                status = status.as_u16(),
                message = %ErrorResponse::summarize(&body),
                "Login rejected"
            );
            return Err(AuthError::rejected(status.as_u16(), body));
        }

        let login: LoginResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse login response");
            AuthError::malformed(format!("failed to parse response: {e}"), body.clone())
        })?;

        match login.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!("Login succeeded");
                Ok(Credential::new_unchecked(token))
            }
            None if login.mfa => Err(AuthError::MfaRequired),
            None => Err(AuthError::malformed("response has no token", body)),
        }
    }
}

#[async_trait]
impl EmojiSourcePort for DiscordClient {
    async fn list_communities(&self, credential: &Credential) -> Result<Vec<Community>, FetchError> {
        let guilds: Vec<GuildResponse> = self.get_json(credential, "/users/@me/guilds").await?;

        debug!(count = guilds.len(), "Fetched guild list");

        Ok(guilds
            .into_iter()
            .map(|g| Community::new(g.id, g.name))
            .collect())
    }

    async fn list_emoji(
        &self,
        credential: &Credential,
        community: &CommunityId,
    ) -> Result<Vec<Emoji>, FetchError> {
        let path = format!("/guilds/{community}/emojis");
        let emoji: Vec<EmojiResponse> = self.get_json(credential, &path).await?;

        debug!(guild_id = %community, count = emoji.len(), "Fetched guild emoji");

        Ok(emoji
            .into_iter()
            .map(|e| Emoji::new(e.id, e.name, e.animated))
            .collect())
    }

    async fn download_image(&self, emoji: &Emoji, destination: &Path) -> Result<(), DownloadError> {
        let url = emoji_url(&self.cdn_base, emoji);

        let mut response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DownloadError::network(&url, transport_message(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_body(response).await;
            return Err(DownloadError::http(url, status.as_u16(), body));
        }

        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| DownloadError::io(destination, format!("failed to create file: {e}")))?;

        let mut written = 0usize;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DownloadError::network(&url, transport_message(&e)))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::io(destination, format!("failed to write file: {e}")))?;
            written += chunk.len();
        }

        file.flush()
            .await
            .map_err(|e| DownloadError::io(destination, format!("failed to flush file: {e}")))?;

        debug!(id = %emoji.id(), url = %url, size = written, "Downloaded emoji image");

        Ok(())
    }
}

async fn read_body(response: Response) -> String {
    response.text().await.unwrap_or_default()
}

fn transport_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        "failed to connect to Discord".to_string()
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DiscordClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client =
            DiscordClient::with_endpoints("http://localhost/api/", DISCORD_EMOJI_CDN, DEFAULT_REQUEST_TIMEOUT)
                .unwrap();

        assert_eq!(client.endpoint("/auth/login"), "http://localhost/api/auth/login");
    }
}
