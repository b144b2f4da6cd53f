//! Credential exchange against the Personio auth endpoint

use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::error::{check_response, ApiError};

/// Client id/secret pair from the configuration.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Something that can produce a fresh bearer token. Implemented by
/// [`AuthClient`] and by mocks in cache tests.
pub trait FetchToken {
    async fn fetch_token(&self) -> Result<String, ApiError>;
}

/// Exchanges client credentials for a short-lived bearer token.
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl AuthClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
            credentials,
        }
    }
}

impl FetchToken for AuthClient {
    async fn fetch_token(&self) -> Result<String, ApiError> {
        let url = format!("{}/auth", self.base_url);
        tracing::debug!("POST {}", url);

        let body = serde_json::json!({
            "client_id": self.credentials.client_id,
            "client_secret": self.credentials.client_secret,
        });

        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;

        let text = resp.text().await?;
        parse_token_envelope(&text)
    }
}

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    data: TokenData,
}

#[derive(Debug, Deserialize)]
struct TokenData {
    token: String,
}

/// Unwrap the `{ "data": { "token": ... } }` envelope of the auth response.
fn parse_token_envelope(body: &str) -> Result<String, ApiError> {
    let envelope: TokenEnvelope = serde_json::from_str(body)?;
    Ok(envelope.data.token)
}
