//! Authenticated HTTP client for the Personio API
//!
//! Wraps reqwest::Client with bearer-token injection; the token comes from
//! the single-slot cache and is refreshed before its 22-hour staleness cutoff.

use anyhow::{Context, Result};
use reqwest::header::ACCEPT;

use crate::auth::{AuthClient, TokenCache};
use crate::config::Config;
use crate::error::{check_response, ApiError};

pub(crate) const API_BASE: &str = "https://api.personio.de/v1";

/// Authenticated client for the company endpoints.
pub struct PersonioClient {
    http: reqwest::Client,
    token: String,
    employee_id: Option<u64>,
}

impl PersonioClient {
    /// Load config and build a client with a usable token, refreshing the
    /// cached one if it is missing or stale.
    pub async fn new() -> Result<Self> {
        let config = Config::load()?;
        let employee_id = config.employee_id;
        let credentials = config
            .credentials()
            .context("No credentials configured. Run 'personio-cli login'.")?;

        let auth = AuthClient::new(API_BASE, credentials);
        let mut cache = TokenCache::new(config, auth);
        let token = cache
            .get_token(false)
            .await
            .context("Could not obtain an API token")?;

        // Persist the (possibly refreshed) token slot.
        let config = cache.into_store();
        config.save()?;

        Ok(Self {
            http: reqwest::Client::new(),
            token,
            employee_id,
        })
    }

    /// Configured employee number, required by the attendance endpoints.
    pub fn employee_id(&self) -> Result<u64> {
        self.employee_id.context(
            "No employee id configured. Run 'personio-cli login --employee-id <id>' \
             ('personio-cli employees' lists ids).",
        )
    }

    /// GET request against the API, bearer-authorized.
    pub async fn get(&self, path_and_query: &str) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", API_BASE, path_and_query);
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.token)
            .send()
            .await?;

        check_response(resp).await
    }

    /// POST request against the API, bearer-authorized. The response is
    /// awaited and checked; a non-2xx status is an error, never a silent
    /// success.
    pub async fn post(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", API_BASE, path);
        tracing::debug!("POST {}", url);

        let resp = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        check_response(resp).await
    }
}
