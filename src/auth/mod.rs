//! Authentication for the Personio API
//!
//! Exchanges client credentials for a short-lived bearer token and keeps a
//! single cached token in the config, refreshed before its ~24h expiry.

pub mod cache;
pub mod client;
pub mod tokens;

pub use cache::TokenCache;
pub use client::{AuthClient, Credentials, FetchToken};
pub use tokens::{StoredToken, TokenStore, TOKEN_MAX_AGE_HOURS};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::api::client::API_BASE;
use crate::config::Config;

/// Store credentials and verify them by force-fetching a token.
pub async fn login(
    client_id: String,
    client_secret: String,
    employee_id: Option<u64>,
) -> Result<()> {
    let mut config = Config::load()?;
    config.client_id = Some(client_id);
    config.client_secret = Some(client_secret);
    if employee_id.is_some() {
        config.employee_id = employee_id;
    }

    let credentials = config
        .credentials()
        .context("Client id/secret missing after login")?;
    let auth = AuthClient::new(API_BASE, credentials);
    let mut cache = TokenCache::new(config, auth);
    cache
        .get_token(true)
        .await
        .context("Credential check against the auth endpoint failed")?;

    let config = cache.into_store();
    config.save()?;
    println!("Login successful. Token cached.");
    if config.employee_id.is_none() {
        println!("No employee id configured yet; run 'personio-cli employees' to find yours.");
    }
    Ok(())
}

/// Clear the cached token; with `all` also drop the stored credentials.
pub async fn logout(all: bool) -> Result<()> {
    let mut config = Config::load()?;
    config.clear_token();
    if all {
        config.client_id = None;
        config.client_secret = None;
        config.employee_id = None;
    }
    config.save()?;
    println!("Logged out.");
    Ok(())
}

/// Display credential presence and token freshness.
pub async fn status() -> Result<()> {
    let config = Config::load()?;
    let now = Utc::now();

    match config.credentials() {
        Some(_) => println!("Credentials: present"),
        None => println!("Credentials: none"),
    }

    match config.employee_id {
        Some(id) => println!("Employee id: {}", id),
        None => println!("Employee id: none"),
    }

    match config.get_token() {
        Some(token) if !token.is_stale_at(now) => {
            println!("Token:       valid ({:.1}h old)", token.age_hours_at(now));
        }
        Some(token) => {
            println!("Token:       stale ({:.1}h old)", token.age_hours_at(now));
        }
        None => println!("Token:       none"),
    }

    if config.credentials().is_none() {
        println!("\nRun 'personio-cli login' to authenticate.");
    }
    Ok(())
}
