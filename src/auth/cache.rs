//! Single-slot token cache with expiry-based refresh
//!
//! One token is cached at a time; every fetch path overwrites the slot.
//! Both the store and the fetcher are injected so tests can count fetcher
//! calls and control the clock via [`TokenCache::get_token_at`].

use chrono::{DateTime, Utc};

use super::client::FetchToken;
use super::tokens::{StoredToken, TokenStore};
use crate::error::ApiError;

pub struct TokenCache<S, F> {
    store: S,
    fetcher: F,
}

impl<S: TokenStore, F: FetchToken> TokenCache<S, F> {
    pub fn new(store: S, fetcher: F) -> Self {
        Self { store, fetcher }
    }

    /// Return a usable bearer token, fetching a fresh one when forced, when
    /// the slot is empty, or when the cached token has passed the staleness
    /// threshold. Fetch failures propagate and leave the slot untouched.
    pub async fn get_token(&mut self, force_refresh: bool) -> Result<String, ApiError> {
        self.get_token_at(force_refresh, Utc::now()).await
    }

    pub async fn get_token_at(
        &mut self,
        force_refresh: bool,
        now: DateTime<Utc>,
    ) -> Result<String, ApiError> {
        if !force_refresh {
            if let Some(stored) = self.store.get_token() {
                if !stored.is_stale_at(now) {
                    tracing::debug!(
                        "Using cached token ({:.1}h old)",
                        stored.age_hours_at(now)
                    );
                    return Ok(stored.token);
                }
                tracing::info!(
                    "Cached token is {:.1}h old, refreshing",
                    stored.age_hours_at(now)
                );
            } else {
                tracing::info!("No cached token, fetching one");
            }
        }

        let token = self.fetcher.fetch_token().await?;
        self.store
            .set_token(StoredToken::issued_at(token.clone(), now));
        Ok(token)
    }

    /// Hand the store back, so the caller can persist it.
    pub fn into_store(self) -> S {
        self.store
    }
}
