//! Token storage and staleness policy

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Personio tokens are valid for roughly 24 hours; refresh early to keep a
/// safety margin.
pub const TOKEN_MAX_AGE_HOURS: i64 = 22;

/// Cached bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl StoredToken {
    pub fn new(token: String) -> Self {
        Self::issued_at(token, Utc::now())
    }

    pub fn issued_at(token: String, created_at: DateTime<Utc>) -> Self {
        Self { token, created_at }
    }

    /// Age of the token at `now`, in fractional hours.
    pub fn age_hours_at(&self, now: DateTime<Utc>) -> f64 {
        (now - self.created_at).num_minutes() as f64 / 60.0
    }

    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::hours(TOKEN_MAX_AGE_HOURS)
    }
}

/// Token store trait so the cache can run against the persistent config or an
/// in-memory fake in tests.
pub trait TokenStore {
    fn get_token(&self) -> Option<StoredToken>;
    fn set_token(&mut self, token: StoredToken);
    fn clear_token(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aged(hours_ago: i64) -> StoredToken {
        StoredToken::issued_at("tok".into(), Utc::now() - Duration::hours(hours_ago))
    }

    #[test]
    fn test_fresh_token_is_not_stale() {
        let now = Utc::now();
        assert!(!aged(0).is_stale_at(now));
        assert!(!aged(21).is_stale_at(now));
    }

    #[test]
    fn test_token_older_than_threshold_is_stale() {
        let now = Utc::now();
        assert!(aged(23).is_stale_at(now));
        assert!(aged(48).is_stale_at(now));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly 22 hours old is still usable.
        let now = Utc::now();
        let token = StoredToken::issued_at("tok".into(), now - Duration::hours(22));
        assert!(!token.is_stale_at(now));
    }

    #[test]
    fn test_age_hours() {
        let now = Utc::now();
        let token = StoredToken::issued_at("tok".into(), now - Duration::minutes(90));
        assert!((token.age_hours_at(now) - 1.5).abs() < 1e-9);
    }
}
