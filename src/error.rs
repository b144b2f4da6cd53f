//! Error taxonomy for Personio API calls
//!
//! Read and submit paths return a typed error instead of degrading to an
//! empty result, so callers can tell "no records" apart from "request failed".

use thiserror::Error;

/// Failure of a single API operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level failure (DNS, TLS, connection reset, ...)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected envelope shape.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// User-supplied value rejected before any request was issued.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Check HTTP response status and turn a failure into a clear error.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}
