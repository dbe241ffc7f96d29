// src/repository/client.rs

//! HTTP client for dist-git and Flathub requests
//!
//! Wraps a blocking reqwest client with a per-request timeout and bounded
//! retry for transient failures. Every failure is reported as a typed
//! [`FetchError`].

use crate::error::{Error, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::FetchError;

/// Default timeout for HTTP requests (30 seconds)
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum attempts for a request that fails transiently
pub const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds (multiplied by the attempt number)
const RETRY_DELAY_MS: u64 = 1000;

const USER_AGENT: &str = concat!("rpm2flatpak/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with retry support
pub struct RepositoryClient {
    client: Client,
    max_retries: u32,
}

impl RepositoryClient {
    /// Create a client with the default timeout and retry count
    pub fn new() -> Result<Self> {
        Self::with_settings(HTTP_TIMEOUT, MAX_RETRIES)
    }

    /// Create a client with an explicit timeout and retry count
    pub fn with_settings(timeout: Duration, max_retries: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::InitError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            max_retries: max_retries.max(1),
        })
    }

    /// GET a URL and return the body as text
    ///
    /// Only [`FetchError::Unreachable`] failures are retried; a missing or
    /// forbidden document fails immediately.
    pub fn get_text(&self, url: &str) -> std::result::Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_get_text(url) {
                Ok(body) => return Ok(body),
                Err(e @ FetchError::Unreachable { .. }) if attempt < self.max_retries => {
                    warn!("Fetch attempt {} for {} failed: {}, retrying...", attempt, url, e);
                    std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64));
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn try_get_text(&self, url: &str) -> std::result::Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Unreachable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if let Some(err) = status_error(response.status(), url) {
            return Err(err);
        }

        response.text().map_err(|e| FetchError::Unreachable {
            url: url.to_string(),
            reason: format!("Failed to read response: {e}"),
        })
    }
}

/// Map a non-success HTTP status to the fetch error taxonomy
pub(crate) fn status_error(status: StatusCode, url: &str) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }
    let url = url.to_string();
    Some(match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => FetchError::NotFound { url },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized { url },
        other => FetchError::Unreachable {
            url,
            reason: format!("HTTP {other}"),
        },
    })
}
