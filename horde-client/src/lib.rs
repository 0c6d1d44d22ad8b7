//! HTTP transports for the AI Horde API.
//!
//! # Overview
//! Executes the `HttpRequest` values built by `horde-core` and feeds the raw
//! responses back into its `parse_*` methods. Two transports share that one
//! core: [`HordeApiClient`] (async, reqwest) and
//! [`blocking::HordeApiClient`] (ureq, for callers without a runtime).
//!
//! # Design
//! - The core decides what a request looks like and what a response means;
//!   the transports only move bytes. Neither transport retries.
//! - `ClientConfig` carries the base URL and timeout; the `AI_HORDE_URL`
//!   environment variable points the SDK at another horde (or a local mock).
//! - The blocking client additionally offers a cancel-on-drop job guard,
//!   [`blocking::PendingGeneration`].

use std::time::Duration;

pub mod blocking;
mod client;
mod error;

pub use client::HordeApiClient;
pub use error::ClientError;

/// The production AI Horde API root.
pub const AI_HORDE_BASE_URL: &str = "https://aihorde.net/api";

/// Environment variable overriding the default base URL.
pub const BASE_URL_ENV: &str = "AI_HORDE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings shared by both transports.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_ENV)
                .unwrap_or_else(|_| AI_HORDE_BASE_URL.to_string()),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// A config pointed at `base_url`, everything else at its default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_base_url_keeps_default_timeout() {
        let config = ClientConfig::with_base_url("http://localhost:3000");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
