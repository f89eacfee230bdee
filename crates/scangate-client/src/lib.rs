//! HTTP client for the llm-guard scanning API.
//!
//! This crate provides the transport to the scanning service and the
//! prompt/output scan invokers built on top of it. Results are normalized
//! into [`scangate_core::ScanResult`]; deciding what to do with them is left
//! to the policy gate in `scangate-core`.

mod client;
mod error;
mod request;

pub use client::ScanClient;
pub use error::{TransportCause, TransportError};
pub use request::{ScanOutputRequest, ScanPromptRequest};

use std::fmt;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9999";
pub const DEFAULT_TOKEN: &str = "hello";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the scanning service.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    /// Bearer token sent in the Authorization header.
    pub token: String,
    /// Timeout in seconds for each request.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: DEFAULT_TOKEN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL for an endpoint path. A trailing slash on the base is dropped.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// Keep the token out of logs and panic messages.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
