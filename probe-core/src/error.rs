//! Probe failure types.

use std::time::Duration;
use thiserror::Error;

/// Reasons a probe produced no response.
///
/// All of these are reported as an `Error:` line; none abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// No response within the request timeout.
    #[error("request to {url} timed out after {secs}s")]
    Timeout {
        /// Target URL.
        url: String,
        /// Configured timeout in seconds.
        secs: u64,
    },

    /// TCP connect or DNS resolution failed.
    #[error("connection to {url} failed: {reason}")]
    Connect {
        /// Target URL.
        url: String,
        /// Underlying error text.
        reason: String,
    },

    /// Any other failure while sending or receiving headers.
    #[error("request to {url} failed: {reason}")]
    Request {
        /// Target URL.
        url: String,
        /// Underlying error text.
        reason: String,
    },

    /// Response headers arrived but the body could not be read.
    #[error("failed to read response body from {url}: {reason}")]
    Body {
        /// Target URL.
        url: String,
        /// Underlying error text.
        reason: String,
    },
}

impl ProbeError {
    /// Classify a reqwest failure.
    pub(crate) fn from_reqwest(url: &str, timeout: Duration, e: reqwest::Error) -> Self {
        let url = url.to_string();
        if e.is_timeout() {
            ProbeError::Timeout {
                url,
                secs: timeout.as_secs(),
            }
        } else if e.is_connect() {
            ProbeError::Connect {
                url,
                reason: error_chain(&e),
            }
        } else if e.is_body() || e.is_decode() {
            ProbeError::Body {
                url,
                reason: error_chain(&e),
            }
        } else {
            ProbeError::Request {
                url,
                reason: error_chain(&e),
            }
        }
    }

    /// URL of the failed probe.
    pub fn url(&self) -> &str {
        match self {
            ProbeError::Timeout { url, .. }
            | ProbeError::Connect { url, .. }
            | ProbeError::Request { url, .. }
            | ProbeError::Body { url, .. } => url,
        }
    }
}

/// Flatten an error and its sources into one line.
///
/// reqwest's own message only says "error sending request"; the cause
/// (e.g. "Connection refused") sits further down the chain.
fn error_chain(e: &(dyn std::error::Error + 'static)) -> String {
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
