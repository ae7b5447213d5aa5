//! Error types for Zotero client operations.
//!
//! Messages follow the What/Why/Fix layout used across the project. The
//! façade never translates these; they reach the caller unchanged.

use thiserror::Error;

/// Errors that can occur while talking to the Zotero Web API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build Zotero HTTP client: {reason}")]
    ClientBuild {
        /// Why construction failed.
        reason: String,
    },

    /// The configured base URL cannot be parsed.
    #[error("invalid Zotero API base URL '{url}': {source}\n  Suggestion: Use an absolute http(s) URL such as https://api.zotero.org")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// The parse failure.
        #[source]
        source: url::ParseError,
    },

    /// Network-level failure (DNS, connection refused, TLS, timeout).
    #[error("network error calling {endpoint}: {source}\n  Suggestion: Cannot reach the Zotero API. Check your network connection.")]
    Network {
        /// Request path that failed.
        endpoint: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("Zotero API returned HTTP {status} for {endpoint}: {reason}\n  Suggestion: {suggestion}")]
    HttpStatus {
        /// Request path that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body or a summary of the status.
        reason: String,
        /// How to fix the issue.
        suggestion: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected Zotero API response for {endpoint}: {source}")]
    Decode {
        /// Request path whose body failed to parse.
        endpoint: String,
        /// The JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Creates an `HttpStatus` error with a suggestion derived from the status.
    #[must_use]
    pub fn http_status(endpoint: &str, status: u16, body: &str) -> Self {
        let body = body.trim();
        let reason = if body.is_empty() {
            default_reason(status).to_string()
        } else {
            body.to_string()
        };
        Self::HttpStatus {
            endpoint: endpoint.to_string(),
            status,
            reason,
            suggestion: suggestion_for(status).to_string(),
        }
    }

    /// Returns the HTTP status for status errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn default_reason(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        403 => "forbidden",
        404 => "not found",
        409 => "library locked",
        412 => "library or item has changed",
        413 => "request too large",
        428 => "precondition required",
        429 => "too many requests",
        s if s >= 500 => "server error",
        _ => "request failed",
    }
}

fn suggestion_for(status: u16) -> &'static str {
    match status {
        403 => "Check that the API key is valid and has access to this library",
        404 => "Check the library ID, library type and object key",
        412 => "The object was modified remotely; fetch it again and retry",
        429 => "Zotero rate limit exceeded. Try again in a few seconds.",
        s if s >= 500 => "Zotero API unavailable. Try again later.",
        _ => "Check the request and try again",
    }
}
