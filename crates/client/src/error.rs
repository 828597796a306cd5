//! Typed error enum for the client crate.

use thiserror::Error;

/// Errors from outbound KIE server calls.
///
/// `Status` carries the original code and body so the service layer can fold
/// not-found-equivalent codes per endpoint; everything else is transport or
/// decode failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("engine returned status {code}: {message}")]
    Status { code: u16, message: String },
    #[error("JSON parse error in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    Init(String),
}
