//! Error types for trigger dispatch.

/// Why a dispatch failed. Every variant is terminal for that dispatch;
/// nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The endpoint could not be turned into a URL. No request was sent.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The remote system answered with a non-2xx status.
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    /// The request never got an answer (DNS, refused connection, timeout).
    #[error("Network error: {0}")]
    Network(String),
}

impl DispatchError {
    /// Build a `Network` error carrying the full source chain, so the
    /// underlying cause (e.g. "Connection refused") reaches the user.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        DispatchError::Network(message)
    }
}
