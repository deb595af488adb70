//! API client error types.

use thiserror::Error;

/// Failures at the REST boundary.
///
/// Transport problems and contract problems are distinct variants so the
/// app layer can phrase the toast correctly ("check your connection" vs
/// the server's own message).
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The transport failed (DNS, TLS, connect, timeout, body read).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the request (4xx) with this body.
    #[error("{0}")]
    Rejected(String),

    /// The server fell over (5xx) with this body.
    #[error("server error: {0}")]
    Server(String),

    /// A 2xx response that doesn't match the contract.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// Convenience alias used across the client.
pub type ApiResult<T> = Result<T, ApiClientError>;

impl ApiClientError {
    /// The message worth showing a human, if the server provided one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiClientError::Rejected(m) | ApiClientError::Server(m) if !m.trim().is_empty() => {
                Some(m)
            }
            _ => None,
        }
    }
}
