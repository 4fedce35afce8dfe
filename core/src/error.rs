//! Error types for the data-item API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because every two-phase form
//! distinguishes "the requested item does not exist" (shown with the id
//! interpolated) from "the server rejected the call." All other non-2xx
//! responses land in `Request`, which carries the status code and the
//! server's error message — the `message` field of a JSON error body when
//! present, otherwise the raw body text.

use std::fmt;

/// Errors returned by `ItemClient` parse methods.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server returned 404 — the requested item does not exist.
    NotFound,

    /// The server returned a non-2xx status other than 404.
    Request { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    Serialization(String),
}

impl ApiError {
    /// Server-supplied message for failed requests, if there is one.
    ///
    /// Forms fall back to a per-action generic string when this is `None`,
    /// mirroring how the error banner text is chosen.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Request { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "item not found"),
            ApiError::Request { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
