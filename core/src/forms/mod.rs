//! Form state machines for the manual testing harness.
//!
//! # Design
//! One machine per form (create, query, update, delete), all sans-IO: a
//! machine hands the host the id or payload to send and later absorbs the
//! `Result` the host got back from the transport. The two-phase forms
//! (update, delete) model their lookup-then-act workflow as an explicit
//! phase enum instead of a cluster of independent boolean flags, so
//! impossible combinations (success banner and error banner at once, a
//! draft without an original) cannot be represented.
//!
//! Error banners follow one rule everywhere: a 404 produces a distinguished
//! "no item with id N" message, any other request failure shows the
//! server's message when it sent one and a per-action fallback otherwise.

pub mod create;
pub mod delete;
pub mod query;
pub mod update;

pub use create::CreateForm;
pub use delete::{DeleteForm, DeletePhase};
pub use query::QueryPanel;
pub use update::{UpdateForm, UpdatePhase};

use std::fmt;

use crate::error::ApiError;

/// Local validation failure, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The id input is not a valid integer.
    InvalidId(String),
    /// A required field was left empty.
    EmptyField(&'static str),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::InvalidId(raw) => write!(f, "'{raw}' is not a valid numeric id"),
            FormError::EmptyField(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for FormError {}

/// Parse a user-entered id, rejecting anything non-numeric locally.
pub fn parse_id(input: &str) -> Result<i64, FormError> {
    input
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidId(input.to_string()))
}

/// Distinguished banner text for a 404 on a specific id.
pub(crate) fn not_found_message(id: i64) -> String {
    format!("no item with id {id} exists")
}

/// Banner text for a failed request: the server's message when it sent one,
/// the per-action fallback otherwise.
pub(crate) fn banner_message(err: &ApiError, fallback: &str) -> String {
    err.server_message().unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers_with_whitespace() {
        assert_eq!(parse_id(" 42 "), Ok(42));
    }

    #[test]
    fn parse_id_rejects_non_numeric_input() {
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err, FormError::InvalidId("abc".to_string()));
        assert_eq!(err.to_string(), "'abc' is not a valid numeric id");
    }

    #[test]
    fn banner_prefers_server_message() {
        let err = ApiError::Request {
            status: 400,
            message: "name must not be empty".to_string(),
        };
        assert_eq!(
            banner_message(&err, "failed to create item"),
            "name must not be empty"
        );
    }

    #[test]
    fn banner_falls_back_when_server_message_is_empty() {
        let err = ApiError::Request {
            status: 500,
            message: String::new(),
        };
        assert_eq!(
            banner_message(&err, "failed to create item"),
            "failed to create item"
        );
    }
}
