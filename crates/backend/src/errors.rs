use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// PostgREST code for "JSON object requested, multiple (or no) rows returned".
pub const NOT_SINGLE_ROW: &str = "PGRST116";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    Api(PostgrestError),
    #[error("network error: {0}")]
    Network(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("no rows returned from {table}")]
    EmptyResult { table: String },
}

impl BackendError {
    /// HTTP status reported by the store, if the request reached it.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api(e) => e.code.as_deref(),
            _ => None,
        }
    }

    /// True when a single-row read matched zero or several rows, or a mutation returned nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EmptyResult { .. }) || self.code() == Some(NOT_SINGLE_ROW)
    }
}

/// Error body as the store sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostgrestError {
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl PostgrestError {
    /// Decode an error response; non-JSON bodies keep the raw text as the message.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<PostgrestError>(body) {
            Ok(mut e) => {
                e.status = status;
                e
            }
            Err(_) => Self {
                status,
                code: None,
                message: if body.trim().is_empty() { format!("HTTP {status}") } else { body.trim().to_string() },
                details: None,
                hint: None,
            },
        }
    }
}

impl fmt::Display for PostgrestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_store_error_body() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let e = BackendError::Api(PostgrestError::from_body(406, body));
        assert_eq!(e.to_string(), "JSON object requested, multiple (or no) rows returned");
        assert_eq!(e.status(), Some(406));
        assert!(e.is_not_found());
    }

    #[test]
    fn non_json_body_becomes_message() {
        let e = PostgrestError::from_body(502, "bad gateway\n");
        assert_eq!(e.message, "bad gateway");
        assert_eq!(e.code, None);
        assert_eq!(PostgrestError::from_body(500, "").message, "HTTP 500");
    }

    #[test]
    fn unique_violation_is_not_not_found() {
        let body = r#"{"code":"23505","details":"Key (id)=(p-1) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"products_pkey\""}"#;
        let e = BackendError::Api(PostgrestError::from_body(409, body));
        assert!(!e.is_not_found());
        assert_eq!(e.code(), Some("23505"));
    }
}
