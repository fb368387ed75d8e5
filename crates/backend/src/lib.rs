//! Client for the hosted relational store, spoken over its PostgREST dialect.
//!
//! `BackendClient::table` starts a query; filters and ordering chain on the
//! returned [`QueryBuilder`] and a terminal method sends it. Errors from the
//! store come back as [`BackendError::Api`] with the store's own fields intact.

pub mod client;
pub mod errors;
pub mod observability;
pub mod query;

pub use client::BackendClient;
pub use errors::{BackendError, PostgrestError};
pub use query::QueryBuilder;
