//! Pieces shared by every crate in the workspace: wire-level types that are
//! not tied to the catalog, and process-wide logging setup.

pub mod types;
pub mod utils;
