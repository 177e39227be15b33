//! Infrastructure layer for Parlor.
//!
//! Contains implementations of the repository traits defined in `parlor-core`
//! (SQLite storage) plus configuration loading and data directory resolution.

pub mod config;
pub mod sqlite;
