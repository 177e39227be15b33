//! Room logic and repository trait definitions for Parlor.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, plus the room service and liveness sweeper built on
//! them. It depends only on `parlor-types` -- never on `parlor-infra` or any
//! database/IO crate.

pub mod repository;
pub mod room;
