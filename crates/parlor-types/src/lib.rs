//! Shared domain types for Parlor.
//!
//! This crate contains the core domain types used across the Parlor chat
//! room: Participant, Message, server configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod participant;
