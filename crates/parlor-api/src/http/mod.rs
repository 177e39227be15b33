//! HTTP/REST API layer for Parlor.
//!
//! Axum-based REST API with self-reported `User` header identity,
//! plain JSON bodies, and open CORS.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
