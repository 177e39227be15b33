//! Request extractors shared by the handlers.

pub mod identity;
pub mod query;
