//! HTTP request handlers for the REST API.

pub mod message;
pub mod participant;
pub mod status;
