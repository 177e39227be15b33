//! The chat room: request operations and the liveness sweeper.

pub mod service;
pub mod sweeper;

#[cfg(test)]
mod testing;
