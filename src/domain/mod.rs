//! Domain layer types and invariants.

pub mod access;
pub mod credential;
pub mod error;
pub mod messages;
pub mod posts;
pub mod subscribers;
pub mod types;
