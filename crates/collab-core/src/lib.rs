//! Cross-cutting plumbing shared by Collab services: configuration loading,
//! tracing setup, request ids and wire-format helpers.

pub mod config;
pub mod middleware;
pub mod serde;
pub mod tracing;
