//! Session types shared by Collab crates.
//!
//! Provides session-token issuing/validation and the `BearerToken` extractor.

pub mod bearer;
pub mod token;
