//! Typed clients over the generic resource actors.

pub mod person_client;

pub use person_client::*;
