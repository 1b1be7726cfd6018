//! Person storage: the entity hooks and the error type clients report.

pub mod entity;
pub mod error;

pub use error::*;
