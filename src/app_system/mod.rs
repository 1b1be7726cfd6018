//! System orchestration, configuration, seeding, startup and shutdown logic.

pub mod config;
pub mod roster_system;
pub mod seed;
pub mod tracing;

pub use config::*;
pub use roster_system::*;
pub use seed::*;
pub use self::tracing::*;
