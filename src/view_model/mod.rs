//! Presentation layer: published UI state, intents, validation and error events.

pub mod error_state;
pub mod intents;
pub mod person_view_model;
pub mod ui_state;
pub mod validator;

pub use error_state::*;
pub use intents::*;
pub use person_view_model::*;
pub use ui_state::*;
pub use validator::*;
