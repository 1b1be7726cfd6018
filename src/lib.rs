//! # People Roster
//!
//! Contact-list core: a person store running as an actor, and a presentation
//! layer that removes list entries optimistically and can undo the last removal.
//!
//! - **Store** - [`actor_framework::ResourceActor`] owns the records,
//!   [`clients::PersonClient`] is the gateway the rest of the crate talks to
//! - **Optimistic remove/undo** - [`optimistic::OptimisticController`] with the
//!   caller-owned [`optimistic::UndoState`]
//! - **View model** - [`view_model::PersonViewModel`] turns intents into published
//!   state and error events
//! - **System** - [`app_system::RosterSystem`] starts, seeds and shuts down the store

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod navigation;
pub mod optimistic;
pub mod person_actor;
pub mod view_model;

#[cfg(test)]
mod mock_framework;
