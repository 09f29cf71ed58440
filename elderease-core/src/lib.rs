//! Core of the ElderEase events screen.
//!
//! - `event`: event records as they are persisted
//! - `slot`: the single storage location the event list lives in
//! - `store`: the loaded event list and its mutations
//! - `form`: the create/edit form workflow
//! - `board`: user actions wired to notices
//! - `capability`: what the host provides (location picker, notices, confirmation)

pub mod board;
pub mod capability;
pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod slot;
pub mod store;

pub use event::*;
