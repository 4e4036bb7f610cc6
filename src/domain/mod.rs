//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, timestamps, validation errors)
//! - `decision` - Decision snapshot, rank scale, evaluation outcome
//! - `conversation` - Session state, intents, answers and their resolution

pub mod conversation;
pub mod decision;
pub mod foundation;
