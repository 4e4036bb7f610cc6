//! Application layer - Commands, Handlers, and the intent state machine.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `handlers` is the entry point for inbound updates; `intents` holds the
//! conversational steps and the runtime that moves between them.

pub mod handlers;
pub mod intents;

pub use handlers::{
    DispatchUpdateCommand, DispatchUpdateError, DispatchUpdateHandler, DispatchUpdateResult,
};
pub use intents::{ContextSeed, Intent, IntentError, IntentRegistry, IntentRuntime, Transition, Turn};
