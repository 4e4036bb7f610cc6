//! Application handlers.
//!
//! Command handlers that orchestrate the intent runtime and the ports.

pub mod dispatch_update;

pub use dispatch_update::{
    DispatchUpdateCommand, DispatchUpdateError, DispatchUpdateHandler, DispatchUpdateResult,
};
