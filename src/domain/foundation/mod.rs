//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps and validation errors shared by the
//! conversation and decision modules.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ChannelId, MessageId};
pub use timestamp::Timestamp;
