//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the conversation core and the outside world. Adapters implement these ports.
//!
//! - `Channel` - Outbound chat transport (send and edit messages)
//! - `SessionRepository` - Keyed, TTL-bound session storage
//! - `DecisionEngine` / `DecisionModel` - Pairwise-comparison model operations

mod channel;
mod decision_model;
mod session_repository;

pub use channel::{Channel, ChannelError, Keyboard, ParseMode, SendOptions};
pub use decision_model::{DecisionEngine, DecisionModel, DecisionModelError};
pub use session_repository::{reset_session, SessionRepository, SessionStoreError};
