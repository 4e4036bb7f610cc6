//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the conversation core to external systems:
//! - `channel` - Chat transport implementations (recording)
//! - `decision` - Decision engine implementations (mock)
//! - `storage` - Session repository implementations (in-memory)

pub mod channel;
pub mod decision;
pub mod storage;

pub use channel::{Outbound, RecordingChannel};
pub use decision::{MockDecisionEngine, ModelCall};
pub use storage::InMemorySessionRepository;
