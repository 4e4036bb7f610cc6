//! Storage Adapters
//!
//! Implementations of the SessionRepository port.
//!
//! ## Available Adapters
//!
//! - **InMemorySessionRepository** - Stores sessions in memory with an idle TTL
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySessionRepository;
//!
//! let sessions = InMemorySessionRepository::from_config(&config.session);
//! ```

mod in_memory_session_repository;

pub use in_memory_session_repository::InMemorySessionRepository;
