//! Channel Adapters
//!
//! Implementations of the Channel port.
//!
//! - **RecordingChannel** - Keeps the outbound transcript in memory (testing/development)

mod recording_channel;

pub use recording_channel::{Outbound, RecordingChannel};
