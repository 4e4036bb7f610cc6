//! Strongly-typed identifier value objects.
//!
//! Channel transports address conversations and messages with integers;
//! these newtypes keep the two from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identifier of a conversation on the chat transport (one per chat).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(i64);

impl ChannelId {
    /// Wraps a raw transport chat identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw transport identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::empty_field("channel_id"));
        }
        s.parse::<i64>()
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("channel_id", e.to_string()))
    }
}

/// Identifier of a single message within a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Wraps a raw transport message identifier.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw transport identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
