//! Recording Channel for testing.
//!
//! Implements the Channel port by keeping every outbound message in memory
//! and handing out increasing message ids. Tests read the transcript back.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::conversation::AnswerGrid;
use crate::domain::foundation::{ChannelId, MessageId};
use crate::ports::{Channel, ChannelError, ParseMode, SendOptions};

/// One recorded outbound operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Sent {
        channel_id: ChannelId,
        message_id: MessageId,
        text: String,
        options: SendOptions,
    },
    Edited {
        channel_id: ChannelId,
        message_id: MessageId,
        text: String,
        options: SendOptions,
    },
}

impl Outbound {
    pub fn text(&self) -> &str {
        match self {
            Self::Sent { text, .. } | Self::Edited { text, .. } => text,
        }
    }

    pub fn options(&self) -> &SendOptions {
        match self {
            Self::Sent { options, .. } | Self::Edited { options, .. } => options,
        }
    }

    pub fn parse_mode(&self) -> Option<ParseMode> {
        self.options().parse_mode
    }

    /// Keyboard rows attached to the message, if any.
    pub fn keyboard(&self) -> Option<&AnswerGrid> {
        self.options().keyboard.as_ref().map(|k| &k.rows)
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edited { .. })
    }
}

/// In-memory channel that records everything it is asked to deliver.
#[derive(Debug, Clone)]
pub struct RecordingChannel {
    outbound: Arc<Mutex<Vec<Outbound>>>,
    next_id: Arc<Mutex<i64>>,
    failures: Arc<Mutex<VecDeque<ChannelError>>>,
}

impl Default for RecordingChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self {
            outbound: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(1000)),
            failures: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Makes the next send or edit fail with `error`.
    pub fn with_failure(self, error: ChannelError) -> Self {
        lock(&self.failures).push_back(error);
        self
    }

    /// Everything delivered so far, oldest first.
    pub fn outbound(&self) -> Vec<Outbound> {
        lock(&self.outbound).clone()
    }

    /// Texts delivered so far, oldest first.
    pub fn texts(&self) -> Vec<String> {
        lock(&self.outbound).iter().map(|o| o.text().to_string()).collect()
    }

    pub fn last(&self) -> Option<Outbound> {
        lock(&self.outbound).last().cloned()
    }

    pub fn clear(&self) {
        lock(&self.outbound).clear();
    }

    fn take_failure(&self) -> Option<ChannelError> {
        lock(&self.failures).pop_front()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    async fn send_message(
        &self,
        channel_id: ChannelId,
        text: &str,
        options: &SendOptions,
    ) -> Result<MessageId, ChannelError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        let message_id = {
            let mut next = lock(&self.next_id);
            *next += 1;
            MessageId::new(*next)
        };
        lock(&self.outbound).push(Outbound::Sent {
            channel_id,
            message_id,
            text: text.to_string(),
            options: options.clone(),
        });
        Ok(message_id)
    }

    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        text: &str,
        options: &SendOptions,
    ) -> Result<(), ChannelError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }

        lock(&self.outbound).push(Outbound::Edited {
            channel_id,
            message_id,
            text: text.to_string(),
            options: options.clone(),
        });
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
