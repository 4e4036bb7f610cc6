//! Inbound events delivered by the chat transport.

use crate::domain::foundation::MessageId;

/// What the user sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateContent {
    /// A typed message.
    Text(String),
    /// A button press carrying a raw action payload.
    Action(String),
}

/// One inbound event for a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub message_id: Option<MessageId>,
    pub sender_name: Option<String>,
    pub content: UpdateContent,
}

impl Update {
    /// A typed text message.
    pub fn text(message_id: MessageId, text: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id),
            sender_name: None,
            content: UpdateContent::Text(text.into()),
        }
    }

    /// A button press.
    pub fn action(message_id: MessageId, payload: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id),
            sender_name: None,
            content: UpdateContent::Action(payload.into()),
        }
    }

    /// Attaches the sender's display name.
    pub fn with_sender(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    /// Raw payload, for button presses.
    pub fn action_payload(&self) -> Option<&str> {
        match &self.content {
            UpdateContent::Action(payload) => Some(payload),
            UpdateContent::Text(_) => None,
        }
    }

    /// Message text, for typed messages.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            UpdateContent::Text(text) => Some(text),
            UpdateContent::Action(_) => None,
        }
    }
}
