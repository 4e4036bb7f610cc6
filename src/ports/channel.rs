//! Channel Port - Interface for the chat transport.
//!
//! The transport delivers inbound `Update`s (handled elsewhere) and accepts
//! outbound messages, optionally carrying a reply keyboard built from an
//! `AnswerGrid`.

use async_trait::async_trait;

use crate::domain::conversation::AnswerGrid;
use crate::domain::foundation::{ChannelId, MessageId};

/// Errors raised by the transport.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChannelError {
    #[error("Message delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("Message {0} cannot be edited")]
    NotEditable(MessageId),
}

/// How the transport should interpret message markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Html,
    Markdown,
}

/// Reply keyboard attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: AnswerGrid,
    /// Hide the keyboard once the user has pressed a button.
    pub one_time: bool,
}

/// Rendering options of an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendOptions {
    pub parse_mode: Option<ParseMode>,
    pub keyboard: Option<Keyboard>,
}

impl SendOptions {
    /// Plain text, no keyboard.
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn html() -> Self {
        Self {
            parse_mode: Some(ParseMode::Html),
            keyboard: None,
        }
    }

    pub fn markdown() -> Self {
        Self {
            parse_mode: Some(ParseMode::Markdown),
            keyboard: None,
        }
    }

    /// Attaches `rows` as a one-time keyboard.
    pub fn with_keyboard(mut self, rows: AnswerGrid) -> Self {
        self.keyboard = Some(Keyboard {
            rows,
            one_time: true,
        });
        self
    }
}

/// Port for the outbound side of the chat transport.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Sends a new message and returns its id.
    async fn send_message(
        &self,
        channel_id: ChannelId,
        text: &str,
        options: &SendOptions,
    ) -> Result<MessageId, ChannelError>;

    /// Replaces the content of a message sent earlier.
    async fn edit_message(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        text: &str,
        options: &SendOptions,
    ) -> Result<(), ChannelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_is_one_time() {
        let options = SendOptions::html().with_keyboard(AnswerGrid::empty());
        assert_eq!(options.parse_mode, Some(ParseMode::Html));
        assert!(options.keyboard.map(|k| k.one_time).unwrap_or(false));
    }

    #[test]
    fn plain_has_no_markup() {
        assert_eq!(SendOptions::plain(), SendOptions::default());
        assert_eq!(SendOptions::markdown().parse_mode, Some(ParseMode::Markdown));
    }

    #[test]
    fn error_messages() {
        let err = ChannelError::NotEditable(MessageId::new(12));
        assert!(err.to_string().contains("12"));
    }
}
