//! Per-update view of the session and its collaborators.

use super::IntentError;
use crate::domain::conversation::{AnswerGrid, Session, Update};
use crate::domain::foundation::{ChannelId, MessageId};
use crate::ports::{Channel, DecisionEngine, DecisionModel, SendOptions, SessionRepository};

/// Everything an intent handler may touch while one update is processed.
///
/// Helpers that change the session persist it before returning, so no
/// change is lost if a later channel call fails.
pub struct Turn<'a> {
    pub session: &'a mut Session,
    update: Option<&'a Update>,
    channel: &'a dyn Channel,
    sessions: &'a dyn SessionRepository,
    engine: &'a dyn DecisionEngine,
}

impl<'a> Turn<'a> {
    pub fn new(
        session: &'a mut Session,
        update: Option<&'a Update>,
        channel: &'a dyn Channel,
        sessions: &'a dyn SessionRepository,
        engine: &'a dyn DecisionEngine,
    ) -> Self {
        Self {
            session,
            update,
            channel,
            sessions,
            engine,
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.session.channel_id()
    }

    /// Id of the inbound message being handled, if any.
    pub fn message_id(&self) -> Option<MessageId> {
        self.update.and_then(|u| u.message_id)
    }

    pub fn update(&self) -> Option<&Update> {
        self.update
    }

    /// Writes the session back to the repository.
    pub async fn persist(&self) -> Result<(), IntentError> {
        self.sessions.put(self.channel_id(), &*self.session).await?;
        Ok(())
    }

    /// Sends a message without changing the offered answers.
    pub async fn say(&self, text: &str, options: SendOptions) -> Result<MessageId, IntentError> {
        Ok(self.channel.send_message(self.channel_id(), text, &options).await?)
    }

    /// Asks a new question.
    ///
    /// `answers` become the offered answers (attached as a keyboard unless
    /// empty) and any pending clarification edit is dropped.
    pub async fn ask(
        &mut self,
        text: &str,
        answers: AnswerGrid,
        options: SendOptions,
    ) -> Result<MessageId, IntentError> {
        let options = if answers.is_empty() {
            options
        } else {
            options.with_keyboard(answers.clone())
        };
        self.session.intent_context.current_question_answers = answers;
        self.session.channel_context.pending_edit_message_id = None;
        self.persist().await?;
        self.say(text, options).await
    }

    /// Sends a clarification, editing the previous one if it is still pending.
    pub async fn clarify(&mut self, text: &str, rows: AnswerGrid) -> Result<(), IntentError> {
        let options = SendOptions::plain().with_keyboard(rows);
        match self.session.channel_context.pending_edit_message_id {
            Some(message_id) => {
                self.channel
                    .edit_message(self.channel_id(), message_id, text, &options)
                    .await?;
            }
            None => {
                let message_id = self.say(text, options).await?;
                self.session.channel_context.pending_edit_message_id = Some(message_id);
                self.persist().await?;
            }
        }
        Ok(())
    }

    /// Imports the session's decision snapshot into a live model.
    pub fn model(&self) -> Box<dyn DecisionModel> {
        self.engine.import_snapshot(&self.session.decision_snapshot)
    }

    /// Stores the model's exported snapshot on the session and persists it.
    pub async fn commit(&mut self, model: &dyn DecisionModel) -> Result<(), IntentError> {
        self.session.decision_snapshot = model.export_snapshot();
        self.persist().await
    }
}
