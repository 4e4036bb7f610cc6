//! Confirmed session reset.

use async_trait::async_trait;

use super::{Intent, IntentError, Transition, Turn};
use crate::domain::conversation::{
    ActionPayload, Answer, AnswerGrid, IntentAction, IntentKind, Session,
};
use crate::ports::{reset_session, SendOptions};

pub struct ResetIntent;

impl ResetIntent {
    fn confirmation() -> AnswerGrid {
        AnswerGrid::single_column([
            Answer::new(
                "Yes",
                &ActionPayload::new(IntentKind::Reset, IntentAction::Confirm(true)),
            ),
            Answer::new(
                "No",
                &ActionPayload::new(IntentKind::Reset, IntentAction::Confirm(false)),
            ),
        ])
    }
}

#[async_trait]
impl Intent for ResetIntent {
    fn kind(&self) -> IntentKind {
        IntentKind::Reset
    }

    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError> {
        turn.ask(
            "Would you want to restart the session?",
            Self::confirmation(),
            SendOptions::plain(),
        )
        .await?;
        Ok(Transition::Await)
    }

    fn format_answers(&self, _session: &Session) -> AnswerGrid {
        Self::confirmation()
    }

    async fn handle_action(
        &self,
        payload: &ActionPayload,
        turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        if payload.action == IntentAction::Confirm(true) {
            *turn.session = reset_session(&*turn.session);
            turn.persist().await?;
            tracing::info!(
                channel_id = %turn.channel_id(),
                message_id = ?turn.message_id(),
                "Session reset"
            );
        }
        Ok(Transition::open(IntentKind::SelectMenu))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::ContextSeed;
    use super::*;
    use crate::domain::foundation::ChannelId;

    async fn confirming(h: &Harness) -> Session {
        let mut session = h.session(&["A", "B"], &["p"]).await;
        h.runtime
            .open(IntentKind::Reset, None, &mut session, ContextSeed::Defaults)
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn yes_clears_the_model_but_keeps_the_channel() {
        let h = Harness::new();
        let mut session = confirming(&h).await;

        h.runtime
            .forward(None, &action("RESET::yes"), &mut session)
            .await
            .unwrap();

        assert!(session.decision_snapshot.items.is_empty());
        assert!(session.initialized);
        assert_eq!(session.channel_id(), ChannelId::new(CHANNEL));
        assert_eq!(session.active_intent, IntentKind::SelectMenu);
        assert_eq!(h.stored().await, session);
    }

    #[tokio::test]
    async fn no_keeps_everything() {
        let h = Harness::new();
        let mut session = confirming(&h).await;

        h.runtime
            .forward(None, &text("No"), &mut session)
            .await
            .unwrap();

        assert_eq!(session.decision_snapshot.items, names(&["A", "B"]));
        assert_eq!(session.active_intent, IntentKind::SelectMenu);
    }

    #[tokio::test]
    async fn typed_yes_is_resolved_to_the_button() {
        let h = Harness::new();
        let mut session = confirming(&h).await;

        h.runtime
            .forward(None, &text("yes"), &mut session)
            .await
            .unwrap();

        assert!(session.decision_snapshot.criteria.is_empty());
    }
}
