//! Main action menu.

use async_trait::async_trait;

use super::{Intent, IntentError, Transition, Turn};
use crate::domain::conversation::{
    ActionPayload, Answer, AnswerGrid, IntentAction, IntentKind, Session,
};
use crate::ports::SendOptions;

const MENU_ENTRIES: [(&str, IntentKind); 6] = [
    ("Add Options", IntentKind::CollectItems),
    ("Add Criteria", IntentKind::CollectCriteria),
    ("Rank Options per Criterion", IntentKind::RankItemPairs),
    ("Rank Criteria", IntentKind::RankCriteriaPairs),
    ("Run Result", IntentKind::Run),
    ("Restart session", IntentKind::Reset),
];

pub struct SelectMenuIntent;

impl SelectMenuIntent {
    fn menu() -> AnswerGrid {
        AnswerGrid::single_column(MENU_ENTRIES.iter().map(|(text, target)| {
            Answer::new(*text, &ActionPayload::open(IntentKind::SelectMenu, *target))
        }))
    }
}

#[async_trait]
impl Intent for SelectMenuIntent {
    fn kind(&self) -> IntentKind {
        IntentKind::SelectMenu
    }

    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError> {
        turn.ask("Can I help you?", Self::menu(), SendOptions::plain())
            .await?;
        Ok(Transition::Await)
    }

    fn format_answers(&self, _session: &Session) -> AnswerGrid {
        Self::menu()
    }

    async fn handle_action(
        &self,
        payload: &ActionPayload,
        _turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        match payload.action {
            IntentAction::Open(target) => Ok(Transition::open(target)),
            _ => Ok(Transition::open(IntentKind::SelectMenu)),
        }
    }
}
