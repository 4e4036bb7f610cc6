//! Pairwise comparison of two options under one criterion.

use async_trait::async_trait;

use super::pairwise::{PairwiseFlow, Subject};
use super::{Intent, IntentError, Transition, Turn};
use crate::domain::conversation::{ActionPayload, IntentKind};

const FLOW: PairwiseFlow = PairwiseFlow::new(Subject::Items);

pub struct RankItemPairsIntent;

#[async_trait]
impl Intent for RankItemPairsIntent {
    fn kind(&self) -> IntentKind {
        IntentKind::RankItemPairs
    }

    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError> {
        FLOW.init_response(turn).await
    }

    async fn handle_action(
        &self,
        payload: &ActionPayload,
        turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        FLOW.handle_action(payload, turn).await
    }
}
