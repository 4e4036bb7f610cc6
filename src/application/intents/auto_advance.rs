//! Silent router that moves the conversation to whatever is missing.

use async_trait::async_trait;

use super::remediation::{remediate, Wording};
use super::{Intent, IntentError, Transition, Turn};
use crate::domain::conversation::IntentKind;

/// Inspects the decision model and opens the next useful intent.
///
/// Sends nothing itself unless the model reports a problem.
pub struct AutoAdvanceIntent;

#[async_trait]
impl Intent for AutoAdvanceIntent {
    fn kind(&self) -> IntentKind {
        IntentKind::AutoAdvance
    }

    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError> {
        let model = turn.model();
        if model.items().is_empty() {
            return Ok(Transition::open(IntentKind::CollectItems));
        }
        if model.criteria().is_empty() {
            return Ok(Transition::open(IntentKind::CollectCriteria));
        }

        match model.evaluate() {
            Ok(_) => Ok(Transition::open(IntentKind::SelectMenu)),
            Err(err) => remediate(&err, Wording::AutoAdvance, model, turn).await,
        }
    }
}
