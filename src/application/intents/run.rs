//! Evaluates the decision model and reports the ranking.

use async_trait::async_trait;

use super::remediation::{remediate, Wording};
use super::{Intent, IntentError, Transition, Turn};
use crate::domain::conversation::IntentKind;
use crate::ports::SendOptions;

pub struct RunIntent;

#[async_trait]
impl Intent for RunIntent {
    fn kind(&self) -> IntentKind {
        IntentKind::Run
    }

    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError> {
        let model = turn.model();
        match model.evaluate() {
            Ok(report) => {
                let rendered = report.render(model.items(), model.criteria());
                tracing::info!(
                    channel_id = %turn.channel_id(),
                    message_id = ?turn.message_id(),
                    items = model.items().len(),
                    criteria = model.criteria().len(),
                    "Decision report delivered"
                );
                turn.say(&rendered, SendOptions::markdown()).await?;
                Ok(Transition::auto_advance())
            }
            Err(err) => remediate(&err, Wording::Run, model, turn).await,
        }
    }
}
