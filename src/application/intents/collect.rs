//! Free-text entry of options and criteria.

use async_trait::async_trait;

use super::{Intent, IntentError, Transition, Turn};
use crate::domain::conversation::{AnswerGrid, IntentKind};
use crate::ports::{DecisionModel, SendOptions};

const RETURN_KEYWORD: &str = "return";

/// What a collect intent gathers.
struct Collection {
    kind: IntentKind,
    /// Plural shown to the user.
    label: &'static str,
    example: &'static str,
    add: fn(&mut dyn DecisionModel, &[String]),
    /// The full list after adding.
    names: fn(&dyn DecisionModel) -> &[String],
}

impl Collection {
    fn prompt(&self) -> String {
        format!(
            "May you please input the <b>{}</b>?\n(e.g: {}) (type <i>{RETURN_KEYWORD}</i> to go back)",
            self.label, self.example
        )
    }

    fn confirmation(&self, names: &[String]) -> String {
        let listed = names
            .iter()
            .enumerate()
            .map(|(i, name)| format!("({}) {}", i + 1, name))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OK! The {} are {}.", self.label, listed)
    }

    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError> {
        turn.ask(&self.prompt(), AnswerGrid::empty(), SendOptions::html())
            .await?;
        Ok(Transition::Await)
    }

    async fn handle_free_text(
        &self,
        text: &str,
        turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        if text.trim() == RETURN_KEYWORD {
            return Ok(Transition::open(IntentKind::SelectMenu));
        }

        let names = split_names(text);
        if names.is_empty() {
            return Ok(Transition::resume(self.kind));
        }

        let mut model = turn.model();
        (self.add)(model.as_mut(), &names);
        turn.commit(model.as_ref()).await?;
        let listed = self.confirmation((self.names)(model.as_ref()));

        tracing::info!(
            channel_id = %turn.channel_id(),
            message_id = ?turn.message_id(),
            intent = %self.kind,
            count = names.len(),
            "Names added to decision model"
        );
        turn.say(&listed, SendOptions::plain())
            .await?;
        Ok(Transition::auto_advance())
    }
}

/// Splits comma-separated input, dropping blank entries.
fn split_names(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn add_items(model: &mut dyn DecisionModel, names: &[String]) {
    model.add_items(names);
}

fn add_criteria(model: &mut dyn DecisionModel, names: &[String]) {
    model.add_criteria(names);
}

fn item_names(model: &dyn DecisionModel) -> &[String] {
    model.items()
}

fn criterion_names(model: &dyn DecisionModel) -> &[String] {
    model.criteria()
}

const ITEMS: Collection = Collection {
    kind: IntentKind::CollectItems,
    label: "Options",
    example: "choice1,choice2,choice3",
    add: add_items,
    names: item_names,
};

const CRITERIA: Collection = Collection {
    kind: IntentKind::CollectCriteria,
    label: "Criteria",
    example: "criteriaA,criteriaB,criteriaC",
    add: add_criteria,
    names: criterion_names,
};

pub struct CollectItemsIntent;

#[async_trait]
impl Intent for CollectItemsIntent {
    fn kind(&self) -> IntentKind {
        IntentKind::CollectItems
    }

    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError> {
        ITEMS.init_response(turn).await
    }

    async fn handle_free_text(
        &self,
        text: &str,
        turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        ITEMS.handle_free_text(text, turn).await
    }
}

pub struct CollectCriteriaIntent;

#[async_trait]
impl Intent for CollectCriteriaIntent {
    fn kind(&self) -> IntentKind {
        IntentKind::CollectCriteria
    }

    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError> {
        CRITERIA.init_response(turn).await
    }

    async fn handle_free_text(
        &self,
        text: &str,
        turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        CRITERIA.handle_free_text(text, turn).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::super::ContextSeed;
    use super::*;
    use crate::adapters::ModelCall;
    use crate::ports::ParseMode;

    mod parsing {
        use super::*;

        #[test]
        fn splits_and_trims() {
            assert_eq!(split_names(" A , B,C "), names(&["A", "B", "C"]));
        }

        #[test]
        fn drops_blank_entries() {
            assert_eq!(split_names("A,, ,B,"), names(&["A", "B"]));
            assert!(split_names(" , ").is_empty());
        }

        #[test]
        fn confirmation_numbers_names() {
            assert_eq!(
                ITEMS.confirmation(&names(&["A", "B", "C"])),
                "OK! The Options are (1) A, (2) B, (3) C."
            );
            assert_eq!(
                CRITERIA.confirmation(&names(&["p"])),
                "OK! The Criteria are (1) p."
            );
        }
    }

    mod flow {
        use super::*;

        async fn collecting(h: &Harness, kind: IntentKind) -> crate::domain::conversation::Session {
            let mut session = h.session(&[], &[]).await;
            h.runtime
                .open(kind, None, &mut session, ContextSeed::Defaults)
                .await
                .unwrap();
            h.channel.clear();
            session
        }

        #[tokio::test]
        async fn prompt_is_html_without_keyboard() {
            let h = Harness::new();
            let mut session = h.session(&[], &[]).await;
            h.runtime
                .open(IntentKind::CollectCriteria, None, &mut session, ContextSeed::Defaults)
                .await
                .unwrap();

            let last = h.channel.last().unwrap();
            assert_eq!(
                last.text(),
                "May you please input the <b>Criteria</b>?\n(e.g: criteriaA,criteriaB,criteriaC) (type <i>return</i> to go back)"
            );
            assert_eq!(last.parse_mode(), Some(ParseMode::Html));
            assert!(last.keyboard().is_none());
        }

        #[tokio::test]
        async fn names_are_added_and_confirmed() {
            let h = Harness::new();
            let mut session = collecting(&h, IntentKind::CollectItems).await;

            h.runtime
                .forward(None, &text("A, B ,C"), &mut session)
                .await
                .unwrap();

            assert_eq!(h.engine.calls(), vec![ModelCall::AddItems(names(&["A", "B", "C"]))]);
            assert_eq!(session.decision_snapshot.items, names(&["A", "B", "C"]));
            assert_eq!(h.channel.texts()[0], "OK! The Options are (1) A, (2) B, (3) C.");
            assert_eq!(session.active_intent, IntentKind::CollectCriteria);
        }

        #[tokio::test]
        async fn confirmation_lists_names_already_collected() {
            let h = Harness::new();
            let mut session = h.session(&["A", "B"], &[]).await;
            h.runtime
                .open(IntentKind::CollectItems, None, &mut session, ContextSeed::Defaults)
                .await
                .unwrap();
            h.channel.clear();

            h.runtime
                .forward(None, &text("C"), &mut session)
                .await
                .unwrap();

            assert_eq!(session.decision_snapshot.items, names(&["A", "B", "C"]));
            assert_eq!(h.channel.texts()[0], "OK! The Options are (1) A, (2) B, (3) C.");
        }

        #[tokio::test]
        async fn repeated_names_are_listed_once() {
            let h = Harness::new();
            let mut session = h.session(&["A"], &["p", "q"]).await;
            h.runtime
                .open(IntentKind::CollectCriteria, None, &mut session, ContextSeed::Defaults)
                .await
                .unwrap();
            h.channel.clear();

            h.runtime
                .forward(None, &text("q, r"), &mut session)
                .await
                .unwrap();

            assert_eq!(session.decision_snapshot.criteria, names(&["p", "q", "r"]));
            assert_eq!(h.channel.texts()[0], "OK! The Criteria are (1) p, (2) q, (3) r.");
        }

        #[tokio::test]
        async fn return_goes_back_to_the_menu() {
            let h = Harness::new();
            let mut session = collecting(&h, IntentKind::CollectItems).await;

            h.runtime
                .forward(None, &text(" return "), &mut session)
                .await
                .unwrap();

            assert_eq!(session.active_intent, IntentKind::SelectMenu);
            assert!(h.engine.calls().is_empty());
        }

        #[tokio::test]
        async fn blank_input_asks_again() {
            let h = Harness::new();
            let mut session = collecting(&h, IntentKind::CollectCriteria).await;

            h.runtime
                .forward(None, &text(" , ,"), &mut session)
                .await
                .unwrap();

            assert_eq!(session.active_intent, IntentKind::CollectCriteria);
            assert!(h.last_text().starts_with("May you please input the <b>Criteria</b>?"));
            assert!(h.engine.calls().is_empty());
        }
    }
}
