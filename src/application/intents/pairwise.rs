//! Shared sub-flow for ranking one pair of options or criteria.
//!
//! The next question is derived from which fields of [`PairwiseState`] are
//! still unset:
//!
//! ```text
//! criterion -> first entity -> second entity -> preference -> scale -> complete
//! ```
//!
//! The criterion step only exists when ranking options. An "equally
//! preferred" answer fills preference and scale at once.

use crate::domain::conversation::{
    ActionPayload, Answer, AnswerGrid, IntentAction, IntentKind, IntentState, PairwiseState,
    Preference,
};
use crate::domain::decision::{scale_legend, RankScale};
use crate::ports::SendOptions;

use super::{escape_html, IntentError, Transition, Turn};

/// What is being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Subject {
    /// Two options under one criterion.
    Items,
    /// Two criteria.
    Criteria,
}

/// The question the sub-flow asks next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Criterion,
    FirstEntity,
    SecondEntity,
    Preference,
    Scale,
    Complete,
}

impl Subject {
    pub(super) fn kind(self) -> IntentKind {
        match self {
            Self::Items => IntentKind::RankItemPairs,
            Self::Criteria => IntentKind::RankCriteriaPairs,
        }
    }

    fn wrap(self, state: PairwiseState) -> IntentState {
        match self {
            Self::Items => IntentState::RankItemPairs(state),
            Self::Criteria => IntentState::RankCriteriaPairs(state),
        }
    }

    /// Singular name of the compared entity.
    fn noun(self) -> &'static str {
        match self {
            Self::Items => "Option",
            Self::Criteria => "Criterion",
        }
    }

    fn select_entity(self, name: &str) -> IntentAction {
        match self {
            Self::Items => IntentAction::SelectItem(name.to_string()),
            Self::Criteria => IntentAction::SelectCriterion(name.to_string()),
        }
    }

    fn select_preference(self, preference: Preference) -> IntentAction {
        match self {
            Self::Items => IntentAction::SelectPreferredItem(preference),
            Self::Criteria => IntentAction::SelectPreferredCriterion(preference),
        }
    }

    /// The entity named by `action`, if it is an entity selection for this subject.
    fn entity_in<'a>(self, action: &'a IntentAction) -> Option<&'a str> {
        match (self, action) {
            (Self::Items, IntentAction::SelectItem(name))
            | (Self::Criteria, IntentAction::SelectCriterion(name)) => Some(name),
            _ => None,
        }
    }

    fn preference_in(self, action: &IntentAction) -> Option<&Preference> {
        match (self, action) {
            (Self::Items, IntentAction::SelectPreferredItem(preference))
            | (Self::Criteria, IntentAction::SelectPreferredCriterion(preference)) => {
                Some(preference)
            }
            _ => None,
        }
    }

    pub(super) fn step(self, state: &PairwiseState) -> Step {
        if self == Self::Items && state.criterion.is_none() {
            return Step::Criterion;
        }
        match (state.entities.len(), &state.preferred, &state.rank) {
            (0, _, _) => Step::FirstEntity,
            (1, _, _) => Step::SecondEntity,
            (_, None, _) => Step::Preference,
            (_, Some(_), None) => Step::Scale,
            (_, Some(_), Some(_)) => Step::Complete,
        }
    }
}

/// Names a pairwise comparison may draw on.
struct Pool {
    items: Vec<String>,
    criteria: Vec<String>,
}

impl Pool {
    fn entities(&self, subject: Subject) -> &[String] {
        match subject {
            Subject::Items => &self.items,
            Subject::Criteria => &self.criteria,
        }
    }

    /// Returns true if a comparison of `subject` can be made at all.
    fn supports(&self, subject: Subject) -> bool {
        match subject {
            Subject::Items => !self.criteria.is_empty() && self.items.len() >= 2,
            Subject::Criteria => self.criteria.len() >= 2,
        }
    }

    /// Returns true if every name in `state` still exists in the model.
    fn admits(&self, subject: Subject, state: &PairwiseState) -> bool {
        let criterion_known = state
            .criterion
            .as_ref()
            .map_or(true, |c| self.criteria.contains(c));
        let entities_known = state
            .entities
            .iter()
            .all(|e| self.entities(subject).contains(e));
        criterion_known && entities_known && state.entities.len() <= 2
    }
}

/// A pairwise ranking sub-flow for one subject.
pub(super) struct PairwiseFlow {
    pub(super) subject: Subject,
}

impl PairwiseFlow {
    pub(super) const fn new(subject: Subject) -> Self {
        Self { subject }
    }

    fn kind(&self) -> IntentKind {
        self.subject.kind()
    }

    fn payload(&self, action: IntentAction) -> ActionPayload {
        ActionPayload::new(self.kind(), action)
    }

    fn state(turn: &Turn<'_>) -> PairwiseState {
        turn.session
            .intent_context
            .state
            .pairwise()
            .cloned()
            .unwrap_or_default()
    }

    fn pool(turn: &Turn<'_>) -> Pool {
        let model = turn.model();
        Pool {
            items: model.items().to_vec(),
            criteria: model.criteria().to_vec(),
        }
    }

    async fn save(&self, turn: &mut Turn<'_>, state: PairwiseState) -> Result<(), IntentError> {
        turn.session.intent_context.state = self.subject.wrap(state);
        turn.persist().await
    }

    /// Asks the question for the current step, or records a complete comparison.
    pub(super) async fn init_response(
        &self,
        turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        let pool = Self::pool(turn);
        if !pool.supports(self.subject) {
            turn.say(self.unsupported_notice(), SendOptions::html())
                .await?;
            return Ok(Transition::auto_advance());
        }

        let mut state = Self::state(turn);
        if !pool.admits(self.subject, &state) {
            tracing::warn!(
                channel_id = %turn.channel_id(),
                intent = %self.kind(),
                "Comparison names no longer in the model, starting over"
            );
            state = PairwiseState::default();
            self.save(turn, state.clone()).await?;
        }

        let (prompt, answers) = match self.subject.step(&state) {
            Step::Complete => return self.complete(turn, &state).await,
            Step::Criterion => (
                "Which <b>criteria</b> do you want to use for ranking Options?".to_string(),
                self.choices(pool.criteria.iter(), |name| {
                    IntentAction::SelectCriterion(name.to_string())
                }),
            ),
            Step::FirstEntity => (
                format!("Please let me know a <b>{}</b> you want to rank?", self.subject.noun()),
                self.choices(pool.entities(self.subject).iter(), |name| {
                    self.subject.select_entity(name)
                }),
            ),
            Step::SecondEntity => (
                format!(
                    "Please let me know another <b>{}</b> you want to rank?",
                    self.subject.noun()
                ),
                self.choices(
                    pool.entities(self.subject)
                        .iter()
                        .filter(|name| !state.entities.contains(name)),
                    |name| self.subject.select_entity(name),
                ),
            ),
            Step::Preference => (self.preference_prompt(&state), self.preference_choices(&state)),
            Step::Scale => (self.scale_prompt(&state), self.scale_choices()),
        };

        turn.ask(&prompt, answers, SendOptions::html()).await?;
        Ok(Transition::Await)
    }

    /// Applies a selection that answers the current step.
    ///
    /// Anything else is ignored and the current question asked again.
    pub(super) async fn handle_action(
        &self,
        payload: &ActionPayload,
        turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        let pool = Self::pool(turn);
        let mut state = Self::state(turn);
        let step = self.subject.step(&state);

        let accepted = match (step, &payload.action) {
            (Step::Criterion, IntentAction::SelectCriterion(name))
                if pool.criteria.contains(name) =>
            {
                state.criterion = Some(name.clone());
                true
            }
            (Step::FirstEntity | Step::SecondEntity, action) => {
                match self.subject.entity_in(action) {
                    Some(name)
                        if pool.entities(self.subject).iter().any(|e| e == name)
                            && !state.entities.iter().any(|e| e == name) =>
                    {
                        state.entities.push(name.to_string());
                        true
                    }
                    _ => false,
                }
            }
            (Step::Preference, action) => match self.subject.preference_in(action) {
                Some(Preference::Equal) => {
                    state.preferred = state.entities.first().cloned();
                    state.rank = Some(RankScale::EQUAL);
                    true
                }
                Some(Preference::Entity(name)) if state.entities.contains(name) => {
                    state.preferred = Some(name.clone());
                    true
                }
                _ => false,
            },
            (Step::Scale, IntentAction::SelectRank(scale)) => {
                state.rank = Some(*scale);
                true
            }
            _ => false,
        };

        if accepted {
            self.save(turn, state).await?;
        } else {
            tracing::debug!(
                channel_id = %turn.channel_id(),
                message_id = ?turn.message_id(),
                intent = %self.kind(),
                step = ?step,
                "Selection does not answer the current question"
            );
        }
        Ok(Transition::resume(self.kind()))
    }

    async fn complete(
        &self,
        turn: &mut Turn<'_>,
        state: &PairwiseState,
    ) -> Result<Transition, IntentError> {
        let (Some(preferred), Some(other), Some(rank)) =
            (state.preferred.as_deref(), state.other(), state.rank)
        else {
            return Ok(Transition::auto_advance());
        };

        let mut model = turn.model();
        if let Err(err) = model.rank_pair(state.criterion.as_deref(), preferred, other, rank) {
            tracing::warn!(
                channel_id = %turn.channel_id(),
                intent = %self.kind(),
                error = %err,
                "Decision model rejected the comparison"
            );
            return Ok(Transition::auto_advance());
        }
        turn.commit(model.as_ref()).await?;

        tracing::info!(
            channel_id = %turn.channel_id(),
            message_id = ?turn.message_id(),
            intent = %self.kind(),
            scale = rank.value(),
            "Pairwise rank recorded"
        );
        let summary = self.summary(state.criterion.as_deref(), preferred, other, rank);
        turn.say(&summary, SendOptions::html()).await?;
        Ok(Transition::auto_advance())
    }

    fn unsupported_notice(&self) -> &'static str {
        match self.subject {
            Subject::Items => {
                "We need at least two <b>Options</b> and one <b>Criterion</b> before ranking Options."
            }
            Subject::Criteria => "We need at least two <b>Criteria</b> before ranking Criteria.",
        }
    }

    /// One button per name plus the escape rows.
    fn choices<'n>(
        &self,
        names: impl Iterator<Item = &'n String>,
        action: impl Fn(&str) -> IntentAction,
    ) -> AnswerGrid {
        let mut grid = AnswerGrid::single_column(
            names.map(|name| Answer::new(name.clone(), &self.payload(action(name.as_str())))),
        );
        push_escape_rows(&mut grid);
        grid
    }

    fn preference_prompt(&self, state: &PairwiseState) -> String {
        let (a, b) = pair(state);
        match (self.subject, &state.criterion) {
            (Subject::Items, Some(criterion)) => format!(
                "Base on Criterion <b>'{}'</b>, among Option <b>'{}'</b> & <b>'{}'</b>, which one do you prefer more?",
                escape_html(criterion),
                escape_html(a),
                escape_html(b)
            ),
            _ => format!(
                "Among {} <b>'{}'</b> & <b>'{}'</b>, which one do you prefer more?",
                self.subject.noun(),
                escape_html(a),
                escape_html(b)
            ),
        }
    }

    fn preference_choices(&self, state: &PairwiseState) -> AnswerGrid {
        let mut grid = AnswerGrid::single_column(state.entities.iter().map(|name| {
            Answer::new(
                name.clone(),
                &self.payload(
                    self.subject
                        .select_preference(Preference::Entity(name.clone())),
                ),
            )
        }));
        grid.push_row(vec![Answer::new(
            "Equally preferred.",
            &self.payload(self.subject.select_preference(Preference::Equal)),
        )]);
        push_escape_rows(&mut grid);
        grid
    }

    fn scale_prompt(&self, state: &PairwiseState) -> String {
        let preferred = state.preferred.as_deref().unwrap_or_default();
        let other = state.other().unwrap_or_default();
        let question = match (self.subject, &state.criterion) {
            (Subject::Items, Some(criterion)) => format!(
                "Base on Criterion <b>'{}'</b>, what scale do you rank Option <b>'{}'</b> over <b>'{}'</b>?",
                escape_html(criterion),
                escape_html(preferred),
                escape_html(other)
            ),
            _ => format!(
                "What scale do you rank {} <b>'{}'</b> over <b>'{}'</b>?",
                self.subject.noun(),
                escape_html(preferred),
                escape_html(other)
            ),
        };
        format!("{question}\n\n{}", escape_html(&scale_legend()))
    }

    fn scale_choices(&self) -> AnswerGrid {
        let mut grid = AnswerGrid::single_column(
            RankScale::all()
                .map(|scale| Answer::new(scale.label(), &self.payload(IntentAction::SelectRank(scale)))),
        );
        push_escape_rows(&mut grid);
        grid
    }

    fn summary(&self, criterion: Option<&str>, preferred: &str, other: &str, rank: RankScale) -> String {
        let (preferred, other) = (escape_html(preferred), escape_html(other));
        match (self.subject, criterion) {
            (Subject::Items, Some(criterion)) if rank == RankScale::EQUAL => format!(
                "* Updated Criterion({}) Option Rank: Option <b>'{preferred}'</b> and <b>'{other}'</b> has equally importance. (rank scale 1)",
                escape_html(criterion)
            ),
            (Subject::Items, Some(criterion)) => format!(
                "* Updated Criterion({}) Option Rank: You prefer Option <b>'{preferred}'</b> over <b>'{other}'</b> with rank scale {rank}.",
                escape_html(criterion)
            ),
            _ if rank == RankScale::EQUAL => format!(
                "* Updated Criteria Rank for Criterion <b>'{preferred}'</b> and <b>'{other}'</b> with equally importance. (rank scale 1)"
            ),
            _ => format!(
                "* Updated Criteria Rank for Criterion <b>'{preferred}'</b> over <b>'{other}'</b> with rank scale {rank}."
            ),
        }
    }
}

fn pair(state: &PairwiseState) -> (&str, &str) {
    let first = state.entities.first().map(String::as_str).unwrap_or_default();
    let second = state.entities.get(1).map(String::as_str).unwrap_or_default();
    (first, second)
}

/// Rows offered under every pairwise question.
fn push_escape_rows(grid: &mut AnswerGrid) {
    grid.push_row(vec![Answer::new(
        "* Do something else",
        &ActionPayload::open(IntentKind::SelectMenu, IntentKind::SelectMenu),
    )]);
    grid.push_row(vec![Answer::new(
        "* Restart session.",
        &ActionPayload::open(IntentKind::SelectMenu, IntentKind::Reset),
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    mod steps {
        use super::*;

        #[test]
        fn option_ranking_starts_with_the_criterion() {
            assert_eq!(Subject::Items.step(&PairwiseState::default()), Step::Criterion);
            assert_eq!(
                Subject::Criteria.step(&PairwiseState::default()),
                Step::FirstEntity
            );
        }

        #[test]
        fn seeded_pair_starts_at_the_preference() {
            assert_eq!(
                Subject::Items.step(&PairwiseState::items("p", "A", "B")),
                Step::Preference
            );
            assert_eq!(
                Subject::Criteria.step(&PairwiseState::criteria("p", "q")),
                Step::Preference
            );
        }

        #[test]
        fn walks_to_completion() {
            let mut state = PairwiseState {
                criterion: Some("p".to_string()),
                ..PairwiseState::default()
            };
            assert_eq!(Subject::Items.step(&state), Step::FirstEntity);
            state.entities.push("A".to_string());
            assert_eq!(Subject::Items.step(&state), Step::SecondEntity);
            state.entities.push("B".to_string());
            state.preferred = Some("B".to_string());
            assert_eq!(Subject::Items.step(&state), Step::Scale);
            state.rank = Some(RankScale::EQUAL);
            assert_eq!(Subject::Items.step(&state), Step::Complete);
        }
    }

    mod pool {
        use super::*;

        fn pool(items: &[&str], criteria: &[&str]) -> Pool {
            Pool {
                items: items.iter().map(|s| s.to_string()).collect(),
                criteria: criteria.iter().map(|s| s.to_string()).collect(),
            }
        }

        #[test]
        fn option_ranking_needs_two_options_and_a_criterion() {
            assert!(pool(&["A", "B"], &["p"]).supports(Subject::Items));
            assert!(!pool(&["A"], &["p"]).supports(Subject::Items));
            assert!(!pool(&["A", "B"], &[]).supports(Subject::Items));
        }

        #[test]
        fn criteria_ranking_needs_two_criteria() {
            assert!(pool(&[], &["p", "q"]).supports(Subject::Criteria));
            assert!(!pool(&["A", "B"], &["p"]).supports(Subject::Criteria));
        }

        #[test]
        fn unknown_names_are_not_admitted() {
            let pool = pool(&["A", "B"], &["p"]);
            assert!(pool.admits(Subject::Items, &PairwiseState::items("p", "A", "B")));
            assert!(!pool.admits(Subject::Items, &PairwiseState::items("x", "A", "B")));
            assert!(!pool.admits(Subject::Items, &PairwiseState::items("p", "A", "Z")));
        }
    }

    mod wording {
        use super::*;

        const ITEMS: PairwiseFlow = PairwiseFlow::new(Subject::Items);
        const CRITERIA: PairwiseFlow = PairwiseFlow::new(Subject::Criteria);

        #[test]
        fn summaries_distinguish_equal_preference() {
            let five = RankScale::new(5).unwrap();
            assert_eq!(
                ITEMS.summary(Some("price"), "A", "B", five),
                "* Updated Criterion(price) Option Rank: You prefer Option <b>'A'</b> over <b>'B'</b> with rank scale 5."
            );
            assert_eq!(
                ITEMS.summary(Some("price"), "A", "B", RankScale::EQUAL),
                "* Updated Criterion(price) Option Rank: Option <b>'A'</b> and <b>'B'</b> has equally importance. (rank scale 1)"
            );
            assert_eq!(
                CRITERIA.summary(None, "p", "q", five),
                "* Updated Criteria Rank for Criterion <b>'p'</b> over <b>'q'</b> with rank scale 5."
            );
        }

        #[test]
        fn names_are_escaped_in_prompts() {
            let state = PairwiseState::criteria("<x>", "y&z");
            assert_eq!(
                CRITERIA.preference_prompt(&state),
                "Among Criterion <b>'&lt;x&gt;'</b> & <b>'y&amp;z'</b>, which one do you prefer more?"
            );
        }

        #[test]
        fn every_grid_ends_with_escape_rows() {
            let grid = ITEMS.scale_choices();
            let texts = grid.texts();
            assert_eq!(texts.len(), 11);
            assert_eq!(texts[9], "* Do something else");
            assert_eq!(texts[10], "* Restart session.");
            assert_eq!(grid.payload_for("* Restart session."), Some("SELECT_MENU::RESET"));
        }

        #[test]
        fn preference_grid_offers_equal_choice() {
            let grid = CRITERIA.preference_choices(&PairwiseState::criteria("p", "q"));
            assert_eq!(
                grid.payload_for("Equally preferred."),
                Some("RANK_CRITERIA_PAIRS::SELECT_PREFERRED_CRITERION::")
            );
            assert_eq!(
                grid.payload_for("q"),
                Some("RANK_CRITERIA_PAIRS::SELECT_PREFERRED_CRITERION::q")
            );
        }
    }
}
