//! Routing from a failed evaluation to the sub-flow that fixes it.
//!
//! AutoAdvance and Run share the routing table and differ only in the
//! notice sent before the jump.

use super::{IntentError, Transition, Turn};
use crate::domain::conversation::{IntentKind, IntentState, PairwiseState};
use crate::domain::decision::ModelValidationError;
use crate::ports::{DecisionModel, SendOptions};

/// Which intent's phrasing the notice uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wording {
    /// Invites the user to fill the gap.
    AutoAdvance,
    /// Explains why the ranking cannot be shown.
    Run,
}

/// How a validation error is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remedy {
    /// Ask for the missing names.
    Collect(IntentKind),
    /// Ask for exactly the comparison the model reported missing.
    RankPair(IntentKind, IntentState),
    /// Clear the inconsistent matrix and start ranking it again.
    /// `criterion` is set for an option matrix, unset for the criteria matrix.
    Restart { criterion: Option<String> },
}

/// Maps a validation error to its remedy.
pub fn plan_remedy(error: &ModelValidationError) -> Remedy {
    match error {
        ModelValidationError::NoItem => Remedy::Collect(IntentKind::CollectItems),
        ModelValidationError::NoCriteria => Remedy::Collect(IntentKind::CollectCriteria),
        ModelValidationError::MissingCriteriaItemRank {
            criterion,
            item_a,
            item_b,
        } => Remedy::RankPair(
            IntentKind::RankItemPairs,
            IntentState::RankItemPairs(PairwiseState::items(criterion, item_a, item_b)),
        ),
        ModelValidationError::MissingCriteriaRank {
            criterion_a,
            criterion_b,
        } => Remedy::RankPair(
            IntentKind::RankCriteriaPairs,
            IntentState::RankCriteriaPairs(PairwiseState::criteria(criterion_a, criterion_b)),
        ),
        ModelValidationError::CriteriaItemRankInsufficientConsistencyRatio { criterion } => {
            Remedy::Restart {
                criterion: Some(criterion.clone()),
            }
        }
        ModelValidationError::CriteriaRankInsufficientConsistencyRatio => {
            Remedy::Restart { criterion: None }
        }
    }
}

/// HTML notice explaining `error` to the user.
pub fn notice(error: &ModelValidationError, wording: Wording) -> String {
    let subject = match error {
        ModelValidationError::NoItem => "<b>no Options defined</b>",
        ModelValidationError::NoCriteria => "<b>no Criteria defined</b>",
        ModelValidationError::MissingCriteriaItemRank { .. } => {
            "<b>Criteria based Option Ranking matrix is not filled</b>"
        }
        ModelValidationError::MissingCriteriaRank { .. } => {
            "<b>Criteria Ranking matrix is not filled</b>"
        }
        ModelValidationError::CriteriaItemRankInsufficientConsistencyRatio { .. } => {
            "<b>Criteria Item Ranking matrix Consistency Ratio &gt; 0.1</b>"
        }
        ModelValidationError::CriteriaRankInsufficientConsistencyRatio => {
            "<b>Criteria Ranking matrix Consistency Ratio &gt; 0.1</b>"
        }
    };

    match (plan_remedy(error), wording) {
        (Remedy::Restart { .. }, Wording::AutoAdvance) => format!(
            "Sorry but we find that {subject}. It looks like you have made inconsistent \
             preferences. Please review the preferences again."
        ),
        (Remedy::Restart { .. }, Wording::Run) => format!(
            "Sorry but we cannot proceed if the {subject}. It looks like you have made \
             inconsistent preferences. Please review the preferences again."
        ),
        (Remedy::Collect(_), Wording::AutoAdvance) => format!(
            "We find that there are {subject}. It would be nice if you would let me ask you \
             some questions to fill the analysis context."
        ),
        (Remedy::RankPair(..), Wording::AutoAdvance) => format!(
            "We find the {subject} yet. It would be nice if you would let me ask you some \
             questions to fill the analysis context."
        ),
        (Remedy::Collect(_), Wording::Run) => format!(
            "Sorry but there are missing information in the analysis context. We cannot \
             proceed if there are {subject}."
        ),
        (Remedy::RankPair(..), Wording::Run) => format!(
            "Sorry but there are missing information in the analysis context. We cannot \
             proceed if the {subject} yet."
        ),
    }
}

/// Sends the notice for `error` and returns the jump that remedies it.
pub async fn remediate(
    error: &ModelValidationError,
    wording: Wording,
    mut model: Box<dyn DecisionModel>,
    turn: &mut Turn<'_>,
) -> Result<Transition, IntentError> {
    tracing::info!(
        channel_id = %turn.channel_id(),
        message_id = ?turn.message_id(),
        intent = %turn.session.active_intent,
        code = error.code(),
        "Decision model is not ready"
    );
    turn.say(&notice(error, wording), SendOptions::html()).await?;

    match plan_remedy(error) {
        Remedy::Collect(kind) => Ok(Transition::open(kind)),
        Remedy::RankPair(kind, state) => Ok(Transition::open_seeded(kind, state)),
        Remedy::Restart { criterion } => {
            if let Err(err) = model.reset_pair_ranking(criterion.as_deref()) {
                tracing::warn!(
                    channel_id = %turn.channel_id(),
                    error = %err,
                    "Could not clear inconsistent ranking"
                );
                return Ok(Transition::open(IntentKind::SelectMenu));
            }
            turn.commit(model.as_ref()).await?;

            Ok(match criterion {
                Some(criterion) => match model.items() {
                    [a, b, ..] => Transition::open_seeded(
                        IntentKind::RankItemPairs,
                        IntentState::RankItemPairs(PairwiseState::items(criterion, a, b)),
                    ),
                    _ => Transition::open(IntentKind::RankItemPairs),
                },
                None => match model.criteria() {
                    [a, b, ..] => Transition::open_seeded(
                        IntentKind::RankCriteriaPairs,
                        IntentState::RankCriteriaPairs(PairwiseState::criteria(a, b)),
                    ),
                    _ => Transition::open(IntentKind::RankCriteriaPairs),
                },
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_item_rank() -> ModelValidationError {
        ModelValidationError::MissingCriteriaItemRank {
            criterion: "price".to_string(),
            item_a: "A".to_string(),
            item_b: "B".to_string(),
        }
    }

    mod planning {
        use super::*;

        #[test]
        fn missing_names_are_collected() {
            assert_eq!(
                plan_remedy(&ModelValidationError::NoItem),
                Remedy::Collect(IntentKind::CollectItems)
            );
            assert_eq!(
                plan_remedy(&ModelValidationError::NoCriteria),
                Remedy::Collect(IntentKind::CollectCriteria)
            );
        }

        #[test]
        fn missing_item_rank_seeds_the_named_pair() {
            assert_eq!(
                plan_remedy(&missing_item_rank()),
                Remedy::RankPair(
                    IntentKind::RankItemPairs,
                    IntentState::RankItemPairs(PairwiseState::items("price", "A", "B"))
                )
            );
        }

        #[test]
        fn missing_criteria_rank_seeds_the_named_pair() {
            let error = ModelValidationError::MissingCriteriaRank {
                criterion_a: "p".to_string(),
                criterion_b: "q".to_string(),
            };
            assert_eq!(
                plan_remedy(&error),
                Remedy::RankPair(
                    IntentKind::RankCriteriaPairs,
                    IntentState::RankCriteriaPairs(PairwiseState::criteria("p", "q"))
                )
            );
        }

        #[test]
        fn inconsistency_restarts_the_matrix() {
            let error = ModelValidationError::CriteriaItemRankInsufficientConsistencyRatio {
                criterion: "price".to_string(),
            };
            assert_eq!(
                plan_remedy(&error),
                Remedy::Restart {
                    criterion: Some("price".to_string())
                }
            );
            assert_eq!(
                plan_remedy(&ModelValidationError::CriteriaRankInsufficientConsistencyRatio),
                Remedy::Restart { criterion: None }
            );
        }
    }

    mod notices {
        use super::*;

        #[test]
        fn auto_advance_invites_to_fill_gaps() {
            assert_eq!(
                notice(&ModelValidationError::NoItem, Wording::AutoAdvance),
                "We find that there are <b>no Options defined</b>. It would be nice if you would \
                 let me ask you some questions to fill the analysis context."
            );
            assert_eq!(
                notice(&missing_item_rank(), Wording::AutoAdvance),
                "We find the <b>Criteria based Option Ranking matrix is not filled</b> yet. It \
                 would be nice if you would let me ask you some questions to fill the analysis \
                 context."
            );
        }

        #[test]
        fn run_explains_why_it_cannot_proceed() {
            assert_eq!(
                notice(&ModelValidationError::NoCriteria, Wording::Run),
                "Sorry but there are missing information in the analysis context. We cannot \
                 proceed if there are <b>no Criteria defined</b>."
            );
            assert_eq!(
                notice(
                    &ModelValidationError::CriteriaRankInsufficientConsistencyRatio,
                    Wording::Run
                ),
                "Sorry but we cannot proceed if the <b>Criteria Ranking matrix Consistency Ratio \
                 &gt; 0.1</b>. It looks like you have made inconsistent preferences. Please \
                 review the preferences again."
            );
        }
    }
}
