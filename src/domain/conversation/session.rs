//! Per-channel conversation state.
//!
//! A `Session` is plain data. It is loaded from the session repository at
//! the start of every update, mutated by the active intent and written
//! back after each change. Resetting lives with the repository
//! (`ports::reset_session`), not on the value.

use serde::{Deserialize, Serialize};

use super::answer::AnswerGrid;
use super::intent_kind::IntentKind;
use crate::domain::decision::{DecisionSnapshot, RankScale};
use crate::domain::foundation::{ChannelId, MessageId};

/// Scratch state of a pairwise ranking sub-flow.
///
/// Steps are derived from which fields are still unset; see
/// `application::intents::pairwise`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseState {
    /// Criterion the options are compared under. Unused when ranking criteria.
    #[serde(default)]
    pub criterion: Option<String>,

    /// The (up to two) entities being compared, in selection order.
    #[serde(default)]
    pub entities: Vec<String>,

    /// The preferred entity; for an equal preference, the first entity.
    #[serde(default)]
    pub preferred: Option<String>,

    #[serde(default)]
    pub rank: Option<RankScale>,
}

impl PairwiseState {
    /// Seeds an option comparison under `criterion`.
    pub fn items(criterion: impl Into<String>, item_a: impl Into<String>, item_b: impl Into<String>) -> Self {
        Self {
            criterion: Some(criterion.into()),
            entities: vec![item_a.into(), item_b.into()],
            ..Self::default()
        }
    }

    /// Seeds a criteria comparison.
    pub fn criteria(criterion_a: impl Into<String>, criterion_b: impl Into<String>) -> Self {
        Self {
            entities: vec![criterion_a.into(), criterion_b.into()],
            ..Self::default()
        }
    }

    /// The entity compared against the preferred one.
    pub fn other(&self) -> Option<&str> {
        let preferred = self.preferred.as_deref()?;
        self.entities
            .iter()
            .find(|e| e.as_str() != preferred)
            .or_else(|| self.entities.get(1))
            .map(String::as_str)
    }
}

/// Variant-specific scratch state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentState {
    /// The active intent keeps no scratch state.
    #[default]
    Empty,
    RankItemPairs(PairwiseState),
    RankCriteriaPairs(PairwiseState),
}

impl IntentState {
    /// Fresh state for an intent being entered.
    pub fn defaults_for(kind: IntentKind) -> Self {
        match kind {
            IntentKind::RankItemPairs => Self::RankItemPairs(PairwiseState::default()),
            IntentKind::RankCriteriaPairs => Self::RankCriteriaPairs(PairwiseState::default()),
            _ => Self::Empty,
        }
    }

    /// Returns true if this state can belong to `kind`.
    pub fn fits(&self, kind: IntentKind) -> bool {
        match self {
            Self::Empty => !kind.is_pairwise(),
            Self::RankItemPairs(_) => kind == IntentKind::RankItemPairs,
            Self::RankCriteriaPairs(_) => kind == IntentKind::RankCriteriaPairs,
        }
    }

    pub fn pairwise(&self) -> Option<&PairwiseState> {
        match self {
            Self::RankItemPairs(state) | Self::RankCriteriaPairs(state) => Some(state),
            Self::Empty => None,
        }
    }
}

/// Scratch state of the active intent plus the answers currently offered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentContext {
    #[serde(default)]
    pub state: IntentState,

    /// Answers of the last question asked; input for the answer resolver.
    #[serde(default)]
    pub current_question_answers: AnswerGrid,
}

impl IntentContext {
    /// Default context for an intent being entered.
    pub fn for_intent(kind: IntentKind) -> Self {
        Self::with_state(IntentState::defaults_for(kind))
    }

    pub fn with_state(state: IntentState) -> Self {
        Self {
            state,
            current_question_answers: AnswerGrid::empty(),
        }
    }
}

/// Where replies go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContext {
    pub channel_id: ChannelId,

    /// Message the next clarification should edit instead of re-sending.
    #[serde(default)]
    pub pending_edit_message_id: Option<MessageId>,
}

impl ChannelContext {
    pub fn new(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            pending_edit_message_id: None,
        }
    }
}

/// Conversation state of one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Set once the welcome has been sent.
    pub initialized: bool,

    /// Decision model state; only touched through a `DecisionModel`.
    pub decision_snapshot: DecisionSnapshot,

    pub active_intent: IntentKind,

    pub intent_context: IntentContext,

    pub channel_context: ChannelContext,
}

impl Session {
    /// A fresh, uninitialized session for `channel_id`.
    pub fn new(channel_id: ChannelId) -> Self {
        Self {
            initialized: false,
            decision_snapshot: DecisionSnapshot::default(),
            active_intent: IntentKind::SelectMenu,
            intent_context: IntentContext::for_intent(IntentKind::SelectMenu),
            channel_context: ChannelContext::new(channel_id),
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_context.channel_id
    }

    /// Makes `kind` the active intent with the given context.
    pub fn enter(&mut self, kind: IntentKind, context: IntentContext) {
        self.active_intent = kind;
        self.intent_context = context;
    }

    /// Answers currently offered to the user.
    pub fn offered_answers(&self) -> &AnswerGrid {
        &self.intent_context.current_question_answers
    }
}
