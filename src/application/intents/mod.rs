//! Intent state machine.
//!
//! Every conversational step is an [`Intent`]. Intents never call each
//! other directly: each handler returns a [`Transition`] and the
//! [`IntentRuntime`] applies it, re-initializing the session context and
//! running the next intent's entry action until one of them waits for
//! user input.
//!
//! # Variants
//!
//! | Kind | Module |
//! |------|--------|
//! | `AutoAdvance` | `auto_advance` (routing via `remediation`) |
//! | `SelectMenu` | `select_menu` |
//! | `CollectItems`, `CollectCriteria` | `collect` |
//! | `RankItemPairs` | `rank_item_pairs` (steps in `pairwise`) |
//! | `RankCriteriaPairs` | `rank_criteria_pairs` (steps in `pairwise`) |
//! | `Run` | `run` |
//! | `Reset` | `reset` |

mod auto_advance;
mod collect;
mod pairwise;
mod rank_criteria_pairs;
mod rank_item_pairs;
mod registry;
mod remediation;
mod reset;
mod run;
mod runtime;
mod select_menu;
mod turn;

pub use auto_advance::AutoAdvanceIntent;
pub use collect::{CollectCriteriaIntent, CollectItemsIntent};
pub use rank_criteria_pairs::RankCriteriaPairsIntent;
pub use rank_item_pairs::RankItemPairsIntent;
pub use registry::IntentRegistry;
pub use remediation::{plan_remedy, Remedy, Wording};
pub use reset::ResetIntent;
pub use run::RunIntent;
pub use runtime::{IntentRuntime, MAX_TRANSITIONS};
pub use select_menu::SelectMenuIntent;
pub use turn::Turn;

use async_trait::async_trait;

use crate::domain::conversation::{ActionPayload, AnswerGrid, IntentKind, IntentState, Session};
use crate::ports::{ChannelError, SessionStoreError};

/// Errors that abort handling of an update.
///
/// Bad user input never ends up here; it is routed to AutoAdvance instead.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),

    #[error("Update exceeded {0} intent transitions")]
    TransitionLimit(usize),

    #[error("No intent registered for {0}")]
    Unregistered(IntentKind),
}

/// Context the next intent starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSeed {
    /// The entered intent's defaults.
    Defaults,
    /// The current context, when re-entering the active intent.
    Keep,
    /// A pre-filled state, e.g. the comparison a validation error named.
    Seeded(IntentState),
}

/// What the runtime does after a handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Stop and wait for the next update.
    Await,
    /// Enter an intent and run its entry action.
    Open(IntentKind, ContextSeed),
}

impl Transition {
    pub fn open(kind: IntentKind) -> Self {
        Self::Open(kind, ContextSeed::Defaults)
    }

    pub fn open_seeded(kind: IntentKind, state: IntentState) -> Self {
        Self::Open(kind, ContextSeed::Seeded(state))
    }

    /// Re-runs the entry action of `kind` without touching its context.
    pub fn resume(kind: IntentKind) -> Self {
        Self::Open(kind, ContextSeed::Keep)
    }

    pub fn auto_advance() -> Self {
        Self::open(IntentKind::AutoAdvance)
    }
}

/// Common contract of every conversational step.
#[async_trait]
pub trait Intent: Send + Sync {
    fn kind(&self) -> IntentKind;

    /// Entry action, run each time the intent becomes active.
    async fn init_response(&self, turn: &mut Turn<'_>) -> Result<Transition, IntentError>;

    /// Answers currently offered; empty when free text is expected.
    fn format_answers(&self, session: &Session) -> AnswerGrid {
        session.intent_context.current_question_answers.clone()
    }

    /// Handles text that did not resolve to an offered answer.
    async fn handle_free_text(
        &self,
        _text: &str,
        _turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        Ok(Transition::auto_advance())
    }

    /// Handles a button press or a resolved answer addressed to this intent.
    async fn handle_action(
        &self,
        _payload: &ActionPayload,
        _turn: &mut Turn<'_>,
    ) -> Result<Transition, IntentError> {
        Ok(Transition::auto_advance())
    }
}

/// Escapes text interpolated into HTML-formatted messages.
pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_helpers() {
        assert_eq!(
            Transition::open(IntentKind::Run),
            Transition::Open(IntentKind::Run, ContextSeed::Defaults)
        );
        assert_eq!(
            Transition::resume(IntentKind::RankItemPairs),
            Transition::Open(IntentKind::RankItemPairs, ContextSeed::Keep)
        );
        assert_eq!(
            Transition::auto_advance(),
            Transition::Open(IntentKind::AutoAdvance, ContextSeed::Defaults)
        );
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html("A&B <i>"), "A&amp;B &lt;i&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
