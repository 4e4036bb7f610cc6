//! Applies transitions and routes inbound updates to the active intent.

use std::sync::Arc;

use super::{ContextSeed, Intent, IntentError, IntentRegistry, Transition, Turn};
use crate::domain::conversation::{
    ActionPayload, AnswerResolver, IntentContext, IntentKind, Resolution, Session, Update,
    UpdateContent,
};
use crate::ports::{Channel, DecisionEngine, SessionRepository};

/// Most intents one update may pass through before handling is aborted.
pub const MAX_TRANSITIONS: usize = 16;

const CLARIFICATION_PROMPT: &str = "Do you mean these?";

/// Drives the intent state machine for one session at a time.
#[derive(Clone)]
pub struct IntentRuntime {
    registry: IntentRegistry,
    sessions: Arc<dyn SessionRepository>,
    channel: Arc<dyn Channel>,
    engine: Arc<dyn DecisionEngine>,
    resolver: AnswerResolver,
}

impl IntentRuntime {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        channel: Arc<dyn Channel>,
        engine: Arc<dyn DecisionEngine>,
    ) -> Self {
        Self {
            registry: IntentRegistry::standard(),
            sessions,
            channel,
            engine,
            resolver: AnswerResolver::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: AnswerResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_registry(mut self, registry: IntentRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Enters `kind` with the given context and runs its entry action.
    pub async fn open(
        &self,
        kind: IntentKind,
        update: Option<&Update>,
        session: &mut Session,
        seed: ContextSeed,
    ) -> Result<(), IntentError> {
        let mut turn = self.turn(session, update);
        self.drive(&mut turn, Transition::Open(kind, seed)).await
    }

    /// Hands `update` to the active intent (or to `kind`, which becomes
    /// active with its default context).
    pub async fn forward(
        &self,
        kind: Option<IntentKind>,
        update: &Update,
        session: &mut Session,
    ) -> Result<(), IntentError> {
        let mut turn = self.turn(session, Some(update));
        if let Some(kind) = kind.filter(|k| *k != turn.session.active_intent) {
            turn.session.enter(kind, IntentContext::for_intent(kind));
            turn.persist().await?;
        }

        let next = self.route_update(&mut turn, update).await?;
        self.drive(&mut turn, next).await
    }

    fn turn<'a>(&'a self, session: &'a mut Session, update: Option<&'a Update>) -> Turn<'a> {
        Turn::new(
            session,
            update,
            self.channel.as_ref(),
            self.sessions.as_ref(),
            self.engine.as_ref(),
        )
    }

    /// Registered intent for `kind`, falling back to AutoAdvance.
    fn intent_for(&self, kind: IntentKind) -> Result<Arc<dyn Intent>, IntentError> {
        if let Some(intent) = self.registry.get(kind) {
            return Ok(intent);
        }
        tracing::warn!(intent = %kind, "Intent not registered, falling back to auto-advance");
        self.registry
            .get(IntentKind::AutoAdvance)
            .ok_or(IntentError::Unregistered(kind))
    }

    /// Runs entry actions until an intent waits for input.
    async fn drive(&self, turn: &mut Turn<'_>, first: Transition) -> Result<(), IntentError> {
        let mut next = first;
        let mut steps = 0;

        while let Transition::Open(requested, seed) = next {
            steps += 1;
            if steps > MAX_TRANSITIONS {
                tracing::error!(
                    channel_id = %turn.channel_id(),
                    message_id = ?turn.message_id(),
                    intent = %requested,
                    "Update exceeded the transition limit"
                );
                return Err(IntentError::TransitionLimit(MAX_TRANSITIONS));
            }

            let intent = self.intent_for(requested)?;
            let kind = intent.kind();
            let re_entering = kind == turn.session.active_intent;
            match seed {
                ContextSeed::Keep if re_entering => {}
                ContextSeed::Seeded(state) if state.fits(kind) => {
                    turn.session.enter(kind, IntentContext::with_state(state));
                }
                ContextSeed::Seeded(_) => {
                    tracing::warn!(
                        channel_id = %turn.channel_id(),
                        intent = %kind,
                        "Seeded context does not fit intent, using defaults"
                    );
                    turn.session.enter(kind, IntentContext::for_intent(kind));
                }
                ContextSeed::Keep | ContextSeed::Defaults => {
                    turn.session.enter(kind, IntentContext::for_intent(kind));
                }
            }
            turn.persist().await?;

            tracing::debug!(
                channel_id = %turn.channel_id(),
                message_id = ?turn.message_id(),
                intent = %kind,
                "Entering intent"
            );
            next = intent.init_response(turn).await?;
        }
        Ok(())
    }

    /// First transition for an inbound update.
    async fn route_update(
        &self,
        turn: &mut Turn<'_>,
        update: &Update,
    ) -> Result<Transition, IntentError> {
        match &update.content {
            UpdateContent::Action(raw) => self.route_raw_payload(turn, raw).await,
            UpdateContent::Text(text) => {
                let intent = self.intent_for(turn.session.active_intent)?;
                let answers = intent.format_answers(&*turn.session);
                if answers.is_empty() {
                    return intent.handle_free_text(text, turn).await;
                }

                match self.resolver.resolve(&answers.texts(), text) {
                    Resolution::NoMatch => intent.handle_free_text(text, turn).await,
                    Resolution::Match(matched) => match answers.payload_for(&matched) {
                        Some(raw) => self.route_raw_payload(turn, raw).await,
                        None => Ok(Transition::auto_advance()),
                    },
                    Resolution::Ambiguous(candidates) => {
                        tracing::debug!(
                            channel_id = %turn.channel_id(),
                            message_id = ?turn.message_id(),
                            intent = %turn.session.active_intent,
                            candidates = candidates.len(),
                            "Answer is ambiguous, asking for clarification"
                        );
                        turn.clarify(CLARIFICATION_PROMPT, answers.rows_containing(&candidates))
                            .await?;
                        Ok(Transition::Await)
                    }
                }
            }
        }
    }

    async fn route_raw_payload(
        &self,
        turn: &mut Turn<'_>,
        raw: &str,
    ) -> Result<Transition, IntentError> {
        match ActionPayload::parse(raw) {
            Ok(payload) => self.route_action(turn, &payload).await,
            Err(err) => {
                tracing::warn!(
                    channel_id = %turn.channel_id(),
                    message_id = ?turn.message_id(),
                    intent = %turn.session.active_intent,
                    error = %err,
                    "Malformed action payload"
                );
                Ok(Transition::auto_advance())
            }
        }
    }

    /// Delivers `payload` to the intent that produced it.
    async fn route_action(
        &self,
        turn: &mut Turn<'_>,
        payload: &ActionPayload,
    ) -> Result<Transition, IntentError> {
        let source = payload.source;
        if source != turn.session.active_intent {
            tracing::debug!(
                channel_id = %turn.channel_id(),
                message_id = ?turn.message_id(),
                intent = %turn.session.active_intent,
                target = %source,
                "Cross-dispatching action"
            );
            turn.session.enter(source, IntentContext::for_intent(source));
            turn.persist().await?;
        }

        let intent = self.intent_for(source)?;
        intent.handle_action(payload, turn).await
    }
}
