//! Conversation domain module.
//!
//! Session state, intent identifiers, offered answers, the action payload
//! codec and the free-text answer resolver.

mod action;
mod answer;
mod intent_kind;
mod resolver;
mod session;
mod update;

pub use action::{ActionPayload, IntentAction, PayloadError, Preference};
pub use answer::{Answer, AnswerGrid};
pub use intent_kind::IntentKind;
pub use resolver::{AnswerResolver, Resolution, ScoredAnswer};
pub use session::{ChannelContext, IntentContext, IntentState, PairwiseState, Session};
pub use update::{Update, UpdateContent};
