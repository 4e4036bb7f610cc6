//! Typed action payloads and their `::`-delimited wire format.
//!
//! Button callbacks carry `"<intentId>::<action>[::<data>]"`. Payloads are
//! parsed into `ActionPayload` at the boundary; nothing downstream splits
//! strings.
//!
//! Two shapes exist on the wire:
//! - `<source>::<ACTION>::<data>` for sub-flow selections
//! - `<source>::<token>` where the token is a target intent id (menu
//!   navigation) or `yes`/`no` (confirmation)

use std::fmt;

use thiserror::Error;

use super::intent_kind::IntentKind;
use crate::domain::decision::RankScale;
use crate::domain::foundation::ValidationError;

const SEPARATOR: &str = "::";
/// Data sent for "equally preferred". Entity names are never empty.
const EQUAL_DATA: &str = "";

/// Errors raised while decoding a payload string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("Payload is empty")]
    Empty,

    #[error("Payload '{0}' has no '::' separator")]
    MissingSeparator(String),

    #[error("Payload names unknown intent '{0}'")]
    UnknownIntent(String),

    #[error("Payload action '{0}' is not recognised")]
    UnknownAction(String),

    #[error("Payload action '{0}' requires data")]
    MissingData(&'static str),

    #[error("Payload data is invalid: {0}")]
    InvalidData(#[from] ValidationError),
}

/// Which entity the user prefers in a pairwise comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preference {
    /// Both are equally preferred.
    Equal,
    /// The named entity is preferred.
    Entity(String),
}

impl Preference {
    fn parse(data: &str) -> Self {
        if data == EQUAL_DATA {
            Self::Equal
        } else {
            Self::Entity(data.to_string())
        }
    }

    fn as_data(&self) -> &str {
        match self {
            Self::Equal => EQUAL_DATA,
            Self::Entity(name) => name,
        }
    }
}

/// What a payload asks the receiving intent to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentAction {
    /// Switch to another intent.
    Open(IntentKind),
    /// Answer a yes/no question.
    Confirm(bool),
    SelectCriterion(String),
    SelectItem(String),
    SelectPreferredItem(Preference),
    SelectPreferredCriterion(Preference),
    SelectRank(RankScale),
}

impl IntentAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Open(_) | Self::Confirm(_) => "",
            Self::SelectCriterion(_) => "SELECT_CRITERION",
            Self::SelectItem(_) => "SELECT_ITEM",
            Self::SelectPreferredItem(_) => "SELECT_PREFERRED_ITEM",
            Self::SelectPreferredCriterion(_) => "SELECT_PREFERRED_CRITERION",
            Self::SelectRank(_) => "SELECT_RANK",
        }
    }
}

/// A decoded button payload: which intent produced it and what it asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPayload {
    pub source: IntentKind,
    pub action: IntentAction,
}

impl ActionPayload {
    pub fn new(source: IntentKind, action: IntentAction) -> Self {
        Self { source, action }
    }

    /// Menu-style payload that opens `target`.
    pub fn open(source: IntentKind, target: IntentKind) -> Self {
        Self::new(source, IntentAction::Open(target))
    }

    /// Decodes a wire payload, splitting on the first two separators.
    pub fn parse(raw: &str) -> Result<Self, PayloadError> {
        if raw.trim().is_empty() {
            return Err(PayloadError::Empty);
        }

        let mut parts = raw.splitn(3, SEPARATOR);
        let source_id = parts.next().unwrap_or_default();
        let action_token = parts
            .next()
            .ok_or_else(|| PayloadError::MissingSeparator(raw.to_string()))?;
        let data = parts.next();

        let source = source_id
            .parse::<IntentKind>()
            .map_err(|_| PayloadError::UnknownIntent(source_id.to_string()))?;

        let action = match (action_token, data) {
            ("SELECT_CRITERION", Some(d)) => IntentAction::SelectCriterion(d.to_string()),
            ("SELECT_ITEM", Some(d)) => IntentAction::SelectItem(d.to_string()),
            ("SELECT_PREFERRED_ITEM", Some(d)) => IntentAction::SelectPreferredItem(Preference::parse(d)),
            ("SELECT_PREFERRED_CRITERION", Some(d)) => {
                IntentAction::SelectPreferredCriterion(Preference::parse(d))
            }
            ("SELECT_RANK", Some(d)) => IntentAction::SelectRank(d.parse::<RankScale>()?),
            ("SELECT_CRITERION", None) => return Err(PayloadError::MissingData("SELECT_CRITERION")),
            ("SELECT_ITEM", None) => return Err(PayloadError::MissingData("SELECT_ITEM")),
            ("SELECT_PREFERRED_ITEM", None) => return Err(PayloadError::MissingData("SELECT_PREFERRED_ITEM")),
            ("SELECT_PREFERRED_CRITERION", None) => {
                return Err(PayloadError::MissingData("SELECT_PREFERRED_CRITERION"))
            }
            ("SELECT_RANK", None) => return Err(PayloadError::MissingData("SELECT_RANK")),
            ("yes", None) => IntentAction::Confirm(true),
            ("no", None) => IntentAction::Confirm(false),
            (token, None) => IntentAction::Open(
                token
                    .parse::<IntentKind>()
                    .map_err(|_| PayloadError::UnknownAction(token.to_string()))?,
            ),
            (token, Some(_)) => return Err(PayloadError::UnknownAction(token.to_string())),
        };

        Ok(Self { source, action })
    }

    /// Encodes the payload into its wire form.
    pub fn encode(&self) -> String {
        let source = self.source.as_str();
        match &self.action {
            IntentAction::Open(target) => format!("{source}{SEPARATOR}{target}"),
            IntentAction::Confirm(true) => format!("{source}{SEPARATOR}yes"),
            IntentAction::Confirm(false) => format!("{source}{SEPARATOR}no"),
            IntentAction::SelectCriterion(d) | IntentAction::SelectItem(d) => {
                format!("{source}{SEPARATOR}{}{SEPARATOR}{d}", self.action.name())
            }
            IntentAction::SelectPreferredItem(p) | IntentAction::SelectPreferredCriterion(p) => {
                format!("{source}{SEPARATOR}{}{SEPARATOR}{}", self.action.name(), p.as_data())
            }
            IntentAction::SelectRank(scale) => {
                format!("{source}{SEPARATOR}{}{SEPARATOR}{scale}", self.action.name())
            }
        }
    }
}

impl fmt::Display for ActionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
