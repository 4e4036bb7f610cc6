//! Identifiers of the conversational intents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A named conversational mode with its own question sequence.
///
/// The SCREAMING_SNAKE_CASE form is the intent id used on the wire
/// (leading segment of every action payload).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentKind {
    /// Inspects the decision model and silently routes to the next step.
    AutoAdvance,
    /// Main action menu.
    SelectMenu,
    /// Free-text entry of options.
    CollectItems,
    /// Free-text entry of criteria.
    CollectCriteria,
    /// Pairwise option comparison under one criterion.
    RankItemPairs,
    /// Pairwise criteria comparison.
    RankCriteriaPairs,
    /// Evaluate and report the ranking.
    Run,
    /// Confirm and clear the session.
    Reset,
}

impl IntentKind {
    /// Every intent, in registry order.
    pub const ALL: [IntentKind; 8] = [
        IntentKind::AutoAdvance,
        IntentKind::SelectMenu,
        IntentKind::CollectItems,
        IntentKind::CollectCriteria,
        IntentKind::RankItemPairs,
        IntentKind::RankCriteriaPairs,
        IntentKind::Run,
        IntentKind::Reset,
    ];

    /// Wire id of the intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoAdvance => "AUTO_ADVANCE",
            Self::SelectMenu => "SELECT_MENU",
            Self::CollectItems => "COLLECT_ITEMS",
            Self::CollectCriteria => "COLLECT_CRITERIA",
            Self::RankItemPairs => "RANK_ITEM_PAIRS",
            Self::RankCriteriaPairs => "RANK_CRITERIA_PAIRS",
            Self::Run => "RUN",
            Self::Reset => "RESET",
        }
    }

    /// Returns true for the intents that walk a pairwise sub-flow.
    pub fn is_pairwise(&self) -> bool {
        matches!(self, Self::RankItemPairs | Self::RankCriteriaPairs)
    }
}

impl Default for IntentKind {
    fn default() -> Self {
        Self::SelectMenu
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("intent_id", format!("unknown intent '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intent_is_select_menu() {
        assert_eq!(IntentKind::default(), IntentKind::SelectMenu);
    }

    #[test]
    fn wire_ids_parse_back() {
        for kind in IntentKind::ALL {
            assert_eq!(kind.as_str().parse::<IntentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&IntentKind::RankCriteriaPairs).unwrap();
        assert_eq!(json, "\"RANK_CRITERIA_PAIRS\"");
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert!("SELECT_INTENT".parse::<IntentKind>().is_err());
        assert!("".parse::<IntentKind>().is_err());
    }

    #[test]
    fn only_ranking_intents_are_pairwise() {
        let pairwise: Vec<_> = IntentKind::ALL.iter().filter(|k| k.is_pairwise()).collect();
        assert_eq!(
            pairwise,
            vec![&IntentKind::RankItemPairs, &IntentKind::RankCriteriaPairs]
        );
    }
}
