//! The 1-9 pairwise intensity scale.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Named level of the intensity scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDefinition {
    pub scale: u8,
    pub definition: &'static str,
    pub explanation: &'static str,
}

/// The odd scale values carry names; even values sit between them.
pub const SCALE_DEFINITIONS: [ScaleDefinition; 5] = [
    ScaleDefinition {
        scale: 1,
        definition: "Equal Importance",
        explanation: "Two activities contribute equally to the objective",
    },
    ScaleDefinition {
        scale: 3,
        definition: "Moderate importance",
        explanation: "Experience and judgement slightly favor one activity over another",
    },
    ScaleDefinition {
        scale: 5,
        definition: "Strong importance",
        explanation: "Experience and judgement strongly favor one activity over another",
    },
    ScaleDefinition {
        scale: 7,
        definition: "Very strong importance",
        explanation: "An activity is favored very strongly over another; its dominance demonstrated in practice",
    },
    ScaleDefinition {
        scale: 9,
        definition: "Extreme importance",
        explanation: "The evidence favoring one activity over another is of the highest possible order of affirmation",
    },
];

/// How strongly one entity is preferred over another, 1 (equal) to 9 (extreme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RankScale(u8);

impl RankScale {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    /// Both entities matter equally.
    pub const EQUAL: RankScale = RankScale(1);

    /// Creates a scale value.
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` unless `value` is within 1..=9.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::out_of_range(
                "rank_scale",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ))
        }
    }

    /// Returns the raw value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Every scale value in ascending order.
    pub fn all() -> impl Iterator<Item = RankScale> {
        (Self::MIN..=Self::MAX).map(RankScale)
    }

    /// Named definition, for odd values only.
    pub fn definition(&self) -> Option<&'static ScaleDefinition> {
        SCALE_DEFINITIONS.iter().find(|d| d.scale == self.0)
    }

    /// Button label, e.g. `(5) Strong importance` or `(4) Between (3) and (5).`
    pub fn label(&self) -> String {
        match self.definition() {
            Some(def) => format!("({}) {}", self.0, def.definition),
            None => format!("({}) Between ({}) and ({}).", self.0, self.0 - 1, self.0 + 1),
        }
    }
}

impl fmt::Display for RankScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for RankScale {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RankScale> for u8 {
    fn from(scale: RankScale) -> Self {
        scale.0
    }
}

impl FromStr for RankScale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u8>()
            .map_err(|e| ValidationError::invalid_format("rank_scale", e.to_string()))?;
        Self::new(value)
    }
}

/// Textual legend shown alongside the scale buttons.
pub fn scale_legend() -> String {
    let mut legend = SCALE_DEFINITIONS
        .iter()
        .map(|d| format!("({}) {}: {}", d.scale, d.definition, d.explanation))
        .collect::<Vec<_>>()
        .join("\n");
    legend.push_str("\n(2,4,6,8) intermediate values");
    legend
}
