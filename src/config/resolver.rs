//! Answer resolver configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::conversation::AnswerResolver;

/// Similarity floors used when matching free text to offered answers
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResolverConfig {
    /// A single candidate at or above this score wins outright
    #[serde(default = "default_high_confidence")]
    pub high_confidence_threshold: f64,

    /// Candidates below this score are discarded
    #[serde(default = "default_possible_match")]
    pub possible_match_threshold: f64,
}

impl ResolverConfig {
    /// Validate resolver thresholds
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !in_unit_range(self.high_confidence_threshold) {
            return Err(ValidationError::ThresholdOutOfRange("high_confidence_threshold"));
        }
        if !in_unit_range(self.possible_match_threshold) {
            return Err(ValidationError::ThresholdOutOfRange("possible_match_threshold"));
        }
        if self.possible_match_threshold > self.high_confidence_threshold {
            return Err(ValidationError::ThresholdsInverted);
        }
        Ok(())
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            high_confidence_threshold: default_high_confidence(),
            possible_match_threshold: default_possible_match(),
        }
    }
}

impl AnswerResolver {
    /// Builds a resolver with the configured floors.
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(
            config.high_confidence_threshold,
            config.possible_match_threshold,
        )
    }
}

fn in_unit_range(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

fn default_high_confidence() -> f64 {
    AnswerResolver::HIGH_CONFIDENCE_THRESHOLD
}

fn default_possible_match() -> f64 {
    AnswerResolver::POSSIBLE_MATCH_THRESHOLD
}
