//! Decision Model Port - Interface for the pairwise-comparison engine.
//!
//! The engine owns the meaning of a `DecisionSnapshot`. Conversation code
//! imports the stored snapshot into a model, applies operations, and stores
//! the exported snapshot back on the session. Weight and consistency
//! computations happen behind this port.

use crate::domain::decision::{DecisionSnapshot, Evaluation, RankScale};

/// Errors raised by model mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecisionModelError {
    #[error("Unknown option: {0}")]
    UnknownItem(String),

    #[error("Unknown criterion: {0}")]
    UnknownCriterion(String),

    #[error("Cannot rank '{0}' against itself")]
    SelfComparison(String),
}

/// Factory for decision models.
pub trait DecisionEngine: Send + Sync {
    /// Rebuilds a model from a previously exported snapshot.
    fn import_snapshot(&self, snapshot: &DecisionSnapshot) -> Box<dyn DecisionModel>;
}

/// A live decision model.
pub trait DecisionModel: Send + Sync {
    /// Options, in insertion order.
    fn items(&self) -> &[String];

    /// Criteria, in insertion order.
    fn criteria(&self) -> &[String];

    /// Appends options; names already present are ignored.
    fn add_items(&mut self, items: &[String]);

    /// Appends criteria; names already present are ignored.
    fn add_criteria(&mut self, criteria: &[String]);

    /// Records that `preferred` beats `other` with intensity `scale`.
    ///
    /// With a criterion, `preferred` and `other` are options ranked under
    /// that criterion; without one, they are criteria.
    fn rank_pair(
        &mut self,
        criterion: Option<&str>,
        preferred: &str,
        other: &str,
        scale: RankScale,
    ) -> Result<(), DecisionModelError>;

    /// Clears every judgement of one matrix: the option matrix of
    /// `criterion`, or the criteria matrix when `None`.
    fn reset_pair_ranking(&mut self, criterion: Option<&str>) -> Result<(), DecisionModelError>;

    /// Computes the ranking or reports what is missing or inconsistent.
    fn evaluate(&self) -> Evaluation;

    /// Exports the model state.
    fn export_snapshot(&self) -> DecisionSnapshot;
}
