//! Decision module - Data exchanged with the pairwise-comparison model.
//!
//! The conversation core never computes weights itself. It carries the
//! model's snapshot between Updates, hands it to a `DecisionEngine` for
//! every operation, and interprets the evaluation outcome.
//!
//! # Components
//!
//! - `DecisionSnapshot` - Serialized model state (items, criteria, matrices)
//! - `RankScale` - The 1-9 intensity scale with its named levels
//! - `ModelValidationError` - Why an evaluation could not produce a ranking
//! - `DecisionReport` - A successful evaluation and its table rendering

mod evaluation;
mod report;
mod scale;
mod snapshot;

pub use evaluation::{DecisionReport, Evaluation, ModelValidationError};
pub use report::render_table;
pub use scale::{scale_legend, RankScale, ScaleDefinition, SCALE_DEFINITIONS};
pub use snapshot::{DecisionSnapshot, PairwiseMatrix};
