//! Decision Engine Adapters
//!
//! Implementations of the DecisionEngine port.
//!
//! - **MockDecisionEngine** - Deterministic structural model for tests and development

mod mock_decision_engine;

pub use mock_decision_engine::{MockDecisionEngine, ModelCall};
