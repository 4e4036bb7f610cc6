//! Mock Decision Engine for testing.
//!
//! Provides a deterministic implementation of the DecisionEngine port that
//! performs the structural snapshot operations (adding names, filling and
//! clearing pairwise matrices) without computing real weights.
//!
//! # Features
//!
//! - Completeness checks in model order: no options, no criteria, missing
//!   criteria comparisons, missing option comparisons per criterion
//! - Queued validation failures for consistency-ratio scenarios
//! - Uniform report once the model is complete
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let engine = MockDecisionEngine::new().with_validation_failure(
//!     ModelValidationError::CriteriaRankInsufficientConsistencyRatio,
//! );
//!
//! let model = engine.import_snapshot(&session.decision_snapshot);
//! assert!(model.evaluate().is_err());
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::decision::{
    DecisionReport, DecisionSnapshot, Evaluation, ModelValidationError, PairwiseMatrix, RankScale,
};
use crate::ports::{DecisionEngine, DecisionModel, DecisionModelError};

/// A mutation recorded by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelCall {
    AddItems(Vec<String>),
    AddCriteria(Vec<String>),
    RankPair {
        criterion: Option<String>,
        preferred: String,
        other: String,
        scale: RankScale,
    },
    ResetPairRanking(Option<String>),
}

/// Mock decision engine for testing.
#[derive(Debug, Clone, Default)]
pub struct MockDecisionEngine {
    /// Failures reported by complete models (consumed in order).
    failures: Arc<Mutex<VecDeque<ModelValidationError>>>,
    /// Mutation history for verification.
    calls: Arc<Mutex<Vec<ModelCall>>>,
}

impl MockDecisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a failure reported the next time a complete model is evaluated.
    pub fn with_validation_failure(self, failure: ModelValidationError) -> Self {
        lock(&self.failures).push_back(failure);
        self
    }

    /// Returns all recorded mutations.
    pub fn calls(&self) -> Vec<ModelCall> {
        lock(&self.calls).clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        lock(&self.calls).clear();
    }
}

impl DecisionEngine for MockDecisionEngine {
    fn import_snapshot(&self, snapshot: &DecisionSnapshot) -> Box<dyn DecisionModel> {
        Box::new(MockDecisionModel {
            snapshot: snapshot.clone(),
            failures: Arc::clone(&self.failures),
            calls: Arc::clone(&self.calls),
        })
    }
}

struct MockDecisionModel {
    snapshot: DecisionSnapshot,
    failures: Arc<Mutex<VecDeque<ModelValidationError>>>,
    calls: Arc<Mutex<Vec<ModelCall>>>,
}

impl MockDecisionModel {
    fn record(&self, call: ModelCall) {
        lock(&self.calls).push(call);
    }

    fn item_index(&self, name: &str) -> Result<usize, DecisionModelError> {
        self.snapshot
            .items
            .iter()
            .position(|i| i == name)
            .ok_or_else(|| DecisionModelError::UnknownItem(name.to_string()))
    }

    fn criterion_index(&self, name: &str) -> Result<usize, DecisionModelError> {
        self.snapshot
            .criteria
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| DecisionModelError::UnknownCriterion(name.to_string()))
    }

    /// Brings every matrix in line with the current name lists.
    fn sync_matrices(&mut self) {
        let items = self.snapshot.items.len();
        self.snapshot.criteria_rank.grow_to(self.snapshot.criteria.len());
        for criterion in &self.snapshot.criteria {
            self.snapshot
                .criteria_item_rank
                .entry(criterion.clone())
                .or_default()
                .grow_to(items);
        }
    }

    fn missing_comparison(&self) -> Option<ModelValidationError> {
        let criteria = &self.snapshot.criteria;
        let items = &self.snapshot.items;

        let missing_criteria_pair = sized(&self.snapshot.criteria_rank, criteria.len())
            .first_missing_pair()
            .and_then(|(a, b)| Some((criteria.get(a)?, criteria.get(b)?)));
        if let Some((criterion_a, criterion_b)) = missing_criteria_pair {
            return Some(ModelValidationError::MissingCriteriaRank {
                criterion_a: criterion_a.clone(),
                criterion_b: criterion_b.clone(),
            });
        }

        criteria.iter().find_map(|criterion| {
            let matrix = self
                .snapshot
                .criteria_item_rank
                .get(criterion)
                .cloned()
                .unwrap_or_default();
            let (a, b) = sized(&matrix, items.len()).first_missing_pair()?;
            Some(ModelValidationError::MissingCriteriaItemRank {
                criterion: criterion.clone(),
                item_a: items.get(a)?.clone(),
                item_b: items.get(b)?.clone(),
            })
        })
    }

    fn uniform_report(&self) -> DecisionReport {
        let items = self.snapshot.items.len();
        let criteria = self.snapshot.criteria.len();
        let item_share = 1.0 / items as f64;
        let criterion_share = 1.0 / criteria as f64;

        DecisionReport {
            ranking_matrix: vec![vec![item_share; criteria]; items],
            weight_vector: vec![criterion_share; criteria],
            score_vector: vec![item_share; items],
        }
    }
}

impl DecisionModel for MockDecisionModel {
    fn items(&self) -> &[String] {
        &self.snapshot.items
    }

    fn criteria(&self) -> &[String] {
        &self.snapshot.criteria
    }

    fn add_items(&mut self, items: &[String]) {
        self.record(ModelCall::AddItems(items.to_vec()));
        for item in items {
            if !self.snapshot.items.contains(item) {
                self.snapshot.items.push(item.clone());
            }
        }
        self.sync_matrices();
    }

    fn add_criteria(&mut self, criteria: &[String]) {
        self.record(ModelCall::AddCriteria(criteria.to_vec()));
        for criterion in criteria {
            if !self.snapshot.criteria.contains(criterion) {
                self.snapshot.criteria.push(criterion.clone());
            }
        }
        self.sync_matrices();
    }

    fn rank_pair(
        &mut self,
        criterion: Option<&str>,
        preferred: &str,
        other: &str,
        scale: RankScale,
    ) -> Result<(), DecisionModelError> {
        self.record(ModelCall::RankPair {
            criterion: criterion.map(str::to_string),
            preferred: preferred.to_string(),
            other: other.to_string(),
            scale,
        });
        if preferred == other {
            return Err(DecisionModelError::SelfComparison(preferred.to_string()));
        }

        let value = f64::from(scale.value());
        match criterion {
            Some(criterion) => {
                self.criterion_index(criterion)?;
                let (row, col) = (self.item_index(preferred)?, self.item_index(other)?);
                self.sync_matrices();
                if let Some(matrix) = self.snapshot.criteria_item_rank.get_mut(criterion) {
                    matrix.set_pair(row, col, value);
                }
            }
            None => {
                let (row, col) = (self.criterion_index(preferred)?, self.criterion_index(other)?);
                self.sync_matrices();
                self.snapshot.criteria_rank.set_pair(row, col, value);
            }
        }
        Ok(())
    }

    fn reset_pair_ranking(&mut self, criterion: Option<&str>) -> Result<(), DecisionModelError> {
        self.record(ModelCall::ResetPairRanking(criterion.map(str::to_string)));
        match criterion {
            Some(criterion) => {
                self.criterion_index(criterion)?;
                self.sync_matrices();
                if let Some(matrix) = self.snapshot.criteria_item_rank.get_mut(criterion) {
                    matrix.clear();
                }
            }
            None => {
                self.sync_matrices();
                self.snapshot.criteria_rank.clear();
            }
        }
        Ok(())
    }

    fn evaluate(&self) -> Evaluation {
        if self.snapshot.items.is_empty() {
            return Err(ModelValidationError::NoItem);
        }
        if self.snapshot.criteria.is_empty() {
            return Err(ModelValidationError::NoCriteria);
        }
        if let Some(missing) = self.missing_comparison() {
            return Err(missing);
        }
        if let Some(failure) = lock(&self.failures).pop_front() {
            return Err(failure);
        }
        Ok(self.uniform_report())
    }

    fn export_snapshot(&self) -> DecisionSnapshot {
        self.snapshot.clone()
    }
}

fn sized(matrix: &PairwiseMatrix, n: usize) -> PairwiseMatrix {
    let mut matrix = matrix.clone();
    matrix.grow_to(n);
    matrix
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
