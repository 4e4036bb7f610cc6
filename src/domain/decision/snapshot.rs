//! Serialized state of the pairwise-comparison model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Square matrix of pairwise judgements.
///
/// Cell `(i, j)` holds how strongly entity `i` is preferred over entity `j`.
/// The diagonal is always `1.0`; `None` marks a comparison not made yet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairwiseMatrix(Vec<Vec<Option<f64>>>);

impl PairwiseMatrix {
    /// Creates an `n x n` matrix with only the diagonal filled.
    pub fn unranked(n: usize) -> Self {
        let mut matrix = Self(Vec::new());
        matrix.grow_to(n);
        matrix
    }

    /// Number of entities the matrix covers.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns the judgement at `(row, col)`, if made.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.0.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Records `row` preferred over `col` with `value`, keeping the
    /// reciprocal cell consistent.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_pair(&mut self, row: usize, col: usize, value: f64) {
        let n = self.size();
        if row >= n || col >= n || row == col || value <= 0.0 {
            return;
        }
        self.0[row][col] = Some(value);
        self.0[col][row] = Some(1.0 / value);
    }

    /// Extends the matrix to `n x n`, keeping existing judgements.
    pub fn grow_to(&mut self, n: usize) {
        for row in self.0.iter_mut() {
            row.resize(n, None);
        }
        while self.0.len() < n {
            self.0.push(vec![None; n]);
        }
        for i in 0..n {
            self.0[i][i] = Some(1.0);
        }
    }

    /// First unset comparison in row-major order over the upper triangle.
    pub fn first_missing_pair(&self) -> Option<(usize, usize)> {
        let n = self.size();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .find(|&(i, j)| self.get(i, j).is_none())
    }

    /// Clears every judgement except the diagonal.
    pub fn clear(&mut self) {
        *self = Self::unranked(self.size());
    }

    /// Returns the raw rows.
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.0
    }
}

/// Snapshot of a decision model, as exported by a `DecisionEngine`.
///
/// Conversation code treats this as opaque: it is stored on the session,
/// handed back to the engine on every operation and replaced wholesale
/// with whatever the engine exports.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionSnapshot {
    /// Options being decided between, in insertion order.
    pub items: Vec<String>,

    /// Criteria the options are judged by, in insertion order.
    pub criteria: Vec<String>,

    /// Per-criterion item comparison matrices.
    #[serde(default)]
    pub criteria_item_rank: BTreeMap<String, PairwiseMatrix>,

    /// Criteria comparison matrix.
    #[serde(default)]
    pub criteria_rank: PairwiseMatrix,
}

impl DecisionSnapshot {
    /// Returns true if neither items nor criteria are defined.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.criteria.is_empty()
    }
}
