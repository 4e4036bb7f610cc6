//! Outcome of evaluating a decision model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::report::render_table;

/// Why the model cannot produce a ranking yet.
///
/// Every kind is recoverable: the conversation routes to the sub-flow that
/// supplies the missing or inconsistent data.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "context", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelValidationError {
    #[error("no options defined")]
    NoItem,

    #[error("no criteria defined")]
    NoCriteria,

    #[error("criterion '{criterion}' is missing a rank between '{item_a}' and '{item_b}'")]
    #[serde(rename_all = "camelCase")]
    MissingCriteriaItemRank {
        criterion: String,
        item_a: String,
        item_b: String,
    },

    #[error("criteria rank between '{criterion_a}' and '{criterion_b}' is missing")]
    #[serde(rename_all = "camelCase")]
    MissingCriteriaRank {
        criterion_a: String,
        criterion_b: String,
    },

    #[error("option ranking under criterion '{criterion}' is inconsistent")]
    CriteriaItemRankInsufficientConsistencyRatio { criterion: String },

    #[error("criteria ranking is inconsistent")]
    CriteriaRankInsufficientConsistencyRatio,
}

impl ModelValidationError {
    /// Stable error code, as reported by the model.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoItem => "NO_ITEM",
            Self::NoCriteria => "NO_CRITERIA",
            Self::MissingCriteriaItemRank { .. } => "MISSING_CRITERIA_ITEM_RANK",
            Self::MissingCriteriaRank { .. } => "MISSING_CRITERIA_RANK",
            Self::CriteriaItemRankInsufficientConsistencyRatio { .. } => {
                "CRITERIA_ITEM_RANK_INSUFFICIENT_CONSISTENCY_RATIO"
            }
            Self::CriteriaRankInsufficientConsistencyRatio => {
                "CRITERIA_RANK_INSUFFICIENT_CONSISTENCY_RATIO"
            }
        }
    }
}

/// Result tables of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReport {
    /// Item x criterion local scores; one row per item.
    pub ranking_matrix: Vec<Vec<f64>>,

    /// Weight of each criterion.
    pub weight_vector: Vec<f64>,

    /// Overall score of each item.
    pub score_vector: Vec<f64>,
}

impl DecisionReport {
    /// Renders the three result tables as one Markdown code block.
    pub fn render(&self, items: &[String], criteria: &[String]) -> String {
        let weights: Vec<Vec<f64>> = self.weight_vector.iter().map(|w| vec![*w]).collect();
        let scores: Vec<Vec<f64>> = self.score_vector.iter().map(|s| vec![*s]).collect();

        let mut output = String::from("```text\n");
        output.push_str("Item-Criteria Score Matrix:\n");
        output.push_str(&render_table(&self.ranking_matrix, criteria, items, 5));
        output.push_str("\n\nCriteria Weight:\n");
        output.push_str(&render_table(&weights, &["Weight".to_string()], criteria, 5));
        output.push_str("\n\nItem Overall Score Matrix:\n");
        output.push_str(&render_table(&scores, &["Score".to_string()], items, 5));
        output.push_str("\n```");
        output
    }
}

/// Either a ranked result or the reason none could be produced.
pub type Evaluation = Result<DecisionReport, ModelValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_model_wire_names() {
        assert_eq!(ModelValidationError::NoItem.code(), "NO_ITEM");
        assert_eq!(
            ModelValidationError::CriteriaRankInsufficientConsistencyRatio.code(),
            "CRITERIA_RANK_INSUFFICIENT_CONSISTENCY_RATIO"
        );
    }

    #[test]
    fn serializes_with_type_and_context() {
        let err = ModelValidationError::MissingCriteriaItemRank {
            criterion: "price".to_string(),
            item_a: "A".to_string(),
            item_b: "B".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "MISSING_CRITERIA_ITEM_RANK");
        assert_eq!(json["context"]["itemA"], "A");
    }

    #[test]
    fn render_contains_all_three_tables() {
        let report = DecisionReport {
            ranking_matrix: vec![vec![0.75, 0.4], vec![0.25, 0.6]],
            weight_vector: vec![0.5, 0.5],
            score_vector: vec![0.575, 0.425],
        };
        let items = vec!["A".to_string(), "B".to_string()];
        let criteria = vec!["price".to_string(), "support".to_string()];

        let text = report.render(&items, &criteria);

        assert!(text.starts_with("```text\nItem-Criteria Score Matrix:\n"));
        assert!(text.contains("Criteria Weight:"));
        assert!(text.contains("Item Overall Score Matrix:"));
        assert!(text.contains("0.57500"));
        assert!(text.ends_with("```"));
    }
}
