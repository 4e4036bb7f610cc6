//! Offered answers and the grid layout they are presented in.

use serde::{Deserialize, Serialize};

use super::action::ActionPayload;

/// One selectable answer: the visible text and the payload it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(rename = "actionPayload")]
    pub action_payload: String,
}

impl Answer {
    /// Creates an answer that triggers `payload` when chosen.
    pub fn new(text: impl Into<String>, payload: &ActionPayload) -> Self {
        Self {
            text: text.into(),
            action_payload: payload.encode(),
        }
    }
}

/// Answers laid out as rows of buttons.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerGrid(Vec<Vec<Answer>>);

impl AnswerGrid {
    /// An empty grid; the intent expects free text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// One answer per row.
    pub fn single_column(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self(answers.into_iter().map(|a| vec![a]).collect())
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<Answer>) {
        self.0.push(row);
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Vec<Answer>] {
        &self.0
    }

    /// Returns true if no answers are offered.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|row| row.is_empty())
    }

    /// All answers, row by row.
    pub fn answers(&self) -> impl Iterator<Item = &Answer> {
        self.0.iter().flatten()
    }

    /// Answer texts in grid order.
    pub fn texts(&self) -> Vec<String> {
        self.answers().map(|a| a.text.clone()).collect()
    }

    /// Payload of the first answer with exactly this text.
    pub fn payload_for(&self, text: &str) -> Option<&str> {
        self.answers()
            .find(|a| a.text == text)
            .map(|a| a.action_payload.as_str())
    }

    /// Keeps only rows containing at least one of `texts`, preserving layout.
    pub fn rows_containing(&self, texts: &[String]) -> AnswerGrid {
        Self(
            self.0
                .iter()
                .filter(|row| row.iter().any(|a| texts.contains(&a.text)))
                .cloned()
                .collect(),
        )
    }
}
