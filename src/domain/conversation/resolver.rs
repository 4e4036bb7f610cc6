//! Maps free text onto one of the currently offered answers.
//!
//! # Algorithm
//!
//! Each offered text is scored against the input with Jaro-Winkler
//! similarity on trimmed, lower-cased strings. Candidates below the
//! possible-match floor are dropped. Then:
//!
//! 1. No candidates: no match
//! 2. Exactly one exact (1.0) candidate: that candidate
//! 3. Exactly one candidate at or above the high-confidence floor: that candidate
//! 4. Exactly one candidate overall: that candidate
//! 5. Otherwise: the candidates are ambiguous
//!
//! Pure and side-effect free.

/// An offered answer and how closely the input matched it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAnswer {
    pub text: String,
    pub score: f64,
}

/// Outcome of resolving free text against the offered answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing offered is close; treat the input as free text.
    NoMatch,
    /// The input identifies this offered answer.
    Match(String),
    /// Several offered answers are plausible, best first.
    Ambiguous(Vec<String>),
}

/// Approximate answer matcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerResolver {
    high_confidence_threshold: f64,
    possible_match_threshold: f64,
}

impl AnswerResolver {
    pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.95;
    pub const POSSIBLE_MATCH_THRESHOLD: f64 = 0.75;

    pub fn new(high_confidence_threshold: f64, possible_match_threshold: f64) -> Self {
        Self {
            high_confidence_threshold,
            possible_match_threshold,
        }
    }

    /// Similarity of `input` to `offered`, in `[0, 1]`.
    pub fn score(&self, offered: &str, input: &str) -> f64 {
        strsim::jaro_winkler(
            &offered.trim().to_lowercase(),
            &input.trim().to_lowercase(),
        )
    }

    /// Offered answers at or above the possible-match floor, best first.
    ///
    /// Ties keep the order the answers were offered in.
    pub fn candidates<S: AsRef<str>>(&self, offered: &[S], input: &str) -> Vec<ScoredAnswer> {
        let mut candidates: Vec<ScoredAnswer> = offered
            .iter()
            .map(|text| ScoredAnswer {
                text: text.as_ref().to_string(),
                score: self.score(text.as_ref(), input),
            })
            .filter(|c| c.score >= self.possible_match_threshold)
            .collect();
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    /// Resolves `input` against the offered answer texts.
    pub fn resolve<S: AsRef<str>>(&self, offered: &[S], input: &str) -> Resolution {
        let candidates = self.candidates(offered, input);

        let exact: Vec<&ScoredAnswer> = candidates.iter().filter(|c| c.score >= 1.0).collect();
        if exact.len() == 1 {
            return Resolution::Match(exact[0].text.clone());
        }

        let confident: Vec<&ScoredAnswer> = candidates
            .iter()
            .filter(|c| c.score >= self.high_confidence_threshold)
            .collect();
        if confident.len() == 1 {
            return Resolution::Match(confident[0].text.clone());
        }

        match candidates.len() {
            0 => Resolution::NoMatch,
            1 => Resolution::Match(candidates[0].text.clone()),
            _ => Resolution::Ambiguous(candidates.into_iter().map(|c| c.text).collect()),
        }
    }
}

impl Default for AnswerResolver {
    fn default() -> Self {
        Self::new(
            Self::HIGH_CONFIDENCE_THRESHOLD,
            Self::POSSIBLE_MATCH_THRESHOLD,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resolve(offered: &[&str], input: &str) -> Resolution {
        AnswerResolver::default().resolve(offered, input)
    }

    mod decision_rule {
        use super::*;

        #[test]
        fn exact_text_matches() {
            assert_eq!(resolve(&["Yes", "No"], "Yes"), Resolution::Match("Yes".to_string()));
        }

        #[test]
        fn case_variant_is_exact() {
            assert_eq!(resolve(&["Yes", "No"], "  yes "), Resolution::Match("Yes".to_string()));
        }

        #[test]
        fn typo_resolves_to_single_close_answer() {
            assert_eq!(resolve(&["Yes", "No"], "yess"), Resolution::Match("Yes".to_string()));
        }

        #[test]
        fn shared_prefix_is_ambiguous() {
            match resolve(&["Paris", "Panama"], "Pa") {
                Resolution::Ambiguous(texts) => {
                    assert_eq!(texts.len(), 2);
                    assert!(texts.contains(&"Paris".to_string()));
                    assert!(texts.contains(&"Panama".to_string()));
                }
                other => panic!("expected ambiguity, got {:?}", other),
            }
        }

        #[test]
        fn unrelated_text_is_no_match() {
            assert_eq!(resolve(&["Yes", "No"], "laptop, phone"), Resolution::NoMatch);
        }

        #[test]
        fn nothing_offered_is_no_match() {
            let offered: [&str; 0] = [];
            assert_eq!(resolve(&offered, "Yes"), Resolution::NoMatch);
        }

        #[test]
        fn duplicate_exact_answers_are_ambiguous() {
            assert!(matches!(
                resolve(&["Rank", "rank"], "RANK"),
                Resolution::Ambiguous(_)
            ));
        }

        #[test]
        fn exact_match_beats_close_neighbours() {
            assert_eq!(
                resolve(&["Add Options", "Add Criteria", "Run Result"], "Add Options"),
                Resolution::Match("Add Options".to_string())
            );
        }
    }

    #[test]
    fn candidates_are_sorted_best_first() {
        let resolver = AnswerResolver::default();
        let candidates = resolver.candidates(&["Panama", "Paris"], "Pari");
        assert_eq!(candidates[0].text, "Paris");
        assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
    }

    proptest! {
        #[test]
        fn resolution_only_names_offered_answers(
            offered in proptest::collection::vec("[a-z]{1,8}", 1..6),
            input in "[a-z]{0,8}",
        ) {
            match AnswerResolver::default().resolve(&offered, &input) {
                Resolution::NoMatch => {}
                Resolution::Match(text) => prop_assert!(offered.contains(&text)),
                Resolution::Ambiguous(texts) => {
                    prop_assert!(texts.len() >= 2);
                    prop_assert!(texts.iter().all(|t| offered.contains(t)));
                }
            }
        }

        #[test]
        fn unique_offered_text_resolves_to_itself(
            offered in proptest::collection::hash_set("[a-z]{1,8}", 1..6),
            pick in any::<proptest::sample::Index>(),
        ) {
            let offered: Vec<String> = offered.into_iter().collect();
            let chosen = pick.get(&offered).clone();
            prop_assert_eq!(
                AnswerResolver::default().resolve(&offered, &chosen),
                Resolution::Match(chosen)
            );
        }
    }
}
