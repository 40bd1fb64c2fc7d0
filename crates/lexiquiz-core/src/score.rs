//! Final score and the review list.

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{Direction, WordRecord};

/// Percentage of correct answers, rounded to two decimals.
pub fn compute_score(correct_count: usize, total_rounds: usize) -> Result<f64, QuizError> {
    if total_rounds == 0 {
        return Err(QuizError::DivisionUndefined);
    }
    let raw = 100.0 * correct_count as f64 / total_rounds as f64;
    Ok((raw * 100.0).round() / 100.0)
}

/// One line of the end-of-session review table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRow {
    pub prompt: String,
    pub answer: String,
    pub example: String,
    /// Dictionary lookup key derived from the source term.
    pub external_link_slug: String,
}

/// One row per sampled word, in sample order, regardless of outcome.
pub fn build_review(round_words: &[WordRecord], direction: Direction) -> Vec<ReviewRow> {
    round_words
        .iter()
        .map(|w| ReviewRow {
            prompt: w.prompt(direction).to_string(),
            answer: w.answer(direction).to_string(),
            example: w.example_sentence.clone(),
            external_link_slug: link_slug(&w.source_term),
        })
        .collect()
}

/// Strip parenthetical annotations and comma-separated alternates.
///
/// `"a (se) duce, a merge"` becomes `"a duce"`.
pub fn link_slug(source_term: &str) -> String {
    let mut head = String::with_capacity(source_term.len());
    let mut depth = 0usize;
    for c in source_term.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => break,
            _ if depth == 0 => head.push(c),
            _ => {}
        }
    }
    head.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_rounds_to_two_decimals() {
        assert_eq!(compute_score(10, 10).unwrap(), 100.0);
        assert_eq!(compute_score(0, 7).unwrap(), 0.0);
        assert_eq!(compute_score(1, 3).unwrap(), 33.33);
        assert_eq!(compute_score(2, 3).unwrap(), 66.67);
    }

    #[test]
    fn score_of_zero_rounds_is_undefined() {
        assert_eq!(compute_score(0, 0), Err(QuizError::DivisionUndefined));
    }

    #[test]
    fn slug_strips_annotations_and_alternates() {
        assert_eq!(link_slug("mar"), "mar");
        assert_eq!(link_slug("  câine (m.) "), "câine");
        assert_eq!(link_slug("a (se) duce, a merge"), "a duce");
        assert_eq!(link_slug("frumos, frumoasă"), "frumos");
        assert_eq!(link_slug("casă (f.), case (pl.)"), "casă");
        assert_eq!(link_slug("(rar)"), "");
    }

    #[test]
    fn review_follows_sample_order_and_direction() {
        let words = vec![
            WordRecord::new("mar (m.)", "elma", "noun", "Mărul."),
            WordRecord::new("roșu", "kırmızı", "adj", "Roșu."),
        ];
        let rows = build_review(&words, Direction::TargetToSource);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].prompt, "elma");
        assert_eq!(rows[0].answer, "mar (m.)");
        assert_eq!(rows[0].external_link_slug, "mar");
        assert_eq!(rows[1].example, "Roșu.");
    }
}
