//! Session report types with JSON export.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{AnsweredRound, Direction};
use crate::score::{build_review, compute_score, ReviewRow};
use crate::session::SessionState;

/// Summary of a finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Session identifier.
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Direction the session was played in.
    pub direction: Direction,
    pub total_rounds: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    /// Percentage correct, two-decimal precision.
    pub score: f64,
    /// Rounds in the order they were answered.
    pub rounds: Vec<AnsweredRound>,
    /// Every sampled word in sample order.
    pub review: Vec<ReviewRow>,
    /// Accuracy broken down by grammatical category.
    pub categories: BTreeMap<String, CategoryStats>,
}

/// Accuracy for one grammatical category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: usize,
    pub correct: usize,
    /// Percentage correct, two-decimal precision.
    pub score: f64,
}

impl SessionReport {
    /// Build the report for a session that ran at least one round.
    pub fn from_state(state: &SessionState) -> Result<Self, QuizError> {
        let total_rounds = state.round_words().len();
        let score = compute_score(state.correct_count(), total_rounds)?;

        Ok(Self {
            id: state.id(),
            started_at: state.started_at(),
            finished_at: state.finished_at().unwrap_or_else(Utc::now),
            direction: state.direction(),
            total_rounds,
            correct_count: state.correct_count(),
            incorrect_count: state.incorrect_count(),
            score,
            rounds: state.answered().to_vec(),
            review: build_review(state.round_words(), state.direction()),
            categories: category_breakdown(state.answered())?,
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

fn category_breakdown(
    rounds: &[AnsweredRound],
) -> Result<BTreeMap<String, CategoryStats>, QuizError> {
    let mut tallies: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for round in rounds {
        let entry = tallies.entry(round.category.clone()).or_default();
        entry.0 += 1;
        if round.correct {
            entry.1 += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(category, (total, correct))| {
            let score = compute_score(correct, total)?;
            Ok((
                category,
                CategoryStats {
                    total,
                    correct,
                    score,
                },
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::WordRecord;
    use crate::repository::WordRepository;
    use crate::session::SessionController;

    fn finished_report(correct_first: usize) -> SessionReport {
        let repo = Arc::new(WordRepository::from_records(
            (0..6)
                .map(|i| {
                    let category = if i % 2 == 0 { "noun" } else { "verb" };
                    WordRecord::new(format!("ro{i}"), format!("tr{i}"), category, "ex")
                })
                .collect(),
        ));
        let mut c = SessionController::with_seed(Direction::SourceToTarget, 1);
        c.start(repo, 4).unwrap();
        let mut n = 0;
        while !c.is_finished() {
            let answer = c.current_round().correct_answer.clone();
            if n < correct_first {
                c.submit_answer(&answer);
            } else {
                c.submit_answer("wrong");
            }
            n += 1;
        }
        c.report().unwrap()
    }

    #[test]
    fn report_counts_and_score() {
        let report = finished_report(3);
        assert_eq!(report.total_rounds, 4);
        assert_eq!(report.correct_count, 3);
        assert_eq!(report.incorrect_count, 1);
        assert_eq!(report.score, 75.0);
        assert_eq!(report.rounds.len(), 4);
    }

    #[test]
    fn review_covers_every_word_regardless_of_outcome() {
        let report = finished_report(0);
        assert_eq!(report.score, 0.0);
        assert_eq!(report.review.len(), report.total_rounds);
    }

    #[test]
    fn category_breakdown_sums_to_total() {
        let report = finished_report(2);
        let total: usize = report.categories.values().map(|c| c.total).sum();
        let correct: usize = report.categories.values().map(|c| c.correct).sum();
        assert_eq!(total, 4);
        assert_eq!(correct, 2);
    }

    #[test]
    fn save_json_writes_file() {
        let report = finished_report(4);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        report.save_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: SessionReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.id, report.id);
        assert_eq!(parsed.score, 100.0);
    }
}
