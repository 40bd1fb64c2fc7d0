//! Core data model types for lexiquiz.
//!
//! These are the vocabulary records and the per-round values that flow
//! between the session controller and a presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single bilingual vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordRecord {
    /// Term in the source language (e.g. Romanian).
    pub source_term: String,
    /// Term in the target language (e.g. Turkish).
    pub target_term: String,
    /// Grammatical category (noun, verb, adjective, ...).
    pub category: String,
    /// Example sentence using the source term.
    pub example_sentence: String,
}

impl WordRecord {
    pub fn new(
        source_term: impl Into<String>,
        target_term: impl Into<String>,
        category: impl Into<String>,
        example_sentence: impl Into<String>,
    ) -> Self {
        Self {
            source_term: source_term.into(),
            target_term: target_term.into(),
            category: category.into(),
            example_sentence: example_sentence.into(),
        }
    }

    /// The term shown to the player for the given direction.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::SourceToTarget => &self.source_term,
            Direction::TargetToSource => &self.target_term,
        }
    }

    /// The term the player must pick for the given direction.
    pub fn answer(&self, direction: Direction) -> &str {
        match direction {
            Direction::SourceToTarget => &self.target_term,
            Direction::TargetToSource => &self.source_term,
        }
    }
}

/// Which language is the prompt and which is the answer set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    SourceToTarget,
    TargetToSource,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::SourceToTarget => Direction::TargetToSource,
            Direction::TargetToSource => Direction::SourceToTarget,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::SourceToTarget => write!(f, "source-to-target"),
            Direction::TargetToSource => write!(f, "target-to-source"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "source-to-target" | "s2t" | "forward" => Ok(Direction::SourceToTarget),
            "target-to-source" | "t2s" | "reverse" => Ok(Direction::TargetToSource),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// The data a presentation layer needs to render one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundPrompt {
    /// Term shown to the player.
    pub prompt: String,
    /// The option that counts as correct.
    pub correct_answer: String,
    /// Grammatical category of the prompted word.
    pub category: String,
    /// Shuffled answer options, the correct one included exactly once.
    pub options: Vec<String>,
}

/// Result of submitting an answer for the current round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub correct: bool,
    pub correct_answer: String,
}

/// A resolved round, kept for the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredRound {
    pub prompt: String,
    pub category: String,
    pub selected: String,
    pub correct_answer: String,
    pub correct: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_display_and_parse() {
        assert_eq!(Direction::SourceToTarget.to_string(), "source-to-target");
        assert_eq!(
            "T2S".parse::<Direction>().unwrap(),
            Direction::TargetToSource
        );
        assert_eq!(
            "source-to-target".parse::<Direction>().unwrap(),
            Direction::SourceToTarget
        );
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn direction_flips_back() {
        let d = Direction::default();
        assert_eq!(d, Direction::SourceToTarget);
        assert_eq!(d.flipped(), Direction::TargetToSource);
        assert_eq!(d.flipped().flipped(), d);
    }

    #[test]
    fn prompt_and_answer_swap_with_direction() {
        let w = WordRecord::new("mar", "elma", "noun", "Mărul este roșu.");
        assert_eq!(w.prompt(Direction::SourceToTarget), "mar");
        assert_eq!(w.answer(Direction::SourceToTarget), "elma");
        assert_eq!(w.prompt(Direction::TargetToSource), "elma");
        assert_eq!(w.answer(Direction::TargetToSource), "mar");
    }

    #[test]
    fn direction_serde_kebab_case() {
        let json = serde_json::to_string(&Direction::TargetToSource).unwrap();
        assert_eq!(json, "\"target-to-source\"");
    }
}
