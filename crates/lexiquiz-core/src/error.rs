//! Quiz error types.
//!
//! The conditions a presentation layer must surface to the user when a
//! session cannot be started, plus the fatal word-table format errors.

use std::fmt;

use thiserror::Error;

/// Errors produced by the quiz engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The word table produced zero usable records.
    #[error("the word list contains no usable words")]
    EmptyRepository,

    /// A session start drew an empty sample.
    #[error("no words available to play (requested {requested})")]
    NoWordsAvailable { requested: usize },

    /// A score was requested for a session with zero rounds.
    #[error("score is undefined for a session with zero rounds")]
    DivisionUndefined,

    /// The header row lacks a required column.
    #[error("missing required column: {column}")]
    MissingColumn { column: String },

    /// A quoted field was still open at end of input.
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
}

/// Raised when a session draws fewer words than requested.
///
/// Not an error: the session proceeds with the reduced set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialSampleWarning {
    pub requested: usize,
    pub drawn: usize,
}

impl fmt::Display for PartialSampleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "not enough words in the word list for {} rounds, playing with {} words",
            self.requested, self.drawn
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_sample_message() {
        let w = PartialSampleWarning {
            requested: 10,
            drawn: 3,
        };
        assert_eq!(
            w.to_string(),
            "not enough words in the word list for 10 rounds, playing with 3 words"
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            QuizError::MissingColumn {
                column: "Kelime Türü".into()
            }
            .to_string(),
            "missing required column: Kelime Türü"
        );
        assert!(QuizError::NoWordsAvailable { requested: 10 }
            .to_string()
            .contains("requested 10"));
    }
}
