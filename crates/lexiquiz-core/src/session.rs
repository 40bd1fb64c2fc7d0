//! The quiz session controller.
//!
//! A state machine (`NotStarted -> InProgress -> Finished`) driven
//! synchronously by a presentation layer: start a session, fetch the current
//! round, submit an answer, repeat until finished, then build the report.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::distractor::{self, DEFAULT_DISTRACTOR_COUNT};
use crate::error::{PartialSampleWarning, QuizError};
use crate::model::{AnsweredRound, Direction, RoundOutcome, RoundPrompt, WordRecord};
use crate::report::SessionReport;
use crate::repository::WordRepository;

/// Number of rounds in a session unless the caller asks otherwise.
pub const DEFAULT_WORD_COUNT: usize = 10;

/// Lifecycle phase of the controller's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::NotStarted => write!(f, "not started"),
            Phase::InProgress => write!(f, "in progress"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Mutable state of one session, owned by the controller.
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    direction: Direction,
    round_words: Vec<WordRecord>,
    current_index: usize,
    correct_count: usize,
    incorrect_count: usize,
    answered: Vec<AnsweredRound>,
    pool: Arc<WordRepository>,
}

impl SessionState {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Direction snapshotted when the session started.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Sampled words in presentation order.
    pub fn round_words(&self) -> &[WordRecord] {
        &self.round_words
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    pub fn remaining_count(&self) -> usize {
        self.round_words.len() - self.current_index
    }

    /// Resolved rounds in the order they were answered.
    pub fn answered(&self) -> &[AnsweredRound] {
        &self.answered
    }

    pub fn is_finished(&self) -> bool {
        self.current_index == self.round_words.len()
    }
}

/// What `start` reports back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStart {
    pub session_id: Uuid,
    pub direction: Direction,
    /// Number of rounds in the session.
    pub drawn: usize,
    /// Set when fewer words than requested were available.
    pub warning: Option<PartialSampleWarning>,
}

/// Drives quiz sessions over a word repository.
pub struct SessionController<R = ChaCha8Rng> {
    direction: Direction,
    distractor_count: usize,
    state: Option<SessionState>,
    current: Option<RoundPrompt>,
    rng: R,
}

impl SessionController<ChaCha8Rng> {
    /// Create a controller seeded from system entropy.
    pub fn new(direction: Direction) -> Self {
        Self::with_rng(direction, ChaCha8Rng::from_entropy())
    }

    /// Create a controller whose sessions are reproducible for a given seed.
    pub fn with_seed(direction: Direction, seed: u64) -> Self {
        Self::with_rng(direction, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SessionController<R> {
    pub fn with_rng(direction: Direction, rng: R) -> Self {
        Self {
            direction,
            distractor_count: DEFAULT_DISTRACTOR_COUNT,
            state: None,
            current: None,
            rng,
        }
    }

    /// Set how many wrong options each round offers at most.
    pub fn with_distractor_count(mut self, count: usize) -> Self {
        self.distractor_count = count;
        self
    }

    /// Start a new session of up to `word_count` rounds.
    ///
    /// Any previous session is discarded. The controller's current direction
    /// is snapshotted and used for every round of the new session.
    pub fn start(
        &mut self,
        repository: Arc<WordRepository>,
        word_count: usize,
    ) -> Result<SessionStart, QuizError> {
        self.state = None;
        self.current = None;

        let round_words = repository.sample_random(word_count, &mut self.rng);
        if round_words.is_empty() {
            tracing::warn!("no words available for a session of {word_count} rounds");
            return Err(QuizError::NoWordsAvailable {
                requested: word_count,
            });
        }

        let warning = (round_words.len() < word_count).then(|| PartialSampleWarning {
            requested: word_count,
            drawn: round_words.len(),
        });
        if let Some(w) = &warning {
            tracing::warn!("{w}");
        }

        let state = SessionState {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            direction: self.direction,
            current_index: 0,
            correct_count: 0,
            incorrect_count: 0,
            answered: Vec::with_capacity(round_words.len()),
            round_words,
            pool: repository,
        };

        tracing::info!(
            "session {} started: {} rounds, {}",
            state.id,
            state.round_words.len(),
            state.direction
        );

        let start = SessionStart {
            session_id: state.id,
            direction: state.direction,
            drawn: state.round_words.len(),
            warning,
        };
        self.state = Some(state);
        Ok(start)
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            None => Phase::NotStarted,
            Some(s) if s.is_finished() => Phase::Finished,
            Some(_) => Phase::InProgress,
        }
    }

    /// The round awaiting an answer.
    ///
    /// Repeated calls within one round return the same options.
    ///
    /// # Panics
    ///
    /// Panics unless the session is in progress; check `is_finished` first.
    pub fn current_round(&mut self) -> &RoundPrompt {
        let round = match self.current.take() {
            Some(round) => round,
            None => self.build_round(),
        };
        self.current.insert(round)
    }

    fn build_round(&mut self) -> RoundPrompt {
        let state = match &self.state {
            Some(s) if !s.is_finished() => s,
            _ => panic!("current_round called while session is {}", self.phase()),
        };

        let word = &state.round_words[state.current_index];
        let direction = state.direction;
        let correct_answer = word.answer(direction);

        let distractors = distractor::generate(
            correct_answer,
            &word.category,
            &state.pool,
            direction,
            self.distractor_count,
            &mut self.rng,
        );
        let options = distractor::assemble_options(correct_answer, distractors, &mut self.rng);

        tracing::debug!(
            "round {}/{}: '{}' with {} options",
            state.current_index + 1,
            state.round_words.len(),
            word.prompt(direction),
            options.len()
        );

        RoundPrompt {
            prompt: word.prompt(direction).to_string(),
            correct_answer: correct_answer.to_string(),
            category: word.category.clone(),
            options,
        }
    }

    /// Resolve the current round with the player's choice.
    ///
    /// The caller must submit exactly once per round.
    ///
    /// # Panics
    ///
    /// Panics unless the session is in progress.
    pub fn submit_answer(&mut self, selected: &str) -> RoundOutcome {
        let phase = self.phase();
        let state = match self.state.as_mut() {
            Some(s) if !s.is_finished() => s,
            _ => panic!("submit_answer called while session is {phase}"),
        };
        self.current = None;

        let word = &state.round_words[state.current_index];
        let correct_answer = word.answer(state.direction).to_string();
        let correct = selected == correct_answer;

        state.answered.push(AnsweredRound {
            prompt: word.prompt(state.direction).to_string(),
            category: word.category.clone(),
            selected: selected.to_string(),
            correct_answer: correct_answer.clone(),
            correct,
        });

        if correct {
            state.correct_count += 1;
        } else {
            state.incorrect_count += 1;
        }
        state.current_index += 1;
        debug_assert_eq!(
            state.correct_count + state.incorrect_count,
            state.current_index
        );

        if state.is_finished() {
            state.finished_at = Some(Utc::now());
            tracing::info!(
                "session {} finished: {}/{} correct",
                state.id,
                state.correct_count,
                state.round_words.len()
            );
        }

        RoundOutcome {
            correct,
            correct_answer,
        }
    }

    /// True once every sampled word has been answered.
    pub fn is_finished(&self) -> bool {
        self.state.as_ref().is_some_and(SessionState::is_finished)
    }

    /// Flip the direction used by the next session. Returns the new direction.
    pub fn toggle_direction(&mut self) -> Direction {
        self.direction = self.direction.flipped();
        tracing::debug!("direction for next session: {}", self.direction);
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Direction the next session will use.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Discard the current session, if any.
    pub fn abandon(&mut self) {
        if let Some(state) = self.state.take() {
            tracing::info!(
                "session {} abandoned after {} of {} rounds",
                state.id,
                state.current_index,
                state.round_words.len()
            );
        }
        self.current = None;
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    pub fn correct_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.correct_count)
    }

    pub fn incorrect_count(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.incorrect_count)
    }

    pub fn remaining_count(&self) -> usize {
        self.state.as_ref().map_or(0, SessionState::remaining_count)
    }

    pub fn total_rounds(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.round_words.len())
    }

    /// Final score and review for a finished session.
    ///
    /// # Panics
    ///
    /// Panics unless the session is finished.
    pub fn report(&self) -> Result<SessionReport, QuizError> {
        match &self.state {
            Some(s) if s.is_finished() => SessionReport::from_state(s),
            _ => panic!("report requested while session is {}", self.phase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn make_repo(n: usize) -> Arc<WordRepository> {
        let categories = ["noun", "verb", "adj"];
        Arc::new(WordRepository::from_records(
            (0..n)
                .map(|i| {
                    WordRecord::new(
                        format!("ro{i}"),
                        format!("tr{i}"),
                        categories[i % categories.len()],
                        format!("Example {i}."),
                    )
                })
                .collect(),
        ))
    }

    fn controller() -> SessionController {
        SessionController::with_seed(Direction::SourceToTarget, 42)
    }

    #[test]
    fn new_controller_is_not_started() {
        let c = controller();
        assert_eq!(c.phase(), Phase::NotStarted);
        assert!(!c.is_finished());
        assert_eq!(c.remaining_count(), 0);
    }

    #[test]
    fn start_draws_requested_words() {
        let mut c = controller();
        let start = c.start(make_repo(50), DEFAULT_WORD_COUNT).unwrap();
        assert_eq!(start.drawn, 10);
        assert!(start.warning.is_none());
        assert_eq!(c.phase(), Phase::InProgress);
        assert_eq!(c.remaining_count(), 10);
        assert_eq!(c.correct_count(), 0);
        assert_eq!(c.incorrect_count(), 0);
    }

    #[test]
    fn start_with_small_repository_warns() {
        let mut c = controller();
        let start = c.start(make_repo(4), 10).unwrap();
        assert_eq!(start.drawn, 4);
        assert_eq!(
            start.warning,
            Some(PartialSampleWarning {
                requested: 10,
                drawn: 4
            })
        );
    }

    #[test]
    fn start_with_empty_repository_fails() {
        let mut c = controller();
        let err = c
            .start(Arc::new(WordRepository::default()), 10)
            .unwrap_err();
        assert_eq!(err, QuizError::NoWordsAvailable { requested: 10 });
        assert_eq!(c.phase(), Phase::NotStarted);
    }

    #[test]
    fn counts_track_index_after_every_answer() {
        let mut c = controller();
        c.start(make_repo(30), 10).unwrap();

        let mut answered = 0;
        while !c.is_finished() {
            let round = c.current_round().clone();
            let pick = if answered % 3 == 0 {
                round.correct_answer.clone()
            } else {
                "definitely wrong".to_string()
            };
            c.submit_answer(&pick);
            answered += 1;

            let state = c.state().unwrap();
            assert_eq!(
                state.correct_count() + state.incorrect_count(),
                state.current_index()
            );
        }
        assert_eq!(answered, 10);
        assert_eq!(c.correct_count(), 4);
        assert_eq!(c.incorrect_count(), 6);
        assert_eq!(c.phase(), Phase::Finished);
    }

    #[test]
    fn options_contain_correct_answer_once_without_duplicates() {
        let mut c = controller();
        c.start(make_repo(40), 10).unwrap();
        while !c.is_finished() {
            let round = c.current_round().clone();
            assert!(round.options.len() <= 4);
            assert_eq!(
                round
                    .options
                    .iter()
                    .filter(|o| **o == round.correct_answer)
                    .count(),
                1
            );
            let unique: HashSet<_> = round.options.iter().collect();
            assert_eq!(unique.len(), round.options.len());
            c.submit_answer(&round.correct_answer);
        }
    }

    #[test]
    fn current_round_is_stable_within_a_round() {
        let mut c = controller();
        c.start(make_repo(30), 5).unwrap();
        let first = c.current_round().clone();
        let again = c.current_round().clone();
        assert_eq!(first, again);
    }

    #[test]
    fn all_correct_session_scores_full_marks() {
        let mut c = controller();
        c.start(make_repo(50), 10).unwrap();
        while !c.is_finished() {
            let answer = c.current_round().correct_answer.clone();
            let outcome = c.submit_answer(&answer);
            assert!(outcome.correct);
        }
        assert!(c.is_finished());
        let report = c.report().unwrap();
        assert_eq!(report.score, 100.00);
        assert_eq!(report.review.len(), 10);
    }

    #[test]
    fn wrong_answer_reports_correct_one() {
        let mut c = controller();
        c.start(make_repo(10), 3).unwrap();
        let expected = c.current_round().correct_answer.clone();
        let outcome = c.submit_answer("nope");
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_answer, expected);
        assert_eq!(c.state().unwrap().answered()[0].selected, "nope");
    }

    #[test]
    fn toggle_mid_session_keeps_current_mapping() {
        let mut c = controller();
        c.start(make_repo(30), 4).unwrap();
        let before = c.current_round().clone();
        assert!(before.prompt.starts_with("ro"));

        assert_eq!(c.toggle_direction(), Direction::TargetToSource);
        let after = c.current_round().clone();
        assert_eq!(before, after);

        let outcome = c.submit_answer(&before.correct_answer);
        assert!(outcome.correct);

        // Later rounds of the same session keep the snapshotted direction
        let next = c.current_round().clone();
        assert!(next.prompt.starts_with("ro"));
        assert!(next.correct_answer.starts_with("tr"));
        assert_eq!(c.state().unwrap().direction(), Direction::SourceToTarget);
    }

    #[test]
    fn toggled_direction_applies_to_next_session() {
        let mut c = controller();
        c.toggle_direction();
        c.start(make_repo(30), 3).unwrap();
        let round = c.current_round().clone();
        assert!(round.prompt.starts_with("tr"));
        assert!(round.correct_answer.starts_with("ro"));
    }

    #[test]
    fn restart_replaces_previous_session() {
        let mut c = controller();
        let repo = make_repo(30);
        let first = c.start(Arc::clone(&repo), 3).unwrap();
        let answer = c.current_round().correct_answer.clone();
        c.submit_answer(&answer);

        let second = c.start(repo, 5).unwrap();
        assert_ne!(first.session_id, second.session_id);
        assert_eq!(c.remaining_count(), 5);
        assert_eq!(c.correct_count(), 0);
    }

    #[test]
    fn abandon_returns_to_not_started() {
        let mut c = controller();
        c.start(make_repo(30), 3).unwrap();
        c.abandon();
        assert_eq!(c.phase(), Phase::NotStarted);
    }

    #[test]
    fn same_seed_same_session() {
        let repo = make_repo(30);
        let mut a = controller();
        let mut b = controller();
        a.start(Arc::clone(&repo), 5).unwrap();
        b.start(repo, 5).unwrap();
        assert_eq!(
            a.state().unwrap().round_words(),
            b.state().unwrap().round_words()
        );
        assert_eq!(a.current_round(), b.current_round());
    }

    #[test]
    fn distractor_count_limits_options() {
        let mut c = controller().with_distractor_count(1);
        c.start(make_repo(30), 3).unwrap();
        assert_eq!(c.current_round().options.len(), 2);
    }

    #[test]
    #[should_panic(expected = "current_round called")]
    fn current_round_after_finish_panics() {
        let mut c = controller();
        c.start(make_repo(5), 1).unwrap();
        let answer = c.current_round().correct_answer.clone();
        c.submit_answer(&answer);
        c.current_round();
    }

    #[test]
    #[should_panic(expected = "submit_answer called")]
    fn submit_before_start_panics() {
        let mut c = controller();
        c.submit_answer("elma");
    }
}
