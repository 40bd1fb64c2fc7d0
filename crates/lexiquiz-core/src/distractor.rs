//! Distractor generation: plausible wrong answers for a round.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Direction;
use crate::repository::WordRepository;

/// Number of wrong options shown in a full round.
pub const DEFAULT_DISTRACTOR_COUNT: usize = 3;

/// Pick up to `k` distinct wrong answers from same-category records in `pool`.
///
/// Fewer than `k` are returned when the category is too small. No returned
/// value equals `correct_answer` or another returned value.
pub fn generate<R: Rng + ?Sized>(
    correct_answer: &str,
    category: &str,
    pool: &WordRepository,
    direction: Direction,
    k: usize,
    rng: &mut R,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<&str> = pool
        .filter_by_category(category, correct_answer, direction)
        .into_iter()
        .map(|w| w.answer(direction))
        .filter(|answer| seen.insert(*answer))
        .collect();

    candidates.shuffle(rng);
    candidates.truncate(k);

    if candidates.len() < k {
        tracing::debug!(
            "category '{}' offers only {} distractor(s) for '{}'",
            category,
            candidates.len(),
            correct_answer
        );
    }

    candidates.into_iter().map(str::to_string).collect()
}

/// Combine the correct answer with its distractors in random order.
pub fn assemble_options<R: Rng + ?Sized>(
    correct_answer: &str,
    distractors: Vec<String>,
    rng: &mut R,
) -> Vec<String> {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct_answer.to_string());
    options.extend(distractors);
    options.shuffle(rng);
    options
}
