//! The word repository: the full set of vocabulary records for a session.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::model::{Direction, WordRecord};
use crate::parser::{parse_word_table_str, DroppedRow, TableFormat, WordTable};

/// Immutable collection of vocabulary records.
#[derive(Debug, Clone, Default)]
pub struct WordRepository {
    words: Vec<WordRecord>,
    dropped: Vec<DroppedRow>,
}

impl WordRepository {
    /// Build a repository from already-parsed records. May be empty.
    pub fn from_records(words: Vec<WordRecord>) -> Self {
        Self {
            words,
            dropped: Vec::new(),
        }
    }

    /// Build a repository from a parsed table, requiring at least one record.
    pub fn from_table(table: WordTable) -> Result<Self, QuizError> {
        if table.records.is_empty() {
            return Err(QuizError::EmptyRepository);
        }
        tracing::debug!(
            "loaded {} words ({} rows dropped)",
            table.records.len(),
            table.dropped.len()
        );
        Ok(Self {
            words: table.records,
            dropped: table.dropped,
        })
    }

    /// Parse raw table text into a non-empty repository.
    pub fn load(raw: &str, format: &TableFormat) -> Result<Self, QuizError> {
        Self::from_table(parse_word_table_str(raw, format)?)
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    /// Rows excluded while loading.
    pub fn dropped(&self) -> &[DroppedRow] {
        &self.dropped
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Draw `min(n, len)` distinct records in uniformly random order.
    pub fn sample_random<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<WordRecord> {
        let mut indices: Vec<usize> = (0..self.words.len()).collect();
        indices.shuffle(rng);
        indices.truncate(n);
        indices.into_iter().map(|i| self.words[i].clone()).collect()
    }

    /// Records in `category` whose answer for `direction` differs from `excluding`.
    pub fn filter_by_category(
        &self,
        category: &str,
        excluding: &str,
        direction: Direction,
    ) -> Vec<&WordRecord> {
        self.words
            .iter()
            .filter(|w| w.category == category && w.answer(direction) != excluding)
            .collect()
    }

    /// Number of records per category, ordered by category name.
    pub fn categories(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for w in &self.words {
            *counts.entry(w.category.as_str()).or_default() += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn make_repo(n: usize) -> WordRepository {
        WordRepository::from_records(
            (0..n)
                .map(|i| WordRecord::new(format!("ro{i}"), format!("tr{i}"), "noun", "ex"))
                .collect(),
        )
    }

    #[test]
    fn sample_returns_n_distinct_records() {
        let repo = make_repo(50);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let sample = repo.sample_random(10, &mut rng);
        assert_eq!(sample.len(), 10);
        let distinct: HashSet<_> = sample.iter().map(|w| &w.source_term).collect();
        assert_eq!(distinct.len(), 10);
    }

    #[test]
    fn sample_larger_than_repository_returns_everything() {
        let repo = make_repo(4);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let sample = repo.sample_random(10, &mut rng);
        assert_eq!(sample.len(), 4);
        let distinct: HashSet<_> = sample.iter().map(|w| &w.source_term).collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn sample_from_empty_repository_is_empty() {
        let repo = WordRepository::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(repo.sample_random(10, &mut rng).is_empty());
    }

    #[test]
    fn sample_order_varies_with_seed() {
        let repo = make_repo(30);
        let a = repo.sample_random(30, &mut ChaCha8Rng::seed_from_u64(1));
        let b = repo.sample_random(30, &mut ChaCha8Rng::seed_from_u64(2));
        assert_ne!(a, b);
    }

    #[test]
    fn filter_by_category_excludes_answer_value() {
        let repo = WordRepository::from_records(vec![
            WordRecord::new("mar", "elma", "noun", ""),
            WordRecord::new("pară", "armut", "noun", ""),
            WordRecord::new("roșu", "kırmızı", "adj", ""),
        ]);
        let nouns = repo.filter_by_category("noun", "elma", Direction::SourceToTarget);
        assert_eq!(nouns.len(), 1);
        assert_eq!(nouns[0].target_term, "armut");

        let reversed = repo.filter_by_category("noun", "mar", Direction::TargetToSource);
        assert_eq!(reversed.len(), 1);
        assert_eq!(reversed[0].source_term, "pară");
    }

    #[test]
    fn load_requires_records() {
        let header_only = "Romence Kelime,Türkçe Anlamı,Kelime Türü,Örnek Cümle\n";
        let err = WordRepository::load(header_only, &TableFormat::default()).unwrap_err();
        assert_eq!(err, QuizError::EmptyRepository);
    }

    #[test]
    fn load_keeps_dropped_rows() {
        let csv = "Romence Kelime,Türkçe Anlamı,Kelime Türü,Örnek Cümle\nmar,elma,noun,A.\npară,,noun,B.\n";
        let repo = WordRepository::load(csv, &TableFormat::default()).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.dropped().len(), 1);
    }

    #[test]
    fn category_counts() {
        let repo = WordRepository::from_records(vec![
            WordRecord::new("a", "1", "noun", ""),
            WordRecord::new("b", "2", "verb", ""),
            WordRecord::new("c", "3", "noun", ""),
        ]);
        let counts = repo.categories();
        assert_eq!(counts.get("noun"), Some(&2));
        assert_eq!(counts.get("verb"), Some(&1));
    }
}
