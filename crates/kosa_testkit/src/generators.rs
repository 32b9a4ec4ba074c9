//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random row sets that keep the
//! snapshot invariants: unique headword keys and at most one inflection row
//! per headword.

use kosa_core::{
    Headword, HeadwordKey, InflectionRow, MemorySource, SandhiRow, Snapshot, WordSet, PALI_LETTERS,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Corpus identifiers rows are tagged with.
pub const CORPUS_POOL: [&str; 5] = ["dn1", "mn1", "sn1", "kn9", "other"];

/// Strategy for generating words made only of alphabet letters.
pub fn pali_word_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PALI_LETTERS.to_vec()), 1..6)
        .prop_map(|letters| letters.concat())
}

/// Strategy for generating words with no alphabet letter at all.
pub fn unrecognized_word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[0-9qwxzf\\-]{1,6}").expect("Invalid regex")
}

/// Strategy for generating the corpus tags of a row (possibly none).
pub fn corpus_tags_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::sample::subsequence(CORPUS_POOL.to_vec(), 0..=2)
        .prop_map(|tags| tags.into_iter().map(String::from).collect())
}

/// Strategy for generating a non-empty corpus allow-list.
pub fn allow_list_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::sample::subsequence(CORPUS_POOL.to_vec(), 1..=3)
        .prop_map(|tags| tags.into_iter().map(String::from).collect())
}

/// Strategy for generating a headword lemma, sometimes with a homonym number.
pub fn lemma_strategy() -> impl Strategy<Value = String> {
    (pali_word_strategy(), prop::option::of(1u8..4)).prop_map(|(word, homonym)| match homonym {
        Some(n) => format!("{word} {n}"),
        None => word,
    })
}

/// Strategy for generating one sandhi row.
pub fn sandhi_row_strategy() -> impl Strategy<Value = SandhiRow> {
    (
        pali_word_strategy(),
        prop::collection::vec(prop::collection::vec(pali_word_strategy(), 1..3), 1..3),
        corpus_tags_strategy(),
    )
        .prop_map(|(surface, splits, corpus_tags)| SandhiRow {
            surface,
            splits,
            corpus_tags,
        })
}

/// A generated set of tables.
#[derive(Debug, Clone)]
pub struct Rows {
    /// Headwords, keyed 1..=N.
    pub headwords: Vec<Headword>,
    /// Sandhi rows in scan order.
    pub sandhi: Vec<SandhiRow>,
    /// At most one row per headword.
    pub inflections: Vec<InflectionRow>,
}

impl Rows {
    /// Builds a snapshot of the rows.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_rows(
            self.headwords.clone(),
            self.sandhi.clone(),
            self.inflections.clone(),
        )
        .expect("generated rows keep the snapshot invariants")
    }

    /// Builds an in-memory source of the rows.
    pub fn source(&self) -> MemorySource {
        MemorySource::from_rows(
            self.headwords.clone(),
            self.sandhi.clone(),
            self.inflections.clone(),
        )
    }
}

/// Strategy for generating complete tables of up to `max_headwords`
/// headwords and `max_sandhi` sandhi rows.
pub fn rows_strategy(max_headwords: usize, max_sandhi: usize) -> impl Strategy<Value = Rows> {
    let headword = (
        lemma_strategy(),
        corpus_tags_strategy(),
        prop::option::of(prop::collection::btree_set(pali_word_strategy(), 0..4)),
    );
    (
        prop::collection::vec(headword, 0..=max_headwords),
        prop::collection::vec(sandhi_row_strategy(), 0..=max_sandhi),
    )
        .prop_map(|(generated, sandhi)| {
            let mut headwords = Vec::with_capacity(generated.len());
            let mut inflections = Vec::new();
            for (i, (lemma_1, corpus_tags, forms)) in generated.into_iter().enumerate() {
                let key = HeadwordKey(i as u32 + 1);
                if let Some(forms) = forms {
                    let mut forms: WordSet = forms;
                    forms.insert(lemma_1.split(' ').next().unwrap_or_default().to_string());
                    inflections.push(InflectionRow { key, forms });
                }
                headwords.push(Headword {
                    key,
                    lemma_1,
                    corpus_tags,
                    ..Headword::default()
                });
            }
            Rows {
                headwords,
                sandhi,
                inflections,
            }
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kosa_core::Alphabet;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn pali_words_have_a_letter(word in pali_word_strategy()) {
            prop_assert!(Alphabet::pali().first_letter(&word).is_some());
        }

        #[test]
        fn unrecognized_words_have_no_letter(word in unrecognized_word_strategy()) {
            prop_assert!(Alphabet::pali().first_letter(&word).is_none());
        }

        #[test]
        fn allow_lists_are_not_empty(corpus in allow_list_strategy()) {
            prop_assert!(!corpus.is_empty());
        }

        #[test]
        fn generated_rows_form_a_snapshot(rows in rows_strategy(20, 10)) {
            let snapshot = rows.snapshot();
            prop_assert_eq!(snapshot.headwords().len(), rows.headwords.len());
        }
    }
}
