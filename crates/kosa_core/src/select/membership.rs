//! Corpus membership.
//!
//! Finds the surface forms attested in a restricted set of corpus books.

use crate::model::{Headword, SandhiRow, WordSet};
use std::collections::BTreeSet;

/// Surface forms attested in a corpus subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    /// Distinct attested surface forms.
    pub words: WordSet,
    /// Number of rows whose tags matched the allow-list.
    pub matched_rows: usize,
}

impl Membership {
    /// Returns true if the allow-list matched no rows at all.
    #[must_use]
    pub fn is_empty_selection(&self) -> bool {
        self.matched_rows == 0
    }
}

/// Returns the clean surface forms of headwords attested in `corpus`.
#[must_use]
pub fn word_set(headwords: &[Headword], corpus: &BTreeSet<String>) -> Membership {
    collect(
        headwords
            .iter()
            .filter(|h| h.attested_in(corpus))
            .map(Headword::lemma_clean),
    )
}

/// Returns the surface forms of sandhi compounds attested in `corpus`.
#[must_use]
pub fn sandhi_word_set(rows: &[SandhiRow], corpus: &BTreeSet<String>) -> Membership {
    collect(
        rows.iter()
            .filter(|r| r.attested_in(corpus))
            .map(|r| r.surface.as_str()),
    )
}

fn collect<'a>(forms: impl Iterator<Item = &'a str>) -> Membership {
    let mut membership = Membership::default();
    for form in forms {
        membership.matched_rows += 1;
        membership.words.insert(form.to_string());
    }
    membership
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadwordKey;

    fn tagged(key: u32, lemma: &str, tags: &[&str]) -> Headword {
        Headword {
            key: HeadwordKey(key),
            lemma_1: lemma.to_string(),
            corpus_tags: tags.iter().map(|t| (*t).to_string()).collect(),
            ..Headword::default()
        }
    }

    fn corpus(books: &[&str]) -> BTreeSet<String> {
        books.iter().map(|b| (*b).to_string()).collect()
    }

    #[test]
    fn selects_only_tagged_headwords() {
        let headwords = vec![
            tagged(1, "dhamma 1", &["dn1"]),
            tagged(2, "dhamma 2", &["dn1", "mn1"]),
            tagged(3, "cakka", &["other"]),
        ];

        let membership = word_set(&headwords, &corpus(&["dn1"]));
        assert_eq!(membership.words, WordSet::from(["dhamma".to_string()]));
        assert_eq!(membership.matched_rows, 2);
        assert!(!membership.is_empty_selection());
    }

    #[test]
    fn unmatched_allow_list_is_an_empty_selection() {
        let headwords = vec![tagged(1, "dhamma", &["dn1"])];
        let membership = word_set(&headwords, &corpus(&["kn9"]));
        assert!(membership.words.is_empty());
        assert!(membership.is_empty_selection());
    }

    #[test]
    fn sandhi_membership_uses_the_compound_form() {
        let rows = vec![
            SandhiRow {
                surface: "dhammacakka".into(),
                splits: vec![vec!["dhamma".into(), "cakka".into()]],
                corpus_tags: corpus(&["dn1"]),
            },
            SandhiRow {
                surface: "tenāha".into(),
                splits: vec![vec!["tena".into(), "āha".into()]],
                corpus_tags: corpus(&["sn1"]),
            },
        ];

        let membership = sandhi_word_set(&rows, &corpus(&["dn1"]));
        assert_eq!(membership.words, WordSet::from(["dhammacakka".to_string()]));
    }
}
