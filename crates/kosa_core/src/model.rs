//! Row types read from the lexical database.
//!
//! All rows are read-only to the pipeline. Sets are ordered so that any
//! artifact derived from them is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An ordered set of surface forms.
pub type WordSet = BTreeSet<String>;

/// Stable numeric key of a headword.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct HeadwordKey(pub u32);

impl fmt::Display for HeadwordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One dictionary entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Headword {
    /// Stable database key.
    pub key: HeadwordKey,
    /// External, user-facing id.
    pub user_id: String,
    /// Primary surface form, possibly carrying a homonym number (`"dhamma 1"`).
    pub lemma_1: String,
    /// Alternate surface form.
    pub lemma_2: String,
    /// Part of speech.
    pub pos: String,
    /// Grammatical category.
    pub grammar: String,
    /// Word this one is derived from.
    pub derived_from: String,
    /// Negation marker.
    pub neg: String,
    /// Verb class.
    pub verb: String,
    /// Transitivity.
    pub trans: String,
    /// Case government.
    pub plus_case: String,
    /// Meaning in context.
    pub meaning_1: String,
    /// Literal meaning.
    pub meaning_lit: String,
    /// Meaning from the secondary dictionary source.
    pub meaning_2: String,
    /// Key of the verbal root.
    pub root_key: String,
    /// Conjugation sign of the root.
    pub root_sign: String,
    /// Root base form.
    pub root_base: String,
    /// Root family.
    pub family_root: String,
    /// Morphological construction, one step per line.
    pub construction: String,
    /// Derivative type.
    pub derivative: String,
    /// Derivational suffix.
    pub suffix: String,
    /// Phonetic changes, one per line.
    pub phonetic: String,
    /// Compound type.
    pub compound_type: String,
    /// Compound members.
    pub compound_construction: String,
    /// Source reference of the first example.
    pub source_1: String,
    /// Sutta of the first example.
    pub sutta_1: String,
    /// First example sentence.
    pub example_1: String,
    /// Source reference of the second example.
    pub source_2: String,
    /// Sutta of the second example.
    pub sutta_2: String,
    /// Second example sentence.
    pub example_2: String,
    /// Corpus identifiers (book codes) in which this form is attested.
    pub corpus_tags: BTreeSet<String>,
}

impl Headword {
    /// Returns the primary surface form without its homonym number.
    ///
    /// `"dhamma 1"` becomes `"dhamma"`; forms without a trailing number are
    /// returned unchanged.
    #[must_use]
    pub fn lemma_clean(&self) -> &str {
        let trimmed = self.lemma_1.trim_end();
        let without_digits = trimmed.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
        if without_digits.len() < trimmed.len() && without_digits.ends_with(' ') {
            without_digits.trim_end()
        } else {
            trimmed
        }
    }

    /// Returns true if the headword is attested in any of the given corpora.
    #[must_use]
    pub fn attested_in(&self, corpus: &BTreeSet<String>) -> bool {
        !self.corpus_tags.is_disjoint(corpus)
    }
}

/// A compound surface form and its alternative decompositions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandhiRow {
    /// The fused surface form.
    pub surface: String,
    /// Alternative splits, each an ordered sequence of component forms.
    pub splits: Vec<Vec<String>>,
    /// Corpus identifiers in which the compound is attested.
    pub corpus_tags: BTreeSet<String>,
}

impl SandhiRow {
    /// Returns true if the compound is attested in any of the given corpora.
    #[must_use]
    pub fn attested_in(&self, corpus: &BTreeSet<String>) -> bool {
        !self.corpus_tags.is_disjoint(corpus)
    }

    /// Iterates over every component of every split.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.splits.iter().flatten().map(String::as_str)
    }
}

/// Precomputed inflected forms of one headword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflectionRow {
    /// Key of the headword these forms belong to.
    pub key: HeadwordKey,
    /// Every inflected surface form.
    pub forms: WordSet,
}

/// One line of the abbreviations index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abbreviation {
    /// The abbreviation itself.
    #[serde(alias = "abbrev")]
    pub abbreviation: String,
    /// What it stands for.
    pub meaning: String,
    /// Pāli term, if any.
    #[serde(alias = "pāli")]
    pub pali: String,
    /// Usage example.
    pub example: String,
    /// Further explanation.
    #[serde(alias = "explanation")]
    pub information: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headword(lemma: &str) -> Headword {
        Headword {
            lemma_1: lemma.to_string(),
            ..Headword::default()
        }
    }

    #[test]
    fn lemma_clean_drops_homonym_number() {
        assert_eq!(headword("dhamma 1").lemma_clean(), "dhamma");
        assert_eq!(headword("dhamma 12").lemma_clean(), "dhamma");
        assert_eq!(headword("dhamma 1.01").lemma_clean(), "dhamma");
    }

    #[test]
    fn lemma_clean_keeps_plain_forms() {
        assert_eq!(headword("dhamma").lemma_clean(), "dhamma");
        assert_eq!(headword("a").lemma_clean(), "a");
    }

    #[test]
    fn attestation_checks_tag_overlap() {
        let mut word = headword("dhamma");
        word.corpus_tags.insert("dn1".into());

        let corpus: BTreeSet<String> = ["dn1".to_string(), "mn1".to_string()].into();
        assert!(word.attested_in(&corpus));
        assert!(!word.attested_in(&BTreeSet::from(["sn1".to_string()])));
    }

    #[test]
    fn sandhi_components_span_all_splits() {
        let row = SandhiRow {
            surface: "tenāha".into(),
            splits: vec![
                vec!["tena".into(), "āha".into()],
                vec!["te".into(), "nāha".into()],
            ],
            corpus_tags: BTreeSet::new(),
        };
        let parts: Vec<&str> = row.components().collect();
        assert_eq!(parts, ["tena", "āha", "te", "nāha"]);
    }
}
