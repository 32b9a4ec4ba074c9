//! Vocabulary selection.
//!
//! Selection runs in three steps over one snapshot:
//!
//! ```text
//! corpus membership ──> sandhi expansion ──> (union) ──> inflection selection
//!   headwords, sandhi      split components     all words     forms per headword
//! ```
//!
//! The all-words set is computed once and never changed afterwards; every
//! later stage only reads it.

pub mod inflection;
pub mod membership;
pub mod sandhi;

pub use inflection::InflectionSelection;
pub use membership::Membership;

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::model::WordSet;
use crate::snapshot::Snapshot;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// A problem that does not stop the run but is almost certainly a mistake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionWarning {
    /// The corpus allow-list matched no headword or sandhi rows.
    EmptySelection {
        /// Number of corpus identifiers in the allow-list.
        books: usize,
    },
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySelection { books } => {
                write!(f, "corpus allow-list of {books} books matched no rows")
            }
        }
    }
}

/// Everything the pipeline selected for one run.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Headword forms attested in the corpus.
    pub corpus_headwords: Membership,
    /// Sandhi forms attested in the corpus.
    pub corpus_sandhi: Membership,
    /// Components of attested sandhi compounds.
    pub sandhi_components: WordSet,
    /// Union of the three sets above.
    pub all_words: WordSet,
    /// Inflected forms per selected headword.
    pub inflections: InflectionSelection,
    /// Non-fatal problems found while selecting.
    pub warnings: Vec<SelectionWarning>,
}

/// Computes the restricted vocabulary for `snapshot`.
///
/// # Errors
///
/// Returns [`ExportError::EmptySelection`] when the allow-list matches no
/// row of either table and `fail_on_empty_selection` is set; otherwise the
/// condition is logged and recorded as a warning.
pub fn select(snapshot: &Snapshot, config: &ExportConfig) -> ExportResult<Selection> {
    config.validate()?;

    let corpus_headwords = membership::word_set(snapshot.headwords(), &config.corpus);
    let corpus_sandhi = membership::sandhi_word_set(snapshot.sandhi(), &config.corpus);

    let mut warnings = Vec::new();
    if corpus_headwords.is_empty_selection() && corpus_sandhi.is_empty_selection() {
        let books = config.corpus.len();
        if config.fail_on_empty_selection {
            return Err(ExportError::EmptySelection { books });
        }
        warn!(books, "corpus allow-list matched no rows");
        warnings.push(SelectionWarning::EmptySelection { books });
    }

    let combined: WordSet = corpus_headwords
        .words
        .union(&corpus_sandhi.words)
        .cloned()
        .collect();
    let sandhi_components = sandhi::expand(snapshot.sandhi(), &combined);
    let all_words: WordSet = combined.union(&sandhi_components).cloned().collect();

    let inflections = inflection::select(snapshot, &all_words, config.scope);

    info!(
        corpus_headwords = corpus_headwords.words.len(),
        corpus_sandhi = corpus_sandhi.words.len(),
        sandhi_components = sandhi_components.len(),
        all_words = all_words.len(),
        headwords = inflections.len(),
        inflections = inflections.attested_forms(),
        "selected vocabulary"
    );

    Ok(Selection {
        corpus_headwords,
        corpus_sandhi,
        sandhi_components,
        all_words,
        inflections,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Headword, HeadwordKey, InflectionRow, SandhiRow};

    fn words(items: &[&str]) -> WordSet {
        items.iter().map(|w| (*w).to_string()).collect()
    }

    fn tags(items: &[&str]) -> std::collections::BTreeSet<String> {
        items.iter().map(|w| (*w).to_string()).collect()
    }

    fn dhammacakka_snapshot() -> Snapshot {
        let headwords = vec![
            Headword {
                key: HeadwordKey(1),
                lemma_1: "dhamma".into(),
                corpus_tags: tags(&["dn1"]),
                ..Headword::default()
            },
            Headword {
                key: HeadwordKey(2),
                lemma_1: "cakka".into(),
                corpus_tags: tags(&["other"]),
                ..Headword::default()
            },
        ];
        let sandhi = vec![SandhiRow {
            surface: "dhammacakka".into(),
            splits: vec![vec!["dhamma".into(), "cakka".into()]],
            corpus_tags: tags(&["dn1"]),
        }];
        let inflections = vec![InflectionRow {
            key: HeadwordKey(2),
            forms: words(&["cakka", "cakkaṃ"]),
        }];
        Snapshot::from_rows(headwords, sandhi, inflections).unwrap()
    }

    #[test]
    fn sandhi_components_join_the_vocabulary() {
        let config = ExportConfig::new().corpus(["dn1"]);
        let selection = select(&dhammacakka_snapshot(), &config).unwrap();

        assert_eq!(selection.corpus_headwords.words, words(&["dhamma"]));
        assert_eq!(selection.corpus_sandhi.words, words(&["dhammacakka"]));
        assert_eq!(selection.sandhi_components, words(&["dhamma", "cakka"]));
        assert_eq!(
            selection.all_words,
            words(&["dhamma", "cakka", "dhammacakka"])
        );
        assert!(selection.warnings.is_empty());

        // cakka is tagged "other" but comes in through the compound
        let cakka = selection.inflections.forms(HeadwordKey(2)).unwrap();
        assert_eq!(cakka, &words(&["cakka"]));
    }

    #[test]
    fn empty_selection_is_a_warning_by_default() {
        let config = ExportConfig::new().corpus(["kn9"]);
        let selection = select(&dhammacakka_snapshot(), &config).unwrap();

        assert!(selection.all_words.is_empty());
        assert_eq!(
            selection.warnings,
            vec![SelectionWarning::EmptySelection { books: 1 }]
        );
    }

    #[test]
    fn empty_selection_can_be_fatal() {
        let config = ExportConfig::new()
            .corpus(["kn9"])
            .fail_on_empty_selection(true);
        let err = select(&dhammacakka_snapshot(), &config).unwrap_err();
        assert!(matches!(err, ExportError::EmptySelection { books: 1 }));
    }

    #[test]
    fn one_matching_table_is_not_an_empty_selection() {
        let headwords = vec![Headword {
            key: HeadwordKey(1),
            lemma_1: "dhamma".into(),
            corpus_tags: tags(&["dn1"]),
            ..Headword::default()
        }];
        let snapshot = Snapshot::from_rows(headwords, Vec::new(), Vec::new()).unwrap();
        let config = ExportConfig::new()
            .corpus(["dn1"])
            .fail_on_empty_selection(true);

        let selection = select(&snapshot, &config).unwrap();
        assert!(selection.warnings.is_empty());
        assert_eq!(selection.all_words, words(&["dhamma"]));

        // only sandhi rows match
        let config = config.corpus(["mn1"]);
        let snapshot = Snapshot::from_rows(
            Vec::new(),
            vec![SandhiRow {
                surface: "tenāha".into(),
                splits: vec![vec!["tena".into(), "āha".into()]],
                corpus_tags: tags(&["mn1"]),
            }],
            Vec::new(),
        )
        .unwrap();
        assert!(select(&snapshot, &config).unwrap().warnings.is_empty());
    }
}
