//! Sandhi expansion.

use crate::model::{SandhiRow, WordSet};

/// Returns every component of every split of the compounds in `corpus_words`.
///
/// All alternative splits count: which segmentation is right for a given
/// occurrence is not known here, so each one licenses its parts. The result
/// grows monotonically with `corpus_words`.
#[must_use]
pub fn expand(rows: &[SandhiRow], corpus_words: &WordSet) -> WordSet {
    rows.iter()
        .filter(|row| corpus_words.contains(&row.surface))
        .flat_map(|row| row.components())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(surface: &str, splits: &[&[&str]]) -> SandhiRow {
        SandhiRow {
            surface: surface.to_string(),
            splits: splits
                .iter()
                .map(|s| s.iter().map(|w| (*w).to_string()).collect())
                .collect(),
            corpus_tags: Default::default(),
        }
    }

    fn words(items: &[&str]) -> WordSet {
        items.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn includes_every_alternative_split() {
        let rows = vec![row("tenāha", &[&["tena", "āha"], &["te", "na", "āha"]])];
        let expanded = expand(&rows, &words(&["tenāha"]));
        assert_eq!(expanded, words(&["tena", "āha", "te", "na"]));
    }

    #[test]
    fn ignores_compounds_outside_the_corpus() {
        let rows = vec![
            row("dhammacakka", &[&["dhamma", "cakka"]]),
            row("tenāha", &[&["tena", "āha"]]),
        ];
        let expanded = expand(&rows, &words(&["dhammacakka"]));
        assert_eq!(expanded, words(&["dhamma", "cakka"]));
    }

    #[test]
    fn expansion_is_idempotent() {
        let rows = vec![row("dhammacakka", &[&["dhamma", "cakka"]])];
        let corpus = words(&["dhammacakka"]);
        assert_eq!(expand(&rows, &corpus), expand(&rows, &corpus));
    }
}
