//! Inflection selection.
//!
//! Restricts each headword's precomputed inflections to the forms attested
//! in the all-words set, then adds one diacritic-free form of the headword so
//! readers without a Pāli keyboard can still look it up.

use crate::config::HeadwordScope;
use crate::diacritics::strip_diacritics;
use crate::model::{HeadwordKey, InflectionRow, WordSet};
use crate::snapshot::Snapshot;
use std::collections::BTreeMap;

/// Intersects every inflection row with `all_words`.
///
/// This only ever removes forms. Rows whose intersection is empty are kept
/// with an empty set.
#[must_use]
pub fn restrict(rows: &[InflectionRow], all_words: &WordSet) -> BTreeMap<HeadwordKey, WordSet> {
    rows.iter()
        .map(|row| {
            let attested = row.forms.intersection(all_words).cloned().collect();
            (row.key, attested)
        })
        .collect()
}

/// Inflected forms chosen for every headword that receives an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InflectionSelection {
    forms: BTreeMap<HeadwordKey, WordSet>,
    attested_forms: usize,
}

impl InflectionSelection {
    /// Returns the forms of a headword, or `None` if it receives no entry.
    #[must_use]
    pub fn forms(&self, key: HeadwordKey) -> Option<&WordSet> {
        self.forms.get(&key)
    }

    /// Returns true if the headword receives an entry.
    #[must_use]
    pub fn includes(&self, key: HeadwordKey) -> bool {
        self.forms.contains_key(&key)
    }

    /// Returns the number of headwords that receive an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Returns true if no headword receives an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Returns the number of attested inflected forms, before fallbacks.
    #[must_use]
    pub fn attested_forms(&self) -> usize {
        self.attested_forms
    }

    /// Iterates over headwords and their forms in key order.
    pub fn iter(&self) -> impl Iterator<Item = (HeadwordKey, &WordSet)> {
        self.forms.iter().map(|(k, v)| (*k, v))
    }
}

/// Chooses the inflected forms of every headword in `snapshot`.
///
/// With [`HeadwordScope::All`] every headword is selected. With
/// [`HeadwordScope::Attested`] a headword is selected only if its clean form
/// is in `all_words` or at least one of its inflections is. Every selected
/// headword gets its diacritic-stripped clean form, even when the headword
/// itself is not attested.
#[must_use]
pub fn select(snapshot: &Snapshot, all_words: &WordSet, scope: HeadwordScope) -> InflectionSelection {
    let mut restricted = restrict(snapshot.inflections(), all_words);
    let mut attested_forms = 0;

    let mut forms = BTreeMap::new();
    for headword in snapshot.headwords() {
        let mut chosen = restricted.remove(&headword.key).unwrap_or_default();

        let selected = match scope {
            HeadwordScope::All => true,
            HeadwordScope::Attested => {
                !chosen.is_empty() || all_words.contains(headword.lemma_clean())
            }
        };
        if !selected {
            continue;
        }

        attested_forms += chosen.len();
        chosen.insert(strip_diacritics(headword.lemma_clean()));
        forms.insert(headword.key, chosen);
    }

    InflectionSelection {
        forms,
        attested_forms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Headword;

    fn words(items: &[&str]) -> WordSet {
        items.iter().map(|w| (*w).to_string()).collect()
    }

    fn snapshot() -> Snapshot {
        let headwords = vec![
            Headword {
                key: HeadwordKey(1),
                lemma_1: "saṃsāra 1".into(),
                ..Headword::default()
            },
            Headword {
                key: HeadwordKey(2),
                lemma_1: "ñāṇa".into(),
                ..Headword::default()
            },
            Headword {
                key: HeadwordKey(3),
                lemma_1: "kamma".into(),
                ..Headword::default()
            },
        ];
        let inflections = vec![
            InflectionRow {
                key: HeadwordKey(1),
                forms: words(&["saṃsāro", "saṃsāraṃ", "saṃsārena"]),
            },
            InflectionRow {
                key: HeadwordKey(2),
                forms: words(&["ñāṇaṃ", "ñāṇena"]),
            },
        ];
        Snapshot::from_rows(headwords, Vec::new(), inflections).unwrap()
    }

    #[test]
    fn restriction_never_adds_forms() {
        let snapshot = snapshot();
        let restricted = restrict(snapshot.inflections(), &words(&["saṃsāro", "unrelated"]));
        assert_eq!(restricted[&HeadwordKey(1)], words(&["saṃsāro"]));
        assert!(restricted[&HeadwordKey(2)].is_empty());
    }

    #[test]
    fn every_headword_gets_a_plain_fallback() {
        let selection = select(&snapshot(), &words(&["saṃsāro"]), HeadwordScope::All);

        assert_eq!(selection.len(), 3);
        assert_eq!(
            selection.forms(HeadwordKey(1)).unwrap(),
            &words(&["saṃsāro", "samsara"])
        );
        // empty intersection still yields exactly the fallback
        assert_eq!(selection.forms(HeadwordKey(2)).unwrap(), &words(&["nana"]));
        // no inflection row at all
        assert_eq!(selection.forms(HeadwordKey(3)).unwrap(), &words(&["kamma"]));
        assert_eq!(selection.attested_forms(), 1);
    }

    #[test]
    fn attested_scope_drops_unattested_headwords() {
        let selection = select(
            &snapshot(),
            &words(&["saṃsāro", "kamma"]),
            HeadwordScope::Attested,
        );

        assert!(selection.includes(HeadwordKey(1)));
        assert!(!selection.includes(HeadwordKey(2)));
        assert!(selection.includes(HeadwordKey(3)));
        assert_eq!(selection.len(), 2);
    }
}
