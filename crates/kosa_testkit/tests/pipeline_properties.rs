//! Cross-crate property tests for the export pipeline.

use chrono::TimeZone;
use kosa_core::partition::{self, EntrySource};
use kosa_core::select::{self, membership, sandhi};
use kosa_core::{
    strip_diacritics, Alphabet, EntryId, ExportConfig, Headword, HeadwordKey, HeadwordScope,
    MemorySink, Snapshot, WordSet,
};
use kosa_testkit::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn config_for(corpus: &BTreeSet<String>, scope: HeadwordScope) -> ExportConfig {
    ExportConfig::new()
        .corpus(corpus.iter().cloned())
        .scope(scope)
        .generated_at(chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

fn surface_of(snapshot: &Snapshot, source: EntrySource) -> &str {
    match source {
        EntrySource::Headword(i) => &snapshot.headwords()[i].lemma_1,
        EntrySource::Sandhi(i) => &snapshot.sandhi()[i].surface,
    }
}

#[test]
fn compound_components_are_exported() {
    let snapshot = dhammacakka_snapshot();
    let config = ExportConfig::new()
        .corpus(["dn1"])
        .scope(HeadwordScope::Attested);
    let selection = select::select(&snapshot, &config).unwrap();

    assert_eq!(selection.corpus_headwords.words, words(&["dhamma"]));
    assert_eq!(selection.corpus_sandhi.words, words(&["dhammacakka"]));
    assert_eq!(selection.sandhi_components, words(&["dhamma", "cakka"]));
    assert_eq!(
        selection.all_words,
        words(&["dhamma", "cakka", "dhammacakka"])
    );
    // tagged "other" but reached through the compound
    assert!(selection.inflections.includes(HeadwordKey(2)));
    assert_eq!(
        selection.inflections.forms(HeadwordKey(2)),
        Some(&words(&["cakka"]))
    );
}

#[test]
fn sample_dictionary_partition() {
    let snapshot = Snapshot::load(&sample_source()).unwrap();
    let config = ExportConfig::new().corpus(["dn1", "mn1"]);
    let plan = kosa_core::plan(&snapshot, &config).unwrap();

    let order: Vec<&str> = plan
        .partition
        .placements()
        .iter()
        .map(|p| surface_of(&snapshot, p.source))
        .collect();
    assert_eq!(
        order,
        vec![
            "attha",
            "ābādha",
            "kamma",
            "khanti",
            "ṭhāna",
            "dhamma 1",
            "dhamma 2",
            "tenāha",
            "kammaṭṭhāna",
        ]
    );
    assert_eq!(plan.partition.bucket("kh").unwrap().len(), 1);
    assert_eq!(plan.partition.bucket("k").unwrap().len(), 2);
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn membership_is_exact(rows in rows_strategy(30, 0), corpus in allow_list_strategy()) {
        let found = membership::word_set(&rows.headwords, &corpus);

        for headword in &rows.headwords {
            if !headword.corpus_tags.is_disjoint(&corpus) {
                prop_assert!(found.words.contains(headword.lemma_clean()));
            }
        }
        for word in &found.words {
            let attested = rows.headwords.iter().any(|h: &Headword| {
                h.lemma_clean() == word.as_str() && !h.corpus_tags.is_disjoint(&corpus)
            });
            prop_assert!(attested, "{} is not attested in the allow-list", word);
        }
    }

    #[test]
    fn sandhi_expansion_is_monotonic(
        rows in rows_strategy(0, 20),
        picks in prop::collection::vec(any::<bool>(), 20),
        extra in prop::collection::vec(any::<bool>(), 20),
    ) {
        let small: WordSet = rows
            .sandhi
            .iter()
            .zip(&picks)
            .filter(|(_, pick)| **pick)
            .map(|(row, _)| row.surface.clone())
            .collect();
        let mut large = small.clone();
        large.extend(
            rows.sandhi
                .iter()
                .zip(&extra)
                .filter(|(_, pick)| **pick)
                .map(|(row, _)| row.surface.clone()),
        );

        let expanded_small = sandhi::expand(&rows.sandhi, &small);
        let expanded_large = sandhi::expand(&rows.sandhi, &large);
        prop_assert!(expanded_small.is_subset(&expanded_large));
    }

    #[test]
    fn fallback_form_is_always_present(
        rows in rows_strategy(30, 10),
        corpus in allow_list_strategy(),
        attested in any::<bool>(),
    ) {
        let scope = if attested { HeadwordScope::Attested } else { HeadwordScope::All };
        let snapshot = rows.snapshot();
        let selection = select::select(&snapshot, &config_for(&corpus, scope)).unwrap();

        for (key, forms) in selection.inflections.iter() {
            let headword = snapshot.headword(key).unwrap();
            prop_assert!(forms.contains(&strip_diacritics(headword.lemma_clean())));
            for form in forms {
                prop_assert!(
                    selection.all_words.contains(form)
                        || *form == strip_diacritics(headword.lemma_clean())
                );
            }
        }
        if scope == HeadwordScope::All {
            prop_assert_eq!(selection.inflections.len(), snapshot.headwords().len());
        }
    }

    #[test]
    fn ids_run_from_one_without_gaps(rows in rows_strategy(30, 15), corpus in allow_list_strategy()) {
        let snapshot = rows.snapshot();
        let plan = kosa_core::plan(&snapshot, &config_for(&corpus, HeadwordScope::All)).unwrap();

        let ids: Vec<EntryId> = plan.partition.placements().iter().map(|p| p.id).collect();
        let expected: Vec<EntryId> = (1..=plan.partition.len() as u32).map(EntryId).collect();
        prop_assert_eq!(ids, expected);
        prop_assert_eq!(plan.partition.headword_entries(), snapshot.headwords().len());
    }

    #[test]
    fn entries_land_in_their_first_letter(rows in rows_strategy(30, 15), corpus in allow_list_strategy()) {
        let snapshot = rows.snapshot();
        let alphabet = Alphabet::pali();
        let plan = kosa_core::plan(&snapshot, &config_for(&corpus, HeadwordScope::All)).unwrap();

        prop_assert_eq!(plan.partition.buckets().len(), alphabet.len());
        for bucket in plan.partition.buckets() {
            let mut last_id = EntryId(0);
            for placement in bucket.entries() {
                let surface = surface_of(&snapshot, placement.source);
                prop_assert_eq!(alphabet.first_letter(surface), Some(bucket.letter()));
                prop_assert!(placement.id > last_id);
                last_id = placement.id;
            }
        }
    }

    #[test]
    fn unknown_first_letter_is_fatal(
        rows in rows_strategy(10, 5),
        bad in unrecognized_word_strategy(),
    ) {
        let mut headwords = rows.headwords.clone();
        let key = HeadwordKey(headwords.len() as u32 + 1);
        headwords.push(Headword {
            key,
            lemma_1: bad,
            ..Headword::default()
        });
        let snapshot = Snapshot::from_rows(headwords, rows.sandhi.clone(), rows.inflections.clone()).unwrap();
        let config = config_for(&BTreeSet::from(["dn1".to_string()]), HeadwordScope::All);
        let selection = select::select(&snapshot, &config).unwrap();

        let err = partition::assign(&snapshot, &selection, &Alphabet::pali()).unwrap_err();
        prop_assert!(err.is_data_integrity());
        prop_assert_eq!(err.entry(), Some(kosa_core::EntryRef::Headword(key)));
    }
}

proptest! {
    #![proptest_config(PropTestConfig::quick().to_proptest_config())]

    #[test]
    fn exports_are_reproducible(rows in rows_strategy(20, 10), corpus in allow_list_strategy()) {
        let config = config_for(&corpus, HeadwordScope::All);
        let mut first = MemorySink::new();
        let mut second = MemorySink::new();

        let a = kosa_core::run(&rows.source(), &config, &mut first).unwrap();
        let b = kosa_core::run(&rows.source(), &config, &mut second).unwrap();

        prop_assert_eq!(&a.digest, &b.digest);
        prop_assert_eq!(a, b);
        prop_assert_eq!(first, second);
    }
}
