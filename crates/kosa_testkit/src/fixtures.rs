//! Test fixtures and row helpers.
//!
//! Provides ready-made row sets for common export scenarios and a helper
//! that writes rows as a JSON row directory.

use kosa_core::{
    Headword, HeadwordKey, InflectionRow, MemorySource, RowSource, SandhiRow, Snapshot, WordSet,
};
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;

/// Builds a tag set.
pub fn tags(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|t| (*t).to_string()).collect()
}

/// Builds a word set.
pub fn words(items: &[&str]) -> WordSet {
    items.iter().map(|w| (*w).to_string()).collect()
}

/// Builds a headword with only the fields the selection reads.
pub fn headword(key: u32, lemma: &str, corpus: &[&str]) -> Headword {
    Headword {
        key: HeadwordKey(key),
        lemma_1: lemma.to_string(),
        corpus_tags: tags(corpus),
        ..Headword::default()
    }
}

/// Builds a sandhi row with a single split.
pub fn sandhi(surface: &str, split: &[&str], corpus: &[&str]) -> SandhiRow {
    SandhiRow {
        surface: surface.to_string(),
        splits: vec![split.iter().map(|s| (*s).to_string()).collect()],
        corpus_tags: tags(corpus),
    }
}

/// Builds an inflection row.
pub fn inflections(key: u32, forms: &[&str]) -> InflectionRow {
    InflectionRow {
        key: HeadwordKey(key),
        forms: words(forms),
    }
}

/// The compound scenario: `dhamma` is attested in `dn1`, `cakka` only in
/// `other`, and the compound `dhammacakka` in `dn1`.
pub fn dhammacakka_source() -> MemorySource {
    MemorySource::new()
        .with_headword(headword(1, "dhamma", &["dn1"]))
        .with_headword(headword(2, "cakka", &["other"]))
        .with_sandhi(sandhi("dhammacakka", &["dhamma", "cakka"], &["dn1"]))
        .with_inflections(inflections(1, &["dhamma", "dhammo", "dhammassa"]))
        .with_inflections(inflections(2, &["cakka", "cakkaṃ"]))
}

/// Snapshot of [`dhammacakka_source`].
pub fn dhammacakka_snapshot() -> Snapshot {
    Snapshot::load(&dhammacakka_source()).expect("fixture rows are valid")
}

/// A small dictionary touching vowels, digraph letters and homonyms.
pub fn sample_source() -> MemorySource {
    MemorySource::new()
        .with_headword(Headword {
            pos: "masc".into(),
            grammar: "masc".into(),
            meaning_1: "nature; truth".into(),
            source_1: "DN1".into(),
            sutta_1: "Brahmajāla".into(),
            example_1: "dhammaṃ deseti".into(),
            ..headword(1, "dhamma 1", &["dn1", "mn1"])
        })
        .with_headword(Headword {
            pos: "masc".into(),
            meaning_1: "mental object".into(),
            ..headword(2, "dhamma 2", &["mn1"])
        })
        .with_headword(Headword {
            pos: "fem".into(),
            meaning_2: "patience".into(),
            ..headword(3, "khanti", &["sn1"])
        })
        .with_headword(headword(4, "kamma", &["an1"]))
        .with_headword(headword(5, "ābādha", &["vin1"]))
        .with_headword(headword(6, "ṭhāna", &["kn20"]))
        .with_headword(headword(7, "attha", &["dn1"]))
        .with_sandhi(sandhi("tenāha", &["tena", "āha"], &["dn1"]))
        .with_sandhi(sandhi("ṭhānaso", &["ṭhānaso"], &["kn20"]))
        .with_sandhi(sandhi("kammaṭṭhāna", &["kamma", "ṭhāna"], &["mn1"]))
        .with_inflections(inflections(1, &["dhamma", "dhammo", "dhammaṃ"]))
        .with_inflections(inflections(3, &["khanti", "khantiyā"]))
        .with_inflections(inflections(6, &["ṭhāna", "ṭhānaṃ", "ṭhāne"]))
}

/// Writes the rows of `source` as `headwords.json`, `sandhi.json` and
/// `inflections.json` into `dir`.
pub fn write_json_rows(dir: &Path, source: &dyn RowSource) -> std::io::Result<()> {
    let to_io = |e: kosa_core::ExportError| std::io::Error::other(e.to_string());
    std::fs::create_dir_all(dir)?;
    std::fs::write(
        dir.join("headwords.json"),
        serde_json::to_vec_pretty(&source.headwords().map_err(to_io)?)?,
    )?;
    std::fs::write(
        dir.join("sandhi.json"),
        serde_json::to_vec_pretty(&source.sandhi().map_err(to_io)?)?,
    )?;
    std::fs::write(
        dir.join("inflections.json"),
        serde_json::to_vec_pretty(&source.inflections().map_err(to_io)?)?,
    )?;
    Ok(())
}

/// A temporary JSON row directory with automatic cleanup.
pub struct TestRows {
    dir: TempDir,
}

impl TestRows {
    /// Writes `source` into a fresh temporary directory.
    pub fn new(source: &dyn RowSource) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        write_json_rows(dir.path(), source).expect("Failed to write rows");
        Self { dir }
    }

    /// Returns the row directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Runs a test with a temporary output directory.
///
/// # Example
///
/// ```rust
/// use kosa_testkit::with_temp_out;
///
/// with_temp_out(|out| {
///     assert!(out.is_dir());
/// });
/// ```
pub fn with_temp_out<F, R>(f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let dir = TempDir::new().expect("Failed to create temp directory");
    f(dir.path())
}
