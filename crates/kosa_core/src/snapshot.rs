//! Immutable snapshot of the lexical database.
//!
//! A [`Snapshot`] is loaded once per run and passed by shared reference to
//! every pipeline stage. Nothing mutates it after [`Snapshot::load`].

use crate::alphabet::Alphabet;
use crate::error::{EntryRef, ExportError, ExportResult};
use crate::model::{Headword, HeadwordKey, InflectionRow, SandhiRow};
use crate::source::RowSource;
use std::collections::HashMap;
use tracing::info;

/// Read-only arena of headwords, sandhi rows and inflection rows.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    headwords: Vec<Headword>,
    sandhi: Vec<SandhiRow>,
    inflections: Vec<InflectionRow>,
    headword_index: HashMap<HeadwordKey, usize>,
    inflection_index: HashMap<HeadwordKey, usize>,
}

impl Snapshot {
    /// Reads every table from `source` and builds a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or the rows violate the
    /// snapshot invariants (see [`Self::from_rows`]).
    pub fn load(source: &dyn RowSource) -> ExportResult<Self> {
        let snapshot = Self::from_rows(source.headwords()?, source.sandhi()?, source.inflections()?)?;
        info!(
            headwords = snapshot.headwords.len(),
            sandhi = snapshot.sandhi.len(),
            inflections = snapshot.inflections.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Builds a snapshot from complete tables.
    ///
    /// # Errors
    ///
    /// Returns a data integrity error if two headwords share a key or two
    /// inflection rows belong to the same headword.
    pub fn from_rows(
        headwords: Vec<Headword>,
        sandhi: Vec<SandhiRow>,
        inflections: Vec<InflectionRow>,
    ) -> ExportResult<Self> {
        let mut headword_index = HashMap::with_capacity(headwords.len());
        for (i, headword) in headwords.iter().enumerate() {
            if headword_index.insert(headword.key, i).is_some() {
                return Err(ExportError::DuplicateHeadword { key: headword.key });
            }
        }

        let mut inflection_index = HashMap::with_capacity(inflections.len());
        for (i, row) in inflections.iter().enumerate() {
            if inflection_index.insert(row.key, i).is_some() {
                return Err(ExportError::DuplicateInflections { key: row.key });
            }
        }

        Ok(Self {
            headwords,
            sandhi,
            inflections,
            headword_index,
            inflection_index,
        })
    }

    /// Returns all headwords in load order.
    #[must_use]
    pub fn headwords(&self) -> &[Headword] {
        &self.headwords
    }

    /// Returns the headword with the given key.
    #[must_use]
    pub fn headword(&self, key: HeadwordKey) -> Option<&Headword> {
        self.headword_index.get(&key).map(|&i| &self.headwords[i])
    }

    /// Returns all sandhi rows in scan order.
    #[must_use]
    pub fn sandhi(&self) -> &[SandhiRow] {
        &self.sandhi
    }

    /// Returns all inflection rows.
    #[must_use]
    pub fn inflections(&self) -> &[InflectionRow] {
        &self.inflections
    }

    /// Returns the inflection row of a headword, if the table has one.
    #[must_use]
    pub fn inflections_of(&self, key: HeadwordKey) -> Option<&InflectionRow> {
        self.inflection_index.get(&key).map(|&i| &self.inflections[i])
    }
}

/// Collects every data integrity problem in a set of tables.
///
/// Unlike [`Snapshot::from_rows`] and the partitioner, which stop at the
/// first problem, this reports all of them so they can be fixed in one pass.
#[must_use]
pub fn audit_rows(
    headwords: &[Headword],
    sandhi: &[SandhiRow],
    inflections: &[InflectionRow],
    alphabet: &Alphabet,
) -> Vec<ExportError> {
    let mut problems = Vec::new();

    let mut seen = HashMap::new();
    for headword in headwords {
        let count = seen.entry(headword.key).or_insert(0u32);
        *count += 1;
        if *count == 2 {
            problems.push(ExportError::DuplicateHeadword { key: headword.key });
        }
        if alphabet.first_letter_index(&headword.lemma_1).is_none() {
            problems.push(ExportError::unrecognized_letter(
                EntryRef::Headword(headword.key),
                headword.lemma_1.clone(),
            ));
        }
    }

    for row in sandhi {
        if alphabet.first_letter_index(&row.surface).is_none() {
            problems.push(ExportError::unrecognized_letter(
                EntryRef::Sandhi(row.surface.clone()),
                row.surface.clone(),
            ));
        }
    }

    let mut seen = HashMap::new();
    for row in inflections {
        let count = seen.entry(row.key).or_insert(0u32);
        *count += 1;
        if *count == 2 {
            problems.push(ExportError::DuplicateInflections { key: row.key });
        }
    }

    problems
}
