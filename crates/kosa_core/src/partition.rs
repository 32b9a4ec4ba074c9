//! Entry id assignment and letter buckets.
//!
//! Ids are assigned in two phases:
//!
//! 1. selected headwords, in alphabet order of their primary form
//! 2. sandhi rows whose form is in the all-words set, in scan order
//!
//! Ids run from 1 without gaps across both phases. Each entry is appended to
//! the bucket of its first letter, so within a bucket headwords come first,
//! in collation order, followed by sandhi rows in scan order. The output is
//! identical between runs on the same snapshot.

use crate::alphabet::Alphabet;
use crate::error::{EntryRef, ExportError, ExportResult};
use crate::select::Selection;
use crate::snapshot::Snapshot;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Rows between progress messages.
const PROGRESS_INTERVAL: usize = 5000;

/// Run-scoped display counter of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryId(pub u32);

impl EntryId {
    /// The first id of a run.
    pub const FIRST: Self = Self(1);

    /// Returns the id after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The snapshot row an entry is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    /// Index into [`Snapshot::headwords`].
    Headword(usize),
    /// Index into [`Snapshot::sandhi`].
    Sandhi(usize),
}

impl EntrySource {
    /// Returns the identifier used in error reports.
    #[must_use]
    pub fn entry_ref(self, snapshot: &Snapshot) -> EntryRef {
        match self {
            Self::Headword(i) => EntryRef::Headword(snapshot.headwords()[i].key),
            Self::Sandhi(i) => EntryRef::Sandhi(snapshot.sandhi()[i].surface.clone()),
        }
    }
}

/// One entry placed in a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Assigned id.
    pub id: EntryId,
    /// Row the entry is built from.
    pub source: EntrySource,
}

/// Entries of one alphabet letter, in assignment order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterBucket {
    letter: String,
    entries: Vec<Placement>,
}

impl LetterBucket {
    fn new(letter: &str) -> Self {
        Self {
            letter: letter.to_string(),
            entries: Vec::new(),
        }
    }

    /// Returns the bucket's letter.
    #[must_use]
    pub fn letter(&self) -> &str {
        &self.letter
    }

    /// Returns the entries in assignment order.
    #[must_use]
    pub fn entries(&self) -> &[Placement] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the letter has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All letter buckets of a run, in alphabet order.
///
/// Every letter of the alphabet has a bucket, including letters with no
/// entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    buckets: Vec<LetterBucket>,
    headword_entries: usize,
    sandhi_entries: usize,
}

impl Partition {
    /// Returns the buckets in alphabet order.
    #[must_use]
    pub fn buckets(&self) -> &[LetterBucket] {
        &self.buckets
    }

    /// Returns the bucket of `letter`.
    #[must_use]
    pub fn bucket(&self, letter: &str) -> Option<&LetterBucket> {
        self.buckets.iter().find(|b| b.letter == letter)
    }

    /// Returns the number of headword entries.
    #[must_use]
    pub fn headword_entries(&self) -> usize {
        self.headword_entries
    }

    /// Returns the number of sandhi entries.
    #[must_use]
    pub fn sandhi_entries(&self) -> usize {
        self.sandhi_entries
    }

    /// Returns the total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headword_entries + self.sandhi_entries
    }

    /// Returns true if no entry was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the first id not assigned to any entry.
    #[must_use]
    pub fn next_id(&self) -> EntryId {
        EntryId(self.len() as u32 + 1)
    }

    /// Returns every placement, ordered by id.
    #[must_use]
    pub fn placements(&self) -> Vec<Placement> {
        let mut all: Vec<Placement> = self
            .buckets
            .iter()
            .flat_map(|b| b.entries.iter().copied())
            .collect();
        all.sort_by_key(|p| p.id);
        all
    }
}

/// Assigns ids to the selected entries and buckets them by first letter.
///
/// # Errors
///
/// Returns a data integrity error naming the row if a headword or a
/// qualifying sandhi form has no alphabet letter. Nothing is partitioned in
/// that case.
pub fn assign(
    snapshot: &Snapshot,
    selection: &Selection,
    alphabet: &Alphabet,
) -> ExportResult<Partition> {
    let headwords = snapshot.headwords();

    let mut order: Vec<usize> = (0..headwords.len())
        .filter(|&i| selection.inflections.includes(headwords[i].key))
        .collect();
    order.sort_by_cached_key(|&i| (alphabet.sort_key(&headwords[i].lemma_1), headwords[i].key));

    let mut buckets: Vec<LetterBucket> = alphabet.letters().map(LetterBucket::new).collect();
    let mut id = EntryId::FIRST;

    for (counter, &i) in order.iter().enumerate() {
        let headword = &headwords[i];
        let letter = alphabet.first_letter_index(&headword.lemma_1).ok_or_else(|| {
            ExportError::unrecognized_letter(EntryRef::Headword(headword.key), &headword.lemma_1)
        })?;
        buckets[letter].entries.push(Placement {
            id,
            source: EntrySource::Headword(i),
        });
        id = id.next();

        if counter % PROGRESS_INTERVAL == 0 {
            debug!(counter, total = order.len(), lemma = %headword.lemma_1, "placing headwords");
        }
    }
    let headword_entries = order.len();

    let mut sandhi_entries = 0;
    for (i, row) in snapshot.sandhi().iter().enumerate() {
        if !selection.all_words.contains(&row.surface) {
            continue;
        }
        let letter = alphabet.first_letter_index(&row.surface).ok_or_else(|| {
            ExportError::unrecognized_letter(EntryRef::Sandhi(row.surface.clone()), &row.surface)
        })?;
        buckets[letter].entries.push(Placement {
            id,
            source: EntrySource::Sandhi(i),
        });
        id = id.next();
        sandhi_entries += 1;

        if i % PROGRESS_INTERVAL == 0 {
            debug!(counter = i, total = snapshot.sandhi().len(), sandhi = %row.surface, "placing sandhi");
        }
    }

    info!(
        headwords = headword_entries,
        sandhi = sandhi_entries,
        letters = buckets.len(),
        "partitioned entries"
    );

    Ok(Partition {
        buckets,
        headword_entries,
        sandhi_entries,
    })
}
