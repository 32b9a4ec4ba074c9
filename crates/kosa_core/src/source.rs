//! Row sources.
//!
//! A [`RowSource`] is the read-only bulk interface to the lexical database.
//! The pipeline reads every table once, at the start of a run, and never
//! goes back to the source afterwards.
//!
//! ## Available Sources
//!
//! - [`MemorySource`] - rows held in memory, for tests and embedding
//! - [`JsonDirSource`] - a directory of JSON row files exported from the database

use crate::error::ExportResult;
use crate::model::{Abbreviation, Headword, InflectionRow, SandhiRow};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Bulk, read-only access to the three tables the export needs.
///
/// # Invariants
///
/// - Each call returns a complete table, never a page of it
/// - Row order is the table's scan order and must be stable between calls
pub trait RowSource {
    /// Returns every headword.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    fn headwords(&self) -> ExportResult<Vec<Headword>>;

    /// Returns every sandhi row in scan order.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    fn sandhi(&self) -> ExportResult<Vec<SandhiRow>>;

    /// Returns every inflection row.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    fn inflections(&self) -> ExportResult<Vec<InflectionRow>>;
}

/// A row source backed by vectors in memory.
///
/// # Example
///
/// ```rust
/// use kosa_core::{Headword, HeadwordKey, MemorySource, RowSource};
///
/// let source = MemorySource::new().with_headword(Headword {
///     key: HeadwordKey(1),
///     lemma_1: "dhamma 1".into(),
///     ..Headword::default()
/// });
/// assert_eq!(source.headwords().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    headwords: Vec<Headword>,
    sandhi: Vec<SandhiRow>,
    inflections: Vec<InflectionRow>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source from complete tables.
    #[must_use]
    pub fn from_rows(
        headwords: Vec<Headword>,
        sandhi: Vec<SandhiRow>,
        inflections: Vec<InflectionRow>,
    ) -> Self {
        Self {
            headwords,
            sandhi,
            inflections,
        }
    }

    /// Appends a headword.
    #[must_use]
    pub fn with_headword(mut self, headword: Headword) -> Self {
        self.headwords.push(headword);
        self
    }

    /// Appends a sandhi row.
    #[must_use]
    pub fn with_sandhi(mut self, row: SandhiRow) -> Self {
        self.sandhi.push(row);
        self
    }

    /// Appends an inflection row.
    #[must_use]
    pub fn with_inflections(mut self, row: InflectionRow) -> Self {
        self.inflections.push(row);
        self
    }
}

impl RowSource for MemorySource {
    fn headwords(&self) -> ExportResult<Vec<Headword>> {
        Ok(self.headwords.clone())
    }

    fn sandhi(&self) -> ExportResult<Vec<SandhiRow>> {
        Ok(self.sandhi.clone())
    }

    fn inflections(&self) -> ExportResult<Vec<InflectionRow>> {
        Ok(self.inflections.clone())
    }
}

/// File names within a row directory.
const HEADWORDS_FILE: &str = "headwords.json";
const SANDHI_FILE: &str = "sandhi.json";
const INFLECTIONS_FILE: &str = "inflections.json";

/// A row source reading JSON arrays from a directory:
///
/// ```text
/// <dir>/
/// ├─ headwords.json     # [Headword]
/// ├─ sandhi.json        # [SandhiRow], in scan order
/// └─ inflections.json   # [InflectionRow]
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    /// Creates a source for the given directory. Files are read lazily.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory rows are read from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> ExportResult<Vec<T>> {
        let file = File::open(self.dir.join(name))?;
        let rows = serde_json::from_reader(BufReader::new(file))?;
        Ok(rows)
    }
}

impl RowSource for JsonDirSource {
    fn headwords(&self) -> ExportResult<Vec<Headword>> {
        self.read(HEADWORDS_FILE)
    }

    fn sandhi(&self) -> ExportResult<Vec<SandhiRow>> {
        self.read(SANDHI_FILE)
    }

    fn inflections(&self) -> ExportResult<Vec<InflectionRow>> {
        self.read(INFLECTIONS_FILE)
    }
}

/// Reads the abbreviations index from a tab-separated file with a header row.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a row cannot be parsed.
pub fn load_abbreviations(path: &Path) -> ExportResult<Vec<Abbreviation>> {
    let file = File::open(path)?;
    read_abbreviations(BufReader::new(file))
}

/// Reads the abbreviations index from any tab-separated reader.
///
/// # Errors
///
/// Returns an error if a row cannot be parsed.
pub fn read_abbreviations<R: std::io::Read>(reader: R) -> ExportResult<Vec<Abbreviation>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
