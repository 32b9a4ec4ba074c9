//! Export configuration.

use crate::alphabet::Alphabet;
use crate::error::{ExportError, ExportResult};
use crate::substitute::SubstitutionTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Book codes of the early texts the ebook is restricted to by default.
pub const EARLY_TEXT_BOOKS: [&str; 33] = [
    "vin1", "vin2", "vin3", "vin4", "dn1", "dn2", "dn3", "mn1", "mn2", "mn3", "sn1", "sn2", "sn3",
    "sn4", "sn5", "an1", "an2", "an3", "an4", "an5", "an6", "an7", "an8", "an9", "an10", "an11",
    "kn1", "kn2", "kn3", "kn4", "kn5", "kn8", "kn9",
];

/// Which headwords receive an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadwordScope {
    /// Every headword in the snapshot; inflections are still restricted.
    #[default]
    All,
    /// Only headwords whose clean form, or one of whose inflections, is in
    /// the all-words set.
    Attested,
}

/// Configuration for one export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Corpus identifiers the vocabulary is restricted to.
    pub corpus: BTreeSet<String>,

    /// Which headwords receive an entry.
    pub scope: HeadwordScope,

    /// Whether an allow-list matching no rows stops the run.
    pub fail_on_empty_selection: bool,

    /// Directory of `<name>.hbs` files overriding the built-in templates.
    pub template_dir: Option<PathBuf>,

    /// Tab-separated abbreviations index.
    pub abbreviations: Option<PathBuf>,

    /// Fixed generation time, for reproducible title pages.
    pub generated_at: Option<DateTime<Utc>>,

    /// Alphabet letters in collation order (Pāli if unset).
    pub alphabet: Option<Vec<String>>,

    /// Fixed text substitutions applied to rendered fields.
    pub substitutions: SubstitutionTable,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            corpus: EARLY_TEXT_BOOKS.iter().map(|b| (*b).to_string()).collect(),
            scope: HeadwordScope::All,
            fail_on_empty_selection: false,
            template_dir: None,
            abbreviations: None,
            generated_at: None,
            alphabet: None,
            substitutions: SubstitutionTable::default(),
        }
    }
}

impl ExportConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from a JSON file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> ExportResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Replaces the corpus allow-list.
    #[must_use]
    pub fn corpus<I, S>(mut self, books: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.corpus = books.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the headword scope.
    #[must_use]
    pub fn scope(mut self, scope: HeadwordScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets whether an empty selection stops the run.
    #[must_use]
    pub fn fail_on_empty_selection(mut self, value: bool) -> Self {
        self.fail_on_empty_selection = value;
        self
    }

    /// Sets the template override directory.
    #[must_use]
    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Sets the abbreviations file.
    #[must_use]
    pub fn abbreviations(mut self, path: impl Into<PathBuf>) -> Self {
        self.abbreviations = Some(path.into());
        self
    }

    /// Pins the generation time.
    #[must_use]
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Builds the configured alphabet.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured letter list is invalid.
    pub fn build_alphabet(&self) -> ExportResult<Alphabet> {
        match &self.alphabet {
            Some(letters) => Alphabet::new(letters),
            None => Ok(Alphabet::pali()),
        }
    }

    /// Checks the configuration before a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the corpus allow-list is empty.
    pub fn validate(&self) -> ExportResult<()> {
        if self.corpus.is_empty() {
            return Err(ExportError::invalid_config("corpus allow-list is empty"));
        }
        Ok(())
    }
}
