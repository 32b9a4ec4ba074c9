//! Error types for the export pipeline.

use crate::model::HeadwordKey;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Identifies the row an error or warning is about.
///
/// Every failure names its row so the entry can be corrected by hand.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntryRef {
    /// A headword, by its stable key.
    Headword(HeadwordKey),
    /// A sandhi row, by its surface form.
    Sandhi(String),
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Headword(key) => write!(f, "headword {key}"),
            Self::Sandhi(surface) => write!(f, "sandhi '{surface}'"),
        }
    }
}

/// Errors that can occur while building an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A JSON row file could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A tab-separated file could not be parsed.
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A template could not be compiled.
    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// A surface form has no recognizable first letter.
    #[error("data integrity: {entry} has no alphabet letter in '{surface}'")]
    UnrecognizedLetter {
        /// The offending row.
        entry: EntryRef,
        /// The surface form that failed to normalize.
        surface: String,
    },

    /// Two headwords share one key.
    #[error("data integrity: duplicate headword key {key}")]
    DuplicateHeadword {
        /// The repeated key.
        key: HeadwordKey,
    },

    /// Two inflection rows share one headword key.
    #[error("data integrity: duplicate inflection row for headword {key}")]
    DuplicateInflections {
        /// The repeated key.
        key: HeadwordKey,
    },

    /// The corpus allow-list matched no rows and the run is configured to stop.
    #[error("empty selection: corpus allow-list of {books} books matched no rows")]
    EmptySelection {
        /// Number of corpus identifiers in the allow-list.
        books: usize,
    },

    /// The templating collaborator could not render an entry.
    #[error("render failed for {entry}: {message}")]
    Render {
        /// The entry being rendered.
        entry: EntryRef,
        /// Collaborator message.
        message: String,
    },

    /// Another export holds the output directory.
    #[error("output directory locked: {}", path.display())]
    OutputLocked {
        /// The locked directory.
        path: PathBuf,
    },

    /// Configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

impl ExportError {
    /// Creates an unrecognized-letter error.
    pub fn unrecognized_letter(entry: EntryRef, surface: impl Into<String>) -> Self {
        Self::UnrecognizedLetter {
            entry,
            surface: surface.into(),
        }
    }

    /// Creates a render error.
    pub fn render(entry: EntryRef, message: impl Into<String>) -> Self {
        Self::Render {
            entry,
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by bad rows in the snapshot.
    #[must_use]
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedLetter { .. }
                | Self::DuplicateHeadword { .. }
                | Self::DuplicateInflections { .. }
        )
    }

    /// Returns the row this error is about, if any.
    #[must_use]
    pub fn entry(&self) -> Option<EntryRef> {
        match self {
            Self::UnrecognizedLetter { entry, .. } | Self::Render { entry, .. } => {
                Some(entry.clone())
            }
            Self::DuplicateHeadword { key } | Self::DuplicateInflections { key } => {
                Some(EntryRef::Headword(*key))
            }
            _ => None,
        }
    }
}

impl From<handlebars::TemplateError> for ExportError {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}
