//! # Kosa Core
//!
//! Restricted-vocabulary export of a Pāli dictionary.
//!
//! This crate provides:
//! - Corpus membership and sandhi expansion of the attested vocabulary
//! - Inflection selection restricted to attested forms
//! - Entry id assignment and letter partitioning in Pāli collation order
//! - Rendering through replaceable Handlebars templates
//! - Output sinks for memory and directories
//!
//! ## Pipeline
//!
//! ```text
//! RowSource ─> Snapshot ─> select ─> assign ─> ExportWriter ─> OutputSink
//! ```
//!
//! Every stage reads an immutable [`Snapshot`] and returns a fresh value, so
//! two runs over one snapshot produce byte-identical letter units.
//!
//! ## Example
//!
//! ```rust
//! use kosa_core::{ExportConfig, Headword, HeadwordKey, MemorySink, MemorySource};
//!
//! let source = MemorySource::new().with_headword(Headword {
//!     key: HeadwordKey(1),
//!     lemma_1: "dhamma".into(),
//!     corpus_tags: ["dn1".to_string()].into(),
//!     ..Headword::default()
//! });
//! let config = ExportConfig::new().corpus(["dn1"]);
//!
//! let mut sink = MemorySink::new();
//! let report = kosa_core::run(&source, &config, &mut sink).unwrap();
//! assert_eq!(report.counts.headword_entries, 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod alphabet;
pub mod assemble;
mod config;
pub mod diacritics;
mod error;
pub mod export;
mod model;
pub mod partition;
mod pipeline;
pub mod select;
pub mod sink;
mod snapshot;
mod source;
mod substitute;
pub mod templates;

pub use alphabet::{Alphabet, PALI_LETTERS};
pub use config::{ExportConfig, HeadwordScope, EARLY_TEXT_BOOKS};
pub use diacritics::strip_diacritics;
pub use error::{EntryRef, ExportError, ExportResult};
pub use export::{ExportWriter, LetterUnit, RenderFailure, WriteSummary};
pub use model::{Abbreviation, Headword, HeadwordKey, InflectionRow, SandhiRow, WordSet};
pub use partition::{EntryId, LetterBucket, Partition};
pub use pipeline::{export, plan, run, ExportPlan, ExportReport, SelectionCounts};
pub use select::{Selection, SelectionWarning};
pub use sink::{DirSink, MemorySink, OutputSink};
pub use snapshot::{audit_rows, Snapshot};
pub use source::{load_abbreviations, read_abbreviations, JsonDirSource, MemorySource, RowSource};
pub use substitute::{FieldContext, Substitution, SubstitutionTable};
pub use templates::{TemplateId, Templates};
