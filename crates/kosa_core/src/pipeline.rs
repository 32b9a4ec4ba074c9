//! End-to-end export runs.
//!
//! ```text
//! RowSource ─> Snapshot ─> select ─> assign ─> ExportWriter ─> OutputSink
//! ```
//!
//! [`plan`] stops after partitioning and writes nothing; [`export`] runs
//! every stage. Both are all-or-nothing except for per-entry render
//! failures, which are recorded in the report.

use crate::alphabet::Alphabet;
use crate::config::ExportConfig;
use crate::error::ExportResult;
use crate::export::{ExportWriter, LetterUnit, RenderFailure};
use crate::partition::{self, Partition};
use crate::select::{self, Selection, SelectionWarning};
use crate::sink::OutputSink;
use crate::snapshot::Snapshot;
use crate::source::{load_abbreviations, RowSource};
use crate::templates::Templates;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Selection and partition of one snapshot, before anything is rendered.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    /// Alphabet the partition was built with.
    pub alphabet: Alphabet,
    /// Selected vocabulary.
    pub selection: Selection,
    /// Entry ids and letter buckets.
    pub partition: Partition,
}

/// Set sizes of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionCounts {
    /// Headword rows in the snapshot.
    pub headword_rows: usize,
    /// Sandhi rows in the snapshot.
    pub sandhi_rows: usize,
    /// Distinct headword forms attested in the corpus.
    pub corpus_headwords: usize,
    /// Distinct sandhi forms attested in the corpus.
    pub corpus_sandhi: usize,
    /// Components of attested sandhi forms.
    pub sandhi_components: usize,
    /// Size of the all-words set.
    pub all_words: usize,
    /// Inflected forms kept, not counting fallback forms.
    pub attested_inflections: usize,
    /// Headword entries.
    pub headword_entries: usize,
    /// Sandhi entries.
    pub sandhi_entries: usize,
}

impl SelectionCounts {
    /// Collects the counts of a plan.
    #[must_use]
    pub fn of(snapshot: &Snapshot, plan: &ExportPlan) -> Self {
        let selection = &plan.selection;
        Self {
            headword_rows: snapshot.headwords().len(),
            sandhi_rows: snapshot.sandhi().len(),
            corpus_headwords: selection.corpus_headwords.words.len(),
            corpus_sandhi: selection.corpus_sandhi.words.len(),
            sandhi_components: selection.sandhi_components.len(),
            all_words: selection.all_words.len(),
            attested_inflections: selection.inflections.attested_forms(),
            headword_entries: plan.partition.headword_entries(),
            sandhi_entries: plan.partition.sandhi_entries(),
        }
    }
}

/// Summary of a finished export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    /// Generation time written to the title pages.
    pub generated_at: DateTime<Utc>,
    /// Set sizes.
    pub counts: SelectionCounts,
    /// Letter units in alphabet order.
    pub letters: Vec<LetterUnit>,
    /// Abbreviations written.
    pub abbreviations: usize,
    /// Non-fatal selection problems.
    pub warnings: Vec<SelectionWarning>,
    /// Entries skipped because they failed to render.
    pub render_failures: Vec<RenderFailure>,
    /// Hex SHA-256 over the letter units.
    pub digest: String,
}

impl ExportReport {
    /// Returns true if every placed entry was rendered and nothing was
    /// flagged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.render_failures.is_empty()
    }
}

/// Selects and partitions `snapshot` without rendering.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the selection is empty
/// and configured to fail, or a row has no alphabet letter.
pub fn plan(snapshot: &Snapshot, config: &ExportConfig) -> ExportResult<ExportPlan> {
    let alphabet = config.build_alphabet()?;
    let selection = select::select(snapshot, config)?;
    let partition = partition::assign(snapshot, &selection, &alphabet)?;
    Ok(ExportPlan {
        alphabet,
        selection,
        partition,
    })
}

/// Loads `source` and exports it into `sink`.
///
/// # Errors
///
/// Returns an error if loading fails or any stage of [`export`] fails.
pub fn run(
    source: &dyn RowSource,
    config: &ExportConfig,
    sink: &mut dyn OutputSink,
) -> ExportResult<ExportReport> {
    let snapshot = Snapshot::load(source)?;
    export(&snapshot, config, sink)
}

/// Exports `snapshot` into `sink`.
///
/// The sink is cleared before the first unit is written.
///
/// # Errors
///
/// Returns an error if planning fails, templates or abbreviations cannot be
/// loaded, or the sink fails.
pub fn export(
    snapshot: &Snapshot,
    config: &ExportConfig,
    sink: &mut dyn OutputSink,
) -> ExportResult<ExportReport> {
    let templates = match &config.template_dir {
        Some(dir) => Templates::with_overrides(dir)?,
        None => Templates::builtin()?,
    };
    let abbreviations = match &config.abbreviations {
        Some(path) => load_abbreviations(path)?,
        None => Vec::new(),
    };
    let generated_at = config.generated_at.unwrap_or_else(Utc::now);

    let plan = plan(snapshot, config)?;
    let written = ExportWriter::new(&templates, &config.substitutions).write(
        snapshot,
        &plan.selection,
        &plan.partition,
        &abbreviations,
        generated_at,
        sink,
    )?;

    let report = ExportReport {
        generated_at,
        counts: SelectionCounts::of(snapshot, &plan),
        letters: written.letters,
        abbreviations: written.abbreviations,
        warnings: plan.selection.warnings,
        render_failures: written.render_failures,
        digest: written.digest,
    };
    info!(
        entries = report.counts.headword_entries + report.counts.sandhi_entries,
        skipped = report.render_failures.len(),
        digest = %report.digest,
        "export complete"
    );
    Ok(report)
}
