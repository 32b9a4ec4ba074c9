//! Writes the rendered export to a sink.
//!
//! One run produces:
//!
//! ```text
//! {index}_{ascii letter}.xhtml   # one per alphabet letter, empty letters included
//! abbreviations.xhtml
//! titlepage.xhtml
//! content.opf
//! ```
//!
//! Letter units are hashed in write order; equal digests mean byte-identical
//! letter units.

use crate::assemble::EntryAssembler;
use crate::diacritics::strip_diacritics;
use crate::error::{EntryRef, ExportResult};
use crate::model::{Abbreviation, WordSet};
use crate::partition::{EntryId, EntrySource, LetterBucket, Partition};
use crate::select::Selection;
use crate::sink::OutputSink;
use crate::snapshot::Snapshot;
use crate::substitute::{FieldContext, SubstitutionTable};
use crate::templates::{TemplateId, Templates};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

/// Name of the abbreviations unit.
pub const ABBREVIATIONS_UNIT: &str = "abbreviations.xhtml";
/// Name of the title page unit.
pub const TITLE_PAGE_UNIT: &str = "titlepage.xhtml";
/// Name of the package manifest unit.
pub const CONTENT_OPF_UNIT: &str = "content.opf";

const ABBREVIATIONS_HEADING: &str = "Abbreviations";

static NO_FORMS: WordSet = WordSet::new();

/// Returns the unit name of the letter at `index` in the alphabet.
#[must_use]
pub fn letter_unit_name(index: usize, letter: &str) -> String {
    format!("{index}_{}.xhtml", strip_diacritics(letter))
}

/// An entry the templating collaborator could not render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderFailure {
    /// Id the entry was assigned; it is not reused.
    pub id: EntryId,
    /// The entry.
    pub entry: EntryRef,
    /// Collaborator message.
    pub message: String,
}

/// What was written for one letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterUnit {
    /// The alphabet letter.
    pub letter: String,
    /// Unit name in the sink.
    pub unit: String,
    /// Entries placed in the letter.
    pub entries: usize,
    /// Entries actually rendered.
    pub rendered: usize,
}

/// Outcome of writing one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    /// Letter units in alphabet order.
    pub letters: Vec<LetterUnit>,
    /// Abbreviations written.
    pub abbreviations: usize,
    /// Entries skipped because they failed to render.
    pub render_failures: Vec<RenderFailure>,
    /// Hex SHA-256 over the letter units.
    pub digest: String,
    /// Units written in total.
    pub units: usize,
}

/// Renders partitioned entries into units and hands them to a sink.
#[derive(Debug)]
pub struct ExportWriter<'a> {
    templates: &'a Templates,
    substitutions: &'a SubstitutionTable,
}

impl<'a> ExportWriter<'a> {
    /// Creates a writer.
    #[must_use]
    pub const fn new(templates: &'a Templates, substitutions: &'a SubstitutionTable) -> Self {
        Self {
            templates,
            substitutions,
        }
    }

    fn assembler(&self) -> EntryAssembler<'a> {
        EntryAssembler::new(self.templates, self.substitutions)
    }

    /// Clears `sink` and writes every unit of the run.
    ///
    /// An entry that fails to render is skipped and recorded; its id stays
    /// assigned. Any other failure stops the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails or a page template cannot be
    /// rendered.
    pub fn write(
        &self,
        snapshot: &Snapshot,
        selection: &Selection,
        partition: &Partition,
        abbreviations: &[Abbreviation],
        generated_at: DateTime<Utc>,
        sink: &mut dyn OutputSink,
    ) -> ExportResult<WriteSummary> {
        sink.clear()?;

        let mut hasher = Sha256::new();
        let mut letters = Vec::with_capacity(partition.buckets().len());
        let mut render_failures = Vec::new();

        for (index, bucket) in partition.buckets().iter().enumerate() {
            let (entries, rendered) =
                self.render_bucket(snapshot, selection, bucket, &mut render_failures);
            let page = self.templates.render_page(
                TemplateId::Letter,
                &json!({ "letter": bucket.letter(), "entries": entries }),
            )?;

            let unit = letter_unit_name(index, bucket.letter());
            hasher.update(unit.as_bytes());
            hasher.update(b"\n");
            hasher.update(page.as_bytes());
            sink.write_unit(&unit, &page)?;

            letters.push(LetterUnit {
                letter: bucket.letter().to_string(),
                unit,
                entries: bucket.len(),
                rendered,
            });
        }
        let total: usize = letters.iter().map(|l| l.rendered).sum();
        info!(letters = letters.len(), entries = total, "saved entries");

        let abbreviation_count =
            self.write_abbreviations(abbreviations, partition.next_id(), sink)?;
        self.write_title_pages(generated_at, sink)?;
        sink.finish()?;

        let digest = hex_encode(&hasher.finalize());
        debug!(%digest, "letter units digest");

        Ok(WriteSummary {
            units: letters.len() + 3,
            letters,
            abbreviations: abbreviation_count,
            render_failures,
            digest,
        })
    }

    fn render_bucket(
        &self,
        snapshot: &Snapshot,
        selection: &Selection,
        bucket: &LetterBucket,
        failures: &mut Vec<RenderFailure>,
    ) -> (String, usize) {
        let assembler = self.assembler();
        let mut html = String::new();
        let mut rendered = 0;

        for placement in bucket.entries() {
            let result = match placement.source {
                EntrySource::Headword(i) => {
                    let headword = &snapshot.headwords()[i];
                    let forms = selection
                        .inflections
                        .forms(headword.key)
                        .unwrap_or(&NO_FORMS);
                    assembler.headword(placement.id, headword, forms)
                }
                EntrySource::Sandhi(i) => assembler.sandhi(placement.id, &snapshot.sandhi()[i]),
            };

            match result {
                Ok(entry) => {
                    html.push_str(&entry);
                    rendered += 1;
                }
                Err(err) => {
                    let entry = placement.source.entry_ref(snapshot);
                    warn!(id = %placement.id, %entry, error = %err, "skipping entry");
                    failures.push(RenderFailure {
                        id: placement.id,
                        entry,
                        message: err.to_string(),
                    });
                }
            }
        }
        (html, rendered)
    }

    fn write_abbreviations(
        &self,
        abbreviations: &[Abbreviation],
        first_id: EntryId,
        sink: &mut dyn OutputSink,
    ) -> ExportResult<usize> {
        let assembler = self.assembler();
        let mut entries = String::new();
        let mut id = first_id;
        for abbreviation in abbreviations {
            entries.push_str(&assembler.abbreviation(id, abbreviation)?);
            id = id.next();
        }
        let entries = self
            .substitutions
            .apply(FieldContext::Abbreviations, &entries);

        let page = self.templates.render_page(
            TemplateId::Letter,
            &json!({ "letter": ABBREVIATIONS_HEADING, "entries": entries }),
        )?;
        sink.write_unit(ABBREVIATIONS_UNIT, &page)?;
        info!(count = abbreviations.len(), "saved abbreviations");
        Ok(abbreviations.len())
    }

    fn write_title_pages(
        &self,
        generated_at: DateTime<Utc>,
        sink: &mut dyn OutputSink,
    ) -> ExportResult<()> {
        let title = self.templates.render_page(
            TemplateId::TitlePage,
            &json!({
                "date": generated_at.format("%Y-%m-%d").to_string(),
                "time": generated_at.format("%H:%M").to_string(),
            }),
        )?;
        sink.write_unit(TITLE_PAGE_UNIT, &title)?;

        let opf = self.templates.render_page(
            TemplateId::ContentOpf,
            &json!({ "date_time_zulu": generated_at.format("%Y-%m-%dT%H:%M:%SZ").to_string() }),
        )?;
        sink.write_unit(CONTENT_OPF_UNIT, &opf)?;
        Ok(())
    }
}

/// Encodes bytes as a lowercase hexadecimal string.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
