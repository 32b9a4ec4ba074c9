//! Entry assembly.
//!
//! The assembler derives the display fields of an entry (summary line,
//! grammar composite, example block, sandhi splits) and hands them to the
//! templating collaborator. Text substitutions are applied to the derived
//! fields here, never inside templates.

use crate::error::{EntryRef, ExportResult};
use crate::model::{Abbreviation, Headword, SandhiRow, WordSet};
use crate::partition::EntryId;
use crate::substitute::{FieldContext, SubstitutionTable};
use crate::templates::{TemplateId, Templates};
use serde::Serialize;

const LINE_BREAK: &str = "<br/>";

/// How far a headword's data has been filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Meaning and source present.
    Complete,
    /// Meaning present, no source.
    Partial,
    /// No meaning.
    Missing,
}

impl Completion {
    /// Classifies a headword.
    #[must_use]
    pub fn of(headword: &Headword) -> Self {
        match (headword.meaning_1.is_empty(), headword.source_1.is_empty()) {
            (false, false) => Self::Complete,
            (false, true) => Self::Partial,
            (true, _) => Self::Missing,
        }
    }

    /// Returns the mark shown at the end of the summary.
    #[must_use]
    pub const fn mark(self) -> &'static str {
        match self {
            Self::Complete => "✓",
            Self::Partial => "~",
            Self::Missing => "✗",
        }
    }
}

/// Returns the meaning as markup: the bold primary meaning with its literal
/// sense, or the secondary meaning when there is no primary one.
#[must_use]
pub fn meaning_html(headword: &Headword) -> String {
    if headword.meaning_1.is_empty() {
        return headword.meaning_2.clone();
    }
    let mut html = format!("<b>{}</b>", headword.meaning_1);
    if !headword.meaning_lit.is_empty() {
        html.push_str("; lit. ");
        html.push_str(&headword.meaning_lit);
    }
    html
}

/// Returns the first line of the construction, trimmed.
#[must_use]
pub fn construction_summary(headword: &Headword) -> &str {
    headword.construction.lines().next().unwrap_or("").trim()
}

/// Builds the one-line summary, before substitutions.
#[must_use]
pub fn summary(headword: &Headword) -> String {
    let mut text = format!("{}. ", headword.pos);
    if !headword.plus_case.is_empty() {
        text.push_str(&format!("({}) ", headword.plus_case));
    }
    text.push_str(&meaning_html(headword));

    let construction = construction_summary(headword);
    if !construction.is_empty() {
        text.push_str(&format!(" [{construction}]"));
    }
    text.push(' ');
    text.push_str(Completion::of(headword).mark());
    text
}

/// Joins the grammar fields into the line shown in the grammar table.
#[must_use]
pub fn grammar_composite(headword: &Headword) -> String {
    let mut grammar = headword.grammar.clone();
    for part in [&headword.neg, &headword.verb, &headword.trans] {
        if !part.is_empty() {
            grammar.push_str(", ");
            grammar.push_str(part);
        }
    }
    if !headword.plus_case.is_empty() {
        grammar.push_str(&format!(" ({})", headword.plus_case));
    }
    grammar
}

/// Joins the alternative splits of a sandhi row, one per line.
#[must_use]
pub fn sandhi_splits(row: &SandhiRow) -> String {
    row.splits
        .iter()
        .map(|split| split.join(" + "))
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

fn with_breaks(text: &str) -> String {
    text.replace('\n', LINE_BREAK)
}

#[derive(Serialize)]
struct GrammarFields<'a> {
    lemma_1: &'a str,
    grammar: String,
    meaning: String,
    root_key: &'a str,
    root_sign: &'a str,
    root_base: &'a str,
    construction: String,
    phonetic: String,
    compound_type: &'a str,
    compound_construction: &'a str,
}

#[derive(Serialize)]
struct ExampleFields<'a> {
    source_1: &'a str,
    sutta_1: String,
    example_1: String,
    source_2: &'a str,
    sutta_2: String,
    example_2: String,
}

#[derive(Serialize)]
struct EntryFields<'a> {
    counter: EntryId,
    lemma_1: &'a str,
    lemma_clean: &'a str,
    inflections: &'a WordSet,
    summary: String,
    grammar_table: String,
    examples: String,
}

#[derive(Serialize)]
struct SandhiFields<'a> {
    counter: EntryId,
    sandhi: &'a str,
    splits: String,
}

#[derive(Serialize)]
struct AbbreviationFields<'a> {
    counter: EntryId,
    abbreviation: &'a str,
    meaning: &'a str,
    pali: &'a str,
    example: &'a str,
    information: &'a str,
}

/// Renders entries through the templating collaborator.
#[derive(Debug, Clone, Copy)]
pub struct EntryAssembler<'a> {
    templates: &'a Templates,
    substitutions: &'a SubstitutionTable,
}

impl<'a> EntryAssembler<'a> {
    /// Creates an assembler.
    #[must_use]
    pub const fn new(templates: &'a Templates, substitutions: &'a SubstitutionTable) -> Self {
        Self {
            templates,
            substitutions,
        }
    }

    /// Renders a headword entry with its selected inflections.
    ///
    /// # Errors
    ///
    /// Returns a render error naming the headword if any template fails.
    pub fn headword(
        &self,
        id: EntryId,
        headword: &Headword,
        inflections: &WordSet,
    ) -> ExportResult<String> {
        let entry = EntryRef::Headword(headword.key);
        let fields = EntryFields {
            counter: id,
            lemma_1: &headword.lemma_1,
            lemma_clean: headword.lemma_clean(),
            inflections,
            summary: self
                .substitutions
                .apply(FieldContext::Summary, &summary(headword)),
            grammar_table: self.grammar_table(&entry, headword)?,
            examples: self.examples(&entry, headword)?,
        };
        self.templates.render(TemplateId::Entry, &entry, &fields)
    }

    fn grammar_table(&self, entry: &EntryRef, headword: &Headword) -> ExportResult<String> {
        if headword.meaning_1.is_empty() {
            return Ok(String::new());
        }
        let fields = GrammarFields {
            lemma_1: &headword.lemma_1,
            grammar: grammar_composite(headword),
            meaning: meaning_html(headword),
            root_key: &headword.root_key,
            root_sign: &headword.root_sign,
            root_base: &headword.root_base,
            construction: with_breaks(&headword.construction),
            phonetic: with_breaks(&headword.phonetic),
            compound_type: &headword.compound_type,
            compound_construction: &headword.compound_construction,
        };
        let table = self.templates.render(TemplateId::Grammar, entry, &fields)?;
        Ok(self.substitutions.apply(FieldContext::GrammarTable, &table))
    }

    fn examples(&self, entry: &EntryRef, headword: &Headword) -> ExportResult<String> {
        if headword.meaning_1.is_empty() || headword.example_1.is_empty() {
            return Ok(String::new());
        }
        let fields = ExampleFields {
            source_1: &headword.source_1,
            sutta_1: with_breaks(&headword.sutta_1),
            example_1: with_breaks(&headword.example_1),
            source_2: &headword.source_2,
            sutta_2: with_breaks(&headword.sutta_2),
            example_2: with_breaks(&headword.example_2),
        };
        self.templates.render(TemplateId::Example, entry, &fields)
    }

    /// Renders a sandhi entry.
    ///
    /// # Errors
    ///
    /// Returns a render error naming the sandhi form if the template fails.
    pub fn sandhi(&self, id: EntryId, row: &SandhiRow) -> ExportResult<String> {
        let entry = EntryRef::Sandhi(row.surface.clone());
        let fields = SandhiFields {
            counter: id,
            sandhi: &row.surface,
            splits: sandhi_splits(row),
        };
        self.templates.render(TemplateId::Sandhi, &entry, &fields)
    }

    /// Renders one abbreviation.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails.
    pub fn abbreviation(&self, id: EntryId, abbreviation: &Abbreviation) -> ExportResult<String> {
        let fields = AbbreviationFields {
            counter: id,
            abbreviation: &abbreviation.abbreviation,
            meaning: &abbreviation.meaning,
            pali: &abbreviation.pali,
            example: &abbreviation.example,
            information: &abbreviation.information,
        };
        self.templates.render_page(TemplateId::Abbreviation, &fields)
    }
}
