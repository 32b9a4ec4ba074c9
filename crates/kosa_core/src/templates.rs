//! Templating collaborator.
//!
//! Entries are rendered by named Handlebars templates. Built-in templates
//! produce e-reader XHTML; any of them can be replaced by a file named
//! `<template>.hbs` in a template directory.
//!
//! Rendering is strict: a template that refers to a field the data does not
//! have fails instead of printing an empty string.

use crate::error::{EntryRef, ExportError, ExportResult};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Names of the templates the export uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    /// A headword entry.
    Entry,
    /// A sandhi entry.
    Sandhi,
    /// The grammar table inside a headword entry.
    Grammar,
    /// The example block inside a headword entry.
    Example,
    /// One page of entries.
    Letter,
    /// One abbreviation.
    Abbreviation,
    /// The title page.
    TitlePage,
    /// The package manifest.
    ContentOpf,
}

impl TemplateId {
    /// Every template, in registration order.
    pub const ALL: [Self; 8] = [
        Self::Entry,
        Self::Sandhi,
        Self::Grammar,
        Self::Example,
        Self::Letter,
        Self::Abbreviation,
        Self::TitlePage,
        Self::ContentOpf,
    ];

    /// Returns the template name, also the override file stem.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Sandhi => "sandhi",
            Self::Grammar => "grammar",
            Self::Example => "example",
            Self::Letter => "letter",
            Self::Abbreviation => "abbreviation",
            Self::TitlePage => "title_page",
            Self::ContentOpf => "content_opf",
        }
    }

    const fn builtin(self) -> &'static str {
        match self {
            Self::Entry => ENTRY_TEMPLATE,
            Self::Sandhi => SANDHI_TEMPLATE,
            Self::Grammar => GRAMMAR_TEMPLATE,
            Self::Example => EXAMPLE_TEMPLATE,
            Self::Letter => LETTER_TEMPLATE,
            Self::Abbreviation => ABBREVIATION_TEMPLATE,
            Self::TitlePage => TITLE_PAGE_TEMPLATE,
            Self::ContentOpf => CONTENT_OPF_TEMPLATE,
        }
    }
}

const ENTRY_TEMPLATE: &str = r#"<idx:entry name="default" scriptable="yes" spell="yes" id="{{counter}}">
<idx:short><a id="{{counter}}"></a>
<idx:orth value="{{lemma_clean}}"><b>{{lemma_1}}</b>
<idx:infl>{{#each inflections}}<idx:iform value="{{this}}"/>{{/each}}</idx:infl>
</idx:orth>
<p>{{summary}}</p>{{grammar_table}}{{examples}}
</idx:short></idx:entry>
"#;

const SANDHI_TEMPLATE: &str = r#"<idx:entry name="default" scriptable="yes" spell="yes" id="{{counter}}">
<idx:short><a id="{{counter}}"></a>
<idx:orth value="{{sandhi}}"><b>{{sandhi}}</b></idx:orth>
<p>sandhi: {{splits}}</p>
</idx:short></idx:entry>
"#;

const GRAMMAR_TEMPLATE: &str = r#"<table class="grammar">
<tr><th>Pāḷi</th><td>{{lemma_1}}</td></tr>
<tr><th>Grammar</th><td>{{grammar}}</td></tr>
<tr><th>Meaning</th><td>{{meaning}}</td></tr>
{{#if root_key}}<tr><th>Root</th><td>{{root_key}} {{root_sign}}</td></tr>
{{/if}}{{#if root_base}}<tr><th>Base</th><td>{{root_base}}</td></tr>
{{/if}}{{#if construction}}<tr><th>Construction</th><td>{{construction}}</td></tr>
{{/if}}{{#if phonetic}}<tr><th>Phonetic Change</th><td>{{phonetic}}</td></tr>
{{/if}}{{#if compound_type}}<tr><th>Compound</th><td>{{compound_type}} ({{compound_construction}})</td></tr>
{{/if}}</table>
"#;

const EXAMPLE_TEMPLATE: &str = r#"<p class="example">{{example_1}}<br/><i>{{source_1}} {{sutta_1}}</i></p>
{{#if example_2}}<p class="example">{{example_2}}<br/><i>{{source_2}} {{sutta_2}}</i></p>
{{/if}}"#;

const LETTER_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns:math="http://exslt.org/math" xmlns:svg="http://www.w3.org/2000/svg" xmlns:tl="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf" xmlns:saxon="http://saxon.sf.net/" xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:cx="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:mbp="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf" xmlns:mmc="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf" xmlns:idx="https://kindlegen.s3.amazonaws.com/AmazonKindlePublishingGuidelines.pdf">
<head><meta http-equiv="Content-Type" content="text/html; charset=utf-8"/><link rel="stylesheet" href="../Styles/style.css" type="text/css"/></head>
<body>
<mbp:frameset>
<h3>{{letter}}</h3>
{{entries}}
</mbp:frameset>
</body>
</html>
"#;

const ABBREVIATION_TEMPLATE: &str = r#"<idx:entry name="default" scriptable="yes" spell="yes" id="{{counter}}">
<idx:short><a id="{{counter}}"></a>
<idx:orth value="{{abbreviation}}"><b>{{abbreviation}}</b></idx:orth>
<p>{{meaning}}{{#if pali}} ({{pali}}){{/if}}{{#if example}}<br/>e.g. {{example}}{{/if}}{{#if information}}<br/>{{information}}{{/if}}</p>
</idx:short></idx:entry>
"#;

const TITLE_PAGE_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<html xmlns="http://www.w3.org/1999/xhtml">
<head><meta http-equiv="Content-Type" content="text/html; charset=utf-8"/><link rel="stylesheet" href="../Styles/style.css" type="text/css"/></head>
<body>
<h1>Pāḷi Dictionary</h1>
<p>Restricted to the early texts</p>
<p>Generated {{date}} at {{time}}</p>
</body>
</html>
"#;

const CONTENT_OPF_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package version="2.0" xmlns="http://www.idpf.org/2007/opf" unique-identifier="BookId">
<metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
<dc:title>Pāḷi Dictionary</dc:title>
<dc:language>pi</dc:language>
<dc:date opf:event="modification">{{date_time_zulu}}</dc:date>
<x-metadata><DictionaryInLanguage>pi</DictionaryInLanguage><DictionaryOutLanguage>en</DictionaryOutLanguage></x-metadata>
</metadata>
</package>
"#;

/// Registered templates.
pub struct Templates {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

impl Templates {
    fn registry() -> Handlebars<'static> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        // fields carry ready-made markup
        registry.register_escape_fn(handlebars::no_escape);
        registry
    }

    /// Creates the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn builtin() -> ExportResult<Self> {
        let mut registry = Self::registry();
        for id in TemplateId::ALL {
            registry.register_template_string(id.name(), id.builtin())?;
        }
        Ok(Self { registry })
    }

    /// Creates the built-in templates, replacing any that have a
    /// `<name>.hbs` file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be read or compiled.
    pub fn with_overrides(dir: &Path) -> ExportResult<Self> {
        let mut templates = Self::builtin()?;
        for id in TemplateId::ALL {
            let path = dir.join(format!("{}.hbs", id.name()));
            if path.is_file() {
                let source = std::fs::read_to_string(&path)?;
                templates.registry.register_template_string(id.name(), source)?;
                debug!(template = id.name(), path = %path.display(), "template override");
            }
        }
        Ok(templates)
    }

    /// Replaces one template with the given source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to compile.
    pub fn set(&mut self, id: TemplateId, source: &str) -> ExportResult<()> {
        self.registry.register_template_string(id.name(), source)?;
        Ok(())
    }

    /// Renders a template for the entry `entry`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Render`] naming `entry` if the template
    /// refers to missing data or a helper fails.
    pub fn render<T: Serialize>(&self, id: TemplateId, entry: &EntryRef, data: &T) -> ExportResult<String> {
        self.registry
            .render(id.name(), data)
            .map_err(|e| ExportError::render(entry.clone(), e.to_string()))
    }

    /// Renders a template that belongs to no entry (pages, manifest).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConfig`] if the template cannot be rendered.
    pub fn render_page<T: Serialize>(&self, id: TemplateId, data: &T) -> ExportResult<String> {
        self.registry.render(id.name(), data).map_err(|e| {
            ExportError::invalid_config(format!("template '{}' failed: {e}", id.name()))
        })
    }
}
