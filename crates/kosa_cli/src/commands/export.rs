//! Export command implementation.

use super::load_config;
use kosa_core::{DirSink, ExportConfig, ExportReport, HeadwordScope, JsonDirSource};
use std::path::{Path, PathBuf};

/// Command-line settings that take precedence over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Replacement corpus allow-list; empty keeps the configured one.
    pub corpus: Vec<String>,
    /// Export only attested headwords.
    pub attested_only: bool,
    /// Template override directory.
    pub templates: Option<PathBuf>,
    /// Abbreviations file.
    pub abbreviations: Option<PathBuf>,
    /// Stop on an empty selection.
    pub fail_on_empty: bool,
}

impl Overrides {
    fn apply(self, mut config: ExportConfig) -> ExportConfig {
        if !self.corpus.is_empty() {
            config = config.corpus(self.corpus);
        }
        if self.attested_only {
            config = config.scope(HeadwordScope::Attested);
        }
        if let Some(dir) = self.templates {
            config = config.template_dir(dir);
        }
        if let Some(path) = self.abbreviations {
            config = config.abbreviations(path);
        }
        if self.fail_on_empty {
            config = config.fail_on_empty_selection(true);
        }
        config
    }
}

/// Runs the export command.
pub fn run(
    input: &Path,
    config_path: Option<&Path>,
    out: &Path,
    overrides: Overrides,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(format!("No input directory at {:?}", input).into());
    }
    let config = overrides.apply(load_config(config_path)?);
    tracing::debug!(input = %input.display(), out = %out.display(), "starting export");

    let source = JsonDirSource::new(input);
    let mut sink = DirSink::open(out)?;
    let report = kosa_core::run(&source, &config, &mut sink)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print_text_output(out, &report);
        }
    }

    Ok(())
}

fn print_text_output(out: &Path, report: &ExportReport) {
    let counts = &report.counts;
    println!("Kosa Export");
    println!("===========");
    println!();
    println!("Output:    {}", out.display());
    println!("Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M"));
    println!();
    println!("Vocabulary:");
    println!("  Corpus headword forms: {:>10}", counts.corpus_headwords);
    println!("  Corpus sandhi forms:   {:>10}", counts.corpus_sandhi);
    println!("  Sandhi components:     {:>10}", counts.sandhi_components);
    println!("  All words:             {:>10}", counts.all_words);
    println!("  Attested inflections:  {:>10}", counts.attested_inflections);
    println!();
    println!("Entries:");
    println!("  Headwords:     {:>10}", counts.headword_entries);
    println!("  Sandhi:        {:>10}", counts.sandhi_entries);
    println!("  Abbreviations: {:>10}", report.abbreviations);
    println!("  Letter units:  {:>10}", report.letters.len());

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  {warning}");
        }
    }
    if !report.render_failures.is_empty() {
        println!();
        println!("Skipped entries:");
        for failure in &report.render_failures {
            println!("  [{}] {}: {}", failure.id, failure.entry, failure.message);
        }
    }

    println!();
    println!("Digest: {}", report.digest);
    if report.is_clean() {
        println!("✓ Export complete");
    } else {
        println!("! Export complete with problems");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_keep_the_config() {
        let config = Overrides::default().apply(ExportConfig::default());
        assert_eq!(config.corpus.len(), 33);
        assert_eq!(config.scope, HeadwordScope::All);
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn overrides_replace_config_values() {
        let overrides = Overrides {
            corpus: vec!["dn1".into()],
            attested_only: true,
            templates: Some(PathBuf::from("templates")),
            abbreviations: None,
            fail_on_empty: true,
        };
        let config = overrides.apply(ExportConfig::default());
        assert_eq!(config.corpus.len(), 1);
        assert_eq!(config.scope, HeadwordScope::Attested);
        assert_eq!(config.template_dir, Some(PathBuf::from("templates")));
        assert!(config.fail_on_empty_selection);
    }
}
