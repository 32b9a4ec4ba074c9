//! Inspect command implementation.

use super::load_config;
use kosa_core::{plan, JsonDirSource, SelectionCounts, SelectionWarning, Snapshot};
use serde::Serialize;
use std::path::Path;

/// Selection and partition statistics.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Input directory.
    pub path: String,
    /// Corpus identifiers in the allow-list.
    pub corpus: Vec<String>,
    /// Set sizes.
    pub counts: SelectionCounts,
    /// Non-fatal selection problems.
    pub warnings: Vec<SelectionWarning>,
    /// Per-letter entry counts (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letters: Option<Vec<LetterStats>>,
}

/// Entries of one letter.
#[derive(Debug, Serialize)]
pub struct LetterStats {
    /// The letter.
    pub letter: String,
    /// Number of entries.
    pub entries: usize,
}

/// Runs the inspect command.
pub fn run(
    input: &Path,
    config_path: Option<&Path>,
    show_letters: bool,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(format!("No input directory at {:?}", input).into());
    }
    let config = load_config(config_path)?;

    let snapshot = Snapshot::load(&JsonDirSource::new(input))?;
    let plan = plan(&snapshot, &config)?;

    let letters = show_letters.then(|| {
        plan.partition
            .buckets()
            .iter()
            .map(|bucket| LetterStats {
                letter: bucket.letter().to_string(),
                entries: bucket.len(),
            })
            .collect()
    });
    let result = InspectResult {
        path: input.display().to_string(),
        corpus: config.corpus.iter().cloned().collect(),
        counts: SelectionCounts::of(&snapshot, &plan),
        warnings: plan.selection.warnings.clone(),
        letters,
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    let counts = &result.counts;
    println!("Kosa Selection Inspection");
    println!("=========================");
    println!();
    println!("Path:   {}", result.path);
    println!("Corpus: {}", result.corpus.join(" "));
    println!();
    println!("Rows:");
    println!("  Headwords: {:>10}", counts.headword_rows);
    println!("  Sandhi:    {:>10}", counts.sandhi_rows);
    println!();
    println!("Vocabulary:");
    println!("  Corpus headword forms: {:>10}", counts.corpus_headwords);
    println!("  Corpus sandhi forms:   {:>10}", counts.corpus_sandhi);
    println!("  Sandhi components:     {:>10}", counts.sandhi_components);
    println!("  All words:             {:>10}", counts.all_words);
    println!("  Attested inflections:  {:>10}", counts.attested_inflections);
    println!();
    println!("Entries:");
    println!("  Headwords: {:>10}", counts.headword_entries);
    println!("  Sandhi:    {:>10}", counts.sandhi_entries);

    if let Some(letters) = &result.letters {
        println!();
        println!("Letters:");
        for stats in letters {
            println!("  {:<4} {:>10}", stats.letter, stats.entries);
        }
    }

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  {warning}");
        }
    }
}
