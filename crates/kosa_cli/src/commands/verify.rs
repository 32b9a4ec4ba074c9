//! Verify command implementation.

use super::load_config;
use kosa_core::{audit_rows, ExportError, JsonDirSource, RowSource};
use std::path::Path;

/// Verification result.
#[derive(Debug)]
pub struct VerifyResult {
    /// Number of rows checked.
    pub rows_checked: usize,
    /// Problems found.
    pub errors: Vec<ExportError>,
}

impl VerifyResult {
    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Checks every row of `source` against `alphabet` and the key constraints.
pub fn verify_source(
    source: &dyn RowSource,
    alphabet: &kosa_core::Alphabet,
) -> Result<VerifyResult, Box<dyn std::error::Error>> {
    let headwords = source.headwords()?;
    let sandhi = source.sandhi()?;
    let inflections = source.inflections()?;

    Ok(VerifyResult {
        rows_checked: headwords.len() + sandhi.len() + inflections.len(),
        errors: audit_rows(&headwords, &sandhi, &inflections, alphabet),
    })
}

/// Runs the verify command.
pub fn run(input: &Path, config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Verifying rows at {:?}", input);
    println!();

    let config = load_config(config_path)?;
    let alphabet = config.build_alphabet()?;
    let result = verify_source(&JsonDirSource::new(input), &alphabet)?;

    println!("  Rows checked: {}", result.rows_checked);
    println!("  Problems:     {}", result.errors.len());
    for err in &result.errors {
        println!("    - {err}");
    }

    println!();
    if result.is_ok() {
        println!("✓ Row verification passed");
        Ok(())
    } else {
        println!("✗ Row verification failed");
        Err("Verification failed".into())
    }
}
