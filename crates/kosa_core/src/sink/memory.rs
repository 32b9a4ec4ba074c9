//! In-memory sink for testing.

use super::OutputSink;
use crate::error::ExportResult;
use std::collections::BTreeMap;

/// A sink that keeps units in memory.
///
/// # Example
///
/// ```rust
/// use kosa_core::{MemorySink, OutputSink};
///
/// let mut sink = MemorySink::new();
/// sink.write_unit("1_a.xhtml", "<html/>").unwrap();
/// assert_eq!(sink.unit("1_a.xhtml"), Some("<html/>"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemorySink {
    units: BTreeMap<String, String>,
    finished: bool,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a unit by name.
    #[must_use]
    pub fn unit(&self, name: &str) -> Option<&str> {
        self.units.get(name).map(String::as_str)
    }

    /// Returns every unit, ordered by name.
    #[must_use]
    pub fn units(&self) -> &BTreeMap<String, String> {
        &self.units
    }

    /// Returns the number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if the sink holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns true once `finish` has been called.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl OutputSink for MemorySink {
    fn clear(&mut self) -> ExportResult<()> {
        self.units.clear();
        self.finished = false;
        Ok(())
    }

    fn write_unit(&mut self, name: &str, text: &str) -> ExportResult<()> {
        self.units.insert(name.to_string(), text.to_string());
        Ok(())
    }

    fn finish(&mut self) -> ExportResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_same_name() {
        let mut sink = MemorySink::new();
        sink.write_unit("a", "one").unwrap();
        sink.write_unit("a", "two").unwrap();
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.unit("a"), Some("two"));
    }

    #[test]
    fn clear_removes_units() {
        let mut sink = MemorySink::new();
        sink.write_unit("a", "one").unwrap();
        sink.finish().unwrap();
        sink.clear().unwrap();
        assert!(sink.is_empty());
        assert!(!sink.is_finished());
    }
}
