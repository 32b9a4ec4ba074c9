//! Fixed text substitutions on rendered fields.
//!
//! Some derived fields contain characters the e-reader format cannot carry
//! as-is. Instead of patching strings inside each renderer, the patches live
//! in one table of `(context, pattern, replacement)` rules.

use serde::{Deserialize, Serialize};

/// The field a substitution rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldContext {
    /// The one-line summary of a headword entry.
    Summary,
    /// The rendered grammar table of a headword entry.
    GrammarTable,
    /// The joined entries of the abbreviations page.
    Abbreviations,
}

/// One literal replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Field this rule applies to.
    pub context: FieldContext,
    /// Literal text to find.
    pub pattern: String,
    /// Text to put in its place.
    pub replacement: String,
}

impl Substitution {
    /// Creates a rule.
    pub fn new(
        context: FieldContext,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            context,
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered list of substitution rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubstitutionTable {
    rules: Vec<Substitution>,
}

impl Default for SubstitutionTable {
    fn default() -> Self {
        Self {
            rules: vec![
                Substitution::new(FieldContext::Summary, "&", "and"),
                Substitution::new(FieldContext::GrammarTable, "&", "and"),
                Substitution::new(FieldContext::Abbreviations, " > ", " &gt; "),
            ],
        }
    }
}

impl SubstitutionTable {
    /// Creates a table with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates a table from rules, applied in the given order.
    #[must_use]
    pub fn new(rules: Vec<Substitution>) -> Self {
        Self { rules }
    }

    /// Returns the rules.
    #[must_use]
    pub fn rules(&self) -> &[Substitution] {
        &self.rules
    }

    /// Applies every rule for `context` to `text`, in table order.
    #[must_use]
    pub fn apply(&self, context: FieldContext, text: &str) -> String {
        self.rules
            .iter()
            .filter(|rule| rule.context == context && !rule.pattern.is_empty())
            .fold(text.to_string(), |acc, rule| {
                if acc.contains(rule.pattern.as_str()) {
                    acc.replace(rule.pattern.as_str(), &rule.replacement)
                } else {
                    acc
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampersands_become_and_in_summaries() {
        let table = SubstitutionTable::default();
        assert_eq!(
            table.apply(FieldContext::Summary, "mind & body"),
            "mind and body"
        );
        assert_eq!(
            table.apply(FieldContext::GrammarTable, "<td>a & b</td>"),
            "<td>a and b</td>"
        );
    }

    #[test]
    fn rules_only_touch_their_context() {
        let table = SubstitutionTable::default();
        assert_eq!(table.apply(FieldContext::Abbreviations, "a & b"), "a & b");
        assert_eq!(table.apply(FieldContext::Summary, "x > y"), "x > y");
        assert_eq!(
            table.apply(FieldContext::Abbreviations, "x > y"),
            "x &gt; y"
        );
    }

    #[test]
    fn empty_table_is_identity() {
        let table = SubstitutionTable::empty();
        assert_eq!(table.apply(FieldContext::Summary, "a & b"), "a & b");
    }

    #[test]
    fn rules_apply_in_order() {
        let table = SubstitutionTable::new(vec![
            Substitution::new(FieldContext::Summary, "a", "b"),
            Substitution::new(FieldContext::Summary, "b", "c"),
        ]);
        assert_eq!(table.apply(FieldContext::Summary, "ab"), "cc");
    }
}
