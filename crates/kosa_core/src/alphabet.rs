//! Alphabet table and collation.
//!
//! The alphabet is one ordered list of letters. Some letters are digraphs
//! (`kh`, `ṭh`) and some carry marks (`ā`, `ṃ`); the list defines both the
//! sort order of surface forms and the set of valid bucket keys. Text is
//! split into letters by longest match, so `"khanti"` starts with `kh`, not
//! `k`.
//!
//! ## Example
//!
//! ```rust
//! use kosa_core::Alphabet;
//! use std::cmp::Ordering;
//!
//! let alphabet = Alphabet::pali();
//! // `ā` follows `a`, `k` follows every vowel
//! assert_eq!(alphabet.compare("āsana", "ka"), Ordering::Less);
//! assert_eq!(alphabet.first_letter("khanti"), Some("kh"));
//! ```

use crate::diacritics::compose;
use crate::error::{ExportError, ExportResult};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Letters of the Pāli alphabet in collation order.
pub const PALI_LETTERS: [&str; 41] = [
    "a", "ā", "i", "ī", "u", "ū", "e", "o", "k", "kh", "g", "gh", "ṅ", "c", "ch", "j", "jh", "ñ",
    "ṭ", "ṭh", "ḍ", "ḍh", "ṇ", "t", "th", "d", "dh", "n", "p", "ph", "b", "bh", "m", "y", "r", "l",
    "v", "s", "h", "ḷ", "ṃ",
];

/// One unit of a collation key.
///
/// Characters outside the alphabet (spaces, digits, punctuation) sort before
/// every letter, so `"dhamma 2"` stays next to `"dhamma 1"` instead of
/// following `"dhammaka"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CollationUnit {
    /// A character outside the alphabet.
    Other(char),
    /// Position of a letter in the alphabet.
    Letter(u16),
}

/// Sort key of one surface form.
pub type CollationKey = Vec<CollationUnit>;

/// An ordered alphabet of grapheme clusters.
#[derive(Debug, Clone)]
pub struct Alphabet {
    letters: Vec<String>,
    /// Letter indices, longest letter first.
    longest_first: Vec<usize>,
}

impl Alphabet {
    /// Creates an alphabet from letters given in collation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, contains an empty letter or
    /// repeats a letter.
    pub fn new<I, S>(letters: I) -> ExportResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let letters: Vec<String> = letters
            .into_iter()
            .map(|l| compose(l.as_ref()))
            .collect();

        if letters.is_empty() {
            return Err(ExportError::invalid_config("alphabet has no letters"));
        }
        if letters.len() > usize::from(u16::MAX) {
            return Err(ExportError::invalid_config("alphabet is too large"));
        }

        let mut seen = HashSet::new();
        for letter in &letters {
            if letter.is_empty() {
                return Err(ExportError::invalid_config("alphabet contains an empty letter"));
            }
            if !seen.insert(letter.as_str()) {
                return Err(ExportError::invalid_config(format!(
                    "alphabet repeats letter '{letter}'"
                )));
            }
        }

        let mut longest_first: Vec<usize> = (0..letters.len()).collect();
        longest_first.sort_by_key(|&i| std::cmp::Reverse(letters[i].len()));

        Ok(Self {
            letters,
            longest_first,
        })
    }

    /// Returns the Pāli alphabet.
    #[must_use]
    pub fn pali() -> Self {
        Self::new(PALI_LETTERS).expect("built-in alphabet is valid")
    }

    /// Returns the letters in collation order.
    pub fn letters(&self) -> impl ExactSizeIterator<Item = &str> {
        self.letters.iter().map(String::as_str)
    }

    /// Returns the number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns true if the alphabet has no letters. Never true for a
    /// constructed alphabet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the letter at `index`.
    #[must_use]
    pub fn letter(&self, index: usize) -> Option<&str> {
        self.letters.get(index).map(String::as_str)
    }

    /// Returns the collation position of `letter`.
    #[must_use]
    pub fn position(&self, letter: &str) -> Option<usize> {
        let letter = compose(letter);
        self.letters.iter().position(|l| *l == letter)
    }

    /// Returns the letter starting `text`, longest match first.
    fn match_at(&self, text: &str) -> Option<usize> {
        self.longest_first
            .iter()
            .copied()
            .find(|&i| text.starts_with(self.letters[i].as_str()))
    }

    /// Computes the collation key of a surface form.
    #[must_use]
    pub fn sort_key(&self, word: &str) -> CollationKey {
        let word = compose(word);
        let mut key = Vec::with_capacity(word.len());
        let mut rest = word.as_str();

        while let Some(c) = rest.chars().next() {
            match self.match_at(rest) {
                Some(index) => {
                    key.push(CollationUnit::Letter(index as u16));
                    rest = &rest[self.letters[index].len()..];
                }
                None => {
                    key.push(CollationUnit::Other(c));
                    rest = &rest[c.len_utf8()..];
                }
            }
        }

        key
    }

    /// Compares two surface forms in alphabet order.
    ///
    /// This is the only comparison used for sorting headwords.
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }

    /// Returns the index of the first letter of `word`.
    ///
    /// Any leading run that is not an alphabet letter (digits, punctuation,
    /// a root sign) is skipped. Returns `None` if no letter is found.
    #[must_use]
    pub fn first_letter_index(&self, word: &str) -> Option<usize> {
        let word = compose(word);
        word.char_indices()
            .find_map(|(offset, _)| self.match_at(&word[offset..]))
    }

    /// Returns the first letter of `word`, see [`Self::first_letter_index`].
    #[must_use]
    pub fn first_letter(&self, word: &str) -> Option<&str> {
        self.first_letter_index(word).and_then(|i| self.letter(i))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::pali()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pali_alphabet_has_all_letters() {
        let alphabet = Alphabet::pali();
        assert_eq!(alphabet.len(), 41);
        assert_eq!(alphabet.letter(0), Some("a"));
        assert_eq!(alphabet.letter(40), Some("ṃ"));
        assert_eq!(alphabet.position("kh"), Some(9));
    }

    #[test]
    fn marked_vowels_interleave_with_base_letters() {
        let alphabet = Alphabet::pali();
        // code point order would put every `ā` after `z`
        assert_eq!(alphabet.compare("ā", "i"), Ordering::Less);
        assert_eq!(alphabet.compare("a", "ā"), Ordering::Less);
        assert_eq!(alphabet.compare("ṭīkā", "tapa"), Ordering::Less);
    }

    #[test]
    fn digraphs_collate_as_one_letter() {
        let alphabet = Alphabet::pali();
        // `kh` follows every word in `k`
        assert_eq!(alphabet.compare("kuṭi", "khanti"), Ordering::Less);
        assert_eq!(alphabet.compare("khanti", "gati"), Ordering::Less);
    }

    #[test]
    fn vowels_precede_consonants() {
        let alphabet = Alphabet::pali();
        let mut words = vec!["kamma", "ogha", "buddha", "attha", "ekaka", "ñāṇa", "saṃgha"];
        words.sort_by(|a, b| alphabet.compare(a, b));
        assert_eq!(
            words,
            ["attha", "ekaka", "ogha", "kamma", "ñāṇa", "buddha", "saṃgha"]
        );
    }

    #[test]
    fn homonym_numbers_sort_after_the_bare_form() {
        let alphabet = Alphabet::pali();
        assert_eq!(alphabet.compare("dhamma", "dhamma 1"), Ordering::Less);
        assert_eq!(alphabet.compare("dhamma 1", "dhamma 2"), Ordering::Less);
        assert_eq!(alphabet.compare("dhamma 2", "dhammaka"), Ordering::Less);
    }

    #[test]
    fn first_letter_prefers_digraphs() {
        let alphabet = Alphabet::pali();
        assert_eq!(alphabet.first_letter("khanti"), Some("kh"));
        assert_eq!(alphabet.first_letter("ṭhāna"), Some("ṭh"));
        assert_eq!(alphabet.first_letter("kamma"), Some("k"));
        assert_eq!(alphabet.first_letter("ā"), Some("ā"));
    }

    #[test]
    fn first_letter_skips_unrecognized_prefix() {
        let alphabet = Alphabet::pali();
        assert_eq!(alphabet.first_letter("√gam"), Some("g"));
        assert_eq!(alphabet.first_letter("-ka"), Some("k"));
        assert_eq!(alphabet.first_letter("'ti"), Some("t"));
    }

    #[test]
    fn first_letter_fails_without_letters() {
        let alphabet = Alphabet::pali();
        assert_eq!(alphabet.first_letter("123"), None);
        assert_eq!(alphabet.first_letter(""), None);
        assert_eq!(alphabet.first_letter("xqzw"), None);
    }

    #[test]
    fn decomposed_input_matches_composed_letters() {
        let alphabet = Alphabet::pali();
        assert_eq!(alphabet.first_letter("a\u{0304}sana"), Some("ā"));
        assert_eq!(alphabet.compare("a\u{0304}", "ā"), Ordering::Equal);
    }

    #[test]
    fn rejects_bad_tables() {
        assert!(Alphabet::new(Vec::<String>::new()).is_err());
        assert!(Alphabet::new(["a", "a"]).is_err());
        assert!(Alphabet::new(["a", ""]).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn word() -> impl Strategy<Value = String> {
            prop::collection::vec(prop::sample::select(PALI_LETTERS.to_vec()), 0..6)
                .prop_map(|letters| letters.concat())
        }

        proptest! {
            #[test]
            fn compare_is_antisymmetric(a in word(), b in word()) {
                let alphabet = Alphabet::pali();
                prop_assert_eq!(alphabet.compare(&a, &b), alphabet.compare(&b, &a).reverse());
            }

            #[test]
            fn prefix_sorts_first(a in word(), b in word()) {
                let alphabet = Alphabet::pali();
                let longer = format!("{a}{b}");
                prop_assert_ne!(alphabet.compare(&a, &longer), Ordering::Greater);
            }
        }
    }
}
