//! Diacritic stripping.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Removes every diacritical mark from `text`.
///
/// The text is decomposed, combining marks are dropped and the result is
/// recomposed, so `"saṃsāra"` becomes `"samsara"` and `"ñāṇa"` becomes
/// `"nana"`. Never fails.
#[must_use]
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Normalizes `text` to composed form so letters compare by grapheme.
#[must_use]
pub fn compose(text: &str) -> String {
    text.nfc().collect()
}
