//! French base-level collation
//!
//! Two names compare equal when they differ only by case or diacritics
//! ("Éclair" == "eclair"). Keys are built by canonical decomposition,
//! dropping combining marks and lowercasing; the French ligatures expand to
//! their two-letter base forms.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Base-level sort key for `text`
#[must_use]
pub fn base_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in c.to_lowercase() {
            match lower {
                'œ' => key.push_str("oe"),
                'æ' => key.push_str("ae"),
                'ß' => key.push_str("ss"),
                other => key.push(other),
            }
        }
    }
    key
}
