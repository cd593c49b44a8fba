//! Locale-aware letter case operations.
//!
//! Capitalization uppercases the first extended grapheme cluster as a unit,
//! so a base letter followed by combining marks, or an astral-plane
//! character, is handled correctly. Case mapping uses full Unicode rules
//! with language-specific tailoring (e.g. Turkish dotted capital İ).

use icu_casemap::CaseMapper;
use icu_locale_core::{LanguageIdentifier, langid};
use unicode_segmentation::UnicodeSegmentation;

/// Uppercase the first grapheme cluster of `text`, leaving the rest as is.
///
/// # Examples
///
/// ```
/// use msgfmt::text::capitalize;
///
/// assert_eq!(capitalize("élan", "fr"), "Élan");
/// assert_eq!(capitalize("istanbul", "tr"), "İstanbul");
/// assert_eq!(capitalize("", "en"), "");
/// ```
pub fn capitalize(text: &str, locale: &str) -> String {
    let Some(first) = text.graphemes(true).next() else {
        return String::new();
    };
    let mut result = uppercase(first, locale);
    result.push_str(&text[first.len()..]);
    result
}

/// Uppercase all of `text` for `locale`.
pub fn uppercase(text: &str, locale: &str) -> String {
    CaseMapper::new()
        .uppercase_to_string(text, &language_id(locale))
        .to_string()
}

/// Lowercase all of `text` for `locale`.
pub fn lowercase(text: &str, locale: &str) -> String {
    CaseMapper::new()
        .lowercase_to_string(text, &language_id(locale))
        .to_string()
}

/// Parse a locale tag, falling back to the root locale.
fn language_id(locale: &str) -> LanguageIdentifier {
    LanguageIdentifier::try_from_str(locale).unwrap_or(langid!("und"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_keeps_combining_marks_together() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT.
        assert_eq!(capitalize("e\u{301}cole", "fr"), "E\u{301}cole");
    }

    #[test]
    fn capitalize_handles_astral_characters() {
        // U+10428 DESERET SMALL LETTER LONG I uppercases to U+10400.
        assert_eq!(capitalize("\u{10428}x", "en"), "\u{10400}x");
    }

    #[test]
    fn invalid_locale_falls_back_to_root_rules() {
        assert_eq!(uppercase("istanbul", "??"), "ISTANBUL");
    }

    #[test]
    fn turkish_lowercase_dotted_capital() {
        assert_eq!(lowercase("İ", "tr"), "i");
    }
}
