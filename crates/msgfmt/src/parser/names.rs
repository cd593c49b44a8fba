//! Identifier character classes for names and name tokens.
//!
//! These follow the XML `NameStartChar` / `NameChar` productions.

/// Returns true if `c` may start a name.
pub fn is_name_start(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '_'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

/// Returns true if `c` may appear after the first character of a name.
pub fn is_name_char(c: char) -> bool {
    is_name_start(c)
        || matches!(c,
            '0'..='9'
            | '-'
            | '.'
            | '\u{B7}'
            | '\u{300}'..='\u{36F}'
            | '\u{203F}'..='\u{2040}'
        )
}

/// Returns true if `s` is a valid name: a name-start character followed by
/// any number of name characters.
pub fn is_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => is_name_start(first) && chars.all(is_name_char),
        None => false,
    }
}

/// Returns true if `s` is a non-empty run of name characters.
pub fn is_nmtoken(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_name_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_must_not_start_with_digit() {
        assert!(is_name("count"));
        assert!(is_name("_private"));
        assert!(is_name("noun.gender"));
        assert!(!is_name("1st"));
        assert!(!is_name(""));
        assert!(!is_name("-x"));
    }

    #[test]
    fn nmtokens_allow_leading_digits() {
        assert!(is_nmtoken("1"));
        assert!(is_nmtoken("1.5"));
        assert!(is_nmtoken("one"));
        assert!(!is_nmtoken(""));
        assert!(!is_nmtoken("a b"));
        assert!(!is_nmtoken("$x"));
    }

    #[test]
    fn wide_unicode_ranges_are_names() {
        assert!(is_name("żółw"));
        assert!(is_name("名前"));
        assert!(is_nmtoken("e\u{301}"));
    }
}
