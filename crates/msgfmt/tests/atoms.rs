//! Tests for the atom scanner.

use msgfmt::parser::{Atom, AtomKind, scan};

fn atoms(source: &str) -> Vec<(AtomKind, String)> {
    scan(source)
        .map(|atom| {
            let atom = atom.unwrap();
            (atom.kind, atom.value)
        })
        .collect()
}

// =============================================================================
// Segmentation
// =============================================================================

#[test]
fn test_simple_pattern() {
    assert_eq!(
        atoms("{Hello, {$name}!}"),
        vec![
            (AtomKind::Punctuator, "{".into()),
            (AtomKind::Word, "Hello,".into()),
            (AtomKind::Whitespace, " ".into()),
            (AtomKind::Punctuator, "{".into()),
            (AtomKind::Word, "$name".into()),
            (AtomKind::Punctuator, "}".into()),
            (AtomKind::Word, "!".into()),
            (AtomKind::Punctuator, "}".into()),
        ]
    );
}

#[test]
fn test_whitespace_runs_merge() {
    assert_eq!(
        atoms("a \t\r\n b"),
        vec![
            (AtomKind::Word, "a".into()),
            (AtomKind::Whitespace, " \t\r\n ".into()),
            (AtomKind::Word, "b".into()),
        ]
    );
}

#[test]
fn test_punctuators_split_words() {
    assert_eq!(
        atoms("a=b*c(d)"),
        vec![
            (AtomKind::Word, "a".into()),
            (AtomKind::Punctuator, "=".into()),
            (AtomKind::Word, "b".into()),
            (AtomKind::Punctuator, "*".into()),
            (AtomKind::Word, "c".into()),
            (AtomKind::Punctuator, "(".into()),
            (AtomKind::Word, "d".into()),
            (AtomKind::Punctuator, ")".into()),
        ]
    );
}

#[test]
fn test_escape_takes_following_character() {
    assert_eq!(
        atoms(r"a\{b\ c"),
        vec![
            (AtomKind::Word, "a".into()),
            (AtomKind::Escape, r"\{".into()),
            (AtomKind::Word, "b".into()),
            (AtomKind::Escape, r"\ ".into()),
            (AtomKind::Word, "c".into()),
        ]
    );
}

#[test]
fn test_empty_source() {
    assert!(atoms("").is_empty());
}

// =============================================================================
// Spans
// =============================================================================

#[test]
fn test_spans_are_byte_offsets() {
    let spans: Vec<_> = scan("żółw {x}")
        .map(|atom| atom.unwrap().span)
        .collect();
    assert_eq!(spans, vec![0..7, 7..8, 8..9, 9..10, 10..11]);
}

#[test]
fn test_atom_predicates() {
    let atom = Atom {
        kind: AtomKind::Word,
        value: "let".into(),
        span: 0..3,
    };
    assert!(atom.is_word("let"));
    assert!(!atom.is_word("match"));
    assert!(!atom.is_punctuator('{'));
}

// =============================================================================
// Unterminated escapes
// =============================================================================

#[test]
fn test_trailing_backslash_is_an_error() {
    let mut scanner = scan(r"ab\");
    assert_eq!(scanner.next().unwrap().unwrap().value, "ab");

    let err = scanner.next().unwrap().unwrap_err();
    assert_eq!(err.message, "Unterminated escape sequence");
    assert_eq!(err.span, 2..3);
    assert_eq!(err.to_string(), r"Unterminated escape sequence: ...\");

    assert!(scanner.next().is_none());
}

#[test]
fn test_scan_restarts_from_the_beginning() {
    let source = "{a}";
    assert_eq!(scan(source).count(), 3);
    assert_eq!(scan(source).count(), 3);
}
