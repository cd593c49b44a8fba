//! Tests for printing messages back to source.

use msgfmt::parse_message;

fn print(source: &str) -> String {
    parse_message(source).unwrap().to_string()
}

fn assert_round_trip(source: &str) {
    let message = parse_message(source).unwrap();
    let printed = message.to_string();
    let reparsed = parse_message(&printed)
        .unwrap_or_else(|e| panic!("printed source failed to parse: {printed:?}: {e}"));
    assert_eq!(reparsed, message, "printed as {printed:?}");
}

// =============================================================================
// Canonical output
// =============================================================================

#[test]
fn test_print_plain() {
    insta::assert_snapshot!(print("{Hello, {$name}!}"), @"{Hello, {$name}!}");
}

#[test]
fn test_print_normalizes_whitespace_inside_expressions() {
    insta::assert_snapshot!(
        print("{{  $n   :number   minimumFractionDigits=2  }}"),
        @"{{$n :number minimumFractionDigits=2}}"
    );
}

#[test]
fn test_print_escapes_text() {
    insta::assert_snapshot!(print(r"{a \{b\} c\\}"), @r"{a \{b\} c\\}");
}

#[test]
fn test_print_literals_are_parenthesized() {
    insta::assert_snapshot!(print(r"{{(a \(b\))}}"), @r"{{(a \(b\))}}");
}

#[test]
fn test_print_option_values_bare_when_possible() {
    insta::assert_snapshot!(
        print("{{:f a=(x) b=(x y) c=$v}}"),
        @"{{:f a=x b=(x y) c=$v}}"
    );
}

#[test]
fn test_print_markup() {
    insta::assert_snapshot!(
        print("{{+a href=(https://x.test)}x{-a}}"),
        @"{{+a href=(https://x.test)}x{-a}}"
    );
}

#[test]
fn test_print_match() {
    assert_eq!(
        print("let $n = {$count :number}\nmatch {$n :plural}   when (1) {One}  when * {Many}"),
        "let $n = {$count :number}\nmatch {$n :plural}\nwhen 1 {One}\nwhen * {Many}"
    );
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn test_round_trip_every_construct() {
    for source in [
        "{}",
        "{Hello, {$name}!}",
        r"{a \{b\} c\\ {(x \(y\) \\)}}",
        "let $a = {(A)}\nlet $b = {$a :string lettercase=capitalized}\n{{$b}}",
        "match {$a :equals} {$b :equals}\nwhen x y {XY}\nwhen (x y) * {X}\nwhen * * {}",
        "{Click {+link href=(https://x.test) rel=$rel}here{-link}.}",
        "{{:now}}",
        "match {$n :plural type=ordinal}\nwhen 1.5 {a}\nwhen (*) {b}\nwhen * {c}",
        "{  leading and trailing  }",
    ] {
        assert_round_trip(source);
    }
}
