//! Integration tests for formatting messages to strings and parts.

use std::any::Any;
use std::sync::Arc;
use std::thread;

use msgfmt::{
    Args, ErrorKind, EvalError, FunctionRegistry, MessageFormat, Number, Opaque, Part,
    PluralSelector, StringValue, Value, args,
};
use msgfmt::interpreter::PluralType;
use serde_json::json;

fn message(locale: &str, source: &str) -> MessageFormat {
    MessageFormat::with_registry(locale, source, Arc::new(FunctionRegistry::with_builtins()))
        .unwrap()
}

fn format(source: &str, args: &Args) -> String {
    message("en", source).format(args).unwrap()
}

fn format_err(source: &str, args: &Args) -> EvalError {
    message("en", source).format(args).unwrap_err()
}

// =============================================================================
// Interpolation
// =============================================================================

#[test]
fn test_string_interpolation() {
    let message = message("en-US", "{Hello, {$userName}!}");
    let args = args! { "userName" => "Alice" };
    assert_eq!(message.format(&args).unwrap(), "Hello, Alice!");
    assert_eq!(
        message.format_to_parts(&args).unwrap(),
        vec![
            Part::literal("Hello, "),
            Part::literal("Alice"),
            Part::literal("!"),
        ]
    );
}

#[test]
fn test_parts_serialize_as_type_and_value() {
    let parts = message("en", "{Hello, {$name}!}")
        .format_to_parts(&args! { "name" => "Bob" })
        .unwrap();
    assert_eq!(
        serde_json::to_value(&parts).unwrap(),
        json!([
            {"type": "literal", "value": "Hello, "},
            {"type": "literal", "value": "Bob"},
            {"type": "literal", "value": "!"},
        ])
    );
}

#[test]
fn test_elements_render_in_source_order() {
    let args = args! { "a" => "1", "b" => 2, "c" => "3" };
    assert_eq!(format("{{$c}-{$b}-{$a}{(!)}}", &args), "3-2-1!");
}

#[test]
fn test_escapes_render_literally() {
    assert_eq!(format(r"{\{{(a\)b)}\} \\}", &args! {}), r"{a)b} \");
}

#[test]
fn test_numbers_format_without_function() {
    assert_eq!(format("{{$n} items}", &args! { "n" => 3 }), "3 items");
    assert_eq!(format("{{$n}}", &args! { "n" => 2.5 }), "2.5");
}

#[test]
fn test_unsigned_integers_round_like_signed() {
    let above_2_53 = 9_007_199_254_740_993_u64;
    assert_eq!(format("{{$n}}", &args! { "n" => above_2_53 }), "9007199254740992");
    assert_eq!(
        format("{{$n}}", &args! { "n" => above_2_53 as usize }),
        format("{{$n}}", &args! { "n" => 9_007_199_254_740_993_i64 })
    );
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_declaration_shadows_argument() {
    let args = args! { "x" => "external" };
    assert_eq!(format("let $x = {(local)}\n{{$x}}", &args), "local");
}

#[test]
fn test_later_declarations_see_earlier_ones() {
    let source = "let $a = {(ABC)}\nlet $b = {$a :string lettercase=lowercase}\n{{$a} {$b}}";
    assert_eq!(format(source, &args! {}), "ABC abc");
}

#[test]
fn test_declaration_shadows_argument_in_later_declarations() {
    let source = "let $x = {(inner)}\nlet $y = {$x :string lettercase=uppercase}\n{{$y}}";
    assert_eq!(format(source, &args! { "x" => "outer" }), "INNER");
}

// =============================================================================
// Variant selection
// =============================================================================

const APPLES: &str =
    "match {$count :plural}\nwhen one {You have {$count} apple.}\nwhen * {You have {$count} apples.}";

#[test]
fn test_plural_apples() {
    assert_eq!(format(APPLES, &args! { "count" => 1 }), "You have 1 apple.");
    assert_eq!(format(APPLES, &args! { "count" => 2 }), "You have 2 apples.");
}

#[test]
fn test_first_match_wins_over_better_match() {
    let exact_first = "match {$n :plural}\nwhen 1 {exact}\nwhen one {category}\nwhen * {other}";
    assert_eq!(format(exact_first, &args! { "n" => 1 }), "exact");

    let category_first = "match {$n :plural}\nwhen one {category}\nwhen 1 {exact}\nwhen * {other}";
    assert_eq!(format(category_first, &args! { "n" => 1 }), "category");

    let wildcard_first = "match {$n :plural}\nwhen * {other}\nwhen 1 {exact}\nwhen one {category}";
    assert_eq!(format(wildcard_first, &args! { "n" => 1 }), "other");
}

#[test]
fn test_multiple_selectors() {
    let source = "match {$a :equals} {$b :equals}\n\
                  when x y {both}\n\
                  when x * {first}\n\
                  when * y {second}\n\
                  when * * {neither}";
    assert_eq!(format(source, &args! { "a" => "x", "b" => "y" }), "both");
    assert_eq!(format(source, &args! { "a" => "x", "b" => "z" }), "first");
    assert_eq!(format(source, &args! { "a" => "z", "b" => "y" }), "second");
    assert_eq!(format(source, &args! { "a" => "z", "b" => "z" }), "neither");
}

#[test]
fn test_plain_variables_are_selectors() {
    let source = "match {$kind}\nwhen cat {Meow}\nwhen * {...}";
    assert_eq!(format(source, &args! { "kind" => "cat" }), "Meow");
    assert_eq!(format(source, &args! { "kind" => "dog" }), "...");
}

#[test]
fn test_literal_selector() {
    let source = "match {(b)}\nwhen a {A}\nwhen b {B}\nwhen * {?}";
    assert_eq!(format(source, &args! {}), "B");
}

#[test]
fn test_number_selector_matches_numerically() {
    let source = "match {$n}\nwhen 1.50 {one and a half}\nwhen * {other}";
    assert_eq!(format(source, &args! { "n" => 1.5 }), "one and a half");
}

#[test]
fn test_no_variant_matched() {
    let source = "match {$x :equals}\nwhen a {A}\nwhen b {B}";
    let err = format_err(source, &args! { "x" => "c" });
    assert_eq!(err, EvalError::NoVariantMatched);
    assert_eq!(err.kind(), ErrorKind::Range);
    assert_eq!(err.to_string(), "No variant matched the selectors.");
}

#[test]
fn test_wildcard_only_variant() {
    let source = "match {$n :plural}\nwhen * {any}";
    assert_eq!(format(source, &args! { "n" => 7 }), "any");
}

// =============================================================================
// Markup
// =============================================================================

#[test]
fn test_markup_renders_as_nothing_in_strings() {
    let source = "{Click {+link href=(https://x.test)}here{-link}.}";
    assert_eq!(format(source, &args! {}), "Click here.");
}

#[test]
fn test_markup_parts() {
    let source = "{Click {+link href=(https://x.test) id=$id}here{-link}.}";
    let parts = message("en", source)
        .format_to_parts(&args! { "id" => 7 })
        .unwrap();
    assert_eq!(
        serde_json::to_value(&parts).unwrap(),
        json!([
            {"type": "literal", "value": "Click "},
            {"type": "markupOpen", "name": "link", "options": {"href": "https://x.test", "id": "7"}},
            {"type": "literal", "value": "here"},
            {"type": "markupClose", "name": "link"},
            {"type": "literal", "value": "."},
        ])
    );
}

// =============================================================================
// Opaque values
// =============================================================================

#[derive(Debug)]
struct SubmitButton {
    id: u32,
}

#[test]
fn test_opaque_value_round_trips_through_parts() {
    let payload: Arc<dyn Any + Send + Sync> = Arc::new(SubmitButton { id: 7 });
    let args = args! { "submitButton" => Opaque::from_arc(Arc::clone(&payload)) };
    let parts = message("en-US", "{Ready? Then {$submitButton}!}")
        .format_to_parts(&args)
        .unwrap();

    assert_eq!(
        parts,
        vec![
            Part::literal("Ready? Then "),
            Part::Opaque(Opaque::from_arc(Arc::clone(&payload))),
            Part::literal("!"),
        ]
    );
    match &parts[1] {
        Part::Opaque(opaque) => {
            assert!(Arc::ptr_eq(opaque.payload(), &payload));
            assert_eq!(opaque.downcast_ref::<SubmitButton>().unwrap().id, 7);
        }
        other => panic!("expected opaque part, got {other:?}"),
    }
}

#[test]
fn test_opaque_value_cannot_format_to_string() {
    let args = args! { "button" => Value::opaque(SubmitButton { id: 1 }) };
    let err = format_err("{Ready? {$button}}", &args);
    assert_eq!(
        err,
        EvalError::NotFormattable {
            type_name: "opaque".into()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_opaque_value_cannot_be_a_selector() {
    let args = args! { "button" => Value::opaque(SubmitButton { id: 1 }) };
    let err = format_err("match {$button}\nwhen * {x}", &args);
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(matches!(err, EvalError::NotMatchable { .. }));
}

#[test]
fn test_opaque_parts_serialize_with_null_value() {
    let args = args! { "x" => Value::opaque(SubmitButton { id: 1 }) };
    let parts = message("en", "{{$x}}").format_to_parts(&args).unwrap();
    assert_eq!(
        serde_json::to_value(&parts).unwrap(),
        json!([{"type": "opaque", "value": null}])
    );
}

// =============================================================================
// Resolution errors
// =============================================================================

#[test]
fn test_unknown_function_suggests_names() {
    let err = format_err("{{$x :nubmer}}", &args! { "x" => 1 });
    assert_eq!(
        err,
        EvalError::UnknownFunction {
            name: "nubmer".into(),
            suggestions: vec!["number".into()],
        }
    );
    assert_eq!(err.kind(), ErrorKind::Reference);
    assert_eq!(
        err.to_string(),
        "unknown function ':nubmer'; did you mean: number?"
    );
}

#[test]
fn test_unknown_function_is_reported_before_unknown_variable() {
    let err = format_err("{{$missing :nope}}", &args! {});
    assert!(matches!(err, EvalError::UnknownFunction { .. }));
}

#[test]
fn test_unknown_variable() {
    let err = format_err("{Hi {$who}}", &args! {});
    assert_eq!(
        err,
        EvalError::UnknownVariable {
            name: "who".into()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn test_selector_only_value_cannot_be_formatted() {
    let selector = PluralSelector::new(Number::from(1), PluralType::Cardinal);
    let err = format_err("{{$n}}", &args! { "n" => selector });
    assert_eq!(
        err,
        EvalError::NotFormattable {
            type_name: "plural".into()
        }
    );
}

#[test]
fn test_function_without_required_operand() {
    let err = format_err("{{:number}}", &args! {});
    assert_eq!(
        err,
        EvalError::MissingArgument {
            function: "number".into()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_errors_abort_without_partial_output() {
    let message = message("en", "{ok {$missing} never}");
    assert!(message.format(&args! {}).is_err());
    assert!(message.format_to_parts(&args! {}).is_err());
}

// =============================================================================
// Custom functions
// =============================================================================

#[test]
fn test_custom_formatter_and_matcher() {
    let mut registry = FunctionRegistry::new();
    registry.register_formatter("shout", |ctx, operand, _options| {
        let operand = operand.ok_or_else(|| EvalError::MissingArgument {
            function: "shout".into(),
        })?;
        Ok(Value::from(operand.format_to_string(ctx)?.to_uppercase()))
    });
    registry.register_matcher("parity", |_ctx, operand, _options| {
        let n = operand.and_then(Value::as_number).and_then(Number::as_integer);
        Ok(Value::from(if n.unwrap_or(0) % 2 == 0 { "even" } else { "odd" }))
    });

    let message = MessageFormat::with_registry(
        "en",
        "match {$n :parity}\nwhen even {{$word :shout}!}\nwhen * {{$word}}",
        Arc::new(registry),
    )
    .unwrap();
    assert_eq!(
        message.format(&args! { "n" => 4, "word" => "hey" }).unwrap(),
        "HEY!"
    );
    assert_eq!(
        message.format(&args! { "n" => 3, "word" => "hey" }).unwrap(),
        "hey"
    );
}

#[test]
fn test_matcher_is_not_usable_as_content() {
    let err = format_err("{{$x :equals}}", &args! { "x" => "hi" });
    assert!(matches!(err, EvalError::UnknownFunction { ref name, .. } if name == "equals"));
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn test_formatter_is_not_usable_as_selector() {
    let err = format_err("match {$x :number}\nwhen 1 {one}\nwhen * {other}", &args! { "x" => 1 });
    assert!(matches!(err, EvalError::UnknownFunction { ref name, .. } if name == "number"));
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn test_wrong_role_suggestions_span_both_tables() {
    let err = format_err("{{$x :plural}}", &args! { "x" => 1 });
    assert_eq!(
        err,
        EvalError::UnknownFunction {
            name: "plural".into(),
            suggestions: vec!["plural".into()],
        }
    );
}

#[test]
fn test_function_registered_for_both_roles() {
    let mut registry = FunctionRegistry::new();
    registry.register_formatter("echo", |_ctx, operand, _options| {
        Ok(operand.cloned().unwrap_or_else(|| Value::from("")))
    });
    registry.register_matcher("echo", |_ctx, operand, _options| {
        Ok(operand.cloned().unwrap_or_else(|| Value::from("")))
    });
    let message = MessageFormat::with_registry(
        "en",
        "match {$x :echo}\nwhen a {{$x :echo}!}\nwhen * {other}",
        Arc::new(registry),
    )
    .unwrap();
    assert_eq!(message.format(&args! { "x" => "a" }).unwrap(), "a!");
}

#[test]
fn test_functions_see_locale_and_language() {
    let mut registry = FunctionRegistry::new();
    registry.register_formatter("where", |ctx, _operand, _options| {
        Ok(Value::from(format!("{}/{}", ctx.locale(), ctx.language())))
    });
    let registry = Arc::new(registry);
    for (locale, expected) in [("pt-BR", "pt-BR/pt"), ("sr_Latn", "sr_Latn/sr"), ("en", "en/en")] {
        let message = MessageFormat::with_registry(locale, "{{:where}}", Arc::clone(&registry))
            .unwrap();
        assert_eq!(message.format(&args! {}).unwrap(), expected);
    }
}

#[test]
fn test_functions_receive_string_values() {
    let mut registry = FunctionRegistry::new();
    registry.register_formatter("reverse", |_ctx, operand, _options| {
        let text = operand
            .and_then(|value| value.downcast_ref::<StringValue>())
            .cloned()
            .map(StringValue::into_string)
            .unwrap_or_default();
        Ok(Value::from(text.chars().rev().collect::<String>()))
    });
    let message =
        MessageFormat::with_registry("en", "{{$w :reverse}}", Arc::new(registry)).unwrap();
    assert_eq!(message.format(&args! { "w" => "stressed" }).unwrap(), "desserts");
}

#[test]
fn test_reregistering_replaces_function() {
    let mut registry = FunctionRegistry::new();
    registry.register_formatter("f", |_ctx, _operand, _options| Ok(Value::from("first")));
    registry.register_formatter("f", |_ctx, _operand, _options| Ok(Value::from("second")));
    let message = MessageFormat::with_registry("en", "{{:f}}", Arc::new(registry)).unwrap();
    assert_eq!(message.format(&args! {}).unwrap(), "second");
}

#[test]
fn test_message_is_shareable_across_threads() {
    let message = Arc::new(message("en", APPLES));
    let handles: Vec<_> = (1..=4)
        .map(|count| {
            let message = Arc::clone(&message);
            thread::spawn(move || message.format(&args! { "count" => count }).unwrap())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], "You have 1 apple.");
    assert_eq!(results[3], "You have 4 apples.");
}
