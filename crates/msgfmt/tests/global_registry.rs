//! Tests for the process-wide function registry.

use msgfmt::{EvalError, MessageFormat, Value, args, global};

#[test]
fn test_global_registry_resolves_registered_functions() {
    global::register_formatter("global_shout", |ctx, operand, _options| {
        let operand = operand.ok_or_else(|| EvalError::MissingArgument {
            function: "global_shout".into(),
        })?;
        Ok(Value::from(operand.format_to_string(ctx)?.to_uppercase()))
    });

    let message = MessageFormat::new("en", "{{$x :global_shout}!}").unwrap();
    assert_eq!(message.format(&args! { "x" => "hi" }).unwrap(), "HI!");
}

#[test]
fn test_global_builtins() {
    global::register_builtins();
    let message = MessageFormat::new("en", "{{$n :number minimumFractionDigits=1}}").unwrap();
    assert_eq!(message.format(&args! { "n" => 2 }).unwrap(), "2.0");
}

#[test]
fn test_snapshots_are_unaffected_by_later_registration() {
    let before = global::snapshot();
    global::register_matcher("global_late", |_ctx, operand, _options| {
        Ok(operand.cloned().unwrap_or_else(|| Value::from("")))
    });
    assert!(before.matcher("global_late").is_none());
    assert!(global::snapshot().matcher("global_late").is_some());
}

#[test]
fn test_unregistered_global_function() {
    let message = MessageFormat::new("en", "{{:global_never_registered}}").unwrap();
    let err = message.format(&args! {}).unwrap_err();
    assert!(matches!(err, EvalError::UnknownFunction { .. }));
}
