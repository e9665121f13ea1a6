use std::rc::Rc;

use basic::{
    diagnostics::{Position, Source, underline},
    error::Error,
    interpreter::{environment::Context, host::BufferHost},
    run,
};

fn failure(src: &str) -> Error {
    let host = Rc::new(BufferHost::new());
    match run("<test>", src, Some(Context::global(host))).0 {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail"),
        Err(e) => e,
    }
}

fn position(source: &Rc<Source>, prefix: &str) -> Position {
    let mut pos = Position::start(Rc::clone(source));
    for ch in prefix.chars() {
        pos.advance(ch);
    }
    pos
}

#[test]
fn underline_spans_lines() {
    let source = Source::new("<test>", "abc\ndef\nghi");
    let start = position(&source, "a");
    let end = position(&source, "abc\ndef\ngh");

    assert_eq!(underline(&start, &end), "abc\n ^^\ndef\n^^^\nghi\n^^");
}

#[test]
fn underline_single_line() {
    let source = Source::new("<test>", "first\nsecond");
    let start = position(&source, "first\nsec");
    let end = position(&source, "first\nsecon");

    assert_eq!(underline(&start, &end), "second\n   ^^");
}

#[test]
fn runtime_error_at_top_level() {
    let error = failure("var a = 1 / 0");
    assert_eq!(error.title(), "Runtime Error");
    assert_eq!(error.to_string(),
               "Traceback (most recent call last):\n    File <test>, line 1, in \
                <program>\nRuntime Error: Division by zero\nFile <test>, line 1\n\nvar a = 1 / \
                0\n            ^");
}

#[test]
fn traceback_lists_call_frames() {
    let error = failure("function f(x) -> x / 0\nf(1)");
    assert_eq!(error.to_string(),
               "Traceback (most recent call last):\n    File <test>, line 2, in <program>\n    \
                File <test>, line 1, in f\nRuntime Error: Division by zero\nFile <test>, line \
                1\n\nfunction f(x) -> x / 0\n                     ^");
}

#[test]
fn traceback_through_nested_calls() {
    let error = failure("function inner() -> missing\nfunction outer()\n    return \
                         inner()\nend\nouter()");
    let text = error.to_string();

    assert!(text.starts_with("Traceback (most recent call last):\n    File <test>, line 5, in \
                              <program>\n    File <test>, line 3, in outer\n    File <test>, \
                              line 1, in inner\n"),
            "{text}");
    assert!(text.contains("missing is not defined"));
}

#[test]
fn operator_errors_underline_whole_expression() {
    let error = failure("\"a\" - 1");
    assert_eq!(error.span().start.col, 0);
    assert_eq!(error.span().end.col, 7);
}

#[test]
fn syntax_error_titles() {
    assert_eq!(failure("$").title(), "Illegal Character");
    assert_eq!(failure("1 ! 2").title(), "Expected Character");
    assert_eq!(failure("1 +").title(), "Invalid Syntax");
    assert!(failure("1 ! 2").to_string().starts_with("Expected Character: '=' (after '!')"));
}
