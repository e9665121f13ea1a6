use std::rc::Rc;

use basic::{
    diagnostics::{Position, Source},
    interpreter::{
        environment::{Context, SymbolTable},
        host::BufferHost,
        lexer::tokenize,
        parser::core::parse,
    },
};

/// Evaluates `text` inside a fresh call frame below the global context.
fn frame_with(text: &str) -> Rc<Context> {
    let root = Context::global(Rc::new(BufferHost::new()));
    let source = Source::new("<test>", text);
    let tokens = tokenize(&source).unwrap_or_else(|e| panic!("Lexing failed:\n{e}"));
    let program = parse(&tokens).unwrap_or_else(|e| panic!("Parsing failed:\n{e}"));

    let frame = root.child("f",
                           Position::start(Rc::clone(&source)),
                           SymbolTable::new(Some(Rc::clone(&root.symbols))));
    if let Err(e) = frame.evaluate(&program) {
        panic!("Evaluation failed: {e:?}");
    }
    frame
}

#[test]
fn released_frame_frees_scope_of_local_functions() {
    let frame = frame_with("function helper() -> 1\nvar x = 2");
    let scope = Rc::downgrade(&frame.symbols);

    frame.release();
    drop(frame);

    assert!(scope.upgrade().is_none());
}

#[test]
fn released_frame_keeps_scope_with_escaped_function() {
    let frame = frame_with("function helper() -> 1\nvar x = 2");
    let helper = frame.lookup("helper").expect("helper is bound");

    frame.release();

    assert!(frame.lookup("x").is_some());
    assert!(frame.lookup("helper").is_some());
    drop(helper);
}

#[test]
fn released_frame_keeps_scope_held_by_inner_scope() {
    let frame = frame_with("var x = 2");
    let inner = SymbolTable::new(Some(Rc::clone(&frame.symbols)));

    frame.release();

    assert!(inner.borrow().get("x").is_some());
}
