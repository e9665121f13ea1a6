//! # basic
//!
//! basic is a small, dynamically typed scripting language with a tree-walking
//! interpreter written in Rust. Programs are lexed, parsed into a syntax tree
//! and evaluated against an environment that can be kept between runs, which
//! is how the interactive shell remembers definitions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::rc::Rc;

use crate::{
    diagnostics::Source,
    error::Error,
    interpreter::{
        environment::Context,
        evaluator::core::Unwind,
        host::StdHost,
        lexer::tokenize,
        parser::core::parse,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the operator types that represent
/// the syntactic structure of a program as a tree. The tree is built by the
/// parser and walked by the evaluator.
///
/// # Responsibilities
/// - Defines one node variant per language construct.
/// - Attaches the full source span to every node for error reporting.
/// - Keeps function bodies shareable so function values can outlive the tree.
pub mod ast;
/// Source positions and caret-annotated snippets.
///
/// Every token, node, value and error refers back to the source through the
/// types in this module.
///
/// # Responsibilities
/// - Tracks byte offset, line and column while walking the source.
/// - Represents source ranges as spans.
/// - Renders the lines a span covers with a row of carets underneath.
pub mod diagnostics;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing,
/// or evaluating code. Each error renders as a titled message, the location,
/// the underlined source and, for runtime errors, a traceback.
///
/// # Responsibilities
/// - Defines error kinds for all failure modes (lexer, parser, evaluator).
/// - Attaches spans, and for runtime errors the active context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the environment to provide a complete runtime.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Provides the environment programs run in and the host they talk to.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// # Responsibilities
/// - Convert runtime numbers into list indices and repetition counts.
pub mod util;

/// Runs a program and returns its value along with the environment it ran in.
///
/// Without an environment, a fresh root environment talking to standard
/// input and output is created. Passing the returned environment to the next
/// call keeps every top-level binding, which is how the shell works.
///
/// The value of a program is the list of its top-level statement values. A
/// top-level `return` ends the program with its value.
///
/// # Parameters
/// - `source_id`: Name shown in diagnostics, such as a file name.
/// - `text`: The program.
/// - `environment`: The environment to run in, if any.
///
/// # Returns
/// The program's value or the first error, and the environment.
///
/// # Examples
/// ```
/// use basic::{interpreter::value::core::Value, run};
///
/// let (result, env) = run("<stdin>", "var a = 5 + 3", None);
/// assert_eq!(result.unwrap(), Value::list(vec![Value::number(8.0)]));
///
/// // The environment remembers `a`.
/// let (result, _) = run("<stdin>", "a * 2", Some(env));
/// assert_eq!(result.unwrap(), Value::list(vec![Value::number(16.0)]));
///
/// // An undefined variable is a runtime error.
/// let (result, _) = run("<stdin>", "b", None);
/// assert!(result.unwrap_err().to_string().contains("b is not defined"));
/// ```
pub fn run(source_id: &str,
           text: &str,
           environment: Option<Rc<Context>>)
           -> (Result<Value, Error>, Rc<Context>) {
    let environment = environment.unwrap_or_else(|| Context::global(Rc::new(StdHost)));
    let source = Source::new(source_id, text);

    let result = tokenize(&source).and_then(|tokens| {
                                      log::debug!("{source_id}: {} tokens", tokens.len());
                                      parse(&tokens)
                                  })
                                  .map_err(Error::from)
                                  .and_then(|program| {
                                      log::debug!("{source_id}: evaluating");
                                      match environment.evaluate(&program) {
                                          Ok(value) | Err(Unwind::Return(value)) => Ok(value),
                                          Err(Unwind::Continue | Unwind::Break) => Ok(Value::null()),
                                          Err(Unwind::Error(error)) => Err(Error::Runtime(error)),
                                      }
                                  });

    match &result {
        Ok(_) => log::debug!("{source_id}: finished"),
        Err(error) => log::debug!("{source_id}: failed with {}", error.title()),
    }

    (result, environment)
}
