/// The environment programs run in.
///
/// Contexts form the call chain used for tracebacks; symbol tables form the
/// lexical scope chain used for lookup.
///
/// # Responsibilities
/// - Seeds the root scope with constants and builtins.
/// - Resolves names through enclosing scopes and binds them locally.
/// - Opens a frame per function call.
pub mod environment;
/// The evaluator module executes syntax trees and computes results.
///
/// The evaluator walks the tree, applies operators, manages variable state and
/// carries control-flow signals to the construct that handles them.
///
/// # Responsibilities
/// - Evaluates every node kind in a fixed left-to-right order.
/// - Handles variables, functions, loops and conditionals.
/// - Reports runtime errors such as division by zero or undefined names.
pub mod evaluator;
/// The boundary between programs and the outside world.
///
/// # Responsibilities
/// - Defines the `Host` trait the I/O builtins use.
/// - Provides a standard-stream host and an in-memory host.
pub mod host;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens,
/// each corresponding to a number, string, identifier, keyword or symbol.
///
/// # Responsibilities
/// - Converts the input into tokens with source spans.
/// - Resolves string escapes and recognizes keywords.
/// - Reports illegal and incomplete characters.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// # Responsibilities
/// - Converts tokens into `Node` trees by recursive descent.
/// - Validates the grammar, naming the expected tokens on failure.
/// - Backtracks where a statement list may legitimately end.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines `Value` and its payload variants.
/// - Implements the operator contract between values.
/// - Provides printing, truthiness and equality.
pub mod value;
