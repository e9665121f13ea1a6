/// Parser entry point, the token stream and the backtracking combinator.
///
/// Holds the cursor type every parsing function advances and the
/// speculative-parse helper that lets a statement list end gracefully.
pub mod core;

/// Statement-level parsing.
///
/// Statement lists, `return`, `continue` and `break`.
pub mod statement;

/// Binary operator parsing.
///
/// Implements the precedence levels from assignment and logic down to
/// multiplication.
pub mod binary;

/// Unary operator and primary expression parsing.
///
/// Prefix signs, exponentiation, calls, literals and parenthesized
/// expressions.
pub mod unary;

/// Compound construct parsing.
///
/// `if`/`elif`/`else`, `for`, `while` and function definitions, in both
/// their single-line and multi-line forms.
pub mod block;

/// Shared parsing helpers.
///
/// Token expectations, separated lists and the messages reported when a
/// rule fails without consuming input.
pub mod utils;
