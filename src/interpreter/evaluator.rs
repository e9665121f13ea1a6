/// Core evaluation logic.
///
/// The `Unwind` signal type, the node dispatcher, literals and variables.
pub mod core;

/// Binary operator evaluation.
///
/// Evaluates both operands and applies the operator contract, attributing the
/// result or the error to the right source range.
pub mod binary;

/// Unary operator evaluation.
///
/// Handles `+`, `-` and `not`.
pub mod unary;

/// Conditional evaluation.
///
/// Evaluates `if`/`elif`/`else` chains.
pub mod conditional;

/// Loop evaluation.
///
/// Evaluates `for` and `while`, including `continue`, `break` and the
/// collection of per-iteration values.
pub mod for_loop;

/// Utility functions for evaluation.
///
/// Error construction and condition checks shared by the other evaluator
/// modules.
pub mod utils;

/// Function evaluation.
///
/// Function definitions, calls, argument binding and the builtin library.
pub mod function;
