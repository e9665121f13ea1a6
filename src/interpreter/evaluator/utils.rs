use std::rc::Rc;

use crate::{
    diagnostics::Span,
    error::{RuntimeError, RuntimeErrorKind},
    interpreter::{
        environment::Context,
        evaluator::core::{EvalResult, Unwind},
        value::core::Value,
    },
};

impl Context {
    /// Builds a runtime error raised in this context.
    pub fn error(self: &Rc<Self>, kind: RuntimeErrorKind, span: &Span) -> Unwind {
        RuntimeError::new(kind, span.clone(), Rc::clone(self)).into()
    }

    /// Interprets `value` as a condition.
    ///
    /// # Errors
    /// `NoTruthValue` for kinds other than numbers and strings, pointing at
    /// `span`.
    pub fn condition(self: &Rc<Self>, value: &Value, span: &Span) -> EvalResult<bool> {
        value.is_true()
             .ok_or_else(|| self.error(RuntimeErrorKind::NoTruthValue(value.kind_name()), span))
    }
}

/// Checks an argument count against a parameter list.
///
/// # Parameters
/// - `args`: The supplied arguments.
/// - `params`: The declared parameters.
/// - `name`: Function name for the error message.
///
/// # Errors
/// `TooManyArguments` or `TooFewArguments`, naming the difference.
///
/// # Example
/// ```
/// use basic::{error::RuntimeErrorKind, interpreter::evaluator::utils::check_arity};
///
/// assert!(check_arity(&[1, 2], &["a", "b"], "f").is_ok());
/// assert_eq!(check_arity(&[1], &["a", "b", "c"], "f"),
///            Err(RuntimeErrorKind::TooFewArguments { count: 2,
///                                                    name:  "f".to_string(), }));
/// ```
pub fn check_arity<A, P>(args: &[A], params: &[P], name: &str) -> Result<(), RuntimeErrorKind> {
    let (got, expected) = (args.len(), params.len());

    if got > expected {
        Err(RuntimeErrorKind::TooManyArguments { count: got - expected,
                                                 name:  name.to_string(), })
    } else if got < expected {
        Err(RuntimeErrorKind::TooFewArguments { count: expected - got,
                                                name:  name.to_string(), })
    } else {
        Ok(())
    }
}
