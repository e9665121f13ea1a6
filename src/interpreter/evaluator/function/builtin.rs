use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Invocation},
        value::core::{Data, Value},
    },
    util::num::usize_to_f64,
};

/// Generates a builtin that tests the kind of its `value` argument and
/// returns `1` or `0`.
macro_rules! kind_predicate {
    ($fname:ident, $pattern:pat) => {
        pub fn $fname(call: &Invocation<'_>) -> EvalResult<Value> {
            Ok(Value::from_bool(matches!(call.arg("value").data, $pattern)))
        }
    };
}

kind_predicate!(is_number, Data::Number(_));
kind_predicate!(is_string, Data::String(_));
kind_predicate!(is_list, Data::List(_));
kind_predicate!(is_function, Data::Function(_) | Data::Builtin(_));

/// Returns the number of elements of a list.
///
/// # Errors
/// `InvalidArgument` if the argument is not a list.
pub fn len(call: &Invocation<'_>) -> EvalResult<Value> {
    match &call.arg("list").data {
        Data::List(elements) => Ok(Value::number(usize_to_f64(elements.borrow().len()))),
        _ => Err(call.error(RuntimeErrorKind::InvalidArgument("Argument must be list"))),
    }
}
