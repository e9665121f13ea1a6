use std::{cell::RefCell, rc::Rc};

use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{
            core::{EvalResult, Unwind},
            function::core::Invocation,
        },
        value::core::{Data, Value},
    },
    util::num::resolve_index,
};

/// Extracts the shared storage of a list argument.
fn list_arg(call: &Invocation<'_>,
            param: &str,
            message: &'static str)
            -> Result<Rc<RefCell<Vec<Value>>>, Unwind> {
    match call.arg(param).data {
        Data::List(elements) => Ok(elements),
        _ => Err(call.error(RuntimeErrorKind::InvalidArgument(message))),
    }
}

/// Prepares `value` for storage in `target`.
///
/// A value that already contains `target` is stored as a detached copy, so
/// no list ever contains itself.
fn storable(value: &Value, target: &Rc<RefCell<Vec<Value>>>) -> Value {
    if value.contains_list(target) {
        value.detached()
    } else {
        value.copy()
    }
}

/// Pushes `value` onto `list` in place and returns null.
pub fn append(call: &Invocation<'_>) -> EvalResult<Value> {
    let list = list_arg(call, "list", "First argument must be list")?;
    let value = storable(&call.arg("value"), &list);
    list.borrow_mut().push(value);

    Ok(Value::null())
}

/// Removes the element at `index` from `list` in place and returns it.
///
/// Negative indices count from the end.
///
/// # Errors
/// - `InvalidArgument` if the arguments are not a list and a number.
/// - `IndexOutOfBounds` if there is no element at `index`.
pub fn pop(call: &Invocation<'_>) -> EvalResult<Value> {
    let list = list_arg(call, "list", "First argument must be list")?;
    let Data::Number(index) = call.arg("index").data else {
        return Err(call.error(RuntimeErrorKind::InvalidArgument("Second argument must be number")));
    };

    let mut elements = list.borrow_mut();
    let index = resolve_index(index, elements.len()).ok_or_else(|| {
                    call.error(RuntimeErrorKind::IndexOutOfBounds { action: "removed" })
                })?;

    Ok(elements.remove(index))
}

/// Appends every element of `listB` to `listA` in place and returns null.
pub fn extend(call: &Invocation<'_>) -> EvalResult<Value> {
    let target = list_arg(call, "listA", "First argument must be list")?;
    let source = list_arg(call, "listB", "Second argument must be list")?;

    let extra: Vec<Value> = source.borrow()
                                  .iter()
                                  .map(|value| storable(value, &target))
                                  .collect();
    target.borrow_mut().extend(extra);

    Ok(Value::null())
}
