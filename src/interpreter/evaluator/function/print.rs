use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Invocation},
        value::core::Value,
    },
};

/// Writes the text of `value` as one line of output and returns null.
///
/// Strings are written without quotes.
pub fn print(call: &Invocation<'_>) -> EvalResult<Value> {
    call.host().write_line(&call.arg("value").to_text());
    Ok(Value::null())
}

/// Returns the text `print` would have written, as a string.
pub fn print_ret(call: &Invocation<'_>) -> EvalResult<Value> {
    Ok(Value::string(call.arg("value").to_text()))
}

/// Reads one line of input as a string.
///
/// # Errors
/// `InputClosed` once input is exhausted.
pub fn input(call: &Invocation<'_>) -> EvalResult<Value> {
    call.host()
        .read_line()
        .map(Value::string)
        .ok_or_else(|| call.error(RuntimeErrorKind::InputClosed))
}

/// Reads lines until one is an integer and returns it as a number.
///
/// Each rejected line is answered with `<line> must be an integer. Try
/// again!`.
///
/// # Errors
/// `InputClosed` once input is exhausted.
pub fn input_int(call: &Invocation<'_>) -> EvalResult<Value> {
    loop {
        let line = call.host()
                       .read_line()
                       .ok_or_else(|| call.error(RuntimeErrorKind::InputClosed))?;

        match line.trim().parse::<i32>() {
            Ok(number) => return Ok(Value::number(f64::from(number))),
            Err(_) => call.host().write_line(&format!("{line} must be an integer. Try again!")),
        }
    }
}

/// Clears the screen and returns null.
pub fn clear(call: &Invocation<'_>) -> EvalResult<Value> {
    call.host().clear();
    Ok(Value::null())
}
