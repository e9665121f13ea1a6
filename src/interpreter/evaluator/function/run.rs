use crate::{
    error::RuntimeErrorKind,
    interpreter::{
        evaluator::{core::EvalResult, function::core::Invocation},
        value::core::{Data, Value},
    },
};

/// Loads the script at `fn` through the host and runs it in the root
/// context, so its top-level bindings become visible to the caller.
///
/// # Errors
/// - `InvalidArgument` if `fn` is not a string.
/// - `ScriptLoad` if the host cannot provide the script.
/// - `ScriptFailed` wrapping the rendered error of the script.
pub fn run(call: &Invocation<'_>) -> EvalResult<Value> {
    let Data::String(path) = call.arg("fn").data else {
        return Err(call.error(RuntimeErrorKind::InvalidArgument("First argument must be string")));
    };

    let text = call.host().read_source(&path).map_err(|e| {
                                                  log::warn!("failed to load script {path:?}: {e}");
                                                  call.error(RuntimeErrorKind::ScriptLoad(path.clone()))
                                              })?;

    let (result, _) = crate::run(&path, &text, Some(call.frame.root()));
    if let Err(error) = result {
        log::warn!("script {path:?} failed");
        return Err(call.error(RuntimeErrorKind::ScriptFailed { path,
                                                               details: error.to_string() }));
    }

    Ok(Value::null())
}
