/// Function values and calls.
///
/// Definition of user functions, the call protocol shared by user and builtin
/// functions, and the static builtin table.
pub mod core;

/// Type inspection and list length builtins.
///
/// `is_number`, `is_string`, `is_list`, `is_function` and `len`.
pub mod builtin;

/// List mutation builtins.
///
/// `append`, `pop` and `extend`, which change a list in place.
pub mod list;

/// Console builtins.
///
/// `print`, `print_ret`, `input`, `input_int` and `clear`, all going through
/// the context's host.
pub mod print;

/// The `run` builtin, which executes another script.
pub mod run;
