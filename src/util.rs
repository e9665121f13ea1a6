/// Numeric conversions.
///
/// Turns the `f64` every runtime number is stored as into the indices and
/// counts that lists and strings need, and back, without silent wraparound.
///
/// # Responsibilities
/// - Resolve list indices, including negative ones counted from the end.
/// - Clamp repetition counts to the non-negative range.
/// - Convert lengths to `f64` for values like `len(list)`.
pub mod num;
