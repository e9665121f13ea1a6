/// Converts a length to `f64`.
///
/// Lengths of in-memory collections are far below `2^53`, so the conversion
/// is exact in practice.
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Resolves a list index given as a number.
///
/// The index is truncated toward zero. Negative indices count from the end,
/// so `-1` is the last element.
///
/// ## Parameters
/// - `index`: The index as written in the program.
/// - `len`: Length of the list being indexed.
///
/// ## Returns
/// - `Some(i)`: A valid position in `0..len`.
/// - `None`: If the index is out of bounds or not finite.
///
/// ## Example
/// ```
/// use basic::util::num::resolve_index;
///
/// assert_eq!(resolve_index(0.0, 3), Some(0));
/// assert_eq!(resolve_index(-1.0, 3), Some(2));
/// assert_eq!(resolve_index(1.9, 3), Some(1));
/// assert_eq!(resolve_index(3.0, 3), None);
/// assert_eq!(resolve_index(-4.0, 3), None);
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn resolve_index(index: f64, len: usize) -> Option<usize> {
    if !index.is_finite() {
        return None;
    }

    let len_f = usize_to_f64(len);
    let index = index.trunc();
    let index = if index < 0.0 { index + len_f } else { index };

    (0.0..len_f).contains(&index).then_some(index as usize)
}

/// Converts a repetition count, truncating toward zero.
///
/// Negative and NaN counts give zero.
///
/// ## Example
/// ```
/// use basic::util::num::repeat_count;
///
/// assert_eq!(repeat_count(3.7), 3);
/// assert_eq!(repeat_count(-2.0), 0);
/// assert_eq!(repeat_count(f64::NAN), 0);
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn repeat_count(count: f64) -> usize {
    if count.is_nan() || count <= 0.0 {
        0
    } else {
        count.trunc() as usize
    }
}
