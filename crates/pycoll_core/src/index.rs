//! Index and slice normalization (Python-like policy).
//!
//! Every sequence container resolves user-facing `i64` indices through this module so that negative
//! indices, clamping and error text behave the same for lists, tuples, text, bytes and deques.
//!
//! ## Notes
//! - **Negative indices**: `-1` is the last element; `-len` is the first.
//! - **Slicing**: `start`, `end`, `step` follow Python: omitted bounds depend on the step sign,
//!   out-of-range bounds are clamped, and a zero step is rejected.

use crate::errors::CoreError;
use crate::types::ContainerTypeId;

/// Normalize an index (supports negatives). Returns `None` if out of range.
#[inline]
pub fn normalize_index(len: usize, index: i64) -> Option<usize> {
    let len_i = len as i64;
    let mut i = index;
    if i < 0 {
        i += len_i;
    }
    if i < 0 || i >= len_i { None } else { Some(i as usize) }
}

/// Normalize an index or fail with a container-specific `IndexError`.
///
/// ## Errors
/// - `IndexError: {type} index {index} out of range for length {len}` if out of range.
#[inline]
pub fn checked_index(container: ContainerTypeId, len: usize, index: i64) -> Result<usize, CoreError> {
    normalize_index(len, index).ok_or_else(|| CoreError::index_out_of_range_for(container, index, len))
}

/// Resolve an insertion point the way `list.insert` does: negative indices count from the end and the
/// result is clamped to `0..=len`, so insertion never fails.
#[inline]
pub fn clamp_insert_index(len: usize, index: i64) -> usize {
    let len_i = len as i64;
    let i = if index < 0 { index + len_i } else { index };
    i.clamp(0, len_i) as usize
}

/// Compute the element positions selected by a Python-like slice.
///
/// ## Parameters
/// - `len`: length of the sliced sequence.
/// - `start`: optional start index (inclusive).
/// - `end`: optional end index (exclusive).
/// - `step`: optional step; defaults to `1`. Negative steps walk backwards.
///
/// ## Errors
/// - `ValueError: slice step cannot be zero` if `step == 0`.
pub fn slice_positions(
    len: usize,
    start: Option<i64>,
    end: Option<i64>,
    step: Option<i64>,
) -> Result<Vec<usize>, CoreError> {
    let step = step.unwrap_or(1);
    if step == 0 {
        return Err(CoreError::slice_step_zero());
    }

    let len = len as i64;

    let default_start = if step > 0 { 0 } else { len - 1 };
    let default_end = if step > 0 { len } else { -1 };

    let mut start_idx = start.unwrap_or(default_start);
    let mut end_idx = end.unwrap_or(default_end);

    if start.is_some() && start_idx < 0 {
        start_idx += len;
    }
    // For negative steps an omitted end is the sentinel `-1`, which must not be wrapped.
    if end.is_some() && end_idx < 0 {
        end_idx += len;
    }

    if step > 0 {
        start_idx = start_idx.clamp(0, len);
        end_idx = end_idx.clamp(0, len);
    } else {
        start_idx = start_idx.clamp(-1, len - 1);
        end_idx = end_idx.clamp(-1, len - 1);
    }

    let mut out = Vec::new();
    let mut i = start_idx;
    // A step that overshoots i64 has already left the range.
    if step > 0 {
        while i < end_idx {
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
    } else {
        while i > end_idx {
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
    }
    Ok(out)
}

/// Slice a slice of clonable items using [`slice_positions`].
///
/// ## Errors
/// - `ValueError: slice step cannot be zero` if `step == 0`.
pub fn slice_items<T: Clone>(
    items: &[T],
    start: Option<i64>,
    end: Option<i64>,
    step: Option<i64>,
) -> Result<Vec<T>, CoreError> {
    let positions = slice_positions(items.len(), start, end, step)?;
    Ok(positions.into_iter().filter_map(|i| items.get(i).cloned()).collect())
}

/// Reduce a rotation count to an equivalent right-rotation in `0..len`.
///
/// Positive `n` rotates toward the back, negative toward the front; `n` may exceed `len`.
/// Returns `0` for empty sequences.
#[inline]
pub fn effective_rotation(len: usize, n: i64) -> usize {
    if len == 0 {
        return 0;
    }
    n.rem_euclid(len as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_index_supports_negative_indices() {
        assert_eq!(normalize_index(3, -1), Some(2));
        assert_eq!(normalize_index(3, -3), Some(0));
        assert_eq!(normalize_index(3, -4), None);
        assert_eq!(normalize_index(3, 3), None);
        assert_eq!(normalize_index(0, 0), None);
    }

    #[test]
    fn checked_index_reports_container_and_length() {
        let err = checked_index(ContainerTypeId::Tuple, 2, 5).unwrap_err();
        assert_eq!(err.to_string(), "IndexError: tuple index 5 out of range for length 2");
    }

    #[test]
    fn insert_index_clamps() {
        assert_eq!(clamp_insert_index(3, 10), 3);
        assert_eq!(clamp_insert_index(3, -1), 2);
        assert_eq!(clamp_insert_index(3, -10), 0);
    }

    #[test]
    fn slice_with_extreme_steps_stops_instead_of_overflowing() {
        let v = vec![1, 2, 3];
        assert_eq!(slice_items(&v, Some(1), None, Some(i64::MAX)).unwrap(), vec![2]);
        assert_eq!(slice_items(&v, None, None, Some(i64::MAX)).unwrap(), vec![1]);
        assert_eq!(slice_items(&v, Some(1), None, Some(i64::MIN)).unwrap(), vec![2]);
        assert_eq!(slice_items(&v, None, None, Some(i64::MIN)).unwrap(), vec![3]);
    }

    #[test]
    fn slice_clamps_and_steps() {
        let v = vec![1, 2, 3, 4, 5];
        assert_eq!(slice_items(&v, Some(1), Some(10), None).unwrap(), vec![2, 3, 4, 5]);
        assert_eq!(slice_items(&v, Some(0), Some(5), Some(2)).unwrap(), vec![1, 3, 5]);
        assert_eq!(slice_items(&v, Some(-1), None, Some(-1)).unwrap(), vec![5, 4, 3, 2, 1]);
        assert_eq!(slice_items(&v, None, None, Some(-2)).unwrap(), vec![5, 3, 1]);
        assert_eq!(slice_items(&v, Some(-2), None, None).unwrap(), vec![4, 5]);
        assert!(slice_items(&v, Some(3), Some(1), None).unwrap().is_empty());
    }

    #[test]
    fn slice_zero_step_is_value_error() {
        let err = slice_positions(3, None, None, Some(0)).unwrap_err();
        assert_eq!(err.to_string(), "ValueError: slice step cannot be zero");
    }

    #[test]
    fn rotation_wraps_both_directions() {
        assert_eq!(effective_rotation(5, 2), 2);
        assert_eq!(effective_rotation(5, 7), 2);
        assert_eq!(effective_rotation(5, -1), 4);
        assert_eq!(effective_rotation(0, 3), 0);
    }
}
