//! Ring index arithmetic
//!
//! Kit, group and position cycling all wrap around. The step may exceed the
//! ring length after edits shrink a slot, so the result is reduced fully
//! rather than by a single wrap.

/// Index reached by stepping `vector` places from `start` on a ring of `length`
///
/// Returns `None` for an empty ring. For any non-empty ring the result lies
/// in `[0, length)`, and stepping back by `-vector` returns to `start` when
/// `start` itself was in range.
pub fn destination(start: usize, length: usize, vector: i64) -> Option<usize> {
    if length == 0 {
        return None;
    }
    let length = length as i64;
    let index = (start as i64).wrapping_add(vector).rem_euclid(length);
    Some(index as usize)
}
