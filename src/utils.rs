#[inline]
pub fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(addend <= capacity);
    (index + addend) % capacity
}

/// Moves a logical offset by `delta`, accepting any result in `[0, len]`.
///
/// Offsets are logical, so no capacity modulo is applied.
#[inline]
pub fn shift(offset: usize, delta: isize, len: usize) -> Option<usize> {
    let next = offset.checked_add_signed(delta)?;
    if next <= len {
        Some(next)
    } else {
        None
    }
}
