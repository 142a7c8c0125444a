//! Fixed-size backing storage.

/// Trait for fixed size arrays usable as `CircularBuffer` storage.
///
/// # Safety
///
/// Implementors must be laid out as exactly `capacity()` contiguous values of
/// `Item`, with no header or padding in front of the first element. The
/// buffer addresses its slots by casting a pointer to `Self` into a pointer to
/// `Item`.
pub unsafe trait Array {
    /// The array’s element type
    type Item;

    /// Returns number of element the array can hold
    fn capacity() -> usize;
}

unsafe impl<T, const N: usize> Array for [T; N] {
    type Item = T;

    #[inline(always)]
    fn capacity() -> usize {
        N
    }
}

#[cfg(feature = "use_generic_array")]
mod generic_impl {
    use super::Array;
    use generic_array::{ArrayLength, GenericArray};

    unsafe impl<T, N> Array for GenericArray<T, N>
    where
        N: ArrayLength<T>,
    {
        type Item = T;

        #[inline(always)]
        fn capacity() -> usize {
            N::to_usize()
        }
    }
}
