//! Sequential concatenation of two cursor ranges into a destination buffer.

use crate::array::Array;
use crate::cursor::{Cursor, CursorMut};
use crate::error::{Error, Result};

fn range_len<A: Array>(begin: &Cursor<A>, end: &Cursor<A>) -> Result<usize> {
    if !begin.is_compatible(end) || end.offset() < begin.offset() {
        return Err(Error::IncompatibleCursors);
    }
    Ok(end.offset() - begin.offset())
}

fn copy_range<A, D>(mut cur: Cursor<A>, end: Cursor<A>, dest: &mut CursorMut<D>) -> Result<()>
    where A: Array,
          D: Array<Item = A::Item>,
          A::Item: Clone
{
    while cur != end {
        *dest.get_mut()? = cur.get()?.clone();
        dest.move_next()?;
        cur.move_next()?;
    }
    Ok(())
}

/// Writes every element of `first`, then every element of `second`, through
/// `dest`, advancing it past each write.
///
/// Each range is a `(begin, end)` pair of cursors into the same buffer; the
/// two ranges may come from buffers of different capacities. Elements are
/// cloned in logical order, range one entirely before range two. `dest`
/// overwrites existing elements of its buffer and never pushes, so it needs
/// at least as many positions before its end sentinel as the two ranges
/// hold together.
///
/// Returns `dest` positioned just past the last written element.
///
/// # Errors
///
/// - [`Error::IncompatibleCursors`] if either range's cursors belong to
///   different buffers or are out of order.
/// - [`Error::Capacity`] if `dest` has too few positions left.
///
/// Both are detected before anything is written.
///
/// # Examples
///
/// ```
/// use circular_cursor::{concat, CircularBuffer, Error};
///
/// let first = CircularBuffer::from([1, 2]);
/// let second = CircularBuffer::from([3, 4, 5]);
///
/// let mut out: CircularBuffer<[_; 6]> = CircularBuffer::filled(0);
/// let rest = concat((first.begin(), first.end()),
///                   (second.begin(), second.end()),
///                   out.begin_mut()).unwrap();
/// assert_eq!(rest.offset(), 5);
/// assert_eq!(out, [1, 2, 3, 4, 5, 0]);
///
/// let mut small: CircularBuffer<[_; 4]> = CircularBuffer::filled(0);
/// let err = concat((first.begin(), first.end()),
///                  (second.begin(), second.end()),
///                  small.begin_mut()).unwrap_err();
/// assert_eq!(err, Error::Capacity { required: 5, available: 4 });
/// assert_eq!(small, [0, 0, 0, 0]);
/// ```
pub fn concat<'d, A1, A2, D>(first: (Cursor<A1>, Cursor<A1>),
                             second: (Cursor<A2>, Cursor<A2>),
                             mut dest: CursorMut<'d, D>)
                             -> Result<CursorMut<'d, D>>
    where A1: Array,
          A2: Array<Item = A1::Item>,
          D: Array<Item = A1::Item>,
          A1::Item: Clone
{
    let first_len = range_len(&first.0, &first.1)?;
    let second_len = range_len(&second.0, &second.1)?;

    let required = first_len + second_len;
    let available = dest.remaining();
    if required > available {
        return Err(Error::Capacity { required, available });
    }

    debug!(first = first_len, second = second_len, at = dest.offset(), "concatenating ranges");
    copy_range(first.0, first.1, &mut dest)?;
    copy_range(second.0, second.1, &mut dest)?;
    Ok(dest)
}
