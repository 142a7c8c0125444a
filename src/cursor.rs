//! Random-access cursors over the logical contents of a `CircularBuffer`.
//!
//! A cursor holds a borrow of its buffer plus a logical offset in
//! `[0, len]`, `len` being the end sentinel. Physical slots are computed on
//! every dereference, so cursors stay correct across wraparound. The borrow
//! rules out structural mutation of the buffer for as long as any cursor is
//! alive.

use core::cmp::Ordering;
use core::fmt;
use core::mem;
use core::ops::Sub;
use core::ptr;

use crate::array::Array;
use crate::error::{Error, Result};
use crate::utils::shift;
use crate::CircularBuffer;

#[inline]
fn locate(offset: usize, delta: isize, len: usize) -> Result<usize> {
    shift(offset, delta, len).ok_or(Error::OutOfRange { offset, delta, len })
}

#[inline]
fn forward(offset: usize, len: usize) -> Result<usize> {
    if offset >= len {
        return Err(Error::OutOfRange { offset, delta: 1, len });
    }
    Ok(offset + 1)
}

#[inline]
fn backward(offset: usize, len: usize) -> Result<usize> {
    if offset == 0 {
        return Err(Error::OutOfRange { offset, delta: -1, len });
    }
    Ok(offset - 1)
}

/// A read-only cursor into a [`CircularBuffer`].
///
/// Created by [`CircularBuffer::begin`] and [`CircularBuffer::end`].
///
/// Two cursors are *compatible* when they borrow the same buffer. Equality
/// requires compatibility, and ordering is only defined between compatible
/// cursors.
///
/// # Examples
///
/// ```
/// use circular_cursor::{CircularBuffer, Error};
///
/// let buf = CircularBuffer::from([10, 20, 30]);
/// let begin = buf.begin();
///
/// let last = begin.checked_add(2).unwrap();
/// assert_eq!(last.get(), Ok(&30));
/// assert_eq!(begin.get_at(1), Ok(&20));
/// assert_eq!(buf.end() - begin, 3);
/// assert!(begin < last);
///
/// assert_eq!(begin.checked_add(4).unwrap_err(),
///            Error::OutOfRange { offset: 0, delta: 4, len: 3 });
/// ```
pub struct Cursor<'a, A: Array + 'a> {
    buffer: &'a CircularBuffer<A>,
    offset: usize,
}

impl<'a, A: Array> Cursor<'a, A> {
    #[inline]
    pub(crate) fn new(buffer: &'a CircularBuffer<A>, offset: usize) -> Self {
        debug_assert!(offset <= buffer.len());
        Cursor { buffer, offset }
    }

    /// Logical offset of the cursor, 0 being the front of the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true if the cursor sits on the end sentinel.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Number of dereferenceable positions from this cursor to the end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    /// Returns true if both cursors borrow the same buffer.
    #[inline]
    pub fn is_compatible(&self, other: &Cursor<A>) -> bool {
        ptr::eq(self.buffer, other.buffer)
    }

    /// Advances the cursor by one position.
    ///
    /// Fails with [`Error::OutOfRange`] when already on the end sentinel.
    #[inline]
    pub fn move_next(&mut self) -> Result<()> {
        self.offset = forward(self.offset, self.buffer.len())?;
        Ok(())
    }

    /// Moves the cursor back by one position.
    ///
    /// Fails with [`Error::OutOfRange`] when already at offset 0.
    #[inline]
    pub fn move_prev(&mut self) -> Result<()> {
        self.offset = backward(self.offset, self.buffer.len())?;
        Ok(())
    }

    /// Moves the cursor by `delta` positions, in either direction.
    ///
    /// The target offset must lie within `[0, len]`, otherwise the cursor is
    /// left untouched and [`Error::OutOfRange`] is returned.
    #[inline]
    pub fn advance(&mut self, delta: isize) -> Result<()> {
        self.offset = locate(self.offset, delta, self.buffer.len())?;
        Ok(())
    }

    /// Moves the cursor back by `delta` positions.
    #[inline]
    pub fn retreat(&mut self, delta: isize) -> Result<()> {
        // isize::MIN stays negative and so fails the bounds check
        self.advance(delta.wrapping_neg())
    }

    /// Returns a new cursor `delta` positions further on.
    #[inline]
    pub fn checked_add(mut self, delta: isize) -> Result<Self> {
        self.advance(delta)?;
        Ok(self)
    }

    /// Returns a new cursor `delta` positions back.
    #[inline]
    pub fn checked_sub(mut self, delta: isize) -> Result<Self> {
        self.retreat(delta)?;
        Ok(self)
    }

    /// Signed distance in logical positions from `other` to `self`.
    ///
    /// Only meaningful between compatible cursors.
    #[inline]
    pub fn distance(&self, other: &Cursor<A>) -> isize {
        debug_assert!(self.is_compatible(other), "distance between incompatible cursors");
        self.offset as isize - other.offset as isize
    }

    /// Dereferences the cursor.
    ///
    /// Fails with [`Error::InvalidDereference`] on the end sentinel.
    #[inline]
    pub fn get(&self) -> Result<&'a A::Item> {
        let buffer = self.buffer;
        buffer.get(self.offset).ok_or(Error::InvalidDereference {
            offset: self.offset,
            len: buffer.len(),
        })
    }

    /// Dereferences the position `delta` away from the cursor.
    #[inline]
    pub fn get_at(&self, delta: isize) -> Result<&'a A::Item> {
        self.checked_add(delta)?.get()
    }
}

impl<'a, A: Array> Clone for Cursor<'a, A> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, A: Array> Copy for Cursor<'a, A> {}

impl<'a, 'b, A: Array> PartialEq<Cursor<'b, A>> for Cursor<'a, A> {
    #[inline]
    fn eq(&self, other: &Cursor<'b, A>) -> bool {
        self.is_compatible(other) && self.offset == other.offset
    }
}

impl<'a, A: Array> Eq for Cursor<'a, A> {}

impl<'a, 'b, A: Array> PartialOrd<Cursor<'b, A>> for Cursor<'a, A> {
    #[inline]
    fn partial_cmp(&self, other: &Cursor<'b, A>) -> Option<Ordering> {
        if self.is_compatible(other) {
            Some(self.offset.cmp(&other.offset))
        } else {
            None
        }
    }
}

impl<'a, 'b, A: Array> Sub<Cursor<'b, A>> for Cursor<'a, A> {
    type Output = isize;

    #[inline]
    fn sub(self, other: Cursor<'b, A>) -> isize {
        self.distance(&other)
    }
}

impl<'a, A: Array> fmt::Debug for Cursor<'a, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("len", &self.buffer.len())
            .finish()
    }
}

/// A write-through cursor into a [`CircularBuffer`].
///
/// Created by [`CircularBuffer::begin_mut`] and [`CircularBuffer::end_mut`].
/// It navigates like [`Cursor`] and additionally hands out mutable access to
/// the element under it. Being an exclusive borrow, it is the only cursor on
/// its buffer while it lives; use [`as_cursor`](CursorMut::as_cursor) to
/// compare it against shared cursors taken from it.
///
/// # Examples
///
/// ```
/// use circular_cursor::CircularBuffer;
///
/// let mut buf = CircularBuffer::from([1, 2, 3]);
/// buf.push_back(4);
///
/// let mut cursor = buf.begin_mut();
/// while !cursor.is_end() {
///     *cursor.get_mut().unwrap() *= 10;
///     cursor.move_next().unwrap();
/// }
/// assert_eq!(buf, [20, 30, 40]);
/// ```
pub struct CursorMut<'a, A: Array + 'a> {
    buffer: &'a mut CircularBuffer<A>,
    offset: usize,
}

impl<'a, A: Array> CursorMut<'a, A> {
    #[inline]
    pub(crate) fn new(buffer: &'a mut CircularBuffer<A>, offset: usize) -> Self {
        debug_assert!(offset <= buffer.len());
        CursorMut { buffer, offset }
    }

    /// Logical offset of the cursor, 0 being the front of the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns true if the cursor sits on the end sentinel.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Number of dereferenceable positions from this cursor to the end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.offset)
    }

    /// Reborrows as a read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, A> {
        Cursor::new(&*self.buffer, self.offset)
    }

    /// Converts into a read-only cursor at the same position.
    #[inline]
    pub fn into_cursor(self) -> Cursor<'a, A> {
        Cursor::new(self.buffer, self.offset)
    }

    /// Advances the cursor by one position.
    #[inline]
    pub fn move_next(&mut self) -> Result<()> {
        self.offset = forward(self.offset, self.buffer.len())?;
        Ok(())
    }

    /// Moves the cursor back by one position.
    #[inline]
    pub fn move_prev(&mut self) -> Result<()> {
        self.offset = backward(self.offset, self.buffer.len())?;
        Ok(())
    }

    /// Moves the cursor by `delta` positions, in either direction.
    #[inline]
    pub fn advance(&mut self, delta: isize) -> Result<()> {
        self.offset = locate(self.offset, delta, self.buffer.len())?;
        Ok(())
    }

    /// Moves the cursor back by `delta` positions.
    #[inline]
    pub fn retreat(&mut self, delta: isize) -> Result<()> {
        self.advance(delta.wrapping_neg())
    }

    fn dereference_error(&self) -> Error {
        Error::InvalidDereference {
            offset: self.offset,
            len: self.buffer.len(),
        }
    }

    /// Dereferences the cursor.
    #[inline]
    pub fn get(&self) -> Result<&A::Item> {
        self.buffer.get(self.offset).ok_or_else(|| self.dereference_error())
    }

    /// Dereferences the cursor for writing.
    ///
    /// Fails with [`Error::InvalidDereference`] on the end sentinel.
    #[inline]
    pub fn get_mut(&mut self) -> Result<&mut A::Item> {
        let err = self.dereference_error();
        self.buffer.get_mut(self.offset).ok_or(err)
    }

    /// Replaces the element under the cursor, returning the previous one.
    #[inline]
    pub fn replace(&mut self, element: A::Item) -> Result<A::Item> {
        self.get_mut().map(|slot| mem::replace(slot, element))
    }

    /// Dereferences the position `delta` away from the cursor.
    #[inline]
    pub fn get_at(&self, delta: isize) -> Result<&A::Item> {
        self.as_cursor().get_at(delta)
    }

    /// Dereferences the position `delta` away from the cursor for writing.
    pub fn get_at_mut(&mut self, delta: isize) -> Result<&mut A::Item> {
        let len = self.buffer.len();
        let target = locate(self.offset, delta, len)?;
        self.buffer
            .get_mut(target)
            .ok_or(Error::InvalidDereference { offset: target, len })
    }
}

impl<'a, A: Array> fmt::Debug for CursorMut<'a, A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("offset", &self.offset)
            .field("len", &self.buffer.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn wrapped() -> CircularBuffer<[i32; 4]> {
        // physical layout [5, 6, 3, 4] with head at 2
        let mut buf = CircularBuffer::from([1, 2, 3, 4]);
        buf.push_back(5);
        buf.push_back(6);
        buf
    }

    #[test]
    fn iterates_in_logical_order() {
        let buf = CircularBuffer::from([1, 2, 3]);
        let mut out = Vec::new();
        let mut cursor = buf.begin();
        while cursor != buf.end() {
            out.push(*cursor.get().unwrap());
            cursor.move_next().unwrap();
        }
        assert_eq!(out, [1, 2, 3]);

        let buf = wrapped();
        let mut out = Vec::new();
        let mut cursor = buf.begin();
        while !cursor.is_end() {
            out.push(*cursor.get().unwrap());
            cursor.move_next().unwrap();
        }
        assert_eq!(out, [3, 4, 5, 6]);
    }

    #[test]
    fn dereference_across_wraparound() {
        let mut buf = wrapped();
        buf.pop_front().unwrap();
        // head at physical 3, tail at physical 1: tail < head
        let begin = buf.begin();
        assert_eq!(begin.get(), Ok(&4));
        assert_eq!(begin.get_at(1), Ok(&5));
        assert_eq!(begin.get_at(2), Ok(&6));
        assert_eq!(begin.get_at(3), Err(Error::InvalidDereference { offset: 3, len: 3 }));
    }

    #[test]
    fn step_bounds() {
        let buf = CircularBuffer::from([1, 2]);
        let mut cursor = buf.begin();
        assert_eq!(cursor.move_prev(), Err(Error::OutOfRange { offset: 0, delta: -1, len: 2 }));
        cursor.move_next().unwrap();
        cursor.move_next().unwrap();
        assert!(cursor.is_end());
        assert_eq!(cursor.move_next(), Err(Error::OutOfRange { offset: 2, delta: 1, len: 2 }));
        assert_eq!(cursor.offset(), 2);
        cursor.move_prev().unwrap();
        assert_eq!(cursor.get(), Ok(&2));
    }

    #[test]
    fn offset_arithmetic_is_logical() {
        let buf = wrapped();
        let begin = buf.begin();

        let end = begin.checked_add(4).unwrap();
        assert_eq!(end, buf.end());
        assert_eq!(end.checked_sub(4).unwrap(), begin);

        // no modulo capacity: 5 past the front is out of range, not offset 1
        assert_eq!(begin.checked_add(5), Err(Error::OutOfRange { offset: 0, delta: 5, len: 4 }));
        assert_eq!(end.checked_add(-5), Err(Error::OutOfRange { offset: 4, delta: -5, len: 4 }));
        assert_eq!(begin.checked_sub(1), Err(Error::OutOfRange { offset: 0, delta: -1, len: 4 }));

        let mut cursor = begin;
        cursor.advance(3).unwrap();
        cursor.retreat(2).unwrap();
        assert_eq!(cursor.offset(), 1);
        assert!(cursor.advance(4).is_err());
        assert_eq!(cursor.offset(), 1);
        assert!(cursor.retreat(isize::MIN).is_err());
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn difference_and_ordering() {
        let buf = wrapped();
        let a = buf.begin().checked_add(1).unwrap();
        let b = buf.end();
        assert_eq!(b - a, 3);
        assert_eq!(a - b, -3);
        assert_eq!(a.distance(&a), 0);
        assert!(a < b);
        assert!(b >= a);
    }

    #[test]
    fn incompatible_cursors() {
        let left = CircularBuffer::from([1, 2, 3]);
        let right = CircularBuffer::from([1, 2, 3]);
        assert!(!left.begin().is_compatible(&right.begin()));
        assert!(left.begin() != right.begin());
        assert_eq!(left.begin().partial_cmp(&right.end()), None);
        assert_eq!(left.begin().partial_cmp(&left.end()), Some(Ordering::Less));
    }

    #[test]
    fn empty_buffer() {
        let buf: CircularBuffer<[u8; 2]> = CircularBuffer::new();
        assert_eq!(buf.begin(), buf.end());
        assert_eq!(buf.begin().get(), Err(Error::InvalidDereference { offset: 0, len: 0 }));
        assert_eq!(buf.begin().remaining(), 0);
    }

    #[test]
    fn write_through() {
        let mut buf = CircularBuffer::from([1, 2, 3]);
        *buf.begin_mut().get_mut().unwrap() = 0;
        assert_eq!(buf.front(), Ok(&0));

        let mut cursor = buf.end_mut();
        assert_eq!(cursor.get_mut(), Err(Error::InvalidDereference { offset: 3, len: 3 }));
        cursor.retreat(1).unwrap();
        assert_eq!(cursor.replace(30), Ok(3));
        *cursor.get_at_mut(-1).unwrap() = 20;
        assert_eq!(cursor.get_at(-2), Ok(&0));
        assert_eq!(cursor.get_at_mut(1), Err(Error::InvalidDereference { offset: 3, len: 3 }));
        assert_eq!(cursor.get_at_mut(2), Err(Error::OutOfRange { offset: 2, delta: 2, len: 3 }));
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(buf.back(), Ok(&30));
        assert_eq!(buf[1], 20);
    }

    #[test]
    fn mut_cursor_converts() {
        let mut buf = wrapped();
        let mut cursor = buf.begin_mut();
        cursor.advance(2).unwrap();
        assert_eq!(cursor.as_cursor().offset(), 2);
        let shared = cursor.into_cursor();
        assert_eq!(shared.get(), Ok(&5));
        assert_eq!(shared.get_at(-2), Ok(&3));
        assert_eq!(shared.remaining(), 2);
    }
}
