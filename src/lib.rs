//! A circular buffer with fixed capacity and overwrite-on-full semantics.
//!
//! It can be stored directly on the stack if needed, and it never allocates.
//!
//! The buffer has `O(1)` inserts at the back and `O(1)` removals from the
//! front. Pushing into a full buffer silently discards the oldest element to
//! make room for the newest one. It also has `O(1)` indexing like a vector,
//! and hands out bounds-checked random-access [`Cursor`]s over its logical
//! contents.
//!
//! # Feature Flags
//! The **circular-cursor** crate has the following cargo feature flags:
//!
//! - `std`
//!   - Optional, enabled by default
//!   - Use libstd
//!
//!
//! - `tracing`
//!   - Optional
//!   - Emit `tracing` events when the oldest element is overwritten, when a
//!     buffer is cleared and when ranges are concatenated.
//!
//!
//! - `use_generic_array`
//!   - Optional
//!   - Depend on generic-array and allow using it just like a fixed
//!     size array for `CircularBuffer` storage.
//!
//!
//! # Usage
//!
//! Currently circular-cursor by default links to the standard library, but if
//! you would instead like to use it in a `#![no_std]` situation or crate you
//! can request this via:
//!
//! ```toml
//! [dependencies]
//! circular-cursor = { version = "0.1", default-features = false }
//! ```
//!
//! # Capacity
//!
//! The capacity is exactly the length of the backing array. A buffer over
//! `[T; 0]` cannot be constructed.
//!
//! # Examples
//! ```
//! use circular_cursor::CircularBuffer;
//!
//! let mut buf: CircularBuffer<[_; 3]> = CircularBuffer::new();
//! assert_eq!(buf.capacity(), 3);
//! assert_eq!(buf.len(), 0);
//!
//! buf.push_back(1);
//! buf.push_back(2);
//! buf.push_back(3);
//! assert!(buf.is_full());
//!
//! // the oldest element makes room for the newest
//! assert_eq!(buf.push_back(4), Some(1));
//! assert_eq!(buf, [2, 3, 4]);
//!
//! assert_eq!(buf.pop_front(), Ok(2));
//! assert_eq!(buf.front(), Ok(&3));
//! ```
//!
//! # Cursors
//!
//! A cursor addresses a logical offset in `[0, len]`, where `len` is the
//! end sentinel. Every move and every dereference is checked against the
//! buffer's current length.
//!
//! ```
//! use circular_cursor::{CircularBuffer, Error};
//!
//! let mut buf = CircularBuffer::from([1, 2, 3]);
//! buf.push_back(4);
//!
//! let mut cursor = buf.begin();
//! assert_eq!(cursor.get(), Ok(&2));
//! cursor.advance(2).unwrap();
//! assert_eq!(cursor.get(), Ok(&4));
//! cursor.move_next().unwrap();
//! assert_eq!(cursor, buf.end());
//! assert_eq!(cursor.get(), Err(Error::InvalidDereference { offset: 3, len: 3 }));
//!
//! *buf.begin_mut().get_mut().unwrap() = 0;
//! assert_eq!(buf.front(), Ok(&0));
//! ```
//!
//! # Concatenation
//!
//! [`concat`] writes two cursor ranges one after the other through a
//! destination cursor.
//!
//! ```
//! use circular_cursor::{concat, CircularBuffer};
//!
//! let first = CircularBuffer::from([1, 2, 3, 4]);
//! let second = CircularBuffer::from([5, 6, 7]);
//! let mut out: CircularBuffer<[i32; 8]> = CircularBuffer::filled(0);
//!
//! concat((first.begin(), first.end()),
//!        (second.begin(), second.end()),
//!        out.begin_mut()).unwrap();
//! assert_eq!(out, [1, 2, 3, 4, 5, 6, 7, 0]);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(missing_docs)]

use core::cmp;
use core::mem;
use core::mem::MaybeUninit;
use core::ptr;
use core::slice;

#[macro_use]
mod trace;

mod array;
mod concat;
mod cursor;
pub mod error;
mod iter;
mod trait_impls;
mod utils;

pub use array::Array;
pub use concat::concat;
pub use cursor::{Cursor, CursorMut};
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, IterMut};

use utils::wrap_add;

/// A fixed capacity ring buffer.
///
/// It can be stored directly on the stack if needed.
///
/// The "default" usage of this type is as a sliding window: `push_back` adds
/// to the back, overwriting the front once the buffer is full, and
/// `pop_front` removes from the front. Iterating over a `CircularBuffer` goes
/// front to back, oldest to newest, regardless of where the elements sit in
/// the backing array.
///
/// Slots outside the logical range are left uninitialized.
pub struct CircularBuffer<A: Array> {
    xs: MaybeUninit<A>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<A: Array> CircularBuffer<A> {
    #[inline]
    fn wrap_add(index: usize, addend: usize) -> usize {
        wrap_add(index, addend, A::capacity())
    }

    #[inline]
    fn ptr(&self) -> *const A::Item {
        self.xs.as_ptr() as *const A::Item
    }

    #[inline]
    fn ptr_mut(&mut self) -> *mut A::Item {
        self.xs.as_mut_ptr() as *mut A::Item
    }

    /// Physical slot of logical position `index`.
    #[inline]
    fn physical(&self, index: usize) -> usize {
        (self.head + index) % A::capacity()
    }

    #[inline]
    unsafe fn buffer_read(&mut self, offset: usize) -> A::Item {
        ptr::read(self.ptr().add(offset))
    }

    #[inline]
    unsafe fn buffer_write(&mut self, offset: usize, element: A::Item) {
        ptr::write(self.ptr_mut().add(offset), element);
    }

    #[inline]
    unsafe fn slot(&self, offset: usize) -> &A::Item {
        &*self.ptr().add(offset)
    }

    #[inline]
    unsafe fn slot_mut(&mut self, offset: usize) -> &mut A::Item {
        &mut *self.ptr_mut().add(offset)
    }

    #[inline]
    fn assert_capacity() {
        assert!(A::capacity() > 0, "CircularBuffer requires a capacity of at least one");
    }
}

impl<A: Array> CircularBuffer<A> {
    /// Creates an empty `CircularBuffer`.
    ///
    /// # Panics
    ///
    /// Panics if the backing array has length zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let buf: CircularBuffer<[usize; 3]> = CircularBuffer::new();
    /// assert!(buf.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::assert_capacity();
        CircularBuffer {
            xs: MaybeUninit::uninit(),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Creates a full `CircularBuffer` holding `values` in the given order.
    ///
    /// # Panics
    ///
    /// Panics if the backing array has length zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let buf = CircularBuffer::from_array([1, 2, 3]);
    /// assert!(buf.is_full());
    /// assert_eq!(buf.front(), Ok(&1));
    /// assert_eq!(buf.back(), Ok(&3));
    /// ```
    pub fn from_array(values: A) -> Self {
        Self::assert_capacity();
        CircularBuffer {
            xs: MaybeUninit::new(values),
            head: 0,
            tail: A::capacity() - 1,
            len: A::capacity(),
        }
    }

    /// Creates a full `CircularBuffer` with every slot set to a clone of
    /// `value`.
    ///
    /// # Panics
    ///
    /// Panics if the backing array has length zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let buf: CircularBuffer<[_; 4]> = CircularBuffer::filled(42);
    /// assert_eq!(buf, [42, 42, 42, 42]);
    /// ```
    pub fn filled(value: A::Item) -> Self
        where A::Item: Clone
    {
        let mut buf = Self::new();
        for _ in 0..A::capacity() {
            buf.push_back(value.clone());
        }
        buf
    }

    /// Returns the number of elements in the `CircularBuffer`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut v: CircularBuffer<[_; 4]> = CircularBuffer::new();
    /// assert_eq!(v.len(), 0);
    /// v.push_back(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return the capacity of the `CircularBuffer`, the length of its backing
    /// array.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let buf: CircularBuffer<[usize; 4]> = CircularBuffer::new();
    /// assert_eq!(buf.capacity(), 4);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        A::capacity()
    }

    /// Returns true if the buffer contains no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the buffer is full.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<[_; 1]> = CircularBuffer::new();
    ///
    /// assert!(!buf.is_full());
    ///
    /// buf.push_back(1);
    ///
    /// assert!(buf.is_full());
    /// ```
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == A::capacity()
    }

    /// Clears the buffer, removing all values.
    ///
    /// The capacity is unchanged. Only element types with drop glue pay for
    /// visiting the removed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut v = CircularBuffer::from([1, 2, 3]);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 3);
    /// ```
    pub fn clear(&mut self) {
        trace!(len = self.len, "clearing buffer");
        self.truncate_all();
    }

    /// Drops every live element and resets the indices.
    pub(crate) fn truncate_all(&mut self) {
        let (front, back) = self.as_mut_slices();
        let (front, back) = (front as *mut [A::Item], back as *mut [A::Item]);

        self.head = 0;
        self.tail = 0;
        self.len = 0;

        if mem::needs_drop::<A::Item>() {
            unsafe {
                ptr::drop_in_place(front);
                ptr::drop_in_place(back);
            }
        }
    }

    /// Retrieves an element in the `CircularBuffer` by index.
    ///
    /// Element at index 0 is the front of the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<[_; 4]> = CircularBuffer::new();
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// assert_eq!(buf.get(1), Some(&4));
    /// assert_eq!(buf.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&A::Item> {
        if index < self.len {
            let idx = self.physical(index);
            unsafe { Some(self.slot(idx)) }
        } else {
            None
        }
    }

    /// Retrieves an element in the `CircularBuffer` mutably by index.
    ///
    /// Element at index 0 is the front of the buffer.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut A::Item> {
        if index < self.len {
            let idx = self.physical(index);
            unsafe { Some(self.slot_mut(idx)) }
        } else {
            None
        }
    }

    /// Returns the element at logical position `index` without bounds
    /// checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`. Reading any other position is
    /// undefined behavior, even if it lies within the capacity.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &A::Item {
        debug_assert!(index < self.len);
        self.slot(self.physical(index))
    }

    /// Mutable counterpart of [`get_unchecked`](Self::get_unchecked).
    ///
    /// # Safety
    ///
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut A::Item {
        debug_assert!(index < self.len);
        let idx = self.physical(index);
        self.slot_mut(idx)
    }

    /// Checked indexing.
    ///
    /// Returns the element at logical position `index`, or
    /// [`Error::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::{CircularBuffer, Error};
    ///
    /// let buf = CircularBuffer::from([1, 2, 3]);
    /// assert_eq!(buf.at(2), Ok(&3));
    /// assert_eq!(buf.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&A::Item> {
        let len = self.len;
        self.get(index).ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Mutable counterpart of [`at`](Self::at).
    pub fn at_mut(&mut self, index: usize) -> Result<&mut A::Item> {
        let len = self.len;
        self.get_mut(index).ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Provides a reference to the front (oldest) element.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::{CircularBuffer, Error};
    ///
    /// let mut buf: CircularBuffer<[_; 3]> = CircularBuffer::new();
    /// assert_eq!(buf.front(), Err(Error::Empty));
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// assert_eq!(buf.front(), Ok(&1));
    /// ```
    pub fn front(&self) -> Result<&A::Item> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        unsafe { Ok(self.slot(self.head)) }
    }

    /// Provides a mutable reference to the front (oldest) element.
    pub fn front_mut(&mut self) -> Result<&mut A::Item> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let head = self.head;
        unsafe { Ok(self.slot_mut(head)) }
    }

    /// Provides a reference to the back (newest) element.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::{CircularBuffer, Error};
    ///
    /// let mut buf: CircularBuffer<[_; 3]> = CircularBuffer::new();
    /// assert_eq!(buf.back(), Err(Error::Empty));
    ///
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// assert_eq!(buf.back(), Ok(&2));
    /// ```
    pub fn back(&self) -> Result<&A::Item> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        unsafe { Ok(self.slot(self.tail)) }
    }

    /// Provides a mutable reference to the back (newest) element.
    pub fn back_mut(&mut self) -> Result<&mut A::Item> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let tail = self.tail;
        unsafe { Ok(self.slot_mut(tail)) }
    }

    /// Adds an element to the back of the buffer.
    ///
    /// Returns `None` if the buffer still had room, or `Some(oldest)` if it
    /// was full, where `oldest` is the former front element that has been
    /// discarded to make room. Overwriting is the buffer's normal mode of
    /// operation, not a failure.
    ///
    /// # Examples
    ///
    /// ```text
    /// [_, _, _] <-(+)- 1 => [1, _, _] -> None
    /// [1, _, _] <-(+)- 2 => [1, 2, _] -> None
    /// [1, 2, _] <-(+)- 3 => [1, 2, 3] -> None
    /// [1, 2, 3] <-(+)- 4 => [2, 3, 4] -> Some(1)
    /// ```
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<[_; 3]> = CircularBuffer::new();
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// buf.push_back(3);
    /// let overflow = buf.push_back(4);
    ///
    /// assert_eq!(overflow, Some(1));
    /// assert_eq!(buf, [2, 3, 4]);
    /// ```
    pub fn push_back(&mut self, element: A::Item) -> Option<A::Item> {
        if self.is_empty() {
            // head may have moved on past a stale tail
            self.tail = self.head;
            unsafe { self.buffer_write(self.tail, element) };
            self.len = 1;
            None
        } else if !self.is_full() {
            self.tail = Self::wrap_add(self.tail, 1);
            unsafe { self.buffer_write(self.tail, element) };
            self.len += 1;
            None
        } else {
            trace!(capacity = A::capacity(), "buffer full, overwriting oldest element");
            let oldest = unsafe { self.buffer_read(self.head) };
            self.head = Self::wrap_add(self.head, 1);
            self.tail = Self::wrap_add(self.tail, 1);
            unsafe { self.buffer_write(self.tail, element) };
            Some(oldest)
        }
    }

    /// Removes and returns the front (oldest) element.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::{CircularBuffer, Error};
    ///
    /// let mut buf = CircularBuffer::from([1, 2, 3]);
    ///
    /// assert_eq!(buf.pop_front(), Ok(1));
    /// assert_eq!(buf.front(), Ok(&2));
    /// assert_eq!(buf.len(), 2);
    ///
    /// buf.clear();
    /// assert_eq!(buf.pop_front(), Err(Error::Empty));
    /// ```
    pub fn pop_front(&mut self) -> Result<A::Item> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let head = self.head;
        self.head = Self::wrap_add(head, 1);
        self.len -= 1;
        unsafe { Ok(self.buffer_read(head)) }
    }

    /// Returns a cursor at logical offset 0.
    ///
    /// On an empty buffer this is the same position as [`end`](Self::end).
    #[inline]
    pub fn begin(&self) -> Cursor<'_, A> {
        Cursor::new(self, 0)
    }

    /// Returns the end sentinel cursor, at logical offset `len()`.
    #[inline]
    pub fn end(&self) -> Cursor<'_, A> {
        Cursor::new(self, self.len)
    }

    /// Returns a write-through cursor at logical offset 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::from([1, 2, 3]);
    /// *buf.begin_mut().get_mut().unwrap() = 0;
    /// assert_eq!(buf.front(), Ok(&0));
    /// ```
    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, A> {
        CursorMut::new(self, 0)
    }

    /// Returns a write-through end sentinel cursor, at logical offset `len()`.
    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<'_, A> {
        let len = self.len;
        CursorMut::new(self, len)
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut buf: CircularBuffer<[_; 3]> = CircularBuffer::new();
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(6);
    /// let c: Vec<&i32> = buf.iter().collect();
    /// assert_eq!(c, [&3, &4, &6]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, A::Item> {
        let (front, back) = self.as_slices();
        Iter::new(front, back)
    }

    /// Returns a front-to-back iterator that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::from([5, 3, 4]);
    /// for num in buf.iter_mut() {
    ///     *num = *num - 2;
    /// }
    /// assert_eq!(buf, [3, 1, 2]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, A::Item> {
        let (front, back) = self.as_mut_slices();
        IterMut::new(front, back)
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// `CircularBuffer`.
    ///
    /// The second slice is non-empty only when the logical contents wrap
    /// around the end of the backing array.
    ///
    /// # Examples
    ///
    /// ```
    /// use circular_cursor::CircularBuffer;
    ///
    /// let mut buf = CircularBuffer::from([0, 1, 2]);
    /// assert_eq!(buf.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// buf.push_back(3);
    /// assert_eq!(buf.as_slices(), (&[1, 2][..], &[3][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[A::Item], &[A::Item]) {
        let first_len = cmp::min(self.len, A::capacity() - self.head);
        unsafe {
            let front = slice::from_raw_parts(self.ptr().add(self.head), first_len);
            let back = slice::from_raw_parts(self.ptr(), self.len - first_len);
            (front, back)
        }
    }

    /// Returns a pair of mutable slices which contain, in order, the contents
    /// of the `CircularBuffer`.
    #[inline]
    pub fn as_mut_slices(&mut self) -> (&mut [A::Item], &mut [A::Item]) {
        let first_len = cmp::min(self.len, A::capacity() - self.head);
        let head = self.head;
        let len = self.len;
        let ptr = self.ptr_mut();
        // the runs are disjoint: the wrapped part ends at or before `head`
        unsafe {
            let front = slice::from_raw_parts_mut(ptr.add(head), first_len);
            let back = slice::from_raw_parts_mut(ptr, len - first_len);
            (front, back)
        }
    }

    /// Returns `true` if the `CircularBuffer` contains an element equal to the
    /// given value.
    pub fn contains(&self, x: &A::Item) -> bool
        where A::Item: PartialEq<A::Item>
    {
        let (a, b) = self.as_slices();
        a.contains(x) || b.contains(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::vec::Vec;

    fn collect<A: Array>(buf: &CircularBuffer<A>) -> Vec<A::Item>
        where A::Item: Clone
    {
        buf.iter().cloned().collect()
    }

    #[test]
    fn construction() {
        let empty: CircularBuffer<[i32; 1]> = CircularBuffer::new();
        assert!(empty.is_empty());
        assert!(!empty.is_full());

        let literal = CircularBuffer::from([1, 2, 3]);
        assert!(literal.is_full());
        assert_eq!(collect(&literal), [1, 2, 3]);

        let fill: CircularBuffer<[i32; 3]> = CircularBuffer::filled(42);
        assert!(fill.is_full());
        assert_eq!(collect(&fill), [42, 42, 42]);
    }

    #[test]
    #[should_panic(expected = "capacity of at least one")]
    fn zero_capacity() {
        let _: CircularBuffer<[u8; 0]> = CircularBuffer::new();
    }

    #[test]
    fn overwrite_on_full() {
        let mut buf = CircularBuffer::from([1, 2, 3]);
        assert_eq!(buf.push_back(4), Some(1));
        assert_eq!(buf.len(), 3);
        assert_eq!(collect(&buf), [2, 3, 4]);
    }

    #[test]
    fn drain_front() {
        let mut buf = CircularBuffer::from([1, 2, 3]);
        assert_eq!(buf.pop_front(), Ok(1));
        assert_eq!(buf.front(), Ok(&2));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn push_pop_sequence() {
        let mut buf = CircularBuffer::from([1, 2, 3, 4]);
        assert_eq!(buf.len(), 4);
        buf.push_back(5);
        buf.push_back(6);
        assert_eq!(buf.pop_front(), Ok(3));

        assert_eq!(buf.len(), 3);
        assert_eq!(buf[0], 4);
        assert_eq!(buf[1], 5);
        assert_eq!(buf[2], 6);
    }

    #[test]
    fn checked_and_unchecked_indexing_agree() {
        let mut buf: CircularBuffer<[_; 4]> = CircularBuffer::new();
        for i in 0..6 {
            buf.push_back(i);
        }
        for pos in 0..buf.len() {
            assert_eq!(buf.at(pos), Ok(&buf[pos]));
            assert_eq!(buf.at(pos), Ok(unsafe { buf.get_unchecked(pos) }));
        }
        assert_eq!(buf.at(4), Err(Error::IndexOutOfRange { index: 4, len: 4 }));

        buf.pop_front().unwrap();
        assert_eq!(buf.at(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn empty_errors() {
        let mut buf: CircularBuffer<[String; 2]> = CircularBuffer::new();
        assert_eq!(buf.front(), Err(Error::Empty));
        assert_eq!(buf.back(), Err(Error::Empty));
        assert_eq!(buf.front_mut(), Err(Error::Empty));
        assert_eq!(buf.back_mut(), Err(Error::Empty));
        assert_eq!(buf.pop_front(), Err(Error::Empty));
        assert!(buf.is_empty());
    }

    #[test]
    fn push_after_draining_to_empty() {
        // head moves past tail once the last element is popped
        let mut buf: CircularBuffer<[_; 3]> = CircularBuffer::new();
        buf.push_back(1);
        buf.push_back(2);
        assert_eq!(buf.pop_front(), Ok(1));
        assert_eq!(buf.pop_front(), Ok(2));

        buf.push_back(7);
        assert_eq!(buf.front(), Ok(&7));
        assert_eq!(buf.back(), Ok(&7));
        buf.push_back(8);
        buf.push_back(9);
        buf.push_back(10);
        assert_eq!(collect(&buf), [8, 9, 10]);
        assert_eq!(buf.back(), Ok(&10));
    }

    #[test]
    fn grow_across_physical_end() {
        let mut buf: CircularBuffer<[_; 4]> = CircularBuffer::new();
        buf.extend(0..4);
        buf.pop_front().unwrap();
        buf.pop_front().unwrap();
        buf.pop_front().unwrap();
        // head is at physical 3, so these land at 0, 1, 2
        buf.push_back(4);
        buf.push_back(5);
        buf.push_back(6);
        assert!(buf.is_full());
        assert_eq!(collect(&buf), [3, 4, 5, 6]);
        assert_eq!(buf.as_slices(), (&[3][..], &[4, 5, 6][..]));
    }

    #[test]
    fn single_slot() {
        let mut buf: CircularBuffer<[_; 1]> = CircularBuffer::new();
        assert_eq!(buf.push_back('a'), None);
        assert_eq!(buf.push_back('b'), Some('a'));
        assert_eq!(buf.front(), Ok(&'b'));
        assert_eq!(buf.back(), Ok(&'b'));
        assert_eq!(buf.pop_front(), Ok('b'));
        assert!(buf.is_empty());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = CircularBuffer::from([1, 2, 3]);
        buf.push_back(4);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.begin(), buf.end());

        buf.push_back(9);
        assert_eq!(collect(&buf), [9]);
    }

    #[test]
    fn write_through_accessors() {
        let mut buf = CircularBuffer::from([1, 2, 3]);
        *buf.front_mut().unwrap() = 10;
        *buf.back_mut().unwrap() = 30;
        *buf.at_mut(1).unwrap() = 20;
        assert_eq!(collect(&buf), [10, 20, 30]);
        assert_eq!(buf.at_mut(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn contains() {
        let mut buf = CircularBuffer::from([1, 2, 3]);
        buf.push_back(4);
        assert!(!buf.contains(&1));
        assert!(buf.contains(&4));
    }

    #[test]
    fn drops_live_elements_only() {
        let counter = Rc::new(Cell::new(0));

        struct Bump(Rc<Cell<usize>>);

        impl Drop for Bump {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        {
            let mut buf: CircularBuffer<[Bump; 3]> = CircularBuffer::new();
            for _ in 0..3 {
                buf.push_back(Bump(counter.clone()));
            }
            // evicted element is handed back and dropped here
            drop(buf.push_back(Bump(counter.clone())));
            assert_eq!(counter.get(), 1);

            drop(buf.pop_front());
            assert_eq!(counter.get(), 2);

            buf.clear();
            assert_eq!(counter.get(), 4);

            buf.push_back(Bump(counter.clone()));
        }
        assert_eq!(counter.get(), 5);
    }

    #[test]
    fn size_invariant() {
        macro_rules! test {
            ($cap:expr) => ({
                let mut buf: CircularBuffer<[usize; $cap]> = CircularBuffer::new();
                for i in 0..(3 * $cap) {
                    buf.push_back(i);
                    assert!(buf.len() <= buf.capacity());
                    if i % 3 == 0 {
                        buf.pop_front().unwrap();
                    }
                    assert!(buf.len() <= buf.capacity());
                }
            })
        }

        test!(1);
        test!(2);
        test!(5);
        test!(8);
    }

    #[cfg(feature = "use_generic_array")]
    #[test]
    fn generic_array_storage() {
        use generic_array::typenum::U3;
        use generic_array::GenericArray;

        let mut buf: CircularBuffer<GenericArray<i32, U3>> = CircularBuffer::new();
        assert_eq!(buf.capacity(), 3);
        buf.extend(1..=3);
        assert!(buf.is_full());
        assert_eq!(buf.push_back(4), Some(1));
        assert_eq!(buf, [2, 3, 4]);

        let begin = buf.begin();
        assert_eq!(begin.get(), Ok(&2));
        assert_eq!(begin.get_at(2), Ok(&4));
        assert_eq!(buf.end() - begin, 3);

        let mut cursor = buf.end_mut();
        cursor.retreat(1).unwrap();
        assert_eq!(cursor.replace(40), Ok(4));
        assert_eq!(buf.pop_front(), Ok(2));
        assert_eq!(collect(&buf), [3, 40]);
    }
}
