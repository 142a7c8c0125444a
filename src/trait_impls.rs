use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter;
use core::ops::{Index, IndexMut};

use crate::array::Array;
use crate::iter::{IntoIter, Iter, IterMut};
use crate::CircularBuffer;

impl<A: Array> Clone for CircularBuffer<A>
    where A::Item: Clone
{
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<A: Array> Drop for CircularBuffer<A> {
    fn drop(&mut self) {
        self.truncate_all();
    }
}

impl<A: Array> Default for CircularBuffer<A> {
    #[inline]
    fn default() -> Self {
        CircularBuffer::new()
    }
}

impl<A: Array> From<A> for CircularBuffer<A> {
    #[inline]
    fn from(values: A) -> Self {
        CircularBuffer::from_array(values)
    }
}

impl<A: Array, B: Array> PartialEq<CircularBuffer<B>> for CircularBuffer<A>
    where A::Item: PartialEq<B::Item>
{
    fn eq(&self, other: &CircularBuffer<B>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<A: Array> Eq for CircularBuffer<A> where A::Item: Eq {}

impl<A: Array> PartialEq<[A::Item]> for CircularBuffer<A>
    where A::Item: PartialEq
{
    fn eq(&self, other: &[A::Item]) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (a, b) = self.as_slices();
        let (oa, ob) = other.split_at(a.len());
        a == oa && b == ob
    }
}

impl<A: Array, const M: usize> PartialEq<[A::Item; M]> for CircularBuffer<A>
    where A::Item: PartialEq
{
    #[inline]
    fn eq(&self, other: &[A::Item; M]) -> bool {
        *self == other[..]
    }
}

impl<A: Array> PartialOrd for CircularBuffer<A>
    where A::Item: PartialOrd
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<A: Array> Ord for CircularBuffer<A>
    where A::Item: Ord
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<A: Array> Hash for CircularBuffer<A>
    where A::Item: Hash
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        // element-wise so the split point of the two runs does not matter
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<A: Array> Index<usize> for CircularBuffer<A> {
    type Output = A::Item;

    #[inline]
    fn index(&self, index: usize) -> &A::Item {
        let len = self.len();
        match self.get(index) {
            Some(elt) => elt,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<A: Array> IndexMut<usize> for CircularBuffer<A> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut A::Item {
        let len = self.len();
        match self.get_mut(index) {
            Some(elt) => elt,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

/// Collects into a `CircularBuffer`, keeping only the newest `capacity()`
/// items.
impl<A: Array> iter::FromIterator<A::Item> for CircularBuffer<A> {
    fn from_iter<T: IntoIterator<Item = A::Item>>(iter: T) -> Self {
        let mut buf = CircularBuffer::new();
        buf.extend(iter);
        buf
    }
}

/// Extend the `CircularBuffer` with an iterator.
///
/// Once full, every further item overwrites the oldest one.
impl<A: Array> Extend<A::Item> for CircularBuffer<A> {
    fn extend<T: IntoIterator<Item = A::Item>>(&mut self, iter: T) {
        for elt in iter {
            self.push_back(elt);
        }
    }
}

impl<A: Array> IntoIterator for CircularBuffer<A> {
    type Item = A::Item;
    type IntoIter = IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { inner: self }
    }
}

impl<'a, A: Array> IntoIterator for &'a CircularBuffer<A> {
    type Item = &'a A::Item;
    type IntoIter = Iter<'a, A::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, A: Array> IntoIterator for &'a mut CircularBuffer<A> {
    type Item = &'a mut A::Item;
    type IntoIter = IterMut<'a, A::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<A: Array> fmt::Debug for CircularBuffer<A>
    where A::Item: fmt::Debug
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}
