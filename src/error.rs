//! Error values reported by `CircularBuffer` and its cursors.
//!
//! Every failing operation leaves the buffer untouched.

use thiserror::Error;

/// The error type for buffer and cursor operations.
///
/// Overwriting the oldest element when pushing into a full buffer is the
/// buffer's eviction policy and is never reported through this type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// `front`, `back` or `pop_front` on a buffer holding no elements.
    #[error("buffer is empty")]
    Empty,

    /// Checked indexing past the logical length.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// The requested logical index.
        index: usize,
        /// The logical length at the time of the call.
        len: usize,
    },

    /// A cursor move that would leave `[0, len]`.
    #[error("cursor at offset {offset} cannot move by {delta} within length {len}")]
    OutOfRange {
        /// Logical offset of the cursor before the move.
        offset: usize,
        /// Requested displacement.
        delta: isize,
        /// The logical length at the time of the call.
        len: usize,
    },

    /// Dereferencing the end sentinel, or any cursor over an empty buffer.
    #[error("cannot dereference cursor at offset {offset} with length {len}")]
    InvalidDereference {
        /// Logical offset of the cursor.
        offset: usize,
        /// The logical length at the time of the call.
        len: usize,
    },

    /// Destination cursor has fewer writable slots than the source ranges hold.
    #[error("insufficient capacity: {required} elements required, {available} available")]
    Capacity {
        /// Number of elements to be written.
        required: usize,
        /// Number of dereferenceable slots from the destination cursor on.
        available: usize,
    },

    /// A range whose end cursor belongs to another buffer or precedes its start.
    #[error("cursors do not delimit a range of the same buffer")]
    IncompatibleCursors,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
