//! Bounded byte sources the decoder reads from.
//!
//! A source is a cursor over a caller-owned, finite byte sequence. The decoder
//! only ever peeks ahead of the cursor and advances it by whole sequences, so
//! an implementation needs no buffering of its own.

use alloc::collections::VecDeque;
use core::fmt;

use bstr::ByteSlice;

/// A forward cursor over a finite byte sequence.
///
/// Implementations must be cheap to clone: the decoder snapshots the source to
/// restart iteration and to compare cursors.
pub trait ByteSource {
    /// Offset of the cursor from the start of the sequence.
    fn position(&self) -> usize;

    /// Number of bytes between the cursor and the end.
    fn remaining(&self) -> usize;

    /// The byte `ahead` positions past the cursor, if it exists.
    fn peek_at(&self, ahead: usize) -> Option<u8>;

    /// Moves the cursor forward by `n` bytes, clamped to the end.
    fn advance(&mut self, n: usize);

    /// The byte at the cursor.
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Whether any bytes remain.
    #[inline]
    fn has_next(&self) -> bool {
        self.remaining() != 0
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn position(&self) -> usize {
        (**self).position()
    }

    fn remaining(&self) -> usize {
        (**self).remaining()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        (**self).peek_at(ahead)
    }

    fn advance(&mut self, n: usize) {
        (**self).advance(n);
    }
}

/// A [`ByteSource`] over a contiguous slice.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a source positioned at the start of `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// The unread tail of the slice.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.pos.checked_add(ahead)?).copied()
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.bytes.len());
    }
}

impl fmt::Debug for SliceSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceSource")
            .field("pos", &self.pos)
            .field("rest", &self.as_bytes().as_bstr())
            .finish()
    }
}

impl<'a> From<&'a [u8]> for SliceSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for SliceSource<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::new(bytes)
    }
}

impl<'a> From<&'a str> for SliceSource<'a> {
    fn from(s: &'a str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl<'a> From<&'a alloc::vec::Vec<u8>> for SliceSource<'a> {
    fn from(bytes: &'a alloc::vec::Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

/// A [`ByteSource`] over a ring buffer whose contents may wrap around.
///
/// Sequences that straddle the two halves of the ring decode like any other;
/// no bytes are copied.
#[derive(Clone, Copy)]
pub struct DequeSource<'a> {
    ring: &'a VecDeque<u8>,
    pos: usize,
}

impl<'a> DequeSource<'a> {
    /// Creates a source positioned at the front of `ring`.
    #[must_use]
    pub fn new(ring: &'a VecDeque<u8>) -> Self {
        Self { ring, pos: 0 }
    }
}

impl ByteSource for DequeSource<'_> {
    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.ring.len() - self.pos
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.ring.get(self.pos.checked_add(ahead)?).copied()
    }

    #[inline]
    fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.ring.len());
    }
}

impl PartialEq for DequeSource<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.ring, other.ring) && self.pos == other.pos
    }
}

impl Eq for DequeSource<'_> {}

impl fmt::Debug for DequeSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (head, tail) = self.ring.as_slices();
        f.debug_struct("DequeSource")
            .field("pos", &self.pos)
            .field("head", &head.as_bstr())
            .field("tail", &tail.as_bstr())
            .finish()
    }
}

impl<'a> From<&'a VecDeque<u8>> for DequeSource<'a> {
    fn from(ring: &'a VecDeque<u8>) -> Self {
        Self::new(ring)
    }
}
