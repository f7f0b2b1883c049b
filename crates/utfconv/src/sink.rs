//! Destinations for encoded output.

use alloc::{collections::VecDeque, vec::Vec};

use thiserror::Error;

/// A sink refused a value because it has no room left.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("sink is full")]
pub struct Full;

/// Something that accepts values one at a time.
///
/// Implemented for growable buffers (`Vec`, `VecDeque`), fixed arrays through
/// [`SliceSink`], and callbacks through [`FnSink`].
pub trait Sink<T> {
    /// Accepts one value.
    ///
    /// # Errors
    ///
    /// Returns [`Full`] if the sink cannot take another value. The sink is
    /// left unchanged in that case.
    fn put(&mut self, value: T) -> Result<(), Full>;
}

impl<T, K: Sink<T> + ?Sized> Sink<T> for &mut K {
    #[inline]
    fn put(&mut self, value: T) -> Result<(), Full> {
        (**self).put(value)
    }
}

impl<T> Sink<T> for Vec<T> {
    #[inline]
    fn put(&mut self, value: T) -> Result<(), Full> {
        self.push(value);
        Ok(())
    }
}

impl<T> Sink<T> for VecDeque<T> {
    #[inline]
    fn put(&mut self, value: T) -> Result<(), Full> {
        self.push_back(value);
        Ok(())
    }
}

/// Writes into a caller-provided slice, front to back.
#[derive(Debug)]
pub struct SliceSink<'a, T> {
    buf: &'a mut [T],
    len: usize,
}

impl<'a, T> SliceSink<'a, T> {
    /// Creates a sink that fills `buf` from the start.
    pub fn new(buf: &'a mut [T]) -> Self {
        Self { buf, len: 0 }
    }

    /// Number of values written so far.
    pub fn written(&self) -> usize {
        self.len
    }

    /// Number of values that still fit.
    pub fn capacity_left(&self) -> usize {
        self.buf.len() - self.len
    }

    /// The filled prefix of the slice.
    pub fn filled(&self) -> &[T] {
        &self.buf[..self.len]
    }

    /// Gives back the filled prefix of the slice.
    pub fn into_filled(self) -> &'a mut [T] {
        &mut self.buf[..self.len]
    }
}

impl<T> Sink<T> for SliceSink<'_, T> {
    #[inline]
    fn put(&mut self, value: T) -> Result<(), Full> {
        let slot = self.buf.get_mut(self.len).ok_or(Full)?;
        *slot = value;
        self.len += 1;
        Ok(())
    }
}

/// Hands each value to a closure.
#[derive(Debug, Clone)]
pub struct FnSink<F>(F);

impl<T, F: FnMut(T)> Sink<T> for FnSink<F> {
    #[inline]
    fn put(&mut self, value: T) -> Result<(), Full> {
        (self.0)(value);
        Ok(())
    }
}

/// Wraps a closure as a [`Sink`].
///
/// ```rust
/// use utfconv::{encode_to_utf16, from_fn};
///
/// let mut count = 0;
/// encode_to_utf16("h\u{1F600}", from_fn(|_unit: u16| count += 1)).unwrap();
/// assert_eq!(count, 3);
/// ```
pub fn from_fn<T, F: FnMut(T)>(f: F) -> FnSink<F> {
    FnSink(f)
}
