//! Inputs that can be read as a sequence of code points.
//!
//! UTF-8 inputs (`&[u8]`, `&str`, [`Utf8Range`], [`Utf8Decoder`]) are decoded
//! lazily; code point inputs (`&[u32]`, `&[char]`, [`FromCodePoints`]) are
//! passed through. Either way the consumer sees `(offset, code_point)` pairs
//! where the offset is the byte offset or the element index respectively.

use alloc::vec::Vec;

use crate::{
    MAX_CODE_POINT,
    decode::{Utf8Decoder, Utf8Range},
    error::{ErrorKind, UtfError},
    sink::Sink,
    source::ByteSource,
};

/// A finite source of code points.
pub trait CodePoints {
    /// Calls `f` with each code point and its source offset, stopping at the
    /// first error from either the source or `f`.
    ///
    /// # Errors
    ///
    /// Returns the first decode error, or the first error returned by `f`.
    fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>;
}

impl<S: ByteSource> CodePoints for Utf8Decoder<S> {
    fn try_for_each_code_point<F>(mut self, mut f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        loop {
            let offset = self.position();
            match self.next() {
                None => return Ok(()),
                Some(Ok(code_point)) => f(offset, code_point)?,
                Some(Err(err)) => return Err(err),
            }
        }
    }
}

impl<S: ByteSource + Clone> CodePoints for Utf8Range<S> {
    fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        self.into_iter().try_for_each_code_point(f)
    }
}

impl<S: ByteSource + Clone> CodePoints for &Utf8Range<S> {
    fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        self.iter().try_for_each_code_point(f)
    }
}

macro_rules! utf8_code_points {
    ($($ty:ty),* $(,)?) => {$(
        impl CodePoints for $ty {
            fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
            where
                F: FnMut(usize, u32) -> Result<(), UtfError>,
            {
                crate::decode::decode_range(self).try_for_each_code_point(f)
            }
        }
    )*};
}

utf8_code_points!(&[u8], &str, &Vec<u8>);

impl<const N: usize> CodePoints for &[u8; N] {
    fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        crate::decode::decode_range(self).try_for_each_code_point(f)
    }
}

/// Adapts any iterator of `u32` values as a [`CodePoints`] source.
///
/// The values are not checked here; consumers reject anything above U+10FFFF.
#[derive(Debug, Clone)]
pub struct FromCodePoints<I>(pub I);

impl<I: IntoIterator<Item = u32>> CodePoints for FromCodePoints<I> {
    fn try_for_each_code_point<F>(self, mut f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        self.0
            .into_iter()
            .enumerate()
            .try_for_each(|(i, code_point)| f(i, code_point))
    }
}

impl CodePoints for &[u32] {
    fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        FromCodePoints(self.iter().copied()).try_for_each_code_point(f)
    }
}

impl CodePoints for &Vec<u32> {
    fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        self.as_slice().try_for_each_code_point(f)
    }
}

impl<const N: usize> CodePoints for &[u32; N] {
    fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        self.as_slice().try_for_each_code_point(f)
    }
}

impl CodePoints for &[char] {
    fn try_for_each_code_point<F>(self, f: F) -> Result<(), UtfError>
    where
        F: FnMut(usize, u32) -> Result<(), UtfError>,
    {
        FromCodePoints(self.iter().map(|&c| u32::from(c))).try_for_each_code_point(f)
    }
}

/// Decodes `source` into a code point sink and returns the number of code
/// points written.
///
/// # Errors
///
/// - Decode errors, positioned in the source.
/// - [`ErrorKind::CodePointOutOfRange`] at the source offset of a code point
///   input above U+10FFFF.
/// - [`ErrorKind::DestinationFull`] at the destination offset if the sink
///   refuses a value.
///
/// ```rust
/// use utfconv::{copy_to_code_points, SliceSink};
///
/// let mut buf = [0u32; 4];
/// let mut sink = SliceSink::new(&mut buf);
/// assert_eq!(copy_to_code_points("a\u{E9}\u{20AC}", &mut sink), Ok(3));
/// assert_eq!(sink.filled(), &[0x61, 0xE9, 0x20AC]);
/// ```
pub fn copy_to_code_points<C, K>(source: C, mut sink: K) -> Result<usize, UtfError>
where
    C: CodePoints,
    K: Sink<u32>,
{
    let mut written = 0;
    source.try_for_each_code_point(|offset, code_point| {
        if code_point > MAX_CODE_POINT {
            return Err(UtfError::at_source(ErrorKind::CodePointOutOfRange, offset));
        }
        if sink.put(code_point).is_err() {
            tracing::debug!(written, "code point sink is full");
            return Err(UtfError::at_destination(ErrorKind::DestinationFull, written));
        }
        written += 1;
        Ok(())
    })?;
    Ok(written)
}
