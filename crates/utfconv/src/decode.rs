//! Lazy UTF-8 decoding.
//!
//! Decoding is a single fallible step, [`Utf8Decoder::peek`], that classifies
//! the header at the cursor, checks that enough bytes remain, and folds the
//! trailing bytes into a code point. Nothing is cached between steps: advancing
//! re-runs the same step and then moves the cursor, so peeking any number of
//! times is unobservable.
//!
//! Failures are terminal. The iterator yields the error once and then stops;
//! callers that want to carry on must call [`Utf8Decoder::resync`] explicitly.

use core::fmt;
use core::iter::FusedIterator;

use crate::{
    MAX_CODE_POINT,
    error::{ErrorKind, UtfError},
    header::{classify, is_trailing},
    options::DecodeOptions,
    source::{ByteSource, SliceSource},
};

/// One decoded code point and the number of bytes it occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The code point. May be a surrogate value; never above U+10FFFF.
    pub code_point: u32,
    /// Encoded length in bytes, header included.
    pub len: usize,
}

/// Decodes the sequence starting at the cursor of `src`.
///
/// `src` must have at least one byte left.
pub(crate) fn decode_at<S: ByteSource>(
    src: &S,
    options: DecodeOptions,
) -> Result<Decoded, UtfError> {
    let start = src.position();
    let Some(header) = src.peek().and_then(|b| classify(b, options.header_policy)) else {
        tracing::trace!(offset = start, "invalid header byte");
        return Err(UtfError::at_source(ErrorKind::InvalidHeader, start));
    };

    let len = header.sequence_len();
    if len > src.remaining() {
        tracing::trace!(offset = start, len, remaining = src.remaining(), "truncated sequence");
        return Err(UtfError::at_source(ErrorKind::TruncatedSequence, start));
    }

    let mut code_point = header.seed;
    for i in 1..len {
        match src.peek_at(i) {
            Some(b) if is_trailing(b) => code_point = (code_point << 6) | u32::from(b & 0x3F),
            Some(_) => {
                tracing::trace!(offset = start + i, "invalid trailing byte");
                return Err(UtfError::at_source(ErrorKind::InvalidTrailingByte, start + i));
            }
            None => return Err(UtfError::at_source(ErrorKind::TruncatedSequence, start)),
        }
    }

    if code_point > MAX_CODE_POINT {
        tracing::trace!(offset = start, code_point, "decoded value out of range");
        return Err(UtfError::at_source(ErrorKind::CodePointOutOfRange, start));
    }

    Ok(Decoded { code_point, len })
}

/// A lazy, forward-only decoder over a [`ByteSource`].
///
/// As an [`Iterator`] it yields `Ok(code_point)` for each well-formed sequence,
/// and at most one `Err` after which it is exhausted.
///
/// Two decoders compare equal when their cursors are at the same position; the
/// end of input is the decoder whose cursor has no bytes left.
#[derive(Clone)]
pub struct Utf8Decoder<S> {
    src: S,
    options: DecodeOptions,
    halted: bool,
}

impl<S: ByteSource> Utf8Decoder<S> {
    /// Creates a decoder with default options.
    pub fn new(src: S) -> Self {
        Self::with_options(src, DecodeOptions::default())
    }

    /// Creates a decoder with explicit options.
    pub fn with_options(src: S, options: DecodeOptions) -> Self {
        Self {
            src,
            options,
            halted: false,
        }
    }

    /// Decodes the code point at the cursor without moving it.
    ///
    /// Returns `None` at the end of input.
    pub fn peek(&self) -> Option<Result<Decoded, UtfError>> {
        self.src.has_next().then(|| decode_at(&self.src, self.options))
    }

    /// Validates the sequence at the cursor and moves past it.
    ///
    /// A no-op at the end of input. On failure the cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns the same error [`Self::peek`] would.
    pub fn advance(&mut self) -> Result<(), UtfError> {
        if let Some(decoded) = self.peek().transpose()? {
            self.src.advance(decoded.len);
        }
        Ok(())
    }

    /// Skips past a failure: moves the cursor at least one byte forward, to
    /// the next byte that can start a sequence, and re-arms the iterator.
    ///
    /// Returns the number of bytes skipped.
    pub fn resync(&mut self) -> usize {
        let policy = self.options.header_policy;
        let mut skipped = 0;
        if self.src.has_next() {
            self.src.advance(1);
            skipped = 1;
        }
        while let Some(b) = self.src.peek() {
            if classify(b, policy).is_some() {
                break;
            }
            self.src.advance(1);
            skipped += 1;
        }
        self.halted = false;
        skipped
    }

    /// Offset of the cursor.
    pub fn position(&self) -> usize {
        self.src.position()
    }

    /// Whether the cursor is at the end of input.
    pub fn is_end(&self) -> bool {
        !self.src.has_next()
    }

    /// The options this decoder was created with.
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Returns the underlying source, positioned at the cursor.
    pub fn into_inner(self) -> S {
        self.src
    }
}

impl<S: ByteSource> Iterator for Utf8Decoder<S> {
    type Item = Result<u32, UtfError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }
        match self.peek()? {
            Ok(decoded) => {
                self.src.advance(decoded.len);
                Some(Ok(decoded.code_point))
            }
            Err(err) => {
                self.halted = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.halted {
            return (0, Some(0));
        }
        // At least one item while bytes remain: a code point or an error.
        (usize::from(self.src.has_next()), Some(self.src.remaining()))
    }
}

impl<S: ByteSource> FusedIterator for Utf8Decoder<S> {}

/// Compares cursor positions only. Meaningful for decoders over the same
/// source, such as those handed out by one [`Utf8Range`].
impl<S: ByteSource> PartialEq for Utf8Decoder<S> {
    fn eq(&self, other: &Self) -> bool {
        self.src.position() == other.src.position()
    }
}

impl<S: ByteSource> Eq for Utf8Decoder<S> {}

impl<S: fmt::Debug> fmt::Debug for Utf8Decoder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utf8Decoder")
            .field("src", &self.src)
            .field("halted", &self.halted)
            .finish_non_exhaustive()
    }
}

/// A restartable view of a byte sequence as code points.
///
/// Each call to [`Utf8Range::iter`] starts a fresh decoder at the beginning of
/// the range; the range itself never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Range<S> {
    start: S,
    options: DecodeOptions,
}

impl<'a> Utf8Range<SliceSource<'a>> {
    /// Views `bytes` as UTF-8 with default options.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::from_source(SliceSource::new(bytes), DecodeOptions::default())
    }

    /// Views `bytes` as UTF-8 with explicit options.
    #[must_use]
    pub fn with_options(bytes: &'a [u8], options: DecodeOptions) -> Self {
        Self::from_source(SliceSource::new(bytes), options)
    }
}

impl<S: ByteSource + Clone> Utf8Range<S> {
    /// Views any byte source as UTF-8, starting at its current cursor.
    pub fn from_source(start: S, options: DecodeOptions) -> Self {
        Self { start, options }
    }

    /// A decoder at the start of the range.
    pub fn iter(&self) -> Utf8Decoder<S> {
        Utf8Decoder::with_options(self.start.clone(), self.options)
    }

    /// A decoder at the end of the range.
    pub fn end(&self) -> Utf8Decoder<S> {
        let mut src = self.start.clone();
        let remaining = src.remaining();
        src.advance(remaining);
        Utf8Decoder::with_options(src, self.options)
    }

    /// Number of bytes in the range.
    pub fn byte_len(&self) -> usize {
        self.start.remaining()
    }

    /// The options decoders over this range use.
    pub fn options(&self) -> DecodeOptions {
        self.options
    }
}

impl<S: ByteSource + Clone> IntoIterator for Utf8Range<S> {
    type Item = Result<u32, UtfError>;
    type IntoIter = Utf8Decoder<S>;

    fn into_iter(self) -> Self::IntoIter {
        Utf8Decoder::with_options(self.start, self.options)
    }
}

impl<S: ByteSource + Clone> IntoIterator for &Utf8Range<S> {
    type Item = Result<u32, UtfError>;
    type IntoIter = Utf8Decoder<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Views `bytes` as a lazy sequence of code points.
///
/// ```rust
/// use utfconv::{decode_range, ErrorKind};
///
/// let range = decode_range(b"\xC2\x80\xC2\xFF");
/// let mut it = range.iter();
/// assert_eq!(it.next(), Some(Ok(0x80)));
/// let err = it.next().unwrap().unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidTrailingByte);
/// assert_eq!(err.offset(), 3);
/// assert_eq!(it.next(), None);
/// ```
pub fn decode_range<'a, B>(bytes: B) -> Utf8Range<SliceSource<'a>>
where
    B: Into<SliceSource<'a>>,
{
    Utf8Range::from_source(bytes.into(), DecodeOptions::default())
}

#[cfg(test)]
mod tests;
