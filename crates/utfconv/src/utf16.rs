//! UTF-16 encoding.

use core::{array, iter};

use crate::{
    MAX_CODE_POINT,
    code_points::CodePoints,
    error::{ErrorKind, UtfError},
    sink::Sink,
};

/// The UTF-16 form of a single code point: one unit, or a surrogate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf16Units {
    units: [u16; 2],
    len: u8,
}

impl Utf16Units {
    /// Encodes `code_point`, or returns `None` if it is above U+10FFFF.
    ///
    /// Values up to U+FFFF map to themselves, lone surrogates included.
    ///
    /// ```rust
    /// use utfconv::Utf16Units;
    ///
    /// let pair = Utf16Units::from_code_point(0x10FFFF).unwrap();
    /// assert_eq!(pair.as_slice(), &[0xDBFF, 0xDFFF]);
    /// assert_eq!(Utf16Units::from_code_point(0x110000), None);
    /// ```
    #[must_use]
    pub fn from_code_point(code_point: u32) -> Option<Self> {
        if let Ok(unit) = u16::try_from(code_point) {
            return Some(Self {
                units: [unit, 0],
                len: 1,
            });
        }
        if code_point > MAX_CODE_POINT {
            return None;
        }
        let v = code_point - 0x1_0000;
        // `v` has at most 20 bits, so each half fits in 10.
        #[allow(clippy::cast_possible_truncation)]
        let (high, low) = ((v >> 10) as u16 + 0xD800, (v & 0x3FF) as u16 + 0xDC00);
        Some(Self {
            units: [high, low],
            len: 2,
        })
    }

    /// The encoded units.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.units[..usize::from(self.len)]
    }

    /// Whether this is a surrogate pair.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        self.len == 2
    }
}

impl IntoIterator for Utf16Units {
    type Item = u16;
    type IntoIter = iter::Take<array::IntoIter<u16, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.into_iter().take(usize::from(self.len))
    }
}

/// Writes code points into a UTF-16 [`Sink`].
///
/// Each call to [`Utf16Encoder::emit`] depends only on its argument; no state
/// is carried between code points apart from the count of units written, which
/// positions errors in the destination.
#[derive(Debug)]
pub struct Utf16Encoder<K> {
    sink: K,
    written: usize,
}

impl<K: Sink<u16>> Utf16Encoder<K> {
    /// Creates an encoder writing into `sink`.
    pub fn new(sink: K) -> Self {
        Self { sink, written: 0 }
    }

    /// Encodes one code point.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::CodePointOutOfRange`] if `code_point` is above U+10FFFF.
    /// - [`ErrorKind::DestinationFull`] if the sink refuses a unit. The high
    ///   half of a pair may already have been written.
    ///
    /// Both are positioned at the number of units written before the failure.
    pub fn emit(&mut self, code_point: u32) -> Result<(), UtfError> {
        let Some(units) = Utf16Units::from_code_point(code_point) else {
            tracing::trace!(code_point, written = self.written, "code point out of UTF-16 range");
            return Err(UtfError::at_destination(
                ErrorKind::CodePointOutOfRange,
                self.written,
            ));
        };
        for unit in units {
            if self.sink.put(unit).is_err() {
                tracing::debug!(written = self.written, "UTF-16 sink is full");
                return Err(UtfError::at_destination(
                    ErrorKind::DestinationFull,
                    self.written,
                ));
            }
            self.written += 1;
        }
        Ok(())
    }

    /// Number of units written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Returns the sink.
    pub fn into_inner(self) -> K {
        self.sink
    }
}

/// Encodes `source` as UTF-16 into `sink` and returns the number of units
/// written.
///
/// `source` may be UTF-8 bytes, which are decoded on the fly, or code points.
///
/// # Errors
///
/// Decode errors are positioned in the source. Range and capacity errors are
/// positioned in the destination. Output written before the error is left in
/// the sink.
///
/// ```rust
/// use utfconv::{encode_to_utf16, ErrorKind, FromCodePoints, Position};
///
/// let mut out = Vec::new();
/// assert_eq!(encode_to_utf16(b"\xF0\x90\x80\x80", &mut out), Ok(2));
/// assert_eq!(out, [0xD800, 0xDC00]);
///
/// let err = encode_to_utf16(FromCodePoints([0x41_u32, 0x11_0000]), &mut out).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::CodePointOutOfRange);
/// assert_eq!(err.position(), Position::Destination(1));
/// ```
pub fn encode_to_utf16<C, K>(source: C, sink: K) -> Result<usize, UtfError>
where
    C: CodePoints,
    K: Sink<u16>,
{
    let mut encoder = Utf16Encoder::new(sink);
    source.try_for_each_code_point(|_, code_point| encoder.emit(code_point))?;
    Ok(encoder.written())
}
