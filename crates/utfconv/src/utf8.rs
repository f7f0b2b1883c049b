//! UTF-8 encoding of code points.

use core::{array, iter};

use crate::{
    MAX_CODE_POINT,
    code_points::CodePoints,
    error::{ErrorKind, UtfError},
    sink::Sink,
};

/// The shortest UTF-8 form of a single code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Units {
    bytes: [u8; 4],
    len: u8,
}

impl Utf8Units {
    /// Encodes `code_point`, or returns `None` if it is above U+10FFFF.
    ///
    /// Surrogate values get their three-byte form, which the decoder in this
    /// crate reads back unchanged.
    ///
    /// ```rust
    /// use utfconv::Utf8Units;
    ///
    /// assert_eq!(Utf8Units::from_code_point(0x20AC).unwrap().as_slice(), b"\xE2\x82\xAC");
    /// assert_eq!(Utf8Units::from_code_point(0x110000), None);
    /// ```
    // Every cast below keeps only bits already masked or shifted into range.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn from_code_point(code_point: u32) -> Option<Self> {
        let cont = |shift: u32| 0x80 | ((code_point >> shift) & 0x3F) as u8;
        let (bytes, len) = match code_point {
            0..=0x7F => ([code_point as u8, 0, 0, 0], 1),
            0x80..=0x7FF => ([0xC0 | (code_point >> 6) as u8, cont(0), 0, 0], 2),
            0x800..=0xFFFF => ([0xE0 | (code_point >> 12) as u8, cont(6), cont(0), 0], 3),
            0x1_0000..=MAX_CODE_POINT => (
                [0xF0 | (code_point >> 18) as u8, cont(12), cont(6), cont(0)],
                4,
            ),
            _ => return None,
        };
        Some(Self { bytes, len })
    }

    /// The encoded bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

impl IntoIterator for Utf8Units {
    type Item = u8;
    type IntoIter = iter::Take<array::IntoIter<u8, 4>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bytes.into_iter().take(usize::from(self.len))
    }
}

/// Encodes `source` as UTF-8 into `sink` and returns the number of bytes
/// written.
///
/// # Errors
///
/// Decode errors for UTF-8 input are positioned in the source. Out-of-range
/// code points and a full sink are positioned in the destination.
///
/// ```rust
/// use utfconv::encode_to_utf8;
///
/// let mut out = Vec::new();
/// assert_eq!(encode_to_utf8(&[0x48_u32, 0x1F600], &mut out), Ok(5));
/// assert_eq!(out, "H\u{1F600}".as_bytes());
/// ```
pub fn encode_to_utf8<C, K>(source: C, mut sink: K) -> Result<usize, UtfError>
where
    C: CodePoints,
    K: Sink<u8>,
{
    let mut written = 0;
    source.try_for_each_code_point(|_, code_point| {
        let units = Utf8Units::from_code_point(code_point)
            .ok_or(UtfError::at_destination(ErrorKind::CodePointOutOfRange, written))?;
        for byte in units {
            if sink.put(byte).is_err() {
                tracing::debug!(written, "UTF-8 sink is full");
                return Err(UtfError::at_destination(ErrorKind::DestinationFull, written));
            }
            written += 1;
        }
        Ok(())
    })?;
    Ok(written)
}
