//! UTF-16 size estimation.

use crate::{
    MAX_CODE_POINT,
    code_points::CodePoints,
    error::{ErrorKind, UtfError},
};

/// Number of UTF-16 units `code_point` needs, or `None` above U+10FFFF.
#[inline]
#[must_use]
pub fn utf16_len(code_point: u32) -> Option<usize> {
    match code_point {
        0..=0xFFFF => Some(1),
        0x1_0000..=MAX_CODE_POINT => Some(2),
        _ => None,
    }
}

/// Counts the UTF-16 units `source` would encode to, without writing them.
///
/// Runs the same decode path as [`crate::encode_to_utf16`], so for valid
/// input the two always agree.
///
/// # Errors
///
/// Decode errors for UTF-8 input, and [`ErrorKind::CodePointOutOfRange`] for a
/// code point above U+10FFFF. Both are positioned in the source.
///
/// ```rust
/// use utfconv::{utf16_unit_count, ErrorKind};
///
/// assert_eq!(utf16_unit_count("a\u{E9}\u{1F600}"), Ok(4));
/// assert_eq!(utf16_unit_count(&[0x41_u32, 0x10000]), Ok(3));
///
/// let err = utf16_unit_count(b"\xF0\x90\x80").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::TruncatedSequence);
/// ```
pub fn utf16_unit_count<C: CodePoints>(source: C) -> Result<usize, UtfError> {
    let mut count = 0;
    source.try_for_each_code_point(|offset, code_point| {
        let Some(len) = utf16_len(code_point) else {
            tracing::trace!(offset, code_point, "code point out of UTF-16 range");
            return Err(UtfError::at_source(ErrorKind::CodePointOutOfRange, offset));
        };
        count += len;
        Ok(())
    })?;
    Ok(count)
}
