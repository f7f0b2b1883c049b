//! Two-pass UTF-8 to UTF-16 conversion with a sentinel result.

use crate::{
    decode::Utf8Decoder, options::DecodeOptions, source::SliceSource, utf16::Utf16Units,
};

/// Converts UTF-8 `src` to UTF-16, or only measures it.
///
/// With `dst == None` nothing is written and the return value is the number
/// of UTF-16 units `src` needs. With a destination the units are written to
/// its front and the same count is returned. Calling once to size a buffer
/// and again to fill it always yields the same count.
///
/// Returns `None` if `src` is not well-formed or `dst` is too short. The
/// contents of `dst` are unspecified in that case. Use
/// [`crate::encode_to_utf16`] to find out what went wrong and where.
///
/// ```rust
/// use utfconv::convert;
///
/// let src = "\u{24}\u{20AC}\u{10348}".as_bytes();
/// let len = convert(src, None).unwrap();
/// let mut dst = vec![0u16; len];
/// assert_eq!(convert(src, Some(&mut dst)), Some(4));
/// assert_eq!(dst, [0x24, 0x20AC, 0xD800, 0xDF48]);
///
/// assert_eq!(convert(b"\xC2", None), None);
/// ```
#[must_use]
pub fn convert(src: &[u8], mut dst: Option<&mut [u16]>) -> Option<usize> {
    let decoder = Utf8Decoder::with_options(SliceSource::new(src), DecodeOptions::default());
    let mut count = 0usize;
    for item in decoder {
        let code_point = match item {
            Ok(code_point) => code_point,
            Err(err) => {
                tracing::trace!(%err, "convert: malformed input");
                return None;
            }
        };
        let units = Utf16Units::from_code_point(code_point)?;
        let units = units.as_slice();
        if let Some(dst) = dst.as_deref_mut() {
            let Some(slot) = dst.get_mut(count..count + units.len()) else {
                tracing::trace!(
                    needed = count + units.len(),
                    capacity = dst.len(),
                    "convert: destination too short"
                );
                return None;
            };
            slot.copy_from_slice(units);
        }
        count += units.len();
    }
    Some(count)
}
