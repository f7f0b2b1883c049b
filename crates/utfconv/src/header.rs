//! Header byte classification.

use crate::options::HeaderPolicy;

/// What a header byte says about the sequence it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of continuation bytes that must follow the header.
    pub trailing: u8,
    /// Code point bits carried by the header itself.
    pub seed: u32,
}

impl Header {
    /// Total encoded length of the sequence, header included.
    #[inline]
    #[must_use]
    pub fn sequence_len(self) -> usize {
        1 + usize::from(self.trailing)
    }
}

/// Classifies `byte` as a sequence header under `policy`.
///
/// Returns `None` for continuation bytes and for header values the policy
/// does not admit.
///
/// ```rust
/// use utfconv::{classify, Header, HeaderPolicy};
///
/// assert_eq!(classify(b'A', HeaderPolicy::Strict), Some(Header { trailing: 0, seed: 0x41 }));
/// assert_eq!(classify(0xE2, HeaderPolicy::Strict), Some(Header { trailing: 2, seed: 0x2 }));
/// assert_eq!(classify(0x80, HeaderPolicy::Strict), None);
/// assert_eq!(classify(0xF8, HeaderPolicy::Strict), None);
/// ```
#[inline]
#[must_use]
pub fn classify(byte: u8, policy: HeaderPolicy) -> Option<Header> {
    match policy {
        HeaderPolicy::Strict => classify_strict(byte),
        HeaderPolicy::LeadingOnes => classify_leading_ones(byte),
    }
}

#[inline]
fn classify_strict(byte: u8) -> Option<Header> {
    let (trailing, seed) = match byte {
        0x00..=0x7F => (0, byte),
        0x80..=0xBF => return None,
        0xC0..=0xDF => (1, byte & 0x1F),
        0xE0..=0xEF => (2, byte & 0x0F),
        0xF0..=0xF7 => (3, byte & 0x07),
        0xF8..=0xFF => return None,
    };
    Some(Header {
        trailing,
        seed: u32::from(seed),
    })
}

fn classify_leading_ones(byte: u8) -> Option<Header> {
    let ones = byte.leading_ones();
    match ones {
        0 => Some(Header {
            trailing: 0,
            seed: u32::from(byte),
        }),
        // `ones` is in 2..=6 here, so the shift and the cast are lossless.
        #[allow(clippy::cast_possible_truncation)]
        2..=6 => Some(Header {
            trailing: (ones - 1) as u8,
            seed: u32::from(byte & (0xFF >> (ones + 1))),
        }),
        _ => None,
    }
}

/// Returns `true` if `byte` may appear after a header.
#[inline]
pub(crate) fn is_trailing(byte: u8) -> bool {
    matches!(byte, 0x80..=0xBF)
}
