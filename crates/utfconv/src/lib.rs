//! Lazy UTF-8 decoding and conversion to UTF-16 and UTF-32.
//!
//! The crate is built around one decode step: classify the header byte at a
//! cursor, validate the trailing bytes, and return the code point together
//! with its encoded length. Everything else is layered on top of it:
//!
//! - [`Utf8Decoder`] / [`Utf8Range`]: a lazy, restartable view over borrowed
//!   bytes that decodes one code point per step.
//! - [`Utf16Encoder`]: emits UTF-16 units (with surrogate pairs) into a
//!   [`Sink`].
//! - [`utf16_unit_count`]: sizes a UTF-16 buffer without writing it.
//! - [`convert`]: the two-pass size-or-fill routine that reports failure with
//!   a `None` sentinel instead of a positioned error.
//!
//! ```rust
//! use utfconv::{convert, decode_range, encode_to_utf16, utf16_unit_count};
//!
//! let bytes = "a\u{10000}".as_bytes();
//!
//! let code_points: Result<Vec<u32>, _> = decode_range(bytes).into_iter().collect();
//! assert_eq!(code_points.unwrap(), [0x61, 0x10000]);
//!
//! let needed = utf16_unit_count(bytes).unwrap();
//! let mut units = Vec::with_capacity(needed);
//! encode_to_utf16(bytes, &mut units).unwrap();
//! assert_eq!(units, [0x61, 0xD800, 0xDC00]);
//!
//! // Sentinel style: size, allocate, fill.
//! let len = convert(bytes, None).unwrap();
//! let mut buf = vec![0u16; len];
//! assert_eq!(convert(bytes, Some(&mut buf)), Some(3));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod code_points;
mod convert;
mod decode;
mod error;
mod header;
mod options;
mod sink;
mod size;
mod source;
mod utf16;
mod utf8;

pub use code_points::{CodePoints, FromCodePoints, copy_to_code_points};
pub use convert::convert;
pub use decode::{Decoded, Utf8Decoder, Utf8Range, decode_range};
pub use error::{ErrorKind, Position, UtfError};
pub use header::{Header, classify};
pub use options::{DecodeOptions, HeaderPolicy};
pub use sink::{FnSink, Full, SliceSink, Sink, from_fn};
pub use size::{utf16_len, utf16_unit_count};
pub use source::{ByteSource, DequeSource, SliceSource};
pub use utf16::{Utf16Encoder, Utf16Units, encode_to_utf16};
pub use utf8::{Utf8Units, encode_to_utf8};

/// The largest Unicode code point, U+10FFFF.
pub const MAX_CODE_POINT: u32 = 0x10_FFFF;
