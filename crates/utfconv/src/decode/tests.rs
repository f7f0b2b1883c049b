use alloc::{collections::VecDeque, format, vec::Vec};

use rstest::rstest;

use super::*;
use crate::{
    error::Position,
    options::HeaderPolicy,
    source::DequeSource,
};

fn err_at(kind: ErrorKind, offset: usize) -> UtfError {
    UtfError::at_source(kind, offset)
}

fn decode_all(bytes: &[u8]) -> Vec<Result<u32, UtfError>> {
    decode_range(bytes).into_iter().collect()
}

#[rstest]
#[case(b"\xC2\x80", 0x80)]
#[case(b"\xDF\xBF", 0x7FF)]
#[case(b"\xE0\xA0\x80", 0x800)]
#[case(b"\xEF\xBF\xBF", 0xFFFF)]
#[case(b"\xED\xA0\x80", 0xD800)]
#[case(b"\xF0\x90\x80\x80", 0x1_0000)]
#[case(b"\xF4\x8F\xBF\xBF", 0x10_FFFF)]
fn decodes_boundary_sequences(#[case] bytes: &[u8], #[case] expected: u32) {
    let decoder = Utf8Decoder::new(SliceSource::new(bytes));
    assert_eq!(
        decoder.peek(),
        Some(Ok(Decoded {
            code_point: expected,
            len: bytes.len()
        }))
    );
    assert_eq!(decode_all(bytes), [Ok(expected)]);
}

#[rstest]
#[case(b"\x80", err_at(ErrorKind::InvalidHeader, 0))]
#[case(b"\xBF\x80", err_at(ErrorKind::InvalidHeader, 0))]
#[case(b"\xF8\x88\x80\x80\x80", err_at(ErrorKind::InvalidHeader, 0))]
#[case(b"\xFF", err_at(ErrorKind::InvalidHeader, 0))]
#[case(b"\xC2", err_at(ErrorKind::TruncatedSequence, 0))]
#[case(b"\xF0\x90\x80", err_at(ErrorKind::TruncatedSequence, 0))]
#[case(b"\xC2\xFF", err_at(ErrorKind::InvalidTrailingByte, 1))]
#[case(b"\xE0\xA0\x41", err_at(ErrorKind::InvalidTrailingByte, 2))]
#[case(b"\xF0\x90\xC0\x80", err_at(ErrorKind::InvalidTrailingByte, 2))]
#[case(b"\xF4\x90\x80\x80", err_at(ErrorKind::CodePointOutOfRange, 0))]
#[case(b"\xF7\xBF\xBF\xBF", err_at(ErrorKind::CodePointOutOfRange, 0))]
fn rejects_malformed_sequences(#[case] bytes: &[u8], #[case] expected: UtfError) {
    assert_eq!(decode_all(bytes), [Err(expected)]);
}

#[test]
fn truncation_is_reported_before_trailing_bytes() {
    // The second byte is not a continuation byte, but the sequence is also
    // too short: length is checked first.
    assert_eq!(
        decode_all(b"\xE2\x41"),
        [Err(err_at(ErrorKind::TruncatedSequence, 0))]
    );
}

#[test]
fn ascii_passthrough() {
    for b in 0x00..=0x7Fu8 {
        let bytes = [b];
        let decoder = Utf8Decoder::new(SliceSource::new(&bytes));
        assert_eq!(
            decoder.peek(),
            Some(Ok(Decoded {
                code_point: u32::from(b),
                len: 1
            }))
        );
    }
}

#[test]
fn peek_is_idempotent() {
    let bytes = "\u{20AC}x".as_bytes();
    let decoder = Utf8Decoder::new(SliceSource::new(bytes));
    let first = decoder.peek();
    for _ in 0..4 {
        assert_eq!(decoder.peek(), first);
    }
    assert_eq!(decoder.position(), 0);

    let bad = Utf8Decoder::new(SliceSource::new(b"\xC2\xFF"));
    assert_eq!(bad.peek(), bad.peek());
    assert_eq!(bad.position(), 0);
}

#[test]
fn advance_moves_by_sequence_length() {
    let bytes = "a\u{E9}\u{20AC}\u{1F600}".as_bytes();
    let mut decoder = Utf8Decoder::new(SliceSource::new(bytes));
    let mut positions = Vec::new();
    while !decoder.is_end() {
        positions.push(decoder.position());
        decoder.advance().unwrap();
    }
    assert_eq!(positions, [0, 1, 3, 6]);
    // Advancing at the end is a no-op.
    decoder.advance().unwrap();
    assert_eq!(decoder.position(), bytes.len());
}

#[test]
fn advance_fails_in_place() {
    let mut decoder = Utf8Decoder::new(SliceSource::new(b"a\xC2\xFF"));
    decoder.advance().unwrap();
    let err = decoder.advance().unwrap_err();
    assert_eq!(err, err_at(ErrorKind::InvalidTrailingByte, 2));
    assert_eq!(decoder.position(), 1);
}

#[test]
fn iterator_halts_after_error() {
    let mut it = decode_range(b"a\x80b").into_iter();
    assert_eq!(it.next(), Some(Ok(0x61)));
    assert_eq!(it.next(), Some(Err(err_at(ErrorKind::InvalidHeader, 1))));
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
    assert_eq!(it.position(), 1);
}

#[test]
fn resync_skips_to_next_header() {
    let mut it = decode_range(b"a\xE2\x82\xFFz\x80\x80").into_iter();
    assert_eq!(it.next(), Some(Ok(0x61)));
    assert_eq!(
        it.next(),
        Some(Err(err_at(ErrorKind::InvalidTrailingByte, 3)))
    );
    // 0xE2 is skipped, then 0x82 is a continuation byte and is skipped too.
    // 0xFF is not a header either, so the cursor lands on 'z'.
    assert_eq!(it.resync(), 3);
    assert_eq!(it.position(), 4);
    assert_eq!(it.next(), Some(Ok(0x7A)));
    assert_eq!(it.next(), Some(Err(err_at(ErrorKind::InvalidHeader, 5))));
    assert_eq!(it.resync(), 2);
    assert!(it.is_end());
    assert_eq!(it.next(), None);
    assert_eq!(it.resync(), 0);
}

#[test]
fn equality_compares_cursors() {
    let range = decode_range("ab");
    let mut a = range.iter();
    let b = range.iter();
    assert_eq!(a, b);
    a.next();
    assert_ne!(a, b);
    a.next();
    assert_eq!(a, range.end());
}

#[test]
fn range_is_restartable() {
    let range = decode_range("h\u{E9}\u{1F600}");
    let first: Vec<_> = range.iter().collect();
    let second: Vec<_> = range.iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    assert_eq!(range.byte_len(), 7);
}

#[test]
fn end_of_empty_range_is_begin() {
    let range = decode_range(b"");
    assert_eq!(range.iter(), range.end());
    assert!(range.iter().is_end());
    assert_eq!(range.iter().peek(), None);
}

#[test]
fn decodes_across_ring_wrap() {
    let text = "\u{1F600}\u{20AC}";
    let mut ring: VecDeque<u8> = VecDeque::with_capacity(8);
    // Rotate so the encoded text straddles the ring boundary.
    ring.extend([0u8; 6]);
    for _ in 0..6 {
        ring.pop_front();
    }
    ring.extend(text.as_bytes());

    let range = Utf8Range::from_source(DequeSource::new(&ring), DecodeOptions::default());
    let got: Vec<_> = range.iter().collect();
    assert_eq!(got, [Ok(0x1F600), Ok(0x20AC)]);
}

#[test]
fn leading_ones_admits_legacy_forms() {
    let options = DecodeOptions {
        header_policy: HeaderPolicy::LeadingOnes,
    };
    // Overlong five-byte spelling of 'A'.
    let bytes = b"\xF8\x80\x80\x81\x81";
    let got: Vec<_> = Utf8Range::with_options(bytes, options).iter().collect();
    assert_eq!(got, [Ok(0x41)]);

    // Still bounded by U+10FFFF.
    let bytes = b"\xFD\xBF\xBF\xBF\xBF\xBF";
    let got: Vec<_> = Utf8Range::with_options(bytes, options).iter().collect();
    assert_eq!(got, [Err(err_at(ErrorKind::CodePointOutOfRange, 0))]);

    // 0xFE has seven leading ones.
    let got: Vec<_> = Utf8Range::with_options(b"\xFE", options).iter().collect();
    assert_eq!(got, [Err(err_at(ErrorKind::InvalidHeader, 0))]);
}

#[test]
fn matches_bstr_on_valid_utf8() {
    let text = "ASCII, \u{E9}\u{E8}, \u{4E2D}\u{6587}, \u{1F600}\u{1F30D}, \u{10FFFF}";
    let mut rest = text.as_bytes();
    let mut expected = Vec::new();
    while !rest.is_empty() {
        let (ch, len) = bstr::decode_utf8(rest);
        expected.push(Ok(u32::from(ch.unwrap())));
        rest = &rest[len..];
    }
    assert_eq!(decode_all(text.as_bytes()), expected);
}

#[test]
fn error_positions_are_source_offsets() {
    let err = decode_all(b"abc\xF0\x90\x80")
        .pop()
        .unwrap()
        .unwrap_err();
    assert_eq!(err.position(), Position::Source(3));
}

#[test]
fn debug_shows_remaining_bytes() {
    let mut it = decode_range(b"a\xFF").into_iter();
    it.next();
    insta::assert_snapshot!(
        format!("{it:?}"),
        @r#"Utf8Decoder { src: SliceSource { pos: 1, rest: "\xff" }, halted: false, .. }"#
    );
}

fn assert_size_hint_holds<S: ByteSource + Clone>(decoder: Utf8Decoder<S>) {
    let (lower, upper) = decoder.size_hint();
    let count = decoder.count();
    assert!(lower <= count, "lower bound {lower} > {count} items");
    assert!(upper.is_none_or(|upper| count <= upper), "{count} items > {upper:?}");
}

#[test]
fn size_hint_bounds_the_item_count() {
    // Halts after the first error despite the trailing ASCII.
    assert_size_hint_holds(decode_range(b"\x80abcdefg").into_iter());
    assert_size_hint_holds(decode_range("\u{1F600}\u{1F600}").into_iter());
    assert_size_hint_holds(decode_range(b"").into_iter());

    let options = DecodeOptions {
        header_policy: HeaderPolicy::LeadingOnes,
    };
    // One six-byte legacy sequence.
    let legacy = Utf8Range::with_options(b"\xFC\x80\x80\x80\x81\x80", options);
    assert_eq!(legacy.iter().count(), 1);
    assert_size_hint_holds(legacy.iter());

    let mut it = decode_range(b"\x80a").into_iter();
    it.next();
    assert_eq!(it.size_hint(), (0, Some(0)));
}
