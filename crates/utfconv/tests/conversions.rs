#![expect(missing_docs)]

use rstest::rstest;
use utfconv::{
    ErrorKind, FromCodePoints, Position, SliceSink, Utf16Encoder, convert, copy_to_code_points,
    decode_range, encode_to_utf16, utf16_unit_count,
};

fn utf16(bytes: &[u8]) -> Result<Vec<u16>, utfconv::UtfError> {
    let mut out = Vec::new();
    encode_to_utf16(bytes, &mut out)?;
    Ok(out)
}

#[rstest]
#[case(&[0xC2, 0x80], 0x80, &[0x0080])]
#[case(&[0xE0, 0xA0, 0x80], 0x800, &[0x0800])]
#[case(&[0xF0, 0x90, 0x80, 0x80], 0x1_0000, &[0xD800, 0xDC00])]
#[case(&[0xF4, 0x8F, 0xBF, 0xBF], 0x10_FFFF, &[0xDBFF, 0xDFFF])]
fn boundary_vectors(#[case] bytes: &[u8], #[case] code_point: u32, #[case] units: &[u16]) {
    let decoded: Vec<_> = decode_range(bytes).into_iter().collect();
    assert_eq!(decoded, [Ok(code_point)]);
    assert_eq!(utf16(bytes).unwrap(), units);
    assert_eq!(utf16_unit_count(bytes), Ok(units.len()));
    assert_eq!(convert(bytes, None), Some(units.len()));
}

#[rstest]
#[case(&[0x80], ErrorKind::InvalidHeader, 0)]
#[case(&[0xF0, 0x90, 0x80], ErrorKind::TruncatedSequence, 0)]
#[case(&[0xC2, 0xFF], ErrorKind::InvalidTrailingByte, 1)]
fn malformed_vectors(#[case] bytes: &[u8], #[case] kind: ErrorKind, #[case] offset: usize) {
    let err = decode_range(bytes)
        .into_iter()
        .find_map(Result::err)
        .expect("decoding should fail");
    assert_eq!(err.kind(), kind);
    assert_eq!(err.position(), Position::Source(offset));

    // Every positioned entry point reports the same failure.
    assert_eq!(utf16(bytes), Err(err));
    assert_eq!(utf16_unit_count(bytes), Err(err));
    assert_eq!(copy_to_code_points(bytes, &mut Vec::new()), Err(err));

    // The sentinel entry point only says that it failed.
    assert_eq!(convert(bytes, None), None);
}

#[test]
fn code_point_out_of_range_on_encode() {
    let mut enc = Utf16Encoder::new(Vec::new());
    enc.emit(0x10_FFFF).unwrap();
    let err = enc.emit(0x11_0000).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CodePointOutOfRange);
    assert_eq!(err.position(), Position::Destination(2));
    assert_eq!(enc.into_inner(), [0xDBFF, 0xDFFF]);
}

#[test]
fn size_then_fill_into_fixed_buffer() {
    let text = "Gr\u{FC}\u{DF}e, \u{4E16}\u{754C} \u{1F44B}";
    let needed = utf16_unit_count(text).unwrap();
    let mut buf = vec![0u16; needed];
    let mut sink = SliceSink::new(&mut buf);
    let written = encode_to_utf16(text, &mut sink).unwrap();
    assert_eq!(written, needed);
    assert_eq!(sink.capacity_left(), 0);
    assert_eq!(buf, text.encode_utf16().collect::<Vec<_>>());
}

#[test]
fn fixed_buffer_too_small() {
    let mut buf = [0u16; 2];
    let err = encode_to_utf16("ab\u{1F44B}", SliceSink::new(&mut buf)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DestinationFull);
    assert_eq!(err.position(), Position::Destination(2));
}

#[test]
fn utf32_roundtrip_through_utf16() {
    let text = "\u{0}\u{7F}\u{80}\u{7FF}\u{800}\u{FFFF}\u{10000}\u{10FFFF}";
    let mut utf32 = Vec::new();
    copy_to_code_points(text, &mut utf32).unwrap();
    assert_eq!(utf32, text.chars().map(u32::from).collect::<Vec<_>>());

    let mut from_utf8 = Vec::new();
    let mut from_utf32 = Vec::new();
    encode_to_utf16(text, &mut from_utf8).unwrap();
    encode_to_utf16(FromCodePoints(utf32.iter().copied()), &mut from_utf32).unwrap();
    assert_eq!(from_utf8, from_utf32);
}

#[test]
fn surrogate_code_points_pass_through() {
    // The decoder does not reject encoded surrogates; they map to one unit.
    let bytes = [0xED, 0xB0, 0x80];
    assert_eq!(utf16(&bytes).unwrap(), [0xDC00]);
    assert_eq!(convert(&bytes, None), Some(1));
}
