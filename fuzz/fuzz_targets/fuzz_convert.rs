#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utfconv::{
    DecodeOptions, HeaderPolicy, Utf8Range, convert, decode_range, encode_to_utf16,
    utf16_unit_count,
};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    bytes: &'a [u8],
    legacy_headers: bool,
    /// Extra destination capacity beyond the dry-run size, possibly negative.
    slack: i8,
}

fuzz_target!(|input: Input<'_>| {
    let bytes = input.bytes;

    // Everything core accepts, the strict decoder accepts with the same
    // result. The converse does not hold: overlong forms and surrogates pass.
    let decoded: Result<Vec<u32>, _> = decode_range(bytes).into_iter().collect();
    if let Ok(text) = core::str::from_utf8(bytes) {
        let expected: Vec<u32> = text.chars().map(u32::from).collect();
        assert_eq!(decoded.as_ref().ok(), Some(&expected));
    }

    // Sentinel and positioned paths agree.
    let dry = convert(bytes, None);
    let counted = utf16_unit_count(bytes);
    assert_eq!(dry, counted.ok());
    let mut positioned = Vec::new();
    let written = encode_to_utf16(bytes, &mut positioned);
    assert_eq!(written.ok(), dry);

    if let Some(len) = dry {
        let cap = len.saturating_add_signed(isize::from(input.slack));
        let mut dst = vec![0u16; cap];
        let filled = convert(bytes, Some(&mut dst));
        if cap >= len {
            assert_eq!(filled, Some(len));
            assert_eq!(&dst[..len], positioned.as_slice());
        } else {
            assert_eq!(filled, None);
        }
    }

    // The legacy policy never yields a value the strict policy would reject
    // as out of range, and never fails where the strict decoder succeeds.
    if input.legacy_headers {
        let options = DecodeOptions {
            header_policy: HeaderPolicy::LeadingOnes,
        };
        let legacy: Result<Vec<u32>, _> =
            Utf8Range::with_options(bytes, options).into_iter().collect();
        if let Ok(code_points) = &legacy {
            assert!(code_points.iter().all(|&cp| cp <= utfconv::MAX_CODE_POINT));
        }
        if decoded.is_ok() {
            assert_eq!(legacy, decoded);
        }
    }
});
