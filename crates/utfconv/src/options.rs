/// Configuration for the UTF-8 decoder.
///
/// # Examples
///
/// ```rust
/// use utfconv::{DecodeOptions, HeaderPolicy, Utf8Range};
///
/// let options = DecodeOptions {
///     header_policy: HeaderPolicy::LeadingOnes,
/// };
/// let range = Utf8Range::with_options(&[0xF8, 0x80, 0x80, 0x80, 0x81], options);
/// assert_eq!(range.iter().next(), Some(Ok(1)));
/// ```
///
/// # Default
///
/// Strict header classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub struct DecodeOptions {
    /// How header bytes are mapped to sequence lengths.
    ///
    /// # Default
    ///
    /// [`HeaderPolicy::Strict`]
    pub header_policy: HeaderPolicy,
}

/// Header byte classification policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum HeaderPolicy {
    /// Modern UTF-8: at most three trailing bytes, headers `0xF8..=0xFF` are
    /// rejected.
    #[default]
    Strict,
    /// The sequence length is the number of leading one bits in the header,
    /// which admits the obsolete five- and six-byte forms (`0xF8..=0xFD`).
    ///
    /// Decoded values above U+10FFFF are still rejected, so this only admits
    /// overlong spellings of valid code points.
    LeadingOnes,
}
