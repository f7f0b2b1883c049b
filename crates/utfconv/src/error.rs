use core::fmt;

use thiserror::Error;

/// A positioned conversion failure.
///
/// The position is a plain offset, so the error can outlive the buffer and
/// the decoder that produced it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at {position}")]
pub struct UtfError {
    pub(crate) kind: ErrorKind,
    pub(crate) position: Position,
}

impl UtfError {
    pub(crate) fn at_source(kind: ErrorKind, offset: usize) -> Self {
        Self {
            kind,
            position: Position::Source(offset),
        }
    }

    pub(crate) fn at_destination(kind: ErrorKind, offset: usize) -> Self {
        Self {
            kind,
            position: Position::Destination(offset),
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Where it went wrong.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The offset of [`Self::position`], regardless of which side it refers
    /// to.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self.position {
            Position::Source(n) | Position::Destination(n) => n,
        }
    }
}

/// The cause of a [`UtfError`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A continuation byte or a reserved value was found where a sequence
    /// should start.
    #[error("invalid header byte")]
    InvalidHeader,
    /// The header announces more trailing bytes than remain in the input.
    #[error("truncated sequence")]
    TruncatedSequence,
    /// A trailing byte lies outside `0x80..=0xBF`.
    #[error("invalid trailing byte")]
    InvalidTrailingByte,
    /// A value above U+10FFFF.
    #[error("code point out of range")]
    CodePointOutOfRange,
    /// A fixed-capacity sink refused a value.
    #[error("destination full")]
    DestinationFull,
}

/// Which sequence an error offset refers to.
///
/// Source offsets count bytes for UTF-8 input and elements for code point
/// input. Destination offsets count the values written before the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum Position {
    /// Offset into the input.
    Source(usize),
    /// Offset into the output.
    Destination(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(n) => write!(f, "source offset {n}"),
            Self::Destination(n) => write!(f, "destination offset {n}"),
        }
    }
}
