use thiserror::Error as ThisError;

/// Fieldless mirror of [`DecodeError`] variants, handy for matching in callers
/// that only care about the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    UnknownTag,
    BadKeyType,
    BadReference,
    Truncated,
    MalformedNumber,
    Unexpected,
    SplitCharacter,
    TrailingInput,
    DepthExceeded,
    InvalidUtf8,
}

/// Errors produced while decoding serialized text. Every variant aborts the
/// whole decode; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum DecodeError {
    /// The dispatcher saw a type indicator outside the grammar.
    #[error("unknown type '{tag}' at position {position}")]
    UnknownTag {
        /// Offending type indicator.
        tag: char,
        /// Byte offset of the indicator.
        position: usize,
    },
    /// A key was neither an integer nor a string.
    #[error("unknown key type '{tag}' at position {position}")]
    BadKeyType {
        /// Offending type indicator.
        tag: char,
        /// Byte offset of the indicator.
        position: usize,
    },
    /// Backreference index is zero, negative or past the current table size.
    #[error("backreference {index} is out of range")]
    BadReference {
        /// Index as written in the input.
        index: i64,
    },
    /// Input ended before an expected delimiter or byte count.
    #[error("unexpected end of input at position {position}")]
    Truncated {
        /// Byte offset where the missing token was expected to start.
        position: usize,
    },
    /// Integer, float or length token is not numeric.
    #[error("malformed number at position {position}")]
    MalformedNumber {
        /// Byte offset of the token.
        position: usize,
    },
    /// A fixed delimiter was present but wrong.
    #[error("expected '{expected}' but found '{found}' at position {position}")]
    Unexpected {
        /// Delimiter required by the grammar.
        expected: char,
        /// Character actually present.
        found: char,
        /// Byte offset of the mismatch.
        position: usize,
    },
    /// Declared string length ends inside a multi-byte character.
    #[error("string length splits a character at position {position}")]
    SplitCharacter {
        /// Byte offset of the string contents.
        position: usize,
    },
    /// Bytes remain after a complete top-level value.
    #[error("trailing input at position {position}")]
    TrailingInput {
        /// Byte offset of the first unconsumed byte.
        position: usize,
    },
    /// Nesting went deeper than the configured limit.
    #[error("nesting depth exceeded (max={max_depth}) at position {position}")]
    DepthExceeded {
        /// Configured depth ceiling.
        max_depth: usize,
        /// Byte offset of the value that crossed the limit.
        position: usize,
    },
    /// Raw bytes handed to the slice entry point are not UTF-8.
    #[error("invalid utf-8 at position {position}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence.
        position: usize,
    },
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::UnknownTag { .. } => DecodeErrorKind::UnknownTag,
            DecodeError::BadKeyType { .. } => DecodeErrorKind::BadKeyType,
            DecodeError::BadReference { .. } => DecodeErrorKind::BadReference,
            DecodeError::Truncated { .. } => DecodeErrorKind::Truncated,
            DecodeError::MalformedNumber { .. } => DecodeErrorKind::MalformedNumber,
            DecodeError::Unexpected { .. } => DecodeErrorKind::Unexpected,
            DecodeError::SplitCharacter { .. } => DecodeErrorKind::SplitCharacter,
            DecodeError::TrailingInput { .. } => DecodeErrorKind::TrailingInput,
            DecodeError::DepthExceeded { .. } => DecodeErrorKind::DepthExceeded,
            DecodeError::InvalidUtf8 { .. } => DecodeErrorKind::InvalidUtf8,
        }
    }

    /// Byte offset the error points at, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            DecodeError::UnknownTag { position, .. }
            | DecodeError::BadKeyType { position, .. }
            | DecodeError::Truncated { position }
            | DecodeError::MalformedNumber { position }
            | DecodeError::Unexpected { position, .. }
            | DecodeError::SplitCharacter { position }
            | DecodeError::TrailingInput { position }
            | DecodeError::DepthExceeded { position, .. }
            | DecodeError::InvalidUtf8 { position } => Some(*position),
            DecodeError::BadReference { .. } => None,
        }
    }
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("deserialize failed: {0}")]
    Deserialize(String),
}

impl Error {
    pub fn deserialize(message: impl Into<String>) -> Self {
        Error::Deserialize(message.into())
    }

    /// The decode failure behind this error, if any.
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Error::Decode(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn unknown_tag_message_matches_offset() {
        let err = DecodeError::UnknownTag {
            tag: 'x',
            position: 0,
        };
        assert_eq!(err.to_string(), "unknown type 'x' at position 0");
        assert_eq!(err.position(), Some(0));
        assert_eq!(err.kind(), DecodeErrorKind::UnknownTag);
    }

    #[rstest::rstest]
    fn bad_reference_has_no_position() {
        let err = DecodeError::BadReference { index: 99 };
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "backreference 99 is out of range");
    }

    #[rstest::rstest]
    fn crate_error_wraps_decode_error() {
        let err: Error = DecodeError::Truncated { position: 4 }.into();
        assert_eq!(err.to_string(), "unexpected end of input at position 4");
        assert_eq!(
            err.as_decode().map(DecodeError::kind),
            Some(DecodeErrorKind::Truncated)
        );
    }
}
