use std::fmt;

use bytes::Bytes;
use thiserror::Error;

use super::value::Value;

/// Errors produced while encoding a value tree or a host value.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The value has no bencode representation.
    #[error("value {0} can not be encoded in bencode")]
    Unrepresentable(String),

    /// A dictionary key converted to something other than a byte string.
    #[error("dict keys must be byte strings, got {0:?}")]
    NonByteStringKey(Value),

    /// Two distinct host keys converted to the same byte string.
    #[error("duplicate dict key {0:?}")]
    DuplicateKey(Bytes),

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Category of a lexical error inside an integer body or a length prefix.
///
/// The discriminants are stable and appear in the error message as `(#n)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LexErrorCode {
    /// A multi-digit length prefix starts with `0`.
    PrecedingZeroInSize = 0,
    /// A length or integer does not fit the configured or native limit.
    MaxSizeReached = 1,
    /// A non-digit byte appeared before the `:` of a length prefix.
    IllegalDigitInSize = 2,
    /// An integer body is empty, non-canonical or contains a non-digit byte.
    IllegalDigit = 3,
}

impl LexErrorCode {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LexErrorCode::PrecedingZeroInSize => "PRECEDING_ZERO_IN_SIZE",
            LexErrorCode::MaxSizeReached => "MAX_SIZE_REACHED",
            LexErrorCode::IllegalDigitInSize => "ILLEGAL_DIGIT_IN_SIZE",
            LexErrorCode::IllegalDigit => "ILLEGAL_DIGIT",
        }
    }
}

impl fmt::Display for LexErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A malformed integer or length prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} (#{}), {} at offset {}", .code, .code.number(), .text, .offset)]
pub struct LexError {
    pub code: LexErrorCode,
    pub offset: usize,
    pub text: String,
}

impl LexError {
    pub(crate) fn new(code: LexErrorCode, offset: usize, text: impl Into<String>) -> Self {
        Self {
            code,
            offset,
            text: text.into(),
        }
    }
}

/// Errors produced while decoding a byte buffer.
///
/// Offsets are byte positions in the input passed to the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid input: unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("unexpected byte {byte:#04x} at offset {offset}")]
    UnexpectedByte { byte: u8, offset: usize },

    #[error("unexpected end marker at offset {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("dict key at offset {offset} is not a byte string")]
    NonByteStringKey { offset: usize },

    #[error("dict key at offset {offset} is out of order")]
    UnsortedKey { offset: usize },

    #[error("duplicate dict key at offset {offset}")]
    DuplicateKey { offset: usize },

    #[error("trailing data after value at offset {offset}")]
    TrailingData { offset: usize },

    #[error("nesting too deep at offset {offset}")]
    NestingTooDeep { offset: usize },

    #[error(transparent)]
    Lexical(#[from] LexError),
}

impl DecodeError {
    /// Returns the lexical category, if this is a lexical error.
    pub fn code(&self) -> Option<LexErrorCode> {
        match self {
            DecodeError::Lexical(e) => Some(e.code),
            _ => None,
        }
    }

    /// Byte offset in the input where decoding stopped.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::UnexpectedEof { offset }
            | DecodeError::UnexpectedByte { offset, .. }
            | DecodeError::UnexpectedEnd { offset }
            | DecodeError::NonByteStringKey { offset }
            | DecodeError::UnsortedKey { offset }
            | DecodeError::DuplicateKey { offset }
            | DecodeError::TrailingData { offset }
            | DecodeError::NestingTooDeep { offset } => *offset,
            DecodeError::Lexical(e) => e.offset,
        }
    }
}
