use super::error::{DecodeError, LexError, LexErrorCode};
use super::value::Value;
use crate::constants::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_STRING_LEN};
use bytes::Bytes;
use std::collections::BTreeMap;

/// Decodes a complete bencode value with the default [`DecodeOptions`].
///
/// The whole input must be consumed; anything after the first value is
/// reported as [`DecodeError::TrailingData`].
///
/// # Examples
///
/// ```
/// use bcodec::bencode::{decode, DecodeError, LexErrorCode, Value};
///
/// assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
/// assert_eq!(decode(b"4:spam").unwrap(), Value::string("spam"));
///
/// let err = decode(b"3abc:xyz").unwrap_err();
/// assert_eq!(err.code(), Some(LexErrorCode::IllegalDigitInSize));
/// assert!(matches!(decode(b""), Err(DecodeError::UnexpectedEof { offset: 0 })));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    Decoder::default().decode(data)
}

/// How the decoder treats dictionary keys that are not in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DictKeys {
    /// Keys must be strictly ascending; unsorted or repeated keys are errors.
    #[default]
    Strict,
    /// Keys may appear in any order; a repeated key keeps its last value.
    Lenient,
}

/// Limits and policies applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub max_depth: usize,
    pub max_string_len: usize,
    pub dict_keys: DictKeys,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            dict_keys: DictKeys::Strict,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Caps the declared length of any byte string.
    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    pub fn with_dict_keys(mut self, dict_keys: DictKeys) -> Self {
        self.dict_keys = dict_keys;
        self
    }
}

/// Forward-only read position over the input.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(len)?;
        let slice = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }
}

/// Result of one recursive step: a value, or the `e` closing the enclosing container.
enum Item {
    Value(Value),
    End,
}

/// A bencode decoder with configurable limits.
///
/// ```
/// use bcodec::bencode::{DecodeOptions, Decoder, DictKeys, encode};
///
/// let decoder = Decoder::new(DecodeOptions::default().with_dict_keys(DictKeys::Lenient));
/// let value = decoder.decode(b"d1:zi1e1:ai2ee").unwrap();
/// assert_eq!(encode(&value).unwrap(), b"d1:ai2e1:zi1ee");
///
/// let (value, used) = decoder.decode_prefix(b"i7etrailer").unwrap();
/// assert_eq!((value.as_integer(), used), (Some(7), 3));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes exactly one value spanning the whole input.
    pub fn decode(&self, data: &[u8]) -> Result<Value, DecodeError> {
        let (value, consumed) = self.decode_prefix(data)?;
        if consumed != data.len() {
            tracing::debug!(
                "rejecting {} trailing bytes after bencode value",
                data.len() - consumed
            );
            return Err(DecodeError::TrailingData { offset: consumed });
        }
        Ok(value)
    }

    /// Decodes the first value in `data` and returns it with the number of bytes it used.
    pub fn decode_prefix(&self, data: &[u8]) -> Result<(Value, usize), DecodeError> {
        let mut cursor = Cursor::new(data);
        match self.decode_root(&mut cursor) {
            Ok(value) => {
                tracing::trace!("decoded {} from {} bytes", value.kind(), cursor.pos());
                Ok((value, cursor.pos()))
            }
            Err(e) => {
                tracing::debug!("bencode decode failed: {}", e);
                Err(e)
            }
        }
    }

    fn decode_root(&self, c: &mut Cursor<'_>) -> Result<Value, DecodeError> {
        let offset = c.pos();
        match self.decode_item(c, 0)? {
            Item::Value(v) => Ok(v),
            Item::End => Err(DecodeError::UnexpectedEnd { offset }),
        }
    }

    /// `depth` is the number of containers enclosing the item.
    fn decode_item(&self, c: &mut Cursor<'_>, depth: usize) -> Result<Item, DecodeError> {
        let offset = c.pos();
        let tag = c.next().ok_or(DecodeError::UnexpectedEof { offset })?;

        match tag {
            b'e' => Ok(Item::End),
            b'i' => decode_integer(c).map(Item::Value),
            b'l' => {
                self.enter(depth, offset)?;
                self.decode_list(c, depth).map(Item::Value)
            }
            b'd' => {
                self.enter(depth, offset)?;
                self.decode_dict(c, depth, offset).map(Item::Value)
            }
            b'0'..=b'9' => self
                .decode_bytes(c, tag, offset)
                .map(|b| Item::Value(Value::Bytes(b))),
            byte => Err(DecodeError::UnexpectedByte { byte, offset }),
        }
    }

    fn enter(&self, depth: usize, offset: usize) -> Result<(), DecodeError> {
        if depth >= self.options.max_depth {
            return Err(DecodeError::NestingTooDeep { offset });
        }
        Ok(())
    }

    fn decode_list(&self, c: &mut Cursor<'_>, depth: usize) -> Result<Value, DecodeError> {
        let mut list = Vec::new();
        loop {
            match self.decode_item(c, depth + 1)? {
                Item::Value(v) => list.push(v),
                Item::End => return Ok(Value::List(list)),
            }
        }
    }

    fn decode_dict(
        &self,
        c: &mut Cursor<'_>,
        depth: usize,
        start: usize,
    ) -> Result<Value, DecodeError> {
        let mut dict: BTreeMap<Bytes, Value> = BTreeMap::new();
        let mut canonical = true;

        loop {
            let key_offset = c.pos();
            let first = match c.next() {
                Some(b'e') => break,
                Some(b @ b'0'..=b'9') => b,
                Some(_) => return Err(DecodeError::NonByteStringKey { offset: key_offset }),
                None => return Err(DecodeError::UnexpectedEof { offset: key_offset }),
            };
            let key = self.decode_bytes(c, first, key_offset)?;

            if let Some((last, _)) = dict.last_key_value() {
                if key <= *last {
                    match self.options.dict_keys {
                        DictKeys::Strict if key == *last => {
                            return Err(DecodeError::DuplicateKey { offset: key_offset })
                        }
                        DictKeys::Strict => {
                            return Err(DecodeError::UnsortedKey { offset: key_offset })
                        }
                        DictKeys::Lenient => canonical = false,
                    }
                }
            }

            let value_offset = c.pos();
            let value = match self.decode_item(c, depth + 1)? {
                Item::Value(v) => v,
                Item::End => return Err(DecodeError::UnexpectedEnd { offset: value_offset }),
            };
            dict.insert(key, value);
        }

        if !canonical {
            tracing::debug!("accepted non-canonical dict key order at offset {}", start);
        }
        Ok(Value::Dict(dict))
    }

    /// Parses `<len>:<payload>` where `first` is the already consumed leading digit at `offset`.
    fn decode_bytes(
        &self,
        c: &mut Cursor<'_>,
        first: u8,
        offset: usize,
    ) -> Result<Bytes, DecodeError> {
        let mut len = usize::from(first - b'0');

        loop {
            let pos = c.pos();
            match c.next() {
                Some(b':') => break,
                Some(b @ b'0'..=b'9') => {
                    if first == b'0' {
                        return Err(lex(
                            LexErrorCode::PrecedingZeroInSize,
                            offset,
                            "length prefix has a leading zero",
                        ));
                    }
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(b - b'0')))
                        .ok_or_else(|| {
                            lex(
                                LexErrorCode::MaxSizeReached,
                                offset,
                                "length prefix overflows usize",
                            )
                        })?;
                }
                Some(b) => {
                    return Err(lex(
                        LexErrorCode::IllegalDigitInSize,
                        pos,
                        format!("illegal byte {:#04x} in length prefix", b),
                    ))
                }
                None => return Err(DecodeError::UnexpectedEof { offset: pos }),
            }
        }

        if len > self.options.max_string_len {
            return Err(lex(
                LexErrorCode::MaxSizeReached,
                offset,
                format!(
                    "length exceeds limit of {} bytes",
                    self.options.max_string_len
                ),
            ));
        }

        let payload = c.take(len).ok_or(DecodeError::UnexpectedEof {
            offset: c.data.len(),
        })?;
        Ok(Bytes::copy_from_slice(payload))
    }
}

/// Parses the body of `i<digits>e`; the `i` is already consumed.
fn decode_integer(c: &mut Cursor<'_>) -> Result<Value, DecodeError> {
    let start = c.pos();
    let mut negative = false;
    let mut digits = 0usize;
    let mut value: i128 = 0;

    loop {
        let pos = c.pos();
        let b = c.next().ok_or(DecodeError::UnexpectedEof { offset: pos })?;
        match b {
            b'e' => break,
            b'-' if pos == start => negative = true,
            b'0'..=b'9' => {
                if digits == 1 && value == 0 {
                    return Err(lex(
                        LexErrorCode::IllegalDigit,
                        pos,
                        "leading zero in integer",
                    ));
                }
                let d = i128::from(b - b'0');
                value = value
                    .checked_mul(10)
                    .and_then(|v| {
                        if negative {
                            v.checked_sub(d)
                        } else {
                            v.checked_add(d)
                        }
                    })
                    .ok_or_else(|| {
                        lex(
                            LexErrorCode::MaxSizeReached,
                            start,
                            "integer exceeds 128-bit range",
                        )
                    })?;
                digits += 1;
            }
            _ => {
                return Err(lex(
                    LexErrorCode::IllegalDigit,
                    pos,
                    format!("illegal byte {:#04x} in integer", b),
                ))
            }
        }
    }

    if digits == 0 {
        return Err(lex(LexErrorCode::IllegalDigit, start, "integer has no digits"));
    }
    if negative && value == 0 {
        return Err(lex(LexErrorCode::IllegalDigit, start, "negative zero"));
    }

    Ok(Value::Integer(value))
}

fn lex(code: LexErrorCode, offset: usize, text: impl Into<String>) -> DecodeError {
    DecodeError::Lexical(LexError::new(code, offset, text))
}
