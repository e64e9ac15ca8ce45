use super::error::EncodeError;
use super::to_bencode::ToBencode;
use super::value::Value;
use crate::constants::DEFAULT_MAX_DEPTH;
use std::io::Write;

/// Encodes a bencode value to a byte vector.
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys sorted lexicographically)
///
/// # Errors
///
/// Returns [`EncodeError::NestingTooDeep`] if the value nests more than
/// [`DEFAULT_MAX_DEPTH`] containers. Use [`Encoder::with_max_depth`] for a
/// different limit.
///
/// # Examples
///
/// ```
/// use bcodec::bencode::{encode, Value};
/// use std::collections::BTreeMap;
/// use bytes::Bytes;
///
/// let encoded = encode(&Value::Integer(42)).unwrap();
/// assert_eq!(encoded, b"i42e");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list).unwrap(), b"li1e3:twoe");
///
/// let mut dict = BTreeMap::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    Encoder::new().encode(value)
}

/// Encodes a bencode value into an arbitrary writer.
///
/// On error the writer may already hold a prefix of the output.
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> Result<(), EncodeError> {
    Encoder::new().encode_to(value, writer)
}

/// Converts a host value with [`ToBencode`] and encodes the result.
///
/// ```
/// use bcodec::bencode::to_bytes;
/// use std::collections::HashMap;
///
/// let mut peers = HashMap::new();
/// peers.insert("zeta", vec![1u16, 2]);
/// peers.insert("alpha", vec![3u16]);
/// assert_eq!(to_bytes(&peers).unwrap(), b"d5:alphali3ee4:zetali1ei2eee");
/// ```
pub fn to_bytes<T: ToBencode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    encode(&value.to_bencode()?)
}

/// A configurable encoder.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    max_depth: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum number of nested lists and dictionaries.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::new();
        self.encode_value(value, &mut buf, 0)?;
        tracing::trace!("encoded {} value into {} bytes", value.kind(), buf.len());
        Ok(buf)
    }

    pub fn encode_to<W: Write>(&self, value: &Value, writer: &mut W) -> Result<(), EncodeError> {
        self.encode_value(value, writer, 0)
    }

    fn encode_value<W: Write>(
        &self,
        value: &Value,
        writer: &mut W,
        depth: usize,
    ) -> Result<(), EncodeError> {
        match value {
            Value::Integer(i) => {
                write!(writer, "i{}e", i)?;
            }
            Value::Bytes(b) => write_bytes(b, writer)?,
            Value::List(l) => {
                self.enter(depth)?;
                writer.write_all(b"l")?;
                for item in l {
                    self.encode_value(item, writer, depth + 1)?;
                }
                writer.write_all(b"e")?;
            }
            Value::Dict(d) => {
                self.enter(depth)?;
                writer.write_all(b"d")?;
                // BTreeMap iterates in ascending byte order, which is the canonical key order.
                for (key, val) in d {
                    write_bytes(key, writer)?;
                    self.encode_value(val, writer, depth + 1)?;
                }
                writer.write_all(b"e")?;
            }
        }
        Ok(())
    }

    fn enter(&self, depth: usize) -> Result<(), EncodeError> {
        if depth >= self.max_depth {
            return Err(EncodeError::NestingTooDeep);
        }
        Ok(())
    }
}

fn write_bytes<W: Write>(bytes: &[u8], writer: &mut W) -> Result<(), EncodeError> {
    write!(writer, "{}:", bytes.len())?;
    writer.write_all(bytes)?;
    Ok(())
}
