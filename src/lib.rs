//! bcodec - a canonical Bencode codec
//!
//! Converts between an in-memory [`Value`] tree and its bencode byte encoding.
//! The encoder always emits canonical form (sorted dictionary keys, minimal
//! integers) and the decoder is strict by default: malformed length prefixes,
//! non-canonical integers, unsorted dictionaries and trailing bytes are all
//! rejected with a specific error.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`constants`] - default nesting and length limits
//!
//! # Example
//!
//! ```
//! use bcodec::{decode, encode, Value};
//!
//! let value = decode(b"d4:spaml1:ai2eee").unwrap();
//! assert_eq!(value.get(b"spam").and_then(Value::as_list).map(Vec::len), Some(2));
//! assert_eq!(encode(&value).unwrap(), b"d4:spaml1:ai2eee");
//! ```

pub mod bencode;
pub mod constants;

pub use bencode::{
    decode, encode, encode_to, to_bytes, AsBytes, DecodeError, DecodeOptions, Decoder, DictKeys,
    EncodeError, Encoder, LexError, LexErrorCode, ToBencode, Value,
};
